//! Sitemap XML wire format
//!
//! Parsing accepts the two sitemap shapes, a flat `<urlset>` and a
//! `<sitemapindex>`, matching elements by local name so namespace prefixes
//! do not matter. Serialization always writes the flat shape with all four
//! child fields populated.

use crate::sitemap::model::{RecordDefaults, SitemapDocument, SitemapModel, UrlRecord};
use crate::FormatError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;

/// Namespace written on every serialized `<urlset>`
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Root shape detected while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    UrlSet,
    Index,
}

/// Fields collected for the `<url>` or `<sitemap>` entry being read
#[derive(Debug, Default)]
struct EntryFields {
    loc: Option<String>,
    lastmod: Option<String>,
    changefreq: Option<String>,
    priority: Option<String>,
}

impl EntryFields {
    fn slot(&mut self, field: &str) -> Option<&mut Option<String>> {
        match field {
            "loc" => Some(&mut self.loc),
            "lastmod" => Some(&mut self.lastmod),
            "changefreq" => Some(&mut self.changefreq),
            "priority" => Some(&mut self.priority),
            _ => None,
        }
    }

    fn push_text(&mut self, field: &str, text: &str) {
        if let Some(slot) = self.slot(field) {
            slot.get_or_insert_with(String::new).push_str(text);
        }
    }
}

/// Parses a sitemap document
///
/// Missing `<lastmod>`, `<changefreq>` and `<priority>` values are filled
/// here, once, so downstream code never sees optional fields. Entries without
/// a `<loc>` are skipped.
///
/// # Errors
///
/// * `FormatError::Empty` - the document is blank or has no root element
/// * `FormatError::Xml` - the document is not well-formed XML
/// * `FormatError::UnexpectedRoot` - the root is neither `urlset` nor `sitemapindex`
///
/// # Example
///
/// ```
/// use sitemap_shot::sitemap::{parse_sitemap, SitemapDocument};
///
/// let xml = r#"<urlset><url><loc>https://example.com/</loc></url></urlset>"#;
/// match parse_sitemap(xml).unwrap() {
///     SitemapDocument::UrlSet(urls) => assert_eq!(urls[0].priority, "0.5"),
///     SitemapDocument::Index(_) => unreachable!(),
/// }
/// ```
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument, FormatError> {
    if xml.trim().is_empty() {
        return Err(FormatError::Empty);
    }

    let defaults = RecordDefaults::now();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut root: Option<Root> = None;
    let mut stack: Vec<String> = Vec::new();
    let mut current: Option<EntryFields> = None;
    let mut records: SitemapModel = Vec::new();
    let mut children: Vec<String> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            FormatError::Xml(format!("{} at position {}", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if stack.is_empty() {
                    root = Some(detect_root(&name, root)?);
                } else if stack.len() == 1 && is_entry(root, &name) {
                    current = Some(EntryFields::default());
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if stack.is_empty() {
                    root = Some(detect_root(&name, root)?);
                }
            }
            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|err| FormatError::Xml(err.to_string()))?;
                collect_text(&stack, &mut current, &text)?;
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                let text = String::from_utf8_lossy(&raw);
                collect_text(&stack, &mut current, &text)?;
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if stack.len() == 2 && is_entry(root, &name) {
                    if let Some(fields) = current.take() {
                        finish_entry(root, fields, &defaults, &mut records, &mut children);
                    }
                }
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(FormatError::Xml(format!(
            "unexpected end of document inside <{}>",
            open
        )));
    }

    match root {
        Some(Root::UrlSet) => Ok(SitemapDocument::UrlSet(records)),
        Some(Root::Index) => Ok(SitemapDocument::Index(children)),
        None => Err(FormatError::Empty),
    }
}

fn detect_root(name: &str, existing: Option<Root>) -> Result<Root, FormatError> {
    if existing.is_some() {
        return Err(FormatError::Xml(format!(
            "multiple root elements, found second root <{}>",
            name
        )));
    }

    match name {
        "urlset" => Ok(Root::UrlSet),
        "sitemapindex" => Ok(Root::Index),
        other => Err(FormatError::UnexpectedRoot(other.to_string())),
    }
}

fn is_entry(root: Option<Root>, name: &str) -> bool {
    matches!(
        (root, name),
        (Some(Root::UrlSet), "url") | (Some(Root::Index), "sitemap")
    )
}

fn collect_text(
    stack: &[String],
    current: &mut Option<EntryFields>,
    text: &str,
) -> Result<(), FormatError> {
    if stack.is_empty() {
        return Err(FormatError::Xml(
            "text content outside of the root element".to_string(),
        ));
    }

    // Only direct children of an entry carry data: <urlset><url><loc>
    if stack.len() == 3 {
        if let Some(fields) = current.as_mut() {
            fields.push_text(&stack[2], text);
        }
    }

    Ok(())
}

fn finish_entry(
    root: Option<Root>,
    fields: EntryFields,
    defaults: &RecordDefaults,
    records: &mut SitemapModel,
    children: &mut Vec<String>,
) {
    let Some(loc) = fields.loc.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()) else {
        tracing::debug!("Skipping sitemap entry without <loc>");
        return;
    };

    match root {
        Some(Root::UrlSet) => records.push(UrlRecord::from_parts(
            loc,
            fields.lastmod,
            fields.changefreq,
            fields.priority,
            defaults,
        )),
        Some(Root::Index) => children.push(loc),
        None => {}
    }
}

/// Escapes the five XML metacharacters
///
/// Borrows the input when nothing needs escaping.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Serializes a flat sitemap to `<urlset>` XML
pub fn to_xml(model: &[UrlRecord]) -> String {
    let mut xml = String::with_capacity(128 + model.len() * 160);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));

    for record in model {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&record.location)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            escape_xml(&record.last_modified)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            escape_xml(&record.change_frequency)
        ));
        xml.push_str(&format!(
            "    <priority>{}</priority>\n",
            escape_xml(&record.priority)
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
