//! Continue-or-abort decisions after a failed capture

use dialoguer::Confirm;
use std::collections::VecDeque;

/// Decides whether a run continues after a failed capture
///
/// `true` continues with the next job; `false` aborts the run.
pub trait Decider {
    fn decide(&mut self, message: &str) -> bool;
}

impl<F> Decider for F
where
    F: FnMut(&str) -> bool,
{
    fn decide(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Asks the operator on the terminal
///
/// Anything but an explicit yes aborts, including a closed stdin.
#[derive(Debug, Default)]
pub struct TerminalDecider;

impl Decider for TerminalDecider {
    fn decide(&mut self, message: &str) -> bool {
        Confirm::new()
            .with_prompt(format!("{}\nContinue?", message))
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Replays a fixed list of answers and records every prompt
///
/// Once the answers run out, every further decision is `false`.
#[derive(Debug, Default)]
pub struct ScriptedDecider {
    answers: VecDeque<bool>,
    prompts: Vec<String>,
}

impl ScriptedDecider {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Every message this decider was asked about, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Decider for ScriptedDecider {
    fn decide(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
