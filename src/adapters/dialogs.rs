use crate::domain::ports::Dialogs;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers confirmation prompts from a script and records what was asked.
/// When the script runs out, `fallback` is returned.
#[derive(Debug)]
pub struct ScriptedDialogs {
    answers: Mutex<VecDeque<bool>>,
    fallback: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedDialogs {
    pub fn always(answer: bool) -> Self {
        Self::with_answers(Vec::new(), answer)
    }

    pub fn with_answers(answers: Vec<bool>, fallback: bool) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            fallback,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&self, message: &str) -> bool {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(message.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut a| a.pop_front())
            .unwrap_or(self.fallback)
    }
}
