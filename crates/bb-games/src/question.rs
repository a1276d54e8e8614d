//! The quiz item type.

use serde::{Deserialize, Serialize};

/// One multiple-choice quiz item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Text shown to the player.
    pub prompt: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub answer: usize,
}

impl Question {
    /// Returns true if the chosen option index is the correct one.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }

    /// The correct option's text.
    pub fn answer_text(&self) -> &str {
        &self.options[self.answer]
    }
}
