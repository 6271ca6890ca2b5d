use crate::traits::StatusLabel;

/// Status label that keeps its text in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLabel {
    text: String,
    updates: usize,
}

impl TextLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            updates: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times the text was written
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl StatusLabel for TextLabel {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.updates += 1;
    }
}
