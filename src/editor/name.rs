//! Text field with a read/edit mode, used for lane names

use super::pending::Tracked;

#[derive(Debug, Clone)]
pub struct NameEditor {
    text: Tracked<String>,
    /// Text typed in edit mode that has not been accepted yet
    input: String,
    edit_mode: bool,
}

impl NameEditor {
    /// An editor starts in edit mode when there is no saved text yet
    pub fn new(saved: Option<&str>) -> Self {
        let saved = saved.unwrap_or_default().to_string();
        let edit_mode = saved.is_empty();
        Self {
            input: saved.clone(),
            text: Tracked::new(saved),
            edit_mode,
        }
    }

    pub fn text(&self) -> &str {
        self.text.current()
    }

    pub fn saved_text(&self) -> &str {
        self.text.baseline()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    pub fn start_edit(&mut self) {
        if !self.edit_mode {
            self.input = self.text.current().clone();
            self.edit_mode = true;
        }
    }

    /// Replace the typed text; it becomes the draft on [`NameEditor::commit`]
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.start_edit();
        self.input = input.into();
    }

    /// Accept new text and leave edit mode
    pub fn update(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.input = text.clone();
        self.text.set(text);
        self.edit_mode = false;
    }

    /// Fold typed text into the draft and return the draft.
    ///
    /// Edit mode is left unless the result is empty.
    pub fn commit(&mut self) -> &str {
        if self.edit_mode {
            self.text.set(self.input.clone());
            self.edit_mode = self.input.is_empty();
        }
        self.text.current()
    }

    pub fn is_dirty(&self) -> bool {
        self.text.is_dirty()
    }

    pub fn reset(&mut self) {
        self.text.reset();
        self.input = self.text.current().clone();
        self.edit_mode = self.input.is_empty();
    }

    /// Move the saved text, keeping the draft. A changed saved text
    /// recomputes the mode.
    pub fn rebase(&mut self, saved: impl Into<String>) {
        let saved = saved.into();
        if saved != *self.text.baseline() {
            self.edit_mode = saved.is_empty();
        }
        self.text.rebase(saved);
    }
}
