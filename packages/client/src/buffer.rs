//! Local document buffer and input commands.

/// Local copy of the shared document
///
/// Remote content replaces the buffer without marking it dirty, so it is
/// neither relayed back nor autosaved by this client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBuffer {
    content: String,
    dirty: bool,
}

impl DocumentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replace the buffer with content received from the server
    pub fn apply_remote(&mut self, content: String) {
        self.content = content;
        self.dirty = false;
    }

    /// Apply the content returned by a (re)join
    ///
    /// Unsaved local edits win over the loaded snapshot: the buffer is kept
    /// as is and `true` is returned so the caller can push it to the room.
    pub fn apply_loaded(&mut self, content: String) -> bool {
        if self.dirty {
            return true;
        }
        self.content = content;
        false
    }

    /// Append a typed line and return the new content
    pub fn append_line(&mut self, line: &str) -> &str {
        if !self.content.is_empty() {
            self.content.push('\n');
        }
        self.content.push_str(line);
        self.dirty = true;
        &self.content
    }

    /// Empty the buffer and return the new (empty) content
    pub fn clear(&mut self) -> &str {
        self.content.clear();
        self.dirty = true;
        &self.content
    }

    /// Content to autosave, only if it changed since the last save
    pub fn take_save(&mut self) -> Option<String> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.content.clone())
    }

    /// Content to save unconditionally (manual save)
    pub fn force_save(&mut self) -> String {
        self.dirty = false;
        self.content.clone()
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// A line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Plain text appended to the document
    Text(String),
    Save,
    Show,
    Stats,
    Clear,
    /// Write the buffer to `<document id>.txt`
    Export,
    Help,
    Quit,
    Unknown(String),
}

impl InputCommand {
    pub fn parse(line: &str) -> Self {
        // "//text" escapes a line that starts with a slash
        if let Some(text) = line.trim().strip_prefix("//") {
            return Self::Text(format!("/{}", text));
        }
        match line.trim() {
            "/save" => Self::Save,
            "/show" => Self::Show,
            "/stats" => Self::Stats,
            "/clear" => Self::Clear,
            "/export" => Self::Export,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            cmd if cmd.starts_with('/') => Self::Unknown(cmd.to_string()),
            _ => Self::Text(line.to_string()),
        }
    }
}
