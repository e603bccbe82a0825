//! The single selection register owned by the coordinator.

/// Last-writer-wins register holding the most recent text selection.
///
/// Exactly one instance exists system-wide. It is overwritten by every
/// `text-selected` message and cleared when the active tab changes or a
/// page finishes loading. No history is kept and no validation happens
/// beyond trimming.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    text: String,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite with a new selection. The stored value is trimmed.
    pub fn set(&mut self, text: &str) {
        self.text = text.trim().to_string();
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_trims_and_overwrites() {
        let mut sel = Selection::new();
        sel.set("  first  ");
        assert_eq!(sel.text(), "first");
        sel.set("second");
        assert_eq!(sel.text(), "second");
    }

    #[test]
    fn whitespace_only_selection_is_empty() {
        let mut sel = Selection::new();
        sel.set("   \n\t ");
        assert!(sel.is_empty());
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut sel = Selection::new();
        sel.set("something");
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.text(), "");
    }
}
