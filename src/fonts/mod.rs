//! Font names seen during one export run.

/// Collects the fonts of every serialized text record.
///
/// Recording is cheap and keeps duplicates; [`FontCatalog::finalize`] sorts
/// and deduplicates once at the end of the run.
#[derive(Clone, Debug, Default)]
pub struct FontCatalog {
    names: Vec<String>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one use of `font_name`.
    pub fn record(&mut self, font_name: impl Into<String>) {
        self.names.push(font_name.into());
    }

    /// Number of recorded uses, duplicates included.
    pub fn recorded(&self) -> usize {
        self.names.len()
    }

    /// Returns the distinct font names in lexicographic order.
    pub fn finalize(mut self) -> Vec<String> {
        self.names.sort();
        self.names.dedup();
        self.names
    }
}
