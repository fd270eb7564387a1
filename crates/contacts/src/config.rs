//! Conversion options.
//!
//! Plain data with sensible defaults; the CLI fills it from its arguments.

/// Default upper bound on documents accepted in one batch.
pub const DEFAULT_MAX_DOCUMENTS: usize = 3000;

/// What to do when a card repeats a qualified phone, email or address
/// (e.g. two `TEL;TYPE=work` lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicatePolicy {
    /// The later occurrence replaces the earlier one.
    #[default]
    Overwrite,
    /// The first occurrence is kept, later ones are dropped.
    KeepFirst,
}

/// Record terminator used when rendering the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    /// `\r\n`
    #[default]
    Crlf,
    /// `\n`
    Lf,
}

impl LineEnding {
    /// Returns the terminator as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

impl From<LineEnding> for csv::Terminator {
    fn from(ending: LineEnding) -> Self {
        match ending {
            LineEnding::Crlf => csv::Terminator::CRLF,
            LineEnding::Lf => csv::Terminator::Any(b'\n'),
        }
    }
}

/// Options for one conversion batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Maximum number of documents in a batch.
    pub max_documents: usize,
    /// Handling of repeated qualifiers inside one card.
    pub duplicates: DuplicatePolicy,
    /// Line terminator of the rendered CSV.
    pub line_ending: LineEnding,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_documents: DEFAULT_MAX_DOCUMENTS,
            duplicates: DuplicatePolicy::default(),
            line_ending: LineEnding::default(),
        }
    }
}
