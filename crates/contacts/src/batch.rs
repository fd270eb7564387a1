//! Batch driver: recognise documents, parse them in order, render once.
//!
//! A batch is all-or-nothing. The first unsupported document (or an oversized
//! batch) aborts it, and no table is produced. Reading document text is the
//! caller's job; the driver only sees names and contents.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::{
    card::START_MARKER,
    config::ConvertOptions,
    contact::Contact,
    error::{ConvertError, ConvertResult},
    table::Table,
    vcard::CardParser,
};

/// File extension of card documents.
pub const CARD_EXTENSION: &str = ".vcf";

/// One input document: a name (for recognition and errors) and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }

    /// See [`is_supported`].
    #[must_use]
    pub fn is_supported(&self) -> bool {
        is_supported(&self.name, &self.text)
    }
}

/// A document is accepted when its name ends with `.vcf` (any case) or its
/// text contains `BEGIN:VCARD`.
///
/// # Examples
///
/// ```
/// use contacts::batch::is_supported;
///
/// assert!(is_supported("friends.VCF", ""));
/// assert!(is_supported("export.txt", "BEGIN:VCARD\nEND:VCARD"));
/// assert!(!is_supported("notes.txt", "hello"));
/// ```
#[must_use]
pub fn is_supported(name: &str, text: &str) -> bool {
    has_card_extension(name) || text.contains(START_MARKER)
}

fn has_card_extension(name: &str) -> bool {
    let ext = CARD_EXTENSION.len();
    name.len() >= ext
        && name.is_char_boundary(name.len() - ext)
        && name[name.len() - ext..].eq_ignore_ascii_case(CARD_EXTENSION)
}

/// Fails with [`ConvertError::TooManyDocuments`] when `count` exceeds `limit`.
pub fn check_batch_size(count: usize, limit: usize) -> ConvertResult<()> {
    if count > limit {
        return Err(ConvertError::TooManyDocuments { limit, actual: count });
    }
    Ok(())
}

/// Accumulates records across documents.
///
/// # Example
///
/// ```
/// use contacts::batch::{Batch, Document};
/// use contacts::config::ConvertOptions;
///
/// let mut batch = Batch::new(ConvertOptions::default());
/// batch.add(&Document::new("a.vcf", "BEGIN:VCARD\nFN:A\nEND:VCARD\n")).unwrap();
/// batch.add(&Document::new("b.vcf", "BEGIN:VCARD\nFN:B\nEND:VCARD\n")).unwrap();
///
/// assert_eq!(batch.records().len(), 2);
/// assert_eq!(batch.documents_read(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Batch {
    options: ConvertOptions,
    parser: CardParser,
    records: Vec<Contact>,
    documents_read: usize,
}

impl Batch {
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            parser: CardParser::new(options.duplicates),
            records: Vec::new(),
            documents_read: 0,
        }
    }

    /// Recognises and parses one document, appending its records.
    ///
    /// Returns the number of records the document contributed. On error the
    /// batch should be discarded.
    pub fn add(&mut self, document: &Document) -> ConvertResult<usize> {
        check_batch_size(self.documents_read + 1, self.options.max_documents)?;

        if !document.is_supported() {
            return Err(ConvertError::UnsupportedFormat { name: document.name.clone() });
        }

        let records = self.parser.parse(&document.text);
        let count = records.len();
        debug!(document = %document.name, cards = count, "document parsed");

        self.records.extend(records);
        self.documents_read += 1;
        Ok(count)
    }

    /// Records collected so far, in discovery order.
    #[must_use]
    pub fn records(&self) -> &[Contact] {
        &self.records
    }

    #[must_use]
    pub fn documents_read(&self) -> usize {
        self.documents_read
    }

    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Renders the collected records to `writer`; returns the number of rows
    /// written, which is zero when no record has a field.
    pub fn write_to<W: Write>(&self, writer: W) -> ConvertResult<usize> {
        self.warn_if_empty();
        Table::new(&self.records).write_to(writer, self.options.line_ending)
    }

    /// Renders the collected records into an [`Export`].
    pub fn finish(self) -> ConvertResult<Export> {
        self.warn_if_empty();
        let csv = Table::new(&self.records).render(self.options.line_ending)?;
        info!(contacts = self.records.len(), documents = self.documents_read, "batch converted");
        Ok(Export { csv, contacts: self.records.len(), documents: self.documents_read })
    }

    fn warn_if_empty(&self) {
        if self.records.is_empty() {
            warn!(documents = self.documents_read, "no contacts found");
        }
    }
}

/// Result of a successful batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Rendered CSV text.
    pub csv: String,
    /// Number of contact records (data rows).
    pub contacts: usize,
    /// Number of documents processed.
    pub documents: usize,
}

/// Converts a whole batch of documents into one CSV export.
///
/// The size limit is checked before any parsing; the first unsupported
/// document aborts the batch.
pub fn convert(documents: &[Document], options: &ConvertOptions) -> ConvertResult<Export> {
    check_batch_size(documents.len(), options.max_documents)?;

    let mut batch = Batch::new(*options);
    for document in documents {
        batch.add(document)?;
    }
    batch.finish()
}
