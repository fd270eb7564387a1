//! Table serializer: reconciles heterogeneous records into one CSV table.
//!
//! The header is the union of every record's field names in first-seen
//! order, so it can only be built once the whole record set is known. Rows
//! are rendered afterwards, one per record, with empty cells for the fields a
//! record does not have.
//!
//! # Example
//!
//! ```
//! use contacts::contact::Contact;
//! use contacts::table::serialize;
//!
//! let records: Vec<Contact> = vec![
//!     [("firstName", "Ann"), ("mobilePhone", "555")].into_iter().collect(),
//!     [("firstName", "Bob"), ("workEmail", "bob@acme.io")].into_iter().collect(),
//! ];
//!
//! let csv = serialize(&records).unwrap();
//! let lines: Vec<&str> = csv.lines().collect();
//! assert_eq!(lines, ["firstName,mobilePhone,workEmail", "Ann,555,", "Bob,,bob@acme.io"]);
//! ```

use std::{collections::HashSet, io::Write};

use tracing::debug;

use crate::{config::LineEnding, contact::Contact, error::ConvertResult, writer::TableWriter};

/// Ordered, duplicate-free list of column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
    seen: HashSet<String>,
}

impl Header {
    /// Collects the field names of all records, first appearance wins.
    #[must_use]
    pub fn from_records(records: &[Contact]) -> Self {
        let mut header = Self::default();
        for record in records {
            header.extend(record.keys());
        }
        header
    }

    /// Adds names that are not yet present, keeping their order.
    pub fn extend<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            if !self.seen.contains(name) {
                self.seen.insert(name.to_string());
                self.columns.push(name.to_string());
            }
        }
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A record set paired with its header.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    header: Header,
    records: &'a [Contact],
}

impl<'a> Table<'a> {
    /// Builds the header for `records`.
    #[must_use]
    pub fn new(records: &'a [Contact]) -> Self {
        Self { header: Header::from_records(records), records }
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn records(&self) -> &'a [Contact] {
        self.records
    }

    /// Rows as cell slices, aligned to the header.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.records.iter().map(|record| {
            self.header.columns().iter().map(|column| record.get(column).unwrap_or("")).collect()
        })
    }

    /// Writes header and rows to `writer`, returns the number of data rows.
    ///
    /// A table without columns writes nothing.
    pub fn write_to<W: Write>(&self, writer: W, line_ending: LineEnding) -> ConvertResult<usize> {
        if self.header.is_empty() {
            debug!(records = self.records.len(), "no columns, nothing to write");
            return Ok(0);
        }

        let mut writer = TableWriter::new(writer, &self.header, line_ending);
        writer.write_header()?;
        writer.write_all(self.records)?;
        writer.flush()?;

        debug!(columns = self.header.len(), rows = writer.records_written(), "table written");
        Ok(writer.records_written())
    }

    /// Renders the table to a string.
    pub fn render(&self, line_ending: LineEnding) -> ConvertResult<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, line_ending)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Renders `records` as CSV with CRLF line endings.
pub fn serialize(records: &[Contact]) -> ConvertResult<String> {
    serialize_with(records, LineEnding::default())
}

/// Renders `records` as CSV with the given line ending.
pub fn serialize_with(records: &[Contact], line_ending: LineEnding) -> ConvertResult<String> {
    Table::new(records).render(line_ending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Contact {
        pairs.iter().copied().collect()
    }

    #[test]
    fn header_is_union_in_first_seen_order() {
        let records = vec![
            record(&[("firstName", "A"), ("mobilePhone", "1")]),
            record(&[("workEmail", "a@x"), ("firstName", "B"), ("notes", "n")]),
        ];
        let header = Header::from_records(&records);
        assert_eq!(header.columns(), ["firstName", "mobilePhone", "workEmail", "notes"]);
    }

    #[test]
    fn two_records_with_different_keys() {
        let records = vec![
            record(&[("firstName", "Ann"), ("mobilePhone", "555-0001")]),
            record(&[("firstName", "Bob"), ("workEmail", "bob@acme.io")]),
        ];

        let csv = serialize(&records).unwrap();
        assert_eq!(
            csv,
            "firstName,mobilePhone,workEmail\r\nAnn,555-0001,\r\nBob,,bob@acme.io\r\n"
        );
    }

    #[test]
    fn rows_are_rectangular() {
        let records = vec![
            record(&[("a", "1")]),
            record(&[("b", "2"), ("c", "3")]),
            Contact::new(),
            record(&[("d", "4")]),
        ];
        let table = Table::new(&records);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == table.header().len()));
        assert_eq!(rows[2], ["", "", "", ""]);
    }

    #[test]
    fn empty_record_set_renders_nothing() {
        assert_eq!(serialize(&[]).unwrap(), "");
        assert_eq!(serialize(&[Contact::new(), Contact::new()]).unwrap(), "");
    }

    #[test]
    fn single_column_missing_value_is_an_empty_line() {
        let records = vec![record(&[("fullName", "A")]), Contact::new()];
        let csv = serialize_with(&records, LineEnding::Lf).unwrap();
        assert_eq!(csv, "fullName\nA\n\n");
    }

    #[test]
    fn line_breaks_inside_cells_are_quoted() {
        let records = vec![record(&[("notes", "line one\nline two"), ("fullName", "X")])];
        let csv = serialize_with(&records, LineEnding::Lf).unwrap();
        assert_eq!(csv, "notes,fullName\n\"line one\nline two\",X\n");
    }

    #[test]
    fn plain_cells_are_not_quoted() {
        let records =
            vec![record(&[("fullName", "Zoë O'Neil"), ("website", "https://x.io/a?b=c")])];
        let csv = serialize_with(&records, LineEnding::Lf).unwrap();
        assert_eq!(csv, "fullName,website\nZoë O'Neil,https://x.io/a?b=c\n");
    }

    #[test]
    fn same_records_same_output() {
        let records = vec![
            record(&[("lastName", "Doe"), ("phone1", "1")]),
            record(&[("phone2", "2"), ("lastName", "Roe")]),
        ];
        assert_eq!(serialize(&records).unwrap(), serialize(&records).unwrap());
    }
}
