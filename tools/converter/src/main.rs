//! CLI tool for converting vCard files into a single CSV table.
//!
//! # Usage
//!
//! ```bash
//! # Merge several exports into one table
//! vcf2csv phone.vcf work/*.vcf --output contacts.csv
//!
//! # Read from stdin, write to stdout
//! cat contacts.vcf | vcf2csv > contacts.csv
//!
//! # Keep the first of repeated qualifiers, Unix line endings
//! vcf2csv --keep-first --line-ending lf contacts.vcf
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=debug` for per-file details.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use contacts::batch::check_batch_size;
use contacts::config::DEFAULT_MAX_DOCUMENTS;
use contacts::prelude::*;
use tracing::debug;

/// Name given to a document read from standard input.
const STDIN_NAME: &str = "<stdin>";

/// Convert vCard contact files into one CSV table.
///
/// Every file must either end in `.vcf` or contain `BEGIN:VCARD`; one
/// unsupported file aborts the whole conversion and no table is written.
#[derive(Parser, Debug)]
#[command(name = "vcf2csv")]
#[command(version, about)]
struct Args {
    /// Input files. If none are given, reads one document from stdin.
    inputs: Vec<PathBuf>,

    /// Output file path. If not specified, writes to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of input files accepted in one run.
    #[arg(long, default_value_t = DEFAULT_MAX_DOCUMENTS)]
    max_files: usize,

    /// Keep the first phone/email/address of a repeated type instead of the last.
    #[arg(long)]
    keep_first: bool,

    /// Line terminator of the CSV output.
    #[arg(long, value_enum, default_value_t = LineEndingArg::Crlf)]
    line_ending: LineEndingArg,
}

/// Line terminators for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LineEndingArg {
    /// `\r\n`
    Crlf,
    /// `\n`
    Lf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Crlf => LineEnding::Crlf,
            LineEndingArg::Lf => LineEnding::Lf,
        }
    }
}

impl Args {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            max_documents: self.max_files,
            duplicates: if self.keep_first {
                DuplicatePolicy::KeepFirst
            } else {
                DuplicatePolicy::Overwrite
            },
            line_ending: self.line_ending.into(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Parse everything before touching the output, so a failed batch leaves no file behind
    let batch = if args.inputs.is_empty() {
        let mut text = String::new();
        stdin().lock().read_to_string(&mut text).context("Failed to read stdin")?;
        collect_documents([Document::new(STDIN_NAME, text)], args.options())?
    } else {
        collect_files(&args.inputs, args.options())?
    };

    let output: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(stdout().lock()),
    };

    write_table(&batch, output)?;

    // Report result to stderr (so it doesn't interfere with stdout output)
    eprintln!(
        "Converted {} contact(s) from {} file(s)",
        batch.records().len(),
        batch.documents_read()
    );

    Ok(())
}

/// Reads and parses every file in order. Stops at the first failure.
fn collect_files(paths: &[PathBuf], options: ConvertOptions) -> Result<Batch> {
    check_batch_size(paths.len(), options.max_documents)?;

    let mut batch = Batch::new(options);
    for path in paths {
        let document = load_document(path)?;
        add_document(&mut batch, &document)?;
    }
    Ok(batch)
}

/// Parses already loaded documents.
fn collect_documents(
    documents: impl IntoIterator<Item = Document>,
    options: ConvertOptions,
) -> Result<Batch> {
    let mut batch = Batch::new(options);
    for document in documents {
        add_document(&mut batch, &document)?;
    }
    Ok(batch)
}

fn add_document(batch: &mut Batch, document: &Document) -> Result<()> {
    let count = batch
        .add(document)
        .with_context(|| format!("Failed to process '{}'", document.name))?;
    debug!(document = %document.name, contacts = count, "added");
    Ok(())
}

fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    Ok(Document::new(path.display().to_string(), text))
}

/// Writes the table and flushes.
fn write_table<W: Write>(batch: &Batch, mut output: W) -> Result<()> {
    let rows = batch.write_to(&mut output).context("Failed to write CSV")?;
    output.flush().context("Failed to flush output")?;
    debug!(rows, "output flushed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lf_options() -> ConvertOptions {
        ConvertOptions { line_ending: LineEnding::Lf, ..ConvertOptions::default() }
    }

    fn sample_vcard() -> &'static str {
        "BEGIN:VCARD\r\n\
         VERSION:3.0\r\n\
         N:Doe;John;;;\r\n\
         FN:John Doe\r\n\
         TEL;TYPE=cell:555-0001\r\n\
         END:VCARD\r\n"
    }

    #[test]
    fn test_stdin_document_to_csv() {
        let batch =
            collect_documents([Document::new(STDIN_NAME, sample_vcard())], lf_options()).unwrap();
        let mut output = Vec::new();

        write_table(&batch, &mut output).unwrap();

        assert_eq!(batch.records().len(), 1);
        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(
            output_str,
            "lastName,firstName,fullName,mobilePhone\nDoe,John,John Doe,555-0001\n"
        );
    }

    #[test]
    fn test_stdin_without_marker_is_rejected() {
        let err =
            collect_documents([Document::new(STDIN_NAME, "hello")], lf_options()).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file format: <stdin>"));
    }

    #[test]
    fn test_files_are_read_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.vcf");
        let second = dir.path().join("second.vcf");
        fs::write(&first, sample_vcard()).unwrap();
        fs::write(&second, "BEGIN:VCARD\nFN:Jane Roe\nEMAIL:jane@example.com\nEND:VCARD\n")
            .unwrap();

        let batch = collect_files(&[first, second], lf_options()).unwrap();

        assert_eq!(batch.documents_read(), 2);
        assert_eq!(batch.records()[1].get("email1"), Some("jane@example.com"));
    }

    #[test]
    fn test_missing_file_fails() {
        let paths = [PathBuf::from("/nonexistent/a.vcf")];
        let err = collect_files(&paths, lf_options()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to open input file"));
    }

    #[test]
    fn test_too_many_files() {
        let options = ConvertOptions { max_documents: 1, ..lf_options() };
        let paths = [PathBuf::from("a.vcf"), PathBuf::from("b.vcf")];

        let err = collect_files(&paths, options).unwrap_err();
        assert!(format!("{err:#}").contains("Too many files"));
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let batch = collect_documents([Document::new("empty.vcf", "")], lf_options()).unwrap();
        let mut output = Vec::new();

        write_table(&batch, &mut output).unwrap();
        assert!(output.is_empty());
        assert!(batch.records().is_empty());
    }

    #[test]
    fn test_keep_first_flag() {
        let args = Args::parse_from(["vcf2csv", "--keep-first", "--line-ending", "lf", "a.vcf"]);
        let options = args.options();

        assert_eq!(options.duplicates, DuplicatePolicy::KeepFirst);
        assert_eq!(options.line_ending, LineEnding::Lf);
        assert_eq!(options.max_documents, DEFAULT_MAX_DOCUMENTS);
        assert_eq!(args.inputs, [PathBuf::from("a.vcf")]);
    }
}
