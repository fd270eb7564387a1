//! E2E тесты для CLI инструмента `vcf2csv`.
//!
//! Фикстуры лежат в `tests/fixtures/`:
//! - `team.vcf` — две карточки vCard 3.0 с CRLF
//! - `alice.vcf` — карточка vCard 2.1 с LF
//! - `export.txt` — карточка в файле без расширения `.vcf`
//! - `notes.txt` — не vCard

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const TEAM_HEADER: &str = "lastName,firstName,middleName,prefix,fullName,\
mobilePhone,workPhone,phone1,workEmail,\
workExtAddr,workStreet,workCity,workRegion,workPostalCode,workCountry,\
organization,department,jobTitle,notes,birthday,\
homeEmail,email1,homeStreet,homeCity,homeRegion,homePostalCode,homeCountry,website";

/// Получить путь к фикстуре.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn fixture_arg(name: &str) -> String {
    fixture(name).to_str().unwrap().to_string()
}

/// Создать команду для запуска vcf2csv.
fn vcf2csv() -> Command {
    Command::new(env!("CARGO_BIN_EXE_vcf2csv"))
}

// ============================================================================
// Успешная конвертация
// ============================================================================

#[test]
fn test_single_file_to_output_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("contacts.csv");

    vcf2csv()
        .args([fixture_arg("team.vcf").as_str(), "--output", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Converted 2 contact(s) from 1 file(s)"));

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], TEAM_HEADER);
    assert!(lines[1].starts_with("Doe,John,Q.,Mr.,John Doe,555-0001,555-0100,555-0199,"));
    assert!(lines[1].contains(r#""Met at RustConf, ""great talk""""#));
    assert!(lines[2].starts_with("Roe,Jane,,,Jane Roe,,,,,"));
    assert!(lines[2].ends_with("123 Main St,Springfield,IL,62704,USA,https://jane.example.org"));
}

#[test]
fn test_rows_are_rectangular() {
    let output = vcf2csv()
        .args([fixture_arg("team.vcf"), fixture_arg("alice.vcf")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let content = String::from_utf8(output).unwrap();
    let columns = content.lines().next().unwrap().split(',').count();

    // Ни одна ячейка, кроме заметки, не содержит запятых
    for line in content.lines().skip(1).filter(|l| !l.contains("RustConf")) {
        assert_eq!(line.split(',').count(), columns, "row: {line}");
    }
}

#[test]
fn test_multiple_files_share_one_header() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("merged.csv");

    vcf2csv()
        .args([
            fixture_arg("team.vcf").as_str(),
            fixture_arg("alice.vcf").as_str(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Converted 3 contact(s) from 2 file(s)"));

    let content = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], format!("{TEAM_HEADER},homePhone"));
    assert!(lines[3].starts_with("Smith,Alice,,,Alice Smith,+44 7700 900123,"));
    assert!(lines[3].ends_with(",+44 20 7946 0000"));
}

#[test]
fn test_txt_file_with_marker_is_accepted() {
    vcf2csv()
        .args([fixture_arg("export.txt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("fullName,workPhone"))
        .stdout(predicate::str::contains("Bob Stone,555-0301"))
        .stdout(predicate::str::contains("Exported").not());
}

#[test]
fn test_keep_first() {
    vcf2csv()
        .args(["--keep-first", fixture_arg("export.txt").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob Stone,555-0300"));
}

#[test]
fn test_default_line_ending_is_crlf() {
    vcf2csv()
        .args([fixture_arg("alice.vcf")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "lastName,firstName,fullName,mobilePhone,homePhone\r\n",
        ));
}

#[test]
fn test_lf_line_ending() {
    let output = vcf2csv()
        .args(["--line-ending", "lf", fixture_arg("team.vcf").as_str()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let content = String::from_utf8(output).unwrap();
    assert!(!content.contains('\r'));
    assert_eq!(content.lines().count(), 3);
}

// ============================================================================
// Тесты stdin/stdout
// ============================================================================

#[test]
fn test_stdin_to_stdout() {
    let input_data = fs::read(fixture("alice.vcf")).unwrap();

    vcf2csv()
        .write_stdin(input_data)
        .assert()
        .success()
        .stdout(
            "lastName,firstName,fullName,mobilePhone,homePhone\r\n\
             Smith,Alice,Alice Smith,+44 7700 900123,+44 20 7946 0000\r\n",
        );
}

#[test]
fn test_card_with_unknown_tags_is_counted() {
    vcf2csv()
        .write_stdin("BEGIN:VCARD\nVERSION:3.0\nX-FOO:bar\nEND:VCARD\n")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Converted 1 contact(s) from 1 file(s)"));
}

#[test]
fn test_stdin_without_cards() {
    vcf2csv()
        .write_stdin("just some text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format: <stdin>"));
}

// ============================================================================
// Тесты обработки ошибок
// ============================================================================

#[test]
fn test_unsupported_file_aborts_batch() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("never.csv");

    vcf2csv()
        .args([
            fixture_arg("team.vcf").as_str(),
            fixture_arg("notes.txt").as_str(),
            "--output",
            output.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"))
        .stderr(predicate::str::contains("notes.txt"));

    // Пакет отменён целиком: файл с таблицей не создаётся
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file() {
    vcf2csv()
        .args(["/nonexistent/path/to/contacts.vcf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_too_many_files() {
    vcf2csv()
        .args([
            "--max-files",
            "1",
            fixture_arg("team.vcf").as_str(),
            fixture_arg("alice.vcf").as_str(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Too many files: 2 submitted, at most 1 allowed"));
}

#[test]
fn test_unknown_line_ending() {
    vcf2csv()
        .args(["--line-ending", "cr", fixture_arg("team.vcf").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--line-ending"));
}
