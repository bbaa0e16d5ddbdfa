//! Integration tests for the rot128-donations CLI.
//!
//! These tests run the actual binary against encrypted fixtures written into
//! a temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use rot128_donations::{Rot128Writer, Rotation};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DONATIONS: &str = "\
Name,AmountSubunits,CCNumber,CVV,ExpMonth,ExpYear
Mr. Grossman R Oldbuck,2879410,5375543637862918,488,11,2030
Mrs. Myrtle Burrows,100,4111111111111111,123,1,2031
Ms. Primula Boffin,500000,4242424242424242,321,6,2029
Mr. Ferdinand Took,0,4000000000000002,111,2,2030
Broken Row,lots,4242424242424242,321,6,2029
";

/// Writes `plain` encoded with `rotation` and returns its path.
fn write_encrypted(dir: &TempDir, name: &str, plain: &[u8], rotation: Rotation) -> PathBuf {
    let path = dir.path().join(name);
    let mut writer = Rot128Writer::new(fs::File::create(&path).unwrap(), rotation.inverse());
    writer.write_all(plain).unwrap();
    writer.flush().unwrap();
    path
}

fn run_cli(input: &Path) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("rot128-donations").unwrap();
    cmd.arg(input).assert()
}

#[test]
fn test_decrypts_and_summarizes() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_encrypted(&dir, "fng.csv.rot128", DONATIONS.as_bytes(), Rotation::ROT128);

    let assert = run_cli(&input).success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("fng.csv")).unwrap(),
        DONATIONS
    );
    assert!(stdout.contains("Decryption complete."));
    assert!(stdout.contains("total received: THB     33795.10"));
    assert!(stdout.contains("successfully donated: THB     33795.10"));
    assert!(stdout.contains("faulty donation: THB         0.00"));
    assert!(stdout.contains("average per person: THB     11265.03"));

    let primula = stdout.find("Ms. Primula Boffin").unwrap();
    let grossman = stdout.find("Mr. Grossman R Oldbuck").unwrap();
    let myrtle = stdout.find("Mrs. Myrtle Burrows").unwrap();
    assert!(grossman < primula && primula < myrtle);
}

#[test]
fn test_decrypt_only_with_custom_offset() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_encrypted(&dir, "data.bin", &[0, 1, 2, 255], Rotation::new(3));
    let output = dir.path().join("plain.bin");

    Command::cargo_bin("rot128-donations")
        .unwrap()
        .arg(&input)
        .args(["--offset", "-253", "--decrypt-only", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Decryption complete."))
        .stdout(predicate::str::contains("total received").not());

    assert_eq!(fs::read(&output).unwrap(), vec![0, 1, 2, 255]);
}

#[test]
fn test_top_and_currency_flags() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_encrypted(&dir, "fng.csv.rot128", DONATIONS.as_bytes(), Rotation::ROT128);

    let assert = Command::cargo_bin("rot128-donations")
        .unwrap()
        .arg(&input)
        .args(["--top", "1", "--currency", "USD"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("total received: USD"));
    assert!(stdout.contains("Mr. Grossman R Oldbuck"));
    assert!(!stdout.contains("Ms. Primula Boffin"));
}

#[test]
fn test_as_of_refuses_expired_cards() {
    let dir = tempfile::tempdir().unwrap();
    let donations = format!(
        "{}Mr. Odo Proudfoot,250000,4242424242424242,555,9,2026\n",
        DONATIONS
    );
    let input = write_encrypted(&dir, "fng.csv.rot128", donations.as_bytes(), Rotation::ROT128);

    let assert = Command::cargo_bin("rot128-donations")
        .unwrap()
        .arg(&input)
        .args(["--as-of", "2026-10"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("total received: THB     36295.10"));
    assert!(stdout.contains("successfully donated: THB     33795.10"));
    assert!(stdout.contains("faulty donation: THB      2500.00"));
    assert!(!stdout.contains("Mr. Odo Proudfoot"));
}

#[test]
fn test_as_of_rejects_malformed_month() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_encrypted(&dir, "fng.csv.rot128", DONATIONS.as_bytes(), Rotation::ROT128);

    Command::cargo_bin("rot128-donations")
        .unwrap()
        .arg(&input)
        .args(["--as-of", "2026-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid month"));
}

#[test]
fn test_output_onto_input_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_encrypted(&dir, "fng.csv.rot128", DONATIONS.as_bytes(), Rotation::ROT128);
    let before = fs::read(&input).unwrap();

    Command::cargo_bin("rot128-donations")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("onto itself"));

    assert_eq!(fs::read(&input).unwrap(), before);
}

#[test]
fn test_empty_encrypted_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_encrypted(&dir, "empty.csv.rot128", b"", Rotation::ROT128);

    run_cli(&input)
        .success()
        .stdout(predicate::str::contains("total received: THB         0.00"))
        .stdout(predicate::str::contains("top donors").not());

    assert_eq!(fs::read(dir.path().join("empty.csv")).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_missing_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nonexistent.rot128");

    run_cli(&missing)
        .failure()
        .stderr(predicate::str::contains("Error: Failed to open"))
        .stderr(predicate::str::contains("nonexistent.rot128"));
}

#[test]
fn test_missing_argument_error() {
    Command::cargo_bin("rot128-donations")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("INPUT"));
}
