#![cfg(unix)]

mod support;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::cargo::cargo_bin_cmd;
use kotoba_intersect::encoding::TextEncoding;
use kotoba_intersect::report::{ReportHeaders, read_report};
use tempfile::TempDir;

struct Workspace {
    _tmp: TempDir,
    input: PathBuf,
    output: PathBuf,
    scratch: PathBuf,
    mecab: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("input");
        let scratch = tmp.path().join("scratch");
        let bin = tmp.path().join("bin");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&scratch).unwrap();
        fs::create_dir_all(&bin).unwrap();
        let mecab = support::create_fake_mecab(&bin);
        Self {
            output: tmp.path().join("out.txt"),
            input,
            scratch,
            mecab,
            _tmp: tmp,
        }
    }

    fn run(&self, mecab: &Path, extra: &[&str]) -> assert_cmd::assert::Assert {
        cargo_bin_cmd!("kotoba-intersect")
            .env("TMPDIR", &self.scratch)
            .env_remove("RUST_LOG")
            .arg("-id")
            .arg(&self.input)
            .arg("-op")
            .arg(&self.output)
            .arg("--mecab-bin")
            .arg(mecab)
            .args(extra)
            .assert()
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn cat_sentence_shares_its_noun() {
    let ws = Workspace::new();
    support::write_corpus_file(&ws.input, "a.txt", "猫が好きです".as_bytes());

    ws.run(&ws.mecab, &[]).success();

    let report = read_report(&ws.output, TextEncoding::utf_8(), &ReportHeaders::default()).unwrap();
    assert!(report.nouns.contains(&"猫".to_string()));
    assert!(report.vocabulary.contains(&"猫".to_string()));
    assert!(report.intersection.contains("猫"));
    assert!(support::scratch_entries(&ws.scratch).is_empty());
}

#[test]
fn disjoint_lists_leave_intersection_empty() {
    let ws = Workspace::new();
    support::write_corpus_file(&ws.input, "a.txt", "です".as_bytes());

    ws.run(&ws.mecab, &[]).success();

    let contents = fs::read_to_string(&ws.output).unwrap();
    assert!(contents.starts_with("======= Noun List =======\n==== Vocabulary List ====\n"));
    assert!(contents.ends_with("=== List Intersection ===\n"));
}

#[test]
fn shift_jis_in_euc_jp_out() {
    let ws = Workspace::new();
    let sjis = TextEncoding::for_label("shift_jis").unwrap();
    let euc = TextEncoding::for_label("euc-jp").unwrap();
    support::write_corpus_file(&ws.input, "a.txt", &sjis.encode("犬と猫").unwrap());

    ws.run(&ws.mecab, &["-ie", "shift_jis", "-oe", "euc-jp"])
        .success();

    let report = read_report(&ws.output, euc, &ReportHeaders::default()).unwrap();
    assert_eq!(report.nouns, vec!["犬", "猫"]);
    assert!(fs::read_to_string(&ws.output).is_err());
}

#[test]
fn repeated_runs_are_byte_identical() {
    let ws = Workspace::new();
    support::write_corpus_file(&ws.input, "a.txt", "猫が好きです".as_bytes());
    support::write_corpus_file(&ws.input, "b.txt", "犬と猫".as_bytes());

    ws.run(&ws.mecab, &[]).success();
    let first = fs::read(&ws.output).unwrap();
    ws.run(&ws.mecab, &[]).success();
    let second = fs::read(&ws.output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn empty_directory_fails_without_output() {
    let ws = Workspace::new();

    let assert = ws.run(&ws.mecab, &[]).failure();

    assert!(stderr(assert.get_output()).contains("vectorization failed"));
    assert!(!ws.output.exists());
}

#[test]
fn missing_directory_fails() {
    let ws = Workspace::new();
    fs::remove_dir(&ws.input).unwrap();

    let assert = ws.run(&ws.mecab, &[]).failure();

    assert!(stderr(assert.get_output()).contains("input directory not found"));
}

#[test]
fn invalid_bytes_fail_with_decoding_error() {
    let ws = Workspace::new();
    support::write_corpus_file(&ws.input, "a.txt", &[0xe7, 0x8c, 0xab, 0xff]);

    let assert = ws.run(&ws.mecab, &[]).failure();

    assert!(stderr(assert.get_output()).contains("is not valid UTF-8"));
    assert!(!ws.output.exists());
}

#[test]
fn analyzer_failure_releases_the_session() {
    let ws = Workspace::new();
    support::write_corpus_file(&ws.input, "a.txt", "猫が好きです".as_bytes());
    let broken = support::create_broken_mecab(ws.mecab.parent().unwrap());

    let assert = ws.run(&broken, &[]).failure();

    let message = stderr(assert.get_output());
    assert!(message.contains("morphological analyzer failed"));
    assert!(message.contains("no such file or directory"));
    assert!(support::scratch_entries(&ws.scratch).is_empty());
    assert!(!ws.output.exists());
}

#[test]
fn missing_analyzer_binary_fails() {
    let ws = Workspace::new();
    support::write_corpus_file(&ws.input, "a.txt", "猫が好きです".as_bytes());
    let absent = ws.scratch.join("no-such-mecab");

    let assert = ws.run(&absent, &[]).failure();

    assert!(stderr(assert.get_output()).contains("failed to spawn mecab"));
}

#[test]
fn unknown_encoding_is_rejected() {
    let ws = Workspace::new();
    support::write_corpus_file(&ws.input, "a.txt", "猫が好きです".as_bytes());

    let assert = ws.run(&ws.mecab, &["-ie", "klingon"]).failure();

    assert!(stderr(assert.get_output()).contains("unsupported text encoding"));
}
