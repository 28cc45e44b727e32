use profdata::parser::{escape_key, unescape_key, LoadOptions, Loader};
use profdata::utils::error::LoadError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_dump(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

const FILE_A: &str = "DBI::ProfileDumper 2.0\nPath = (Statement)\nProgram = app.pl\n\n\
                      + 1 SELECT 1\n= 1 0.01 0.01 0.01 0.01 100.0 100.01\n";
const FILE_B: &str = "DBI::ProfileDumper 2.1\nPath = (Statement)\n\n\
                      + 1 SELECT 1\n= 2 0.04 0.015 0.015 0.025 200.0 200.05\n";

#[test]
fn test_two_files_merge_into_one_record() {
    let dir = TempDir::new().unwrap();
    let a = write_dump(&dir, "a.prof", FILE_A);
    let b = write_dump(&dir, "b.prof", FILE_B);

    let data = Loader::new(LoadOptions::from_files([a, b])).load().unwrap();

    assert_eq!(data.count(), 1);
    let record = &data.records()[0];
    assert_eq!(record.path, vec!["SELECT 1"]);
    assert_eq!(record.stats.count, 3);
    assert!((record.stats.total - 0.05).abs() < 1e-12);
    assert_eq!(record.stats.shortest, 0.01);
    assert_eq!(record.stats.longest, 0.025);
    assert_eq!(record.stats.first, 0.01);
    assert_eq!(record.stats.first_at, 100.0);
    assert_eq!(record.stats.last_at, 200.05);
}

#[test]
fn test_first_duration_follows_file_order() {
    let dir = TempDir::new().unwrap();
    let a = write_dump(&dir, "a.prof", FILE_A);
    let b = write_dump(&dir, "b.prof", FILE_B);

    let data = Loader::new(LoadOptions::from_files([b, a])).load().unwrap();

    assert_eq!(data.records()[0].stats.first, 0.015);
    assert_eq!(data.records()[0].stats.first_at, 100.0);
}

#[test]
fn test_header_comes_from_first_file() {
    let dir = TempDir::new().unwrap();
    let empty = write_dump(&dir, "empty.prof", "");
    let b = write_dump(&dir, "b.prof", FILE_B);
    let a = write_dump(&dir, "a.prof", FILE_A);

    let data = Loader::new(LoadOptions::from_files([empty, b, a]))
        .load()
        .unwrap();

    assert_eq!(data.header().profiler, "DBI::ProfileDumper 2.1");
    assert_eq!(data.header().get("Path"), Some("(Statement)"));
    assert_eq!(data.header().get("Program"), None);
    assert_eq!(data.sort_label(), "none");
}

#[test]
fn test_single_file_option_wins_over_list() {
    let dir = TempDir::new().unwrap();
    let a = write_dump(&dir, "a.prof", FILE_A);
    let b = write_dump(&dir, "b.prof", FILE_B);

    let options = LoadOptions {
        file: Some(a),
        files: vec![b],
        ..LoadOptions::default()
    };
    let data = Loader::new(options).load().unwrap();

    assert_eq!(data.records()[0].stats.count, 1);
}

#[test]
fn test_nested_paths_and_multiline_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_dump(
        &dir,
        "nested.prof",
        "Prof\n\n\
         + 1 SELECT *\\nFROM t\n+ 2 execute\n= 1 1 1 1 1 1 1\n\
         + 2 fetch\n= 4 2 0.5 0.5 0.5 1 2\n\
         + 1 literal \\\\n\n+ 2 execute\n= 1 1 1 1 1 1 1\n",
    );

    let data = Loader::new(LoadOptions::from_file(path)).load().unwrap();

    assert_eq!(data.count(), 3);
    assert_eq!(data.records()[0].path, vec!["SELECT *\nFROM t", "execute"]);
    assert_eq!(data.records()[1].path, vec!["SELECT *\nFROM t", "fetch"]);
    assert_eq!(data.records()[2].path, vec!["literal \\n", "execute"]);
}

#[test]
fn test_filter_normalizes_before_merge() {
    let dir = TempDir::new().unwrap();
    let path = write_dump(
        &dir,
        "filter.prof",
        "Prof\n\n+ 1 SELECT * FROM t WHERE id = 1\n= 1 1 1 1 1 1 1\n\
         + 1 SELECT * FROM t WHERE id = 42\n= 2 2 1 1 1 2 3\n",
    );

    let mut calls = 0;
    let data = Loader::new(LoadOptions::from_file(path))
        .with_filter(|segments, _stats| {
            calls += 1;
            segments[0] = segments[0]
                .split_whitespace()
                .map(|word| if word.parse::<u64>().is_ok() { "N" } else { word })
                .collect::<Vec<_>>()
                .join(" ");
        })
        .load()
        .unwrap();

    assert_eq!(calls, 2);
    assert_eq!(data.count(), 1);
    assert_eq!(data.records()[0].path, vec!["SELECT * FROM t WHERE id = N"]);
    assert_eq!(data.records()[0].stats.count, 3);
}

#[test]
fn test_delete_after_read_removes_files() {
    let dir = TempDir::new().unwrap();
    let a = write_dump(&dir, "a.prof", FILE_A);

    let options = LoadOptions::from_file(&a).with_delete_after_read(true);
    let data = Loader::new(options).load().unwrap();

    assert_eq!(data.count(), 1);
    assert!(!a.exists());
    assert!(!dir.path().join("a.prof.deleteme").exists());
}

#[test]
fn test_loading_without_lock() {
    let dir = TempDir::new().unwrap();
    let a = write_dump(&dir, "a.prof", FILE_A);

    let data = Loader::new(LoadOptions::from_file(a).with_lock_file(false))
        .load()
        .unwrap();

    assert_eq!(data.count(), 1);
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.prof");

    let err = Loader::new(LoadOptions::from_file(&missing)).load().unwrap_err();
    assert!(matches!(err, LoadError::Open { .. }));

    let err = Loader::new(LoadOptions::from_file(&missing).with_delete_after_read(true))
        .load()
        .unwrap_err();
    assert!(matches!(err, LoadError::Rename { .. }));
}

#[test]
fn test_parse_errors_name_file_and_line() {
    let dir = TempDir::new().unwrap();
    let good = write_dump(&dir, "good.prof", FILE_A);
    let bad = write_dump(&dir, "bad.prof", "Prof\n\n+ 1 a\n= 1 1 1\n");

    let err = Loader::new(LoadOptions::from_files([good, bad]))
        .load()
        .unwrap_err();

    assert_eq!(err.line(), Some(4));
    let message = err.to_string();
    assert!(message.contains("bad.prof"), "{}", message);
    assert!(message.contains("line 4"), "{}", message);
}

#[test]
fn test_oversized_depth_is_fatal() {
    let dir = TempDir::new().unwrap();
    let bad = write_dump(&dir, "deep.prof", "Prof\n\n+ 18446744073709551615 x\n= 1 1 1 1 1 1 1\n");

    let err = Loader::new(LoadOptions::from_file(bad)).load().unwrap_err();

    assert!(matches!(err, LoadError::InvalidLine { line: 3, .. }));
    assert!(err.to_string().contains("deep.prof"));
}

#[test]
fn test_bad_header_in_later_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let good = write_dump(&dir, "good.prof", FILE_A);
    let bad = write_dump(&dir, "bad.prof", "Prof\nnot a header line\n\n");

    let err = Loader::new(LoadOptions::from_files([good, bad]))
        .load()
        .unwrap_err();

    assert!(matches!(err, LoadError::Header { line: 2, .. }));
}

#[test]
fn test_escape_round_trip() {
    let samples = [
        "SELECT 1\nFROM dual",
        "windows\r\nline",
        "C:\\path\\to",
        "already escaped \\n stays literal",
        "\\\n\\\r\\\\",
    ];

    for sample in samples {
        assert_eq!(unescape_key(&escape_key(sample)), sample);
    }
}
