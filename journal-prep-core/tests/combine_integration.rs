use journal_prep_core::combine::combine_dir;
use journal_prep_core::config::{CombineConfig, LayoutPreset, SectionLayout};
use journal_prep_core::error::JournalError;
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn write_file(dir: &std::path::Path, name: &str, content: &[u8]) {
    let mut f = File::create(dir.join(name)).unwrap();
    f.write_all(content).unwrap();
}

#[test]
fn test_sections_are_ordered_by_date() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("journal-past");
    fs::create_dir(&src).unwrap();
    write_file(&src, "01-03-2024.md", b"A");
    write_file(&src, "15-01-2024.md", b"B");
    let output = tmp.path().join("journal-past.md");

    let config = CombineConfig::from_preset(LayoutPreset::JournalPast, &src, &output);
    let report = combine_dir(&config).expect("Combine should succeed");

    assert_eq!(report.combined, 2);
    let doc = fs::read_to_string(&output).unwrap();
    assert_eq!(
        doc,
        "==January 15 2024==\n\nB\n\n==March 01 2024==\n\nA\n\n"
    );
}

#[test]
fn test_journal_app_preset_writes_banner_and_comma_dates() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("journal-app");
    fs::create_dir(&src).unwrap();
    write_file(&src, "02-05-2024 evening.txt", b"tea, no symptoms");
    let output = tmp.path().join("journal-app.txt");

    let config = CombineConfig::from_preset(LayoutPreset::JournalApp, &src, &output);
    combine_dir(&config).unwrap();

    let doc = fs::read_to_string(&output).unwrap();
    assert_eq!(
        doc,
        "===Journal-app entries===\n\n==May 02, 2024==\n\ntea, no symptoms\n\n"
    );
}

#[test]
fn test_unparseable_names_are_excluded() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    write_file(&src, "10-02-2024.md", b"one");
    write_file(&src, "11-02-2024.md", b"two");
    write_file(&src, "notes.md", b"SHOULD NOT APPEAR");
    write_file(&src, "2024-Feb-12.md", b"SHOULD NOT APPEAR");
    write_file(&src, "12-02-2024.txt", b"SHOULD NOT APPEAR");
    let output = tmp.path().join("out.md");

    let report =
        combine_dir(&CombineConfig::from_preset(LayoutPreset::JournalPast, &src, &output)).unwrap();

    assert_eq!(report.combined, 2);
    assert!(report.skipped.is_empty());
    let doc = fs::read_to_string(&output).unwrap();
    assert_eq!(doc.matches("==February").count(), 2);
    assert!(!doc.contains("SHOULD NOT APPEAR"));
}

#[test]
fn test_content_is_copied_verbatim_in_nondecreasing_order() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    let entries = [
        ("20-11-2023.md", "line one\nline two\n"),
        ("03-01-2024.md", "  indented\n\n\ttabbed"),
        ("19-06-2023.md", "ünïcödé ✓"),
    ];
    for (name, content) in entries {
        write_file(&src, name, content.as_bytes());
    }
    let output = tmp.path().join("out.md");

    combine_dir(&CombineConfig::from_preset(LayoutPreset::JournalPast, &src, &output)).unwrap();
    let doc = fs::read_to_string(&output).unwrap();

    for (_, content) in entries {
        assert!(doc.contains(&format!("\n\n{content}\n\n")), "missing {content:?}");
    }
    let june = doc.find("==June 19 2023==").unwrap();
    let november = doc.find("==November 20 2023==").unwrap();
    let january = doc.find("==January 03 2024==").unwrap();
    assert!(june < november && november < january);
}

#[test]
fn test_same_date_ties_break_on_file_name() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    write_file(&src, "05-05-2024 b.txt", b"second");
    write_file(&src, "05-05-2024 a.txt", b"first");
    let output = tmp.path().join("out.txt");

    combine_dir(&CombineConfig::from_preset(LayoutPreset::JournalApp, &src, &output)).unwrap();
    let doc = fs::read_to_string(&output).unwrap();

    assert!(doc.find("first").unwrap() < doc.find("second").unwrap());
}

#[test]
fn test_unreadable_file_is_skipped_without_orphaned_header() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    for day in 1..=10 {
        let name = format!("{day:02}-04-2024.md");
        if day == 7 {
            write_file(&src, &name, &[0xff, 0xfe, 0xfd]);
        } else {
            write_file(&src, &name, format!("day {day}").as_bytes());
        }
    }
    let output = tmp.path().join("out.md");

    let report =
        combine_dir(&CombineConfig::from_preset(LayoutPreset::JournalPast, &src, &output)).unwrap();

    assert_eq!(report.combined, 9);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].file_name, "07-04-2024.md");
    let doc = fs::read_to_string(&output).unwrap();
    assert_eq!(doc.matches("==April").count(), 9);
    assert!(!doc.contains("==April 07 2024=="));
}

#[test]
fn test_impossible_date_is_skipped() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    write_file(&src, "31-02-2024.md", b"nope");
    write_file(&src, "29-02-2024.md", b"leap");
    let output = tmp.path().join("out.md");

    let report =
        combine_dir(&CombineConfig::from_preset(LayoutPreset::JournalPast, &src, &output)).unwrap();

    assert_eq!(report.combined, 1);
    assert_eq!(report.skipped[0].file_name, "31-02-2024.md");
    assert!(fs::read_to_string(&output).unwrap().contains("==February 29 2024=="));
}

#[test]
fn test_missing_directory_writes_nothing() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("out.md");

    let err = combine_dir(&CombineConfig::from_preset(
        LayoutPreset::JournalPast,
        tmp.path().join("missing"),
        &output,
    ))
    .unwrap_err();

    assert!(matches!(err, JournalError::DirectoryNotFound(_)));
    assert!(!output.exists());
}

#[test]
fn test_output_is_truncated_on_rerun() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    write_file(&src, "01-01-2024.md", b"new year");
    let output = tmp.path().join("out.md");
    fs::write(&output, "stale content that is much longer than the new document").unwrap();

    combine_dir(&CombineConfig::from_preset(LayoutPreset::JournalPast, &src, &output)).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "==January 01 2024==\n\nnew year\n\n"
    );
}

#[test]
fn test_output_inside_source_as_input_is_refused() {
    let tmp = tempdir().unwrap();
    write_file(tmp.path(), "01-01-2024.txt", b"entry");
    let output = tmp.path().join("01-01-2024.txt");

    let err = combine_dir(&CombineConfig::from_preset(
        LayoutPreset::JournalApp,
        tmp.path(),
        &output,
    ))
    .unwrap_err();

    assert!(matches!(err, JournalError::OutputCollidesWithInput(_)));
    assert_eq!(fs::read_to_string(&output).unwrap(), "entry");
}

#[test]
fn test_unwritable_output_is_an_error() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    write_file(&src, "01-01-2024.md", b"x");
    let output = tmp.path().join("no-such-dir").join("out.md");

    let err = combine_dir(&CombineConfig::from_preset(LayoutPreset::JournalPast, &src, &output))
        .unwrap_err();

    assert!(matches!(err, JournalError::OutputWrite { .. }));
}

#[test]
fn test_custom_layout() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    write_file(&src, "09-09-2024.md", b"x");
    let output = tmp.path().join("out.md");

    let config = CombineConfig {
        source_dir: src,
        output: output.clone(),
        extension: Some("md".to_string()),
        layout: SectionLayout {
            date_format: "%Y-%m-%d".to_string(),
            header_template: "## {date}".to_string(),
            banner: Some("# Journal".to_string()),
        },
    };
    combine_dir(&config).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "# Journal\n\n## 2024-09-09\n\nx\n\n"
    );
}

#[test]
fn test_time_specifiers_in_date_format_are_rejected_before_writing() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    write_file(&src, "15-01-2024.md", b"B");
    let output = tmp.path().join("out.md");

    let mut config = CombineConfig::from_preset(LayoutPreset::JournalPast, &src, &output);
    config.layout.date_format = "%B %d %Y %H:%M".to_string();
    let err = combine_dir(&config).unwrap_err();

    assert!(matches!(err, JournalError::InvalidLayout(_)), "got {err:?}");
    assert!(!output.exists());
}
