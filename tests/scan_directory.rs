use fs_shim::{EntryType, Error, Operation, Shim, join_path, scan_directory};

use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::symlink;
use tempfile::TempDir;

// Layout:
//   b.txt
//   a.txt
//   sub/
//   sub/inner.txt
//   sub/deeper/
//   link -> a.txt
fn populated() -> (TempDir, String) {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();

    fs::write(root.join("b.txt"), b"b").expect("write b");
    fs::write(root.join("a.txt"), b"a").expect("write a");
    fs::create_dir(root.join("sub")).expect("mkdir sub");
    fs::write(root.join("sub").join("inner.txt"), b"i").expect("write inner");
    fs::create_dir(root.join("sub").join("deeper")).expect("mkdir deeper");
    symlink(root.join("a.txt"), root.join("link")).expect("symlink");

    let root = root.to_string_lossy().into_owned();
    (dir, root)
}

#[test]
fn path_without_trailing_slash_gets_one_separator() {
    let (_dir, root) = populated();

    let files = scan_directory(&[root.as_str()], None, false).expect("scan");

    assert_eq!(
        files,
        vec![
            format!("{}/a.txt", root),
            format!("{}/b.txt", root),
            format!("{}/link", root),
            format!("{}/sub", root),
        ]
    );
}

#[test]
fn path_with_trailing_slash_is_not_doubled() {
    let (_dir, root) = populated();
    let with_slash = format!("{}/", root);

    let files = scan_directory(&[with_slash.as_str()], Some(EntryType::File), false).expect("scan");

    assert_eq!(
        files,
        vec![format!("{}/a.txt", root), format!("{}/b.txt", root)]
    );
    assert!(files.iter().all(|f| !f.contains("//")));
}

#[test]
fn join_rules_for_current_directory_and_separators() {
    assert_eq!(join_path(".", "a.txt"), "a.txt");
    assert_eq!(join_path(".", ".hidden"), ".hidden");
    assert_eq!(join_path("./", "a.txt"), "./a.txt");
    assert_eq!(join_path("..", "a.txt"), "../a.txt");
    assert_eq!(join_path("/", "etc"), "/etc");
    assert_eq!(join_path("/tmp/", "file"), "/tmp/file");
    assert_eq!(join_path("/tmp", "file"), "/tmp/file");
}

#[test]
fn non_utf8_names_are_skipped_without_breaking_recursion() {
    let dir = TempDir::new().expect("tempdir");
    let bad = dir.path().join(OsStr::from_bytes(b"bad\xff"));
    fs::create_dir(&bad).expect("mkdir non utf-8");
    fs::write(bad.join("hidden.txt"), b"").expect("write under bad");
    fs::create_dir(dir.path().join("ok")).expect("mkdir ok");
    fs::write(dir.path().join("ok").join("inner.txt"), b"").expect("write inner");
    let root = dir.path().to_string_lossy().into_owned();

    let flat = scan_directory(&[root.as_str()], None, false).expect("flat scan");
    assert_eq!(flat, vec![format!("{}/ok", root)]);

    let all = scan_directory(&[root.as_str()], None, true).expect("recursive scan");
    assert_eq!(
        all,
        vec![format!("{}/ok", root), format!("{}/ok/inner.txt", root)]
    );
    assert!(all.iter().all(|p| fs::symlink_metadata(p).is_ok()));
}

#[test]
fn directory_filter_excludes_files_and_vice_versa() {
    let (_dir, root) = populated();

    let dirs = scan_directory(&[root.as_str()], Some(EntryType::Directory), false).expect("dirs");
    assert_eq!(dirs, vec![format!("{}/sub", root)]);

    let files = scan_directory(&[root.as_str()], Some(EntryType::File), false).expect("files");
    assert!(!files.contains(&format!("{}/sub", root)));
    assert_eq!(files.len(), 2);
}

#[test]
fn symlinks_are_reported_as_symlinks() {
    let (_dir, root) = populated();

    let links = scan_directory(&[root.as_str()], Some(EntryType::Symlink), false).expect("links");

    assert_eq!(links, vec![format!("{}/link", root)]);
}

#[test]
fn empty_directory_yields_empty_sequence() {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path().to_string_lossy().into_owned();

    let files = scan_directory(&[root.as_str()], None, false).expect("scan");

    assert!(files.is_empty());
}

#[test]
fn results_are_flattened_in_input_order() {
    let (_dir, root) = populated();
    let sub = format!("{}/sub", root);

    let files = scan_directory(&[sub.as_str(), root.as_str()], Some(EntryType::File), false)
        .expect("scan");

    assert_eq!(
        files,
        vec![
            format!("{}/inner.txt", sub),
            format!("{}/a.txt", root),
            format!("{}/b.txt", root),
        ]
    );
}

#[test]
fn recurse_descends_depth_first() {
    let (_dir, root) = populated();

    let all = scan_directory(&[root.as_str()], None, true).expect("scan");
    assert_eq!(
        all,
        vec![
            format!("{}/a.txt", root),
            format!("{}/b.txt", root),
            format!("{}/link", root),
            format!("{}/sub", root),
            format!("{}/sub/deeper", root),
            format!("{}/sub/inner.txt", root),
        ]
    );

    let files = scan_directory(&[root.as_str()], Some(EntryType::File), true).expect("scan");
    assert!(files.contains(&format!("{}/sub/inner.txt", root)));
    assert!(!files.contains(&format!("{}/sub", root)));
}

#[test]
fn without_recurse_nested_entries_are_absent() {
    let (_dir, root) = populated();

    let files = scan_directory(&[root.as_str()], None, false).expect("scan");

    assert!(!files.iter().any(|f| f.ends_with("inner.txt")));
}

#[test]
fn missing_directory_fails_and_discards_partial_results() {
    let (dir, root) = populated();
    let missing = dir.path().join("absent").to_string_lossy().into_owned();

    let err = scan_directory(&[root.as_str(), missing.as_str()], None, false)
        .expect_err("expected failure");

    match &err {
        Error::OperationFailed {
            operation, path, ..
        } => {
            assert_eq!(*operation, Operation::ScanDirectory);
            assert_eq!(path, &missing);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(
        err.to_string()
            .starts_with(&format!("Failed to search directory '{}': ", missing))
    );
}

#[test]
fn scanning_a_file_fails() {
    let (_dir, root) = populated();
    let file = format!("{}/a.txt", root);

    let err = scan_directory(&[file.as_str()], None, false).expect_err("expected failure");

    assert_eq!(err.raw_os_error(), Some(libc::ENOTDIR));
}

#[test]
fn unsorted_scan_returns_the_same_entries() {
    let (_dir, root) = populated();

    let shim = Shim::builder().sort_entries(false).build();
    let mut files = shim
        .scan_directory(&[root.as_str()], None, false)
        .expect("scan");
    files.sort();

    assert_eq!(files, scan_directory(&[root.as_str()], None, false).expect("sorted"));
}

#[test]
fn filter_codes_map_to_entry_types() {
    assert_eq!(EntryType::from_filter(-1).expect("none"), None);
    assert_eq!(EntryType::from_filter(1).expect("file"), Some(EntryType::File));
    assert_eq!(
        EntryType::from_filter(2).expect("dir"),
        Some(EntryType::Directory)
    );
    assert_eq!(EntryType::Symlink.code(), 3);
    assert!(matches!(
        EntryType::from_filter(9),
        Err(Error::InvalidFilter(9))
    ));
}
