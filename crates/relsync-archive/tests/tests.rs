use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use relsync_archive::{Error, ExtractOptions, Progress, extract, inspect};

fn build_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = std::fs::File::create(path).expect("Failed to create zip");
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap();
}

fn temp_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("relsync-test-zip-")
        .tempdir()
        .expect("Failed to create temp dir")
}

#[test]
fn inspect_lists_entries_and_prefix() {
    let dir = temp_dir();
    let zip_path = dir.path().join("lite.zip");
    build_zip(
        &zip_path,
        &[("bin/", b""), ("bin/app.exe", b"app"), ("deps/lib.dll", b"library")],
    );

    let listing = inspect(&zip_path).unwrap();
    assert_eq!(listing.len(), 3);
    assert!(listing.has_prefix("deps/"));
    assert!(!listing.has_prefix("config/"));
    assert_eq!(listing.size_under("deps/"), 7);
}

#[test]
fn inspect_rejects_garbage() {
    let dir = temp_dir();
    let path = dir.path().join("broken.zip");
    std::fs::write(&path, [0xDE, 0xAD, 0xBE, 0xEF]).unwrap();

    assert!(matches!(inspect(&path), Err(Error::Corrupted { .. })));
}

#[test]
fn inspect_reports_missing_file() {
    let dir = temp_dir();
    assert!(matches!(
        inspect(dir.path().join("missing.zip")),
        Err(Error::Open { .. })
    ));
}

#[test]
fn extract_whole_archive_with_progress() {
    let dir = temp_dir();
    let zip_path = dir.path().join("lite.zip");
    build_zip(
        &zip_path,
        &[("app.exe", b"0123456789"), ("resource/data.bin", b"abcde")],
    );
    let dest = dir.path().join("target");

    let seen: Arc<Mutex<Vec<Progress>>> = Arc::default();
    let sink = seen.clone();
    let options = ExtractOptions::default()
        .on_progress(Arc::new(move |p: &Progress| sink.lock().unwrap().push(p.clone())));

    let report = extract(&zip_path, &dest, &options).unwrap();

    assert_eq!(report.entry_count, 2);
    assert_eq!(report.total_bytes, 15);
    assert_eq!(std::fs::read(dest.join("app.exe")).unwrap(), b"0123456789");
    assert_eq!(std::fs::read(dest.join("resource/data.bin")).unwrap(), b"abcde");

    let seen = seen.lock().unwrap();
    let last = seen.last().unwrap();
    assert!(last.finished);
    assert_eq!(last.bytes_processed, 15);
    assert_eq!(last.total_bytes, 15);
    assert!(seen.windows(2).all(|w| w[0].bytes_processed <= w[1].bytes_processed));
}

#[test]
fn extract_prefix_only_writes_subtree() {
    let dir = temp_dir();
    let zip_path = dir.path().join("full.zip");
    build_zip(
        &zip_path,
        &[("app.exe", b"full-app"), ("deps/", b""), ("deps/runtime/lib.dll", b"lib")],
    );
    let dest = dir.path().join("target");

    let report = extract(&zip_path, &dest, &ExtractOptions::default().prefix("deps/")).unwrap();

    assert_eq!(report.total_bytes, 3);
    assert!(dest.join("deps/runtime/lib.dll").exists());
    assert!(!dest.join("app.exe").exists());
}

#[test]
fn extract_missing_prefix_is_an_error() {
    let dir = temp_dir();
    let zip_path = dir.path().join("full.zip");
    build_zip(&zip_path, &[("app.exe", b"full-app")]);

    let result = extract(
        &zip_path,
        dir.path().join("target"),
        &ExtractOptions::default().prefix("deps/"),
    );
    assert!(matches!(result, Err(Error::PrefixNotFound { .. })));
}

#[test]
fn extract_overwrites_existing_files() {
    let dir = temp_dir();
    let zip_path = dir.path().join("lite.zip");
    build_zip(&zip_path, &[("app.exe", b"new")]);
    let dest = dir.path().join("target");
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(dest.join("app.exe"), "old").unwrap();

    extract(&zip_path, &dest, &ExtractOptions::default()).unwrap();
    assert_eq!(std::fs::read(dest.join("app.exe")).unwrap(), b"new");
}
