use std::fs;
use std::io::Write;

use karaoke_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_download_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("videos").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rejects_file_in_place_of_dir() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(ensure_output_dir(&file_path).is_err());
    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("a.mp4", b"data").is_err());
}

#[test]
fn atomic_write_replaces_previous_download() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("a.mp4", b"first").unwrap();
    assert_eq!(first.file_name().unwrap(), "a.mp4");
    assert_eq!(fs::read(&first).unwrap(), b"first");

    let second = writer.write("a.mp4", [0u8, 159, 146, 150]).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), vec![0u8, 159, 146, 150]);
}

#[test]
fn pending_file_is_named_at_commit() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let mut pending = writer.begin().unwrap();
    pending.write_all(b"chunk-1,").unwrap();
    pending.write_all(b"chunk-2").unwrap();
    let path = pending.commit("song.mp4").unwrap();

    assert_eq!(path, temp.path().join("song.mp4"));
    assert_eq!(fs::read(&path).unwrap(), b"chunk-1,chunk-2");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn abandoned_pending_file_is_removed() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let mut pending = writer.begin().unwrap();
    pending.write_all(b"partial").unwrap();
    drop(pending);

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
