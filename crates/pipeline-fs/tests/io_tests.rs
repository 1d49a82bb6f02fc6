use pipeline_fs::io;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
}

#[test]
fn test_write_text_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a").join("b").join("README.md");

    io::write_text(&path, "# project\n").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "# project\n");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    io::write_text(&temp.path().join("target.txt"), "content").unwrap();

    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "found: {:?}", leftovers);
}

#[test]
fn test_move_file_into_existing_directory() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("incoming.csv");
    let dest_dir = temp.path().join("project").join("data").join("raw");
    fs::create_dir_all(&dest_dir).unwrap();
    fs::write(&src, "a,b\n").unwrap();

    let dest = dest_dir.join("incoming_2024.csv");
    io::move_file(&src, &dest).unwrap();

    assert!(!src.exists());
    assert_eq!(fs::read_to_string(&dest).unwrap(), "a,b\n");
}
