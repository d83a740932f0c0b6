use std::fs;
use sync_fs::io;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");

    io::write_atomic(&path, b"hello world").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
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
fn test_write_atomic_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("deeply/nested/dir/file.txt");

    io::write_atomic(&path, b"content").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"content");
}

#[test]
fn test_write_atomic_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("file.txt");

    io::write_atomic(&path, b"one").unwrap();
    io::write_atomic(&path, b"two").unwrap();

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["file.txt".to_string()]);
}

#[test]
fn test_write_atomic_preserves_exact_bytes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("crlf.txt");
    let content = b"line one\r\nline two\r\n\xff\x00";

    io::write_atomic(&path, content).unwrap();

    assert_eq!(fs::read(&path).unwrap(), content);
}

#[test]
fn test_write_atomic_fails_when_parent_is_a_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("blocker"), "not a dir").unwrap();

    let result = io::write_atomic(&temp.path().join("blocker/file.txt"), b"x");
    assert!(result.is_err());
}

#[test]
fn test_read_optional_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");
    fs::write(&path, "hello").unwrap();

    assert_eq!(io::read_optional(&path).unwrap(), Some(b"hello".to_vec()));
}

#[test]
fn test_read_optional_missing_file_is_none() {
    let temp = TempDir::new().unwrap();
    assert_eq!(io::read_optional(&temp.path().join("absent")).unwrap(), None);
}

#[test]
fn test_read_optional_directory_is_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("dir")).unwrap();

    assert!(io::read_optional(&temp.path().join("dir")).is_err());
}

#[test]
#[cfg(unix)]
fn test_copy_permissions_keeps_executable_bit() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let from = temp.path().join("script.sh");
    let to = temp.path().join("copy.sh");
    fs::write(&from, "#!/bin/sh\n").unwrap();
    fs::write(&to, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&from, fs::Permissions::from_mode(0o755)).unwrap();

    io::copy_permissions(&from, &to).unwrap();

    let mode = fs::metadata(&to).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}
