use pretty_assertions::assert_eq;
use rstest::rstest;
use sync_fs::NormalizedPath;
use std::path::Path;

#[rstest]
#[case("a.txt", "a.txt")]
#[case("./a.txt", "a.txt")]
#[case(".github/workflows/ci.yml", ".github/workflows/ci.yml")]
#[case("docs\\CONTRIBUTING.md", "docs/CONTRIBUTING.md")]
#[case("a//b/./c", "a/b/c")]
fn test_relative_accepts(#[case] raw: &str, #[case] expected: &str) {
    let path = NormalizedPath::relative(raw).unwrap();
    assert_eq!(path.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case(".")]
#[case("/etc/passwd")]
#[case("\\server\\share")]
#[case("C:\\Windows\\system.ini")]
#[case("../outside.txt")]
#[case("a/../../b")]
#[case("a/../b")]
fn test_relative_rejects(#[case] raw: &str) {
    assert!(
        NormalizedPath::relative(raw).is_err(),
        "expected '{}' to be rejected",
        raw
    );
}

#[test]
fn test_relative_error_names_the_path() {
    let err = NormalizedPath::relative("../x").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("../x"), "got: {}", msg);
    assert!(msg.contains(".."), "got: {}", msg);
}

#[test]
fn test_resolve_under_uses_native_components() {
    let path = NormalizedPath::relative("nested/dir/file.txt").unwrap();
    let resolved = path.resolve_under(Path::new("/consumer"));
    assert_eq!(
        resolved,
        Path::new("/consumer").join("nested").join("dir").join("file.txt")
    );
}

#[test]
fn test_serializes_as_plain_string() {
    let path = NormalizedPath::relative("a/b.txt").unwrap();
    assert_eq!(serde_json::to_string(&path).unwrap(), "\"a/b.txt\"");
}
