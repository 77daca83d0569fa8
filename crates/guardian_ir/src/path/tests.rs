use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_root_only() {
    let path = MemberPath::root("thing").unwrap();
    assert_eq!(path.to_string(), "thing");
    assert_eq!(path.len(), 1);
    assert!(!path.is_member_access());
}

#[test]
fn test_empty_root_rejected() {
    assert!(MemberPath::root("").is_none());
}

#[test]
fn test_push_builds_outer_to_inner() {
    let mut path = MemberPath::root("thing").unwrap();
    assert!(path.push("nested_thing"));
    assert!(path.push("property"));
    assert_eq!(path.to_string(), "thing.nested_thing.property");
    assert_eq!(path.root_name(), "thing");
    assert!(path.is_member_access());
}

#[test]
fn test_push_rejects_empty_segment() {
    let mut path = MemberPath::root("thing").unwrap();
    assert!(!path.push(""));
    assert_eq!(path.len(), 1);
}

#[test]
fn test_from_segments() {
    let path = MemberPath::from_segments(["a", "b", "c"]);
    assert_eq!(path.map(|p| p.to_string()), Some("a.b.c".to_string()));

    let segments: Vec<&str> = Vec::new();
    assert!(MemberPath::from_segments(segments).is_none());
    assert!(MemberPath::from_segments(["a", "", "c"]).is_none());
}

#[test]
fn test_segments_iterator() {
    let path = MemberPath::from_segments(["class", "struct_field", "class"]).unwrap();
    let collected: Vec<&str> = path.segments().collect();
    assert_eq!(collected, vec!["class", "struct_field", "class"]);
}

#[test]
fn test_debug_format() {
    let path = MemberPath::from_segments(["x", "y"]).unwrap();
    assert_eq!(format!("{path:?}"), "MemberPath(x.y)");
}
