use super::*;
use pretty_assertions::assert_eq;

fn nested_chain() -> ExprTree {
    let mut b = TreeBuilder::new();
    let thing = b.local("thing");
    let nested = b.field(thing, "nested");
    let value = b.property(nested, "value");
    let root = b.unwrap(value);
    b.finish(root)
}

#[test]
fn test_builder_allocates_in_order() {
    let tree = nested_chain();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.root(), ExprId::new(3));
    assert_eq!(tree.get(ExprId::new(0)), Some(&ExprKind::Local("thing".into())));
    assert_eq!(
        tree.get(ExprId::new(1)),
        Some(&ExprKind::Field {
            receiver: ExprId::new(0),
            name: "nested".into(),
        })
    );
}

#[test]
fn test_out_of_range_lookup() {
    let tree = nested_chain();
    assert_eq!(tree.get(ExprId::new(99)), None);
}

#[test]
fn test_member_names() {
    let tree = nested_chain();
    let names: Vec<&str> = tree.iter().filter_map(|(_, n)| n.member_name()).collect();
    assert_eq!(names, vec!["nested", "value"]);
}

#[test]
fn test_pass_through_kinds() {
    let mut b = TreeBuilder::new();
    let x = b.local("x");
    let derefed = b.deref(x);
    let borrowed = b.borrow(derefed);
    let grouped = b.group(borrowed);
    let tree = b.finish(grouped);

    let pass: Vec<bool> = tree.iter().map(|(_, n)| n.is_pass_through()).collect();
    assert_eq!(pass, vec![false, true, true, true]);
    assert_eq!(tree.get(ExprId::new(1)).map(ExprKind::describe), Some("deref"));
}

#[test]
fn test_describe() {
    let mut b = TreeBuilder::new();
    let list = b.local("list");
    let one = b.int(1);
    let index = b.index(list, one);
    let call = b.method_call(index, "first", &[], &[]);
    let tree = b.finish(call);

    let kinds: Vec<&str> = tree.iter().map(|(_, n)| n.describe()).collect();
    assert_eq!(kinds, vec!["local", "literal", "index", "method call"]);
}

#[test]
fn test_method_call_keeps_generic_args() {
    let mut b = TreeBuilder::new();
    let recv = b.local("closed_generic");
    let arg = b.int(42);
    let call = b.method_call(recv, "method", &["Object"], &[arg]);
    let tree = b.finish(call);

    match tree.get(tree.root()) {
        Some(ExprKind::MethodCall {
            method,
            generic_args,
            args,
            ..
        }) => {
            assert_eq!(&**method, "method");
            assert_eq!(generic_args.len(), 1);
            assert_eq!(args.len(), 1);
        }
        other => panic!("expected method call, got {other:?}"),
    }
}

#[test]
fn test_expr_id_debug() {
    assert_eq!(format!("{:?}", ExprId::new(7)), "#7");
}
