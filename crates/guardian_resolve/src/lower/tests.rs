use super::*;
use guardian_ir::{MethodRole, Token, TreeBuilder};
use pretty_assertions::assert_eq;

fn chain() -> ExprTree {
    let mut b = TreeBuilder::new();
    let thing = b.local("thing");
    let nested = b.field(thing, "nested");
    let value = b.property(nested, "value");
    b.finish(value)
}

fn mnemonics(closure: &CompiledClosure) -> Vec<String> {
    closure
        .disassemble()
        .lines()
        .map(|line| {
            let instr = line.split_once(": ").map_or(line, |(_, rest)| rest);
            instr.split_whitespace().next().unwrap_or_default().to_owned()
        })
        .collect()
}

#[test]
fn test_release_body() {
    let closure = compile(&chain(), LowerOptions::default());
    assert_eq!(
        mnemonics(&closure),
        vec!["ldarg.0", "ldfld", "ldfld", "callvirt", "ret"]
    );
    assert_eq!(closure.il().len(), 1 + 5 * 3 + 1);
}

#[test]
fn test_debug_body() {
    let closure = compile(&chain(), LowerOptions { debug: true });
    assert_eq!(
        mnemonics(&closure),
        vec!["ldarg.0", "ldfld", "ldfld", "callvirt", "stloc.0", "br.s", "ldloc.0", "ret"]
    );
}

#[test]
fn test_capture_and_getter_metadata() {
    let closure = compile(&chain(), LowerOptions::default());
    let il = closure.il();
    let metadata = closure.metadata();

    let capture = metadata.get(Token::read(il, 2).unwrap_or(Token::from_raw(0)));
    assert_eq!(capture.map(MemberInfo::name), Some("thing"));
    assert_eq!(
        capture.map(|m| m.declaring_type().name()),
        Some(CLOSURE_TYPE)
    );

    let getter = metadata.get(Token::read(il, 12).unwrap_or(Token::from_raw(0)));
    assert_eq!(getter.map(MemberInfo::name), Some("get_value"));
    assert_eq!(getter.map(MemberInfo::role), Some(MethodRole::Getter));
}

#[test]
fn test_free_call_is_static() {
    let mut b = TreeBuilder::new();
    let thing = b.local("thing");
    let items = b.field(thing, "items");
    let root = b.call("get_len", &[items]);
    let closure = compile(&b.finish(root), LowerOptions::default());

    assert_eq!(
        mnemonics(&closure),
        vec!["ldarg.0", "ldfld", "ldfld", "call", "ret"]
    );
    let token = Token::read(closure.il(), 12).unwrap_or(Token::from_raw(0));
    let callee = closure.metadata().resolve_method(token);
    assert_eq!(callee.map(MemberInfo::role), Ok(MethodRole::Static));
}

#[test]
fn test_method_call_is_not_a_getter() {
    let mut b = TreeBuilder::new();
    let thing = b.local("thing");
    let root = b.method_call(thing, "get_value", &[], &[]);
    let closure = compile(&b.finish(root), LowerOptions::default());

    let token = Token::read(closure.il(), 7).unwrap_or(Token::from_raw(0));
    let method = closure.metadata().resolve_method(token);
    assert_eq!(method.map(MemberInfo::role), Ok(MethodRole::Instance));
}

#[test]
fn test_deref_emits_only_operand() {
    let mut b = TreeBuilder::new();
    let x = b.local("x");
    let root = b.deref(x);
    let closure = compile(&b.finish(root), LowerOptions::default());
    assert_eq!(mnemonics(&closure), vec!["ldarg.0", "ldfld", "ret"]);
}

#[test]
fn test_unwrap_calls_nullable_getter() {
    let mut b = TreeBuilder::new();
    let x = b.local("x");
    let root = b.unwrap(x);
    let closure = compile(&b.finish(root), LowerOptions::default());

    assert_eq!(mnemonics(&closure), vec!["ldarg.0", "ldfld", "call", "ret"]);
    let token = Token::read(closure.il(), 7).unwrap_or(Token::from_raw(0));
    let member = closure.metadata().resolve_method(token);
    assert!(member.is_ok_and(|m| m.declaring_type().is_nullable_wrapper()));
}

#[test]
fn test_literals() {
    let cases: &[(fn(&mut TreeBuilder) -> ExprId, &str)] = &[
        (|b| b.int(8), "ldc.i4"),
        (|b| b.int(i64::MAX), "ldc.i8"),
        (|b| b.bool(true), "ldc.i4"),
        (|b| b.str("s"), "ldnull"),
        (|b| b.constant("None"), "ldnull"),
        (TreeBuilder::default_value, "ldnull"),
        (TreeBuilder::conditional, "nop"),
        (TreeBuilder::block, "nop"),
    ];
    for &(build, first) in cases {
        let mut b = TreeBuilder::new();
        let root = build(&mut b);
        let closure = compile(&b.finish(root), LowerOptions::default());
        assert_eq!(mnemonics(&closure), vec![first, "ret"]);
    }
}

#[test]
fn test_index_and_generic_method() {
    let mut b = TreeBuilder::new();
    let list = b.local("list");
    let one = b.int(1);
    let element = b.index(list, one);
    let root = b.method_call(element, "method", &["Object"], &[]);
    let closure = compile(&b.finish(root), LowerOptions::default());

    assert_eq!(
        mnemonics(&closure),
        vec!["ldarg.0", "ldfld", "ldc.i4", "ldelem.ref", "callvirt", "ret"]
    );
    let token = Token::read(closure.il(), 13).unwrap_or(Token::from_raw(0));
    assert_eq!(token.table(), Some(TokenTable::MethodSpec));
}

#[test]
fn test_cyclic_tree_terminates() {
    let mut b = TreeBuilder::new();
    let first = b.field(ExprId::new(1), "a");
    b.field(first, "b");
    let closure = compile(&b.finish(first), LowerOptions::default());
    assert_eq!(closure.il().last(), Some(&OpCode::Ret.byte()));
}

#[test]
fn test_deep_chain() {
    let mut b = TreeBuilder::new();
    let mut id = b.local("root");
    for _ in 0..50_000 {
        id = b.field(id, "next");
    }
    let closure = compile(&b.finish(id), LowerOptions::default());
    assert_eq!(closure.il().len(), 1 + 5 * 50_001 + 1);
}
