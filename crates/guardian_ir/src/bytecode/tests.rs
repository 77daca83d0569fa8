use super::*;
use pretty_assertions::assert_eq;

fn closure_type() -> TypeInfo {
    TypeInfo::named("<>c__DisplayClass0_0")
}

#[test]
fn test_opcode_roundtrip_known_bytes() {
    for byte in 0..=u8::MAX {
        if let Some(op) = OpCode::from_byte(byte) {
            assert_eq!(op.byte(), byte, "{}", op.mnemonic());
        }
    }
    assert_eq!(OpCode::from_byte(0xFE), None);
}

#[test]
fn test_token_layout() {
    let token = Token::new(TokenTable::MethodDef, 3);
    assert_eq!(token.raw(), 0x0600_0003);
    assert_eq!(token.table(), Some(TokenTable::MethodDef));
    assert_eq!(token.row(), 3);
    assert_eq!(token.to_string(), "0x06000003");
    assert_eq!(Token::from_raw(0xFF00_0001).table(), None);
}

#[test]
fn test_token_read_little_endian() {
    let bytes = [0x7B, 0x01, 0x00, 0x00, 0x04];
    assert_eq!(
        Token::read(&bytes, 1),
        Some(Token::new(TokenTable::FieldDef, 1))
    );
    assert_eq!(Token::read(&bytes, 2), None);
    assert_eq!(Token::read(&bytes, usize::MAX), None);
}

#[test]
fn test_assembler_interns_tokens() {
    let mut asm = Assembler::new();
    let thing = MemberInfo::field("thing", closure_type());
    let first = asm.token(TokenTable::FieldDef, thing.clone());
    let again = asm.token(TokenTable::FieldDef, thing);
    let other = asm.token(
        TokenTable::FieldDef,
        MemberInfo::field("other", closure_type()),
    );

    assert_eq!(first, again);
    assert_eq!(first.row(), 1);
    assert_eq!(other.row(), 2);
    assert_eq!(asm.finish().metadata().len(), 2);
}

#[test]
fn test_assembler_emits_five_byte_strides() {
    let mut asm = Assembler::new();
    asm.op(OpCode::Ldarg0)
        .ldfld(MemberInfo::field("thing", closure_type()))
        .call(
            OpCode::Callvirt,
            TokenTable::MethodDef,
            MemberInfo::getter("get_nested", TypeInfo::named("Thing")),
        )
        .op(OpCode::Ret);
    let closure = asm.finish();

    assert_eq!(
        closure.il(),
        &[0x02, 0x7B, 0x01, 0x00, 0x00, 0x04, 0x6F, 0x01, 0x00, 0x00, 0x06, 0x2A]
    );
}

#[test]
fn test_resolve_field_and_method() {
    let mut asm = Assembler::new();
    let field = asm.token(TokenTable::FieldDef, MemberInfo::field("thing", closure_type()));
    let method = asm.token(
        TokenTable::MethodDef,
        MemberInfo::getter("get_value", TypeInfo::named("Thing")),
    );
    let closure = asm.finish();
    let metadata = closure.metadata();

    assert_eq!(metadata.resolve_field(field).unwrap().name(), "thing");
    assert_eq!(metadata.resolve_method(method).unwrap().name(), "get_value");
    assert_eq!(
        metadata.resolve_method(method).unwrap().role(),
        MethodRole::Getter
    );
    assert_eq!(
        metadata.resolve_field(method),
        Err(MetadataError::WrongTable {
            token: method,
            expected: MemberKind::Field,
        })
    );
}

#[test]
fn test_resolve_rejects_kind_mismatch_and_unknown() {
    let mut metadata = Metadata::new();
    let token = Token::new(TokenTable::MemberRef, 1);
    metadata.insert(token, MemberInfo::field("count", TypeInfo::named("List")));

    assert!(matches!(
        metadata.resolve_method(token),
        Err(MetadataError::KindMismatch { .. })
    ));

    let missing = Token::new(TokenTable::MemberRef, 9);
    assert_eq!(
        metadata.resolve_field(missing),
        Err(MetadataError::UnknownToken(missing))
    );
}

#[test]
fn test_generic_context() {
    let open = TypeInfo::named("GenericType`1").with_generic(GenericContext::Enclosing);
    let closed = TypeInfo::named("GenericType`1").with_generic(GenericContext::Closed);

    let mut asm = Assembler::new();
    let needs_context = asm.token(
        TokenTable::MemberRef,
        MemberInfo::method("get_property", open),
    );
    let fine = asm.token(
        TokenTable::MemberRef,
        MemberInfo::method("get_property", closed),
    );
    let own_generic = asm.token(
        TokenTable::MethodSpec,
        MemberInfo::method("method", TypeInfo::named("Thing"))
            .with_generic(GenericContext::Enclosing),
    );
    let closure = asm.finish();
    let metadata = closure.metadata();

    assert!(matches!(
        metadata.resolve_method(needs_context),
        Err(MetadataError::GenericContextRequired { .. })
    ));
    assert!(metadata.resolve_method(fine).is_ok());
    assert!(matches!(
        metadata.resolve_method(own_generic),
        Err(MetadataError::GenericContextRequired { .. })
    ));
}

#[test]
fn test_disassemble() {
    let mut asm = Assembler::new();
    asm.op(OpCode::Ldarg0)
        .ldfld(MemberInfo::field("thing", closure_type()))
        .op(OpCode::Stloc0)
        .br_s(0)
        .op(OpCode::Ldloc0)
        .op(OpCode::Ret);
    let listing = asm.finish().disassemble();

    assert_eq!(
        listing,
        "IL_0000: ldarg.0\n\
         IL_0001: ldfld 0x04000001 // <>c__DisplayClass0_0::thing\n\
         IL_0006: stloc.0\n\
         IL_0007: br.s 0\n\
         IL_0009: ldloc.0\n\
         IL_000A: ret"
    );
}

#[test]
fn test_disassemble_malformed() {
    let closure = CompiledClosure::new(vec![0xFE, 0x20, 0x01], Metadata::new());
    assert_eq!(
        closure.disassemble(),
        "IL_0000: .byte 0xFE\nIL_0001: ldc.i4 <truncated>"
    );
}

#[test]
fn test_method_roles_are_interned_separately() {
    let thing = TypeInfo::named("Thing");
    let mut asm = Assembler::new();
    let getter = asm.token(TokenTable::MethodDef, MemberInfo::getter("get_len", thing.clone()));
    let method = asm.token(TokenTable::MethodDef, MemberInfo::method("get_len", thing.clone()));
    let free = asm.token(
        TokenTable::MethodDef,
        MemberInfo::static_method("get_len", thing),
    );
    assert_ne!(getter, method);
    assert_ne!(method, free);

    let closure = asm.finish();
    let roles: Vec<MethodRole> = [getter, method, free]
        .into_iter()
        .map(|token| closure.metadata().resolve_method(token).unwrap().role())
        .collect();
    assert_eq!(
        roles,
        vec![MethodRole::Getter, MethodRole::Instance, MethodRole::Static]
    );
    assert_eq!(
        MemberInfo::field("count", TypeInfo::named("List")).role(),
        MethodRole::Instance
    );
}
