//! Token metadata: what each token in an instruction stream refers to.

use std::fmt;

use rustc_hash::FxHashMap;

use super::token::{Token, TokenTable};

/// Whether a member is a field or a method.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Field => f.write_str("field"),
            MemberKind::Method => f.write_str("method"),
        }
    }
}

/// How a method is invoked, as recorded in its definition.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum MethodRole {
    /// An instance method with no special meaning.
    #[default]
    Instance,
    /// A property accessor. Only these name a member.
    Getter,
    /// A static method or free function; there is no receiver.
    Static,
}

/// How a signature relates to generic type parameters.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum GenericContext {
    /// No type parameters involved.
    #[default]
    NonGeneric,
    /// Instantiated with concrete types only (`GenericType<Class>`).
    Closed,
    /// Mentions a type parameter of the enclosing generic type or method.
    /// The instantiation is erased from the instruction stream.
    Enclosing,
}

/// The type that declares a member.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeInfo {
    name: Box<str>,
    nullable_wrapper: bool,
    generic: GenericContext,
}

impl TypeInfo {
    pub fn named(name: &str) -> Self {
        TypeInfo {
            name: name.into(),
            nullable_wrapper: false,
            generic: GenericContext::NonGeneric,
        }
    }

    /// A nullable wrapper type; its getters unwrap rather than navigate.
    pub fn nullable_wrapper(name: &str) -> Self {
        TypeInfo {
            nullable_wrapper: true,
            ..TypeInfo::named(name)
        }
    }

    #[must_use]
    pub fn with_generic(mut self, generic: GenericContext) -> Self {
        self.generic = generic;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_nullable_wrapper(&self) -> bool {
        self.nullable_wrapper
    }

    pub fn generic(&self) -> GenericContext {
        self.generic
    }
}

/// A field or method a token resolves to.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MemberInfo {
    name: Box<str>,
    kind: MemberKind,
    role: MethodRole,
    declaring_type: TypeInfo,
    generic: GenericContext,
}

impl MemberInfo {
    pub fn field(name: &str, declaring_type: TypeInfo) -> Self {
        MemberInfo {
            name: name.into(),
            kind: MemberKind::Field,
            role: MethodRole::Instance,
            declaring_type,
            generic: GenericContext::NonGeneric,
        }
    }

    /// An ordinary instance method.
    pub fn method(name: &str, declaring_type: TypeInfo) -> Self {
        Self::method_with_role(name, declaring_type, MethodRole::Instance)
    }

    /// A property getter (`get_name`).
    pub fn getter(name: &str, declaring_type: TypeInfo) -> Self {
        Self::method_with_role(name, declaring_type, MethodRole::Getter)
    }

    /// A static method or free function.
    pub fn static_method(name: &str, declaring_type: TypeInfo) -> Self {
        Self::method_with_role(name, declaring_type, MethodRole::Static)
    }

    fn method_with_role(name: &str, declaring_type: TypeInfo, role: MethodRole) -> Self {
        MemberInfo {
            name: name.into(),
            kind: MemberKind::Method,
            role,
            declaring_type,
            generic: GenericContext::NonGeneric,
        }
    }

    /// Set the generic context of the member's own signature.
    #[must_use]
    pub fn with_generic(mut self, generic: GenericContext) -> Self {
        self.generic = generic;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Always [`MethodRole::Instance`] for fields.
    pub fn role(&self) -> MethodRole {
        self.role
    }

    pub fn declaring_type(&self) -> &TypeInfo {
        &self.declaring_type
    }

    /// `true` if resolving this member needs type arguments that only the
    /// enclosing generic scope knows.
    pub fn requires_generic_context(&self) -> bool {
        self.generic == GenericContext::Enclosing
            || self.declaring_type.generic == GenericContext::Enclosing
    }
}

/// Failure to resolve a token against [`Metadata`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MetadataError {
    #[error("token {0} is not in the metadata table")]
    UnknownToken(Token),

    #[error("token {token} points into the wrong table for a {expected}")]
    WrongTable { token: Token, expected: MemberKind },

    #[error("token {token} resolves to `{name}`, which is not a {expected}")]
    KindMismatch {
        token: Token,
        name: Box<str>,
        expected: MemberKind,
    },

    #[error("`{name}` (token {token}) cannot be resolved without its enclosing generic context")]
    GenericContextRequired { token: Token, name: Box<str> },
}

/// Token table for one compiled closure.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Metadata {
    rows: FxHashMap<Token, MemberInfo>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record what `token` refers to, replacing any previous entry.
    pub fn insert(&mut self, token: Token, member: MemberInfo) {
        self.rows.insert(token, member);
    }

    /// Raw lookup without table or generic checks.
    pub fn get(&self, token: Token) -> Option<&MemberInfo> {
        self.rows.get(&token)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve an `ldfld` operand.
    pub fn resolve_field(&self, token: Token) -> Result<&MemberInfo, MetadataError> {
        if !matches!(
            token.table(),
            Some(TokenTable::FieldDef | TokenTable::MemberRef)
        ) {
            return Err(MetadataError::WrongTable {
                token,
                expected: MemberKind::Field,
            });
        }
        self.resolve(token, MemberKind::Field)
    }

    /// Resolve a `call`/`callvirt` operand.
    pub fn resolve_method(&self, token: Token) -> Result<&MemberInfo, MetadataError> {
        if !matches!(
            token.table(),
            Some(TokenTable::MethodDef | TokenTable::MemberRef | TokenTable::MethodSpec)
        ) {
            return Err(MetadataError::WrongTable {
                token,
                expected: MemberKind::Method,
            });
        }
        self.resolve(token, MemberKind::Method)
    }

    fn resolve(&self, token: Token, expected: MemberKind) -> Result<&MemberInfo, MetadataError> {
        let member = self.get(token).ok_or(MetadataError::UnknownToken(token))?;
        if member.kind != expected {
            return Err(MetadataError::KindMismatch {
                token,
                name: member.name.clone(),
                expected,
            });
        }
        if member.requires_generic_context() {
            return Err(MetadataError::GenericContextRequired {
                token,
                name: member.name.clone(),
            });
        }
        Ok(member)
    }
}
