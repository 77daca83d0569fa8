//! `expr!` implementation.
//!
//! The input is parsed as a `syn::Expr` and flattened into a list of
//! [`Node`]s, children first. Each node becomes one `TreeBuilder` call in the
//! generated shape function.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Expr, ExprCall, ExprLit, ExprMethodCall, Ident, Lit, Member, Path, UnOp};

/// Main entry point for the `expr!` macro.
pub fn expand(input: TokenStream) -> TokenStream {
    match expand_impl(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_impl(input: TokenStream2) -> syn::Result<TokenStream2> {
    if input.is_empty() {
        return Err(syn::Error::new(
            Span::call_site(),
            "expr! needs an expression, e.g. `expr!(&thing.name)`",
        ));
    }
    let expr: Expr = syn::parse2(input)?;

    let mut flattener = Flattener::default();
    let root = flattener.flatten(&expr);
    let calls = flattener
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let var = node_var(index);
            let call = node.builder_call();
            quote! { let #var = builder.#call; }
        });
    let root = node_var(root);

    Ok(quote! {
        {
            fn __guardian_shape() -> ::guardian::Shape {
                let mut builder = ::guardian::ir::TreeBuilder::new();
                #(#calls)*
                ::guardian::Shape::Tree(builder.finish(#root))
            }
            ::guardian::Inspected::new(|| (#expr), __guardian_shape)
        }
    })
}

fn node_var(index: usize) -> Ident {
    format_ident!("__node{}", index)
}

/// One tree node, referring to earlier nodes by index.
#[derive(Clone, Debug, PartialEq)]
enum Node {
    Local(String),
    Field(usize, String),
    Property(usize, String),
    Unwrap(usize),
    Borrow(usize),
    Deref(usize),
    Group(usize),
    MethodCall {
        receiver: usize,
        method: String,
        generic_args: Vec<String>,
        args: Vec<usize>,
    },
    Call(String, Vec<usize>),
    Index(usize, usize),
    Int(i64),
    Bool(bool),
    Str(String),
    Constant(String),
    OtherLiteral(&'static str),
    Default,
    Conditional,
    Block,
    Cast(usize),
    Other(&'static str),
}

impl Node {
    /// The `TreeBuilder` method call that stores this node.
    fn builder_call(&self) -> TokenStream2 {
        match self {
            Node::Local(name) => quote! { local(#name) },
            Node::Field(receiver, name) => {
                let receiver = node_var(*receiver);
                quote! { field(#receiver, #name) }
            }
            Node::Property(receiver, name) => {
                let receiver = node_var(*receiver);
                quote! { property(#receiver, #name) }
            }
            Node::Unwrap(operand) => {
                let operand = node_var(*operand);
                quote! { unwrap(#operand) }
            }
            Node::Borrow(operand) => {
                let operand = node_var(*operand);
                quote! { borrow(#operand) }
            }
            Node::Deref(operand) => {
                let operand = node_var(*operand);
                quote! { deref(#operand) }
            }
            Node::Group(operand) => {
                let operand = node_var(*operand);
                quote! { group(#operand) }
            }
            Node::MethodCall {
                receiver,
                method,
                generic_args,
                args,
            } => {
                let receiver = node_var(*receiver);
                let args = args.iter().map(|&arg| node_var(arg));
                quote! { method_call(#receiver, #method, &[#(#generic_args),*], &[#(#args),*]) }
            }
            Node::Call(callee, args) => {
                let args = args.iter().map(|&arg| node_var(arg));
                quote! { call(#callee, &[#(#args),*]) }
            }
            Node::Index(receiver, index) => {
                let receiver = node_var(*receiver);
                let index = node_var(*index);
                quote! { index(#receiver, #index) }
            }
            Node::Int(value) => quote! { int(#value) },
            Node::Bool(value) => quote! { bool(#value) },
            Node::Str(value) => quote! { str(#value) },
            Node::Constant(path) => quote! { constant(#path) },
            Node::OtherLiteral(kind) => quote! { other_literal(#kind) },
            Node::Default => quote! { default_value() },
            Node::Conditional => quote! { conditional() },
            Node::Block => quote! { block() },
            Node::Cast(operand) => {
                let operand = node_var(*operand);
                quote! { cast(#operand) }
            }
            Node::Other(kind) => quote! { other(#kind) },
        }
    }
}

#[derive(Default)]
struct Flattener {
    nodes: Vec<Node>,
}

impl Flattener {
    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Flatten `expr` and its relevant children; returns the node index.
    fn flatten(&mut self, expr: &Expr) -> usize {
        let node = match expr {
            Expr::Path(path) if path.qself.is_none() && is_local(&path.path) => {
                Node::Local(path.path.segments[0].ident.unraw().to_string())
            }
            Expr::Path(path) => Node::Constant(compact(path)),
            Expr::Field(field) => {
                let receiver = self.flatten(&field.base);
                let name = match &field.member {
                    Member::Named(ident) => ident.unraw().to_string(),
                    Member::Unnamed(index) => index.index.to_string(),
                };
                Node::Field(receiver, name)
            }
            Expr::MethodCall(call) => self.method_call(call),
            Expr::Reference(reference) => Node::Borrow(self.flatten(&reference.expr)),
            Expr::Paren(paren) => Node::Group(self.flatten(&paren.expr)),
            Expr::Group(group) => Node::Group(self.flatten(&group.expr)),
            Expr::Index(index) => {
                let receiver = self.flatten(&index.expr);
                let index = self.flatten(&index.index);
                Node::Index(receiver, index)
            }
            Expr::Lit(ExprLit { lit, .. }) => literal(lit, false),
            Expr::Unary(unary) if matches!(unary.op, UnOp::Deref(_)) => {
                Node::Deref(self.flatten(&unary.expr))
            }
            Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match &*unary.expr {
                Expr::Lit(ExprLit { lit, .. }) => literal(lit, true),
                _ => Node::Other("unary operation"),
            },
            Expr::Call(call) if is_default_call(call) => Node::Default,
            Expr::Call(call) => {
                let callee = compact(&call.func);
                let args = call.args.iter().map(|arg| self.flatten(arg)).collect();
                Node::Call(callee, args)
            }
            Expr::If(_) => Node::Conditional,
            Expr::Block(_) | Expr::Unsafe(_) => Node::Block,
            Expr::Cast(cast) => Node::Cast(self.flatten(&cast.expr)),
            other => Node::Other(describe(other)),
        };
        self.push(node)
    }

    fn method_call(&mut self, call: &ExprMethodCall) -> Node {
        let method = call.method.unraw().to_string();
        let receiver = self.flatten(&call.receiver);

        if call.args.is_empty() && call.turbofish.is_none() {
            if method == "unwrap" {
                return Node::Unwrap(receiver);
            }
            if let Some(property) = method.strip_prefix("get_").filter(|p| !p.is_empty()) {
                return Node::Property(receiver, property.to_owned());
            }
        }

        let generic_args = call
            .turbofish
            .iter()
            .flat_map(|turbofish| turbofish.args.iter())
            .map(compact)
            .collect();
        let args = call.args.iter().map(|arg| self.flatten(arg)).collect();
        Node::MethodCall {
            receiver,
            method,
            generic_args,
            args,
        }
    }
}

/// A single lower-case identifier (or `self`) with no generics.
fn is_local(path: &Path) -> bool {
    if path.leading_colon.is_some() || path.segments.len() != 1 {
        return false;
    }
    let segment = &path.segments[0];
    segment.arguments.is_none()
        && segment
            .ident
            .unraw()
            .to_string()
            .starts_with(|c: char| c.is_lowercase() || c == '_')
}

/// `Default::default()`, `T::default()`, `<T as Default>::default()`.
fn is_default_call(call: &ExprCall) -> bool {
    let Expr::Path(callee) = &*call.func else {
        return false;
    };
    call.args.is_empty()
        && (callee.qself.is_some() || callee.path.segments.len() > 1)
        && callee
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "default")
}

fn literal(lit: &Lit, negative: bool) -> Node {
    match lit {
        Lit::Int(int) => {
            let digits = if negative {
                format!("-{}", int.base10_digits())
            } else {
                int.base10_digits().to_owned()
            };
            digits
                .parse::<i64>()
                .map_or(Node::OtherLiteral("integer"), Node::Int)
        }
        Lit::Bool(value) if !negative => Node::Bool(value.value),
        Lit::Str(value) if !negative => Node::Str(value.value()),
        Lit::Float(_) => Node::OtherLiteral("float"),
        Lit::Char(_) => Node::OtherLiteral("char"),
        Lit::Byte(_) => Node::OtherLiteral("byte"),
        Lit::ByteStr(_) => Node::OtherLiteral("byte string"),
        _ if negative => Node::Other("unary operation"),
        _ => Node::OtherLiteral("literal"),
    }
}

fn describe(expr: &Expr) -> &'static str {
    match expr {
        Expr::Array(_) => "array",
        Expr::Assign(_) => "assignment",
        Expr::Async(_) => "async block",
        Expr::Await(_) => "await",
        Expr::Binary(_) => "binary operation",
        Expr::Closure(_) => "closure",
        Expr::Loop(_) | Expr::While(_) | Expr::ForLoop(_) => "loop",
        Expr::Macro(_) => "macro invocation",
        Expr::Match(_) => "match",
        Expr::Range(_) => "range",
        Expr::Struct(_) => "struct literal",
        Expr::Try(_) => "try",
        Expr::Tuple(_) => "tuple",
        Expr::Unary(_) => "unary operation",
        _ => "expression",
    }
}

/// Token text with the whitespace `to_string` inserts removed.
fn compact(tokens: &impl quote::ToTokens) -> String {
    tokens
        .to_token_stream()
        .to_string()
        .split_whitespace()
        .collect()
}
