//! Runtime variants for the Tal interpreter.
//!
//! Every value a script touches is a [`Variant`]. The kind set is closed,
//! so capability checks are pattern matches instead of a class hierarchy:
//! each kind supports some subset of the protocol (read, write, delete,
//! sort, properties) and reports the rest through its `can_*` predicates.
//!
//! A [`Variant::Variable`] holds only a name; every operation re-resolves
//! the current binding through the scope store, so a variable is never a
//! stale cache. Chunk kinds project a sub-range of a container-backed
//! owner and write back through the owner's own put protocol.

mod binary;
mod chunk;
mod contents;
mod dict;
mod list;
mod sort;

use url::Url;

use crate::context::Context;
use crate::errors::{unsupported_operation, ScriptResult};
use crate::name::VarName;
use crate::span::Span;

pub use dict::Dict;
pub use sort::{sort_value, Comparator};

/// A polymorphic runtime value.
#[derive(Clone, Debug)]
pub enum Variant {
    /// The empty value. Interchangeable with the empty string.
    Empty,
    Str(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    List(Vec<Variant>),
    Dict(Dict),
    Binary(Vec<u8>),
    Url(Url),
    /// Transparent indirection to another variant.
    Reference(Box<Variant>),
    /// A named reference into the scope store. Holds no value.
    Variable(VarName),
    /// A run of elements of a list-backed owner.
    ListChunk { owner: Box<Variant>, span: Span },
    /// A run of bytes of a binary-backed owner.
    BinaryChunk { owner: Box<Variant>, span: Span },
    /// A run of characters of a text-backed owner.
    StrChunk { owner: Box<Variant>, span: Span },
}

// Factory methods

impl Variant {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Variant::Str(s.into())
    }

    #[inline]
    pub fn integer(n: i64) -> Self {
        Variant::Integer(n)
    }

    #[inline]
    pub fn number(n: f64) -> Self {
        Variant::Number(n)
    }

    #[inline]
    pub fn list(items: Vec<Variant>) -> Self {
        Variant::List(items)
    }

    #[inline]
    pub fn dict(d: Dict) -> Self {
        Variant::Dict(d)
    }

    #[inline]
    pub fn binary(bytes: Vec<u8>) -> Self {
        Variant::Binary(bytes)
    }

    #[inline]
    pub fn reference(target: Variant) -> Self {
        Variant::Reference(Box::new(target))
    }

    #[inline]
    pub fn variable(name: impl Into<VarName>) -> Self {
        Variant::Variable(name.into())
    }

    #[inline]
    pub fn list_chunk(owner: Variant, span: Span) -> Self {
        Variant::ListChunk {
            owner: Box::new(owner),
            span,
        }
    }

    #[inline]
    pub fn binary_chunk(owner: Variant, span: Span) -> Self {
        Variant::BinaryChunk {
            owner: Box::new(owner),
            span,
        }
    }

    #[inline]
    pub fn str_chunk(owner: Variant, span: Span) -> Self {
        Variant::StrChunk {
            owner: Box::new(owner),
            span,
        }
    }
}

// Identity and display forms

impl Variant {
    /// The display name of this variant's kind, as used in error messages
    /// and by the type registry.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Variant::Empty => "empty",
            Variant::Str(_) => "string",
            Variant::Integer(_) => "integer",
            Variant::Number(_) => "number",
            Variant::Bool(_) => "boolean",
            Variant::List(_) => "list",
            Variant::Dict(_) => "dictionary",
            Variant::Binary(_) => "binary",
            Variant::Url(_) => "URL",
            Variant::Reference(_) => "reference",
            Variant::Variable(_) => "variable",
            Variant::ListChunk { .. } => "list chunk",
            Variant::BinaryChunk { .. } => "binary chunk",
            Variant::StrChunk { .. } => "string chunk",
        }
    }

    /// This variant as source-like text. Needs no context: variables show
    /// as their name, chunks as a chunk expression over their owner.
    pub fn to_language(&self) -> String {
        match self {
            Variant::Empty => "empty".to_string(),
            Variant::Str(s) => quote(s),
            Variant::Integer(n) => n.to_string(),
            Variant::Number(n) => format_number(*n),
            Variant::Bool(b) => b.to_string(),
            Variant::List(items) => {
                let parts: Vec<String> = items.iter().map(Variant::to_language).collect();
                format!("({})", parts.join(", "))
            }
            Variant::Dict(d) => {
                if d.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<String> = d
                        .iter()
                        .map(|(k, v)| format!("{} = {}", quote(k), v.to_language()))
                        .collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            Variant::Binary(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
                format!("${hex}")
            }
            Variant::Url(u) => quote(u.as_str()),
            Variant::Reference(r) => r.to_language(),
            Variant::Variable(name) => name.as_str().to_string(),
            Variant::ListChunk { owner, span } => {
                format!("items {} to {} of {}", span.start, span.end, owner.to_language())
            }
            Variant::BinaryChunk { owner, span } => {
                format!("bytes {} to {} of {}", span.start, span.end, owner.to_language())
            }
            Variant::StrChunk { owner, span } => {
                format!("chars {} to {} of {}", span.start, span.end, owner.to_language())
            }
        }
    }

    /// This variant's value as plain text. Variables and chunks resolve
    /// their current content; an unbound variable reads as its own name.
    pub fn to_text(&self, ctx: &Context) -> String {
        match self {
            Variant::Empty => String::new(),
            Variant::Str(s) => s.clone(),
            Variant::Integer(n) => n.to_string(),
            Variant::Number(n) => format_number(*n),
            Variant::Bool(b) => b.to_string(),
            Variant::List(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_text(ctx)).collect();
                parts.join(",")
            }
            Variant::Dict(d) => {
                if d.is_empty() {
                    "{}".to_string()
                } else {
                    let mut out = String::from("{\n");
                    for (k, v) in d.iter() {
                        out.push('\t');
                        out.push_str(&quote(k));
                        out.push_str(" = ");
                        out.push_str(&v.to_language());
                        out.push('\n');
                    }
                    out.push('}');
                    out
                }
            }
            Variant::Binary(bytes) => bytes.iter().map(|b| format!("{b:02X}")).collect(),
            Variant::Url(u) => u.as_str().to_string(),
            Variant::Reference(r) => r.to_text(ctx),
            Variant::Variable(name) => match ctx.scopes().lookup(name) {
                Some(value) => value.clone().to_text(ctx),
                None => name.as_str().to_string(),
            },
            Variant::ListChunk { .. } | Variant::BinaryChunk { .. } | Variant::StrChunk { .. } => {
                match chunk::snapshot(ctx, self) {
                    Ok(v) => v.to_text(ctx),
                    Err(_) => String::new(),
                }
            }
        }
    }

    /// True when this is the empty value or empty text.
    pub fn is_empty_value(&self) -> bool {
        matches!(self, Variant::Empty) || matches!(self, Variant::Str(s) if s.is_empty())
    }
}

// Resolution: variable / container / primitive views

impl Variant {
    /// If this is a variable, its current value; otherwise this variant.
    /// An unbound variable degrades to text equal to its own name.
    pub fn as_value(&self, ctx: &Context) -> ScriptResult<Variant> {
        match self {
            Variant::Variable(name) => Ok(match ctx.scopes().lookup(name) {
                Some(value) => value.clone(),
                None => Variant::string(name.as_str()),
            }),
            Variant::Reference(r) => r.as_value(ctx),
            Variant::ListChunk { .. } | Variant::BinaryChunk { .. } | Variant::StrChunk { .. } => {
                chunk::snapshot(ctx, self)
            }
            _ => Ok(self.clone()),
        }
    }

    /// The current contents of a variable or chunk; the value itself
    /// otherwise. Identical fallback for unbound variables as
    /// [`Variant::as_value`].
    pub fn as_contents(&self, ctx: &Context) -> ScriptResult<Variant> {
        self.as_value(ctx)
    }

    /// Resolve through variables, references, and chunks until a primitive
    /// value remains.
    pub fn as_primitive(&self, ctx: &Context) -> ScriptResult<Variant> {
        let value = self.as_value(ctx)?;
        match value {
            Variant::Variable(_) | Variant::Reference(_) => value.as_primitive(ctx),
            Variant::ListChunk { .. } | Variant::BinaryChunk { .. } | Variant::StrChunk { .. } => {
                value.as_primitive(ctx)
            }
            _ => Ok(value),
        }
    }

    /// A container to read or write through. A variable (declared on
    /// demand) or chunk is already a container; a primitive is treated as
    /// a variable name, matching unquoted-literal assignment.
    pub fn as_container(&self, ctx: &mut Context) -> ScriptResult<Variant> {
        match self {
            Variant::Variable(name) => {
                declare_if_missing(ctx, name);
                Ok(self.clone())
            }
            Variant::Reference(_)
            | Variant::ListChunk { .. }
            | Variant::BinaryChunk { .. }
            | Variant::StrChunk { .. } => Ok(self.clone()),
            _ => {
                let name = VarName::new(self.to_text(ctx));
                declare_if_missing(ctx, &name);
                Ok(Variant::Variable(name))
            }
        }
    }

    /// This variant as a variable, declaring it on first use. Chunks and
    /// references cannot become variables.
    pub fn as_variable(&self, ctx: &mut Context) -> ScriptResult<Variant> {
        match self {
            Variant::Variable(name) => {
                declare_if_missing(ctx, name);
                Ok(self.clone())
            }
            Variant::Reference(_)
            | Variant::ListChunk { .. }
            | Variant::BinaryChunk { .. }
            | Variant::StrChunk { .. } => Err(unsupported_operation(
                "make a variable of",
                self.to_language(),
            )),
            _ => {
                let name = VarName::new(self.to_text(ctx));
                declare_if_missing(ctx, &name);
                Ok(Variant::Variable(name))
            }
        }
    }
}

fn declare_if_missing(ctx: &mut Context, name: &VarName) {
    if !ctx.scopes().is_declared(name) {
        ctx.scopes_mut()
            .map_for(name)
            .declare(name.clone(), Variant::Empty);
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Empty and the empty string are the same value.
            (a, b) if a.is_empty_value() && b.is_empty_value() => true,
            (Variant::Str(a), Variant::Str(b)) => a == b,
            (Variant::Integer(a), Variant::Integer(b)) => a == b,
            (Variant::Number(a), Variant::Number(b)) => a == b,
            (Variant::Bool(a), Variant::Bool(b)) => a == b,
            (Variant::List(a), Variant::List(b)) => a == b,
            (Variant::Dict(a), Variant::Dict(b)) => a == b,
            (Variant::Binary(a), Variant::Binary(b)) => a == b,
            (Variant::Url(a), Variant::Url(b)) => a == b,
            (Variant::Reference(a), Variant::Reference(b)) => a == b,
            // Variable identity is its case-insensitive name.
            (Variant::Variable(a), Variant::Variable(b)) => a == b,
            (
                Variant::ListChunk { owner: a, span: sa },
                Variant::ListChunk { owner: b, span: sb },
            )
            | (
                Variant::BinaryChunk { owner: a, span: sa },
                Variant::BinaryChunk { owner: b, span: sb },
            )
            | (
                Variant::StrChunk { owner: a, span: sa },
                Variant::StrChunk { owner: b, span: sb },
            ) => sa == sb && a == b,
            _ => false,
        }
    }
}

/// Quote text as a source-form string literal, doubling embedded quotes.
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Text form of a number: integral values print without a fraction.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "nan".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_forms() {
        let ctx = Context::new();
        assert_eq!(Variant::Empty.to_text(&ctx), "");
        assert_eq!(Variant::integer(42).to_text(&ctx), "42");
        assert_eq!(Variant::number(2.5).to_text(&ctx), "2.5");
        assert_eq!(Variant::number(3.0).to_text(&ctx), "3");
        assert_eq!(Variant::Bool(true).to_text(&ctx), "true");
        assert_eq!(
            Variant::list(vec![Variant::integer(1), Variant::string("a")]).to_text(&ctx),
            "1,a"
        );
        assert_eq!(Variant::binary(vec![0xDE, 0xAD]).to_text(&ctx), "DEAD");
    }

    #[test]
    fn test_language_forms() {
        assert_eq!(Variant::string("hi").to_language(), "\"hi\"");
        assert_eq!(Variant::string("say \"hi\"").to_language(), "\"say \"\"hi\"\"\"");
        assert_eq!(
            Variant::list(vec![Variant::integer(1), Variant::integer(2)]).to_language(),
            "(1, 2)"
        );
        assert_eq!(Variant::variable("cow").to_language(), "cow");
    }

    #[test]
    fn test_empty_equals_empty_string() {
        assert_eq!(Variant::Empty, Variant::string(""));
        assert_ne!(Variant::Empty, Variant::string("x"));
    }

    #[test]
    fn test_variable_equality_is_case_insensitive() {
        assert_eq!(Variant::variable("Foo"), Variant::variable("FOO"));
        assert_ne!(Variant::variable("foo"), Variant::variable("bar"));
    }

    #[test]
    fn test_unbound_variable_reads_as_its_name() {
        let ctx = Context::new();
        let v = Variant::variable("foo");
        assert_eq!(v.as_value(&ctx), Ok(Variant::string("foo")));
        assert_eq!(v.as_contents(&ctx), Ok(Variant::string("foo")));
        assert_eq!(v.as_primitive(&ctx), Ok(Variant::string("foo")));
        assert_eq!(v.to_text(&ctx), "foo");
    }

    #[test]
    fn test_bound_variable_resolves_current_value() {
        let mut ctx = Context::new();
        ctx.scopes_mut()
            .set(VarName::new("x"), Variant::integer(9));
        let v = Variant::variable("X");
        assert_eq!(v.as_value(&ctx), Ok(Variant::integer(9)));
        // No caching: a later rebind is observed immediately.
        ctx.scopes_mut()
            .set(VarName::new("x"), Variant::integer(10));
        assert_eq!(v.as_value(&ctx), Ok(Variant::integer(10)));
    }

    #[test]
    fn test_as_container_declares_variable() {
        let mut ctx = Context::new();
        let v = Variant::variable("fresh");
        let c = v.as_container(&mut ctx).expect("container");
        assert_eq!(c, v);
        assert!(ctx.scopes().is_declared(&VarName::new("fresh")));
    }

    #[test]
    fn test_primitive_as_variable_uses_text_as_name() {
        let mut ctx = Context::new();
        let v = Variant::string("target").as_variable(&mut ctx).expect("variable");
        assert_eq!(v, Variant::variable("target"));
    }

    #[test]
    fn test_reference_is_transparent() {
        let ctx = Context::new();
        let r = Variant::reference(Variant::integer(5));
        assert_eq!(r.as_value(&ctx), Ok(Variant::integer(5)));
        assert_eq!(r.to_text(&ctx), "5");
    }

    #[test]
    fn test_chunk_as_variable_fails() {
        let mut ctx = Context::new();
        let chunk = Variant::list_chunk(Variant::variable("xs"), Span::new(1, 2));
        assert!(chunk.as_variable(&mut ctx).is_err());
    }
}
