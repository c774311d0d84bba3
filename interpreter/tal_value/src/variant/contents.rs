//! The container capability protocol.
//!
//! Each capability comes as a `can_*` predicate paired with the operation
//! itself. Callers are expected to check the predicate first; invoking a
//! capability past a false guard is reported as an unsupported-operation
//! error, never a panic. Plain values are immutable temporaries: they can
//! be read but only variables, chunks, and references to them can be
//! written, deleted, or sorted.

use crate::context::Context;
use crate::errors::{get_error, unsupported_operation, ScriptResult};
use crate::handler::Modifier;
use crate::variant::chunk::{self, Placement};
use crate::variant::sort::{sort_value, Comparator};
use crate::variant::Variant;

impl Variant {
    /// Every variant can be read; variables and chunks resolve their
    /// current content first.
    pub fn can_get_contents(&self) -> bool {
        true
    }

    /// The current contents, as a fresh value.
    pub fn get_contents(&self, ctx: &Context) -> ScriptResult<Variant> {
        self.as_contents(ctx)
    }

    /// True when this variant is a writable container.
    pub fn can_put_contents(&self) -> bool {
        match self {
            Variant::Variable(_) => true,
            Variant::Reference(r) => r.can_put_contents(),
            Variant::ListChunk { owner, .. }
            | Variant::BinaryChunk { owner, .. }
            | Variant::StrChunk { owner, .. } => owner.can_put_contents(),
            _ => false,
        }
    }

    /// Replace this container's contents with `value`.
    ///
    /// A variable stores the fully resolved primitive, so a binding never
    /// holds another variable or chunk. A chunk splices into its owner.
    pub fn put_into_contents(&self, ctx: &mut Context, value: Variant) -> ScriptResult<()> {
        match self {
            Variant::Variable(name) => {
                let primitive = value.as_primitive(ctx)?;
                ctx.scopes_mut().set(name.clone(), primitive);
                Ok(())
            }
            Variant::Reference(r) => r.put_into_contents(ctx, value),
            Variant::ListChunk { .. } | Variant::BinaryChunk { .. } | Variant::StrChunk { .. } => {
                chunk::write(ctx, self, Placement::Into, &value)
            }
            _ => Err(unsupported_operation("put into", self.to_language())),
        }
    }

    /// Prepend `value` to this container's contents.
    ///
    /// When the current contents are a list the value's elements go in
    /// front; otherwise both sides degrade to text and concatenate.
    pub fn put_before_contents(&self, ctx: &mut Context, value: Variant) -> ScriptResult<()> {
        match self {
            Variant::ListChunk { .. } | Variant::BinaryChunk { .. } | Variant::StrChunk { .. } => {
                return chunk::write(ctx, self, Placement::Before, &value);
            }
            Variant::Reference(r) => return r.put_before_contents(ctx, value),
            _ => {}
        }
        if !self.can_put_contents() {
            return Err(unsupported_operation("put before", self.to_language()));
        }
        let current = self.as_primitive(ctx)?;
        let combined = match current {
            Variant::List(items) => {
                let mut new = chunk::value_items(ctx, &value)?;
                new.extend(items);
                Variant::List(new)
            }
            other => {
                let mut text = value.as_primitive(ctx)?.to_text(ctx);
                text.push_str(&other.to_text(ctx));
                Variant::Str(text)
            }
        };
        self.put_into_contents(ctx, combined)
    }

    /// Append `value` to this container's contents. Counterpart of
    /// [`Variant::put_before_contents`].
    pub fn put_after_contents(&self, ctx: &mut Context, value: Variant) -> ScriptResult<()> {
        match self {
            Variant::ListChunk { .. } | Variant::BinaryChunk { .. } | Variant::StrChunk { .. } => {
                return chunk::write(ctx, self, Placement::After, &value);
            }
            Variant::Reference(r) => return r.put_after_contents(ctx, value),
            _ => {}
        }
        if !self.can_put_contents() {
            return Err(unsupported_operation("put after", self.to_language()));
        }
        let current = self.as_primitive(ctx)?;
        let combined = match current {
            Variant::List(mut items) => {
                items.extend(chunk::value_items(ctx, &value)?);
                Variant::List(items)
            }
            other => {
                let mut text = other.to_text(ctx);
                text.push_str(&value.as_primitive(ctx)?.to_text(ctx));
                Variant::Str(text)
            }
        };
        self.put_into_contents(ctx, combined)
    }

    /// Property-qualified insertion: the inserted value takes a property
    /// assignment as part of the same operation. The property guard runs
    /// first, so an unsupported property leaves the container untouched.
    pub fn put_into_contents_with_property(
        &self,
        ctx: &mut Context,
        value: Variant,
        property: &str,
        property_value: Variant,
    ) -> ScriptResult<()> {
        let adjusted = qualify(ctx, value, property, property_value)?;
        self.put_into_contents(ctx, adjusted)
    }

    /// Property-qualified counterpart of [`Variant::put_before_contents`].
    pub fn put_before_contents_with_property(
        &self,
        ctx: &mut Context,
        value: Variant,
        property: &str,
        property_value: Variant,
    ) -> ScriptResult<()> {
        let adjusted = qualify(ctx, value, property, property_value)?;
        self.put_before_contents(ctx, adjusted)
    }

    /// Property-qualified counterpart of [`Variant::put_after_contents`].
    pub fn put_after_contents_with_property(
        &self,
        ctx: &mut Context,
        value: Variant,
        property: &str,
        property_value: Variant,
    ) -> ScriptResult<()> {
        let adjusted = qualify(ctx, value, property, property_value)?;
        self.put_after_contents(ctx, adjusted)
    }

    /// True when this variant's contents can be removed.
    pub fn can_delete(&self) -> bool {
        match self {
            Variant::Variable(_) => true,
            Variant::Reference(r) => r.can_delete(),
            Variant::ListChunk { owner, .. }
            | Variant::BinaryChunk { owner, .. }
            | Variant::StrChunk { owner, .. } => owner.can_put_contents(),
            _ => false,
        }
    }

    /// Remove this variant's contents. A variable empties; a chunk
    /// splices its run out of the owner.
    pub fn delete_contents(&self, ctx: &mut Context) -> ScriptResult<()> {
        match self {
            Variant::Variable(name) => {
                ctx.scopes_mut().set(name.clone(), Variant::Empty);
                Ok(())
            }
            Variant::Reference(r) => r.delete_contents(ctx),
            Variant::ListChunk { .. } | Variant::BinaryChunk { .. } | Variant::StrChunk { .. } => {
                chunk::delete(ctx, self)
            }
            _ => Err(unsupported_operation("delete", self.to_language())),
        }
    }

    /// Sorting rewrites the container, so sortability equals writability.
    pub fn can_sort_contents(&self) -> bool {
        self.can_put_contents()
    }

    /// Sort this container's contents in place with the caller's
    /// comparator. An unbound variable has nothing to sort and fails.
    pub fn sort_contents(
        &self,
        ctx: &mut Context,
        comparator: &mut Comparator<'_>,
    ) -> ScriptResult<()> {
        if !self.can_sort_contents() {
            return Err(unsupported_operation("sort", self.to_language()));
        }
        if let Variant::Variable(name) = self {
            if ctx.scopes().lookup(name).is_none() {
                return Err(get_error("variable", name.as_str()));
            }
        }
        let current = self.as_primitive(ctx)?;
        let sorted = sort_value(ctx, current, comparator)?;
        self.put_into_contents(ctx, sorted)
    }

    /// True when this variant projects out of an enclosing variant.
    pub fn can_get_parent(&self) -> bool {
        self.parent().is_some()
    }

    /// The enclosing variant, for chunks and references.
    pub fn parent(&self) -> Option<&Variant> {
        match self {
            Variant::Reference(r) => Some(r),
            Variant::ListChunk { owner, .. }
            | Variant::BinaryChunk { owner, .. }
            | Variant::StrChunk { owner, .. } => Some(owner),
            _ => None,
        }
    }
}

// Properties

impl Variant {
    /// Whether `property` can be read off this variant's current value.
    pub fn can_get_property(&self, ctx: &Context, property: &str) -> bool {
        self.as_primitive(ctx)
            .map(|v| property_of(ctx, &v, property).is_some())
            .unwrap_or(false)
    }

    /// Read a property of this variant's current value. Properties are
    /// matched case-insensitively; the modifier is accepted for protocol
    /// parity but no built-in property varies by it.
    pub fn get_property(
        &self,
        ctx: &Context,
        _modifier: Modifier,
        property: &str,
    ) -> ScriptResult<Variant> {
        let value = self.as_primitive(ctx)?;
        property_of(ctx, &value, property).ok_or_else(|| {
            unsupported_operation(&format!("get the {property} of"), value.to_language())
        })
    }

    /// No built-in variant kind has a settable property.
    pub fn can_set_property(&self, _ctx: &Context, _property: &str) -> bool {
        false
    }

    /// Write a property. The guard runs before anything is stored, so a
    /// failed put mutates nothing. Every built-in property is read-only,
    /// so this always fails for the kinds defined here.
    pub fn set_property(
        &self,
        _ctx: &mut Context,
        property: &str,
        _value: Variant,
    ) -> ScriptResult<()> {
        Err(unsupported_operation(
            &format!("set the {property} of"),
            self.to_language(),
        ))
    }
}

/// Apply the property assignment of a qualified insertion to the value
/// about to be inserted. Fails before any container mutation when the
/// value's kind has no such settable property.
pub(crate) fn qualify(
    ctx: &mut Context,
    value: Variant,
    property: &str,
    property_value: Variant,
) -> ScriptResult<Variant> {
    if !value.can_set_property(ctx, property) {
        return Err(unsupported_operation(
            &format!("set the {property} of"),
            value.to_language(),
        ));
    }
    value.set_property(ctx, property, property_value)?;
    Ok(value)
}

fn property_of(_ctx: &Context, value: &Variant, property: &str) -> Option<Variant> {
    let property = property.to_lowercase();
    match (value, property.as_str()) {
        (Variant::List(items), "number") => Some(Variant::integer(items.len() as i64)),
        (Variant::Dict(d), "number") => Some(Variant::integer(d.len() as i64)),
        (Variant::Binary(bytes), "number") => Some(Variant::integer(bytes.len() as i64)),
        (Variant::Dict(d), "keys") => Some(Variant::List(
            d.keys().map(Variant::string).collect(),
        )),
        (Variant::Dict(d), "values") => Some(Variant::List(d.values().cloned().collect())),
        (Variant::Str(s), "length") => Some(Variant::integer(s.chars().count() as i64)),
        (Variant::Empty, "length") => Some(Variant::integer(0)),
        _ => None,
    }
}
