//! The ranged item protocol for list-backed containers.
//!
//! Indexes are 1-based and spans are inclusive on both ends. Every
//! operation validates the span against the list's current length and
//! fails on any out-of-range address; nothing is clamped. Mutations go
//! through [`Variant::put_into_contents`], so they require a writable
//! container over a list.

use crate::context::Context;
use crate::errors::{unsupported_operation, ScriptResult};
use crate::handler::Modifier;
use crate::span::Span;
use crate::variant::sort::Comparator;
use crate::variant::{chunk, contents};
use crate::variant::Variant;

impl Variant {
    /// True when this variant currently resolves to a list.
    pub fn can_get_items(&self, ctx: &Context) -> bool {
        matches!(self.as_primitive(ctx), Ok(Variant::List(_)))
    }

    /// Ranged writes need both a list and a writable container over it.
    pub fn can_put_items(&self, ctx: &Context) -> bool {
        self.can_get_items(ctx) && self.can_put_contents()
    }

    pub fn can_delete_items(&self, ctx: &Context) -> bool {
        self.can_put_items(ctx)
    }

    pub fn can_sort_items(&self, ctx: &Context) -> bool {
        self.can_put_items(ctx)
    }

    /// Number of items in the resolved list.
    pub fn count_items(&self, ctx: &Context) -> ScriptResult<usize> {
        Ok(self.resolved_items(ctx)?.len())
    }

    /// The items `span` addresses, as a fresh value. A single-position
    /// span yields the element itself.
    pub fn get_items(&self, ctx: &Context, span: Span) -> ScriptResult<Variant> {
        let items = self.resolved_items(ctx)?;
        let range = span.resolve(items.len(), "list")?;
        let run = &items[range];
        if run.len() == 1 {
            Ok(run[0].clone())
        } else {
            Ok(Variant::List(run.to_vec()))
        }
    }

    /// Replace the items `span` addresses with the elements of `value`.
    pub fn put_into_items(&self, ctx: &mut Context, span: Span, value: Variant) -> ScriptResult<()> {
        self.splice_items(ctx, span, value, SplicePoint::Replace)
    }

    /// Insert the elements of `value` just before the span.
    pub fn put_before_items(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
    ) -> ScriptResult<()> {
        self.splice_items(ctx, span, value, SplicePoint::Before)
    }

    /// Insert the elements of `value` just after the span.
    pub fn put_after_items(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
    ) -> ScriptResult<()> {
        self.splice_items(ctx, span, value, SplicePoint::After)
    }

    /// Property-qualified ranged insertion. The inserted value must take
    /// the property assignment; the guard runs before any splice.
    pub fn put_into_items_with_property(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
        property: &str,
        property_value: Variant,
    ) -> ScriptResult<()> {
        let adjusted = contents::qualify(ctx, value, property, property_value)?;
        self.splice_items(ctx, span, adjusted, SplicePoint::Replace)
    }

    /// Property-qualified counterpart of [`Variant::put_before_items`].
    pub fn put_before_items_with_property(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
        property: &str,
        property_value: Variant,
    ) -> ScriptResult<()> {
        let adjusted = contents::qualify(ctx, value, property, property_value)?;
        self.splice_items(ctx, span, adjusted, SplicePoint::Before)
    }

    /// Property-qualified counterpart of [`Variant::put_after_items`].
    pub fn put_after_items_with_property(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
        property: &str,
        property_value: Variant,
    ) -> ScriptResult<()> {
        let adjusted = contents::qualify(ctx, value, property, property_value)?;
        self.splice_items(ctx, span, adjusted, SplicePoint::After)
    }

    /// Sort just the items `span` addresses; items outside the span keep
    /// their positions.
    pub fn sort_items(
        &self,
        ctx: &mut Context,
        span: Span,
        comparator: &mut Comparator<'_>,
    ) -> ScriptResult<()> {
        let mut items = self.resolved_items(ctx)?;
        let range = span.resolve(items.len(), "list")?;
        items[range].sort_by(|a, b| comparator(ctx, a, b));
        self.put_into_contents(ctx, Variant::List(items))
    }

    /// Read a property of the run `span` addresses, as if the run were a
    /// free-standing list.
    pub fn get_items_property(
        &self,
        ctx: &Context,
        modifier: Modifier,
        property: &str,
        span: Span,
    ) -> ScriptResult<Variant> {
        let items = self.resolved_items(ctx)?;
        let range = span.resolve(items.len(), "list")?;
        Variant::List(items[range].to_vec()).get_property(ctx, modifier, property)
    }

    /// Whether `property` could be written on the run `span` addresses.
    pub fn can_set_items_property(&self, ctx: &Context, property: &str, span: Span) -> bool {
        let Ok(items) = self.resolved_items(ctx) else {
            return false;
        };
        let Ok(range) = span.resolve(items.len(), "list") else {
            return false;
        };
        Variant::List(items[range].to_vec()).can_set_property(ctx, property)
    }

    /// Write a property of the run `span` addresses. The run delegates to
    /// its own property setter, and no built-in list property is
    /// settable, so for the kinds defined here this always fails.
    pub fn set_items_property(
        &self,
        ctx: &mut Context,
        property: &str,
        span: Span,
        value: Variant,
    ) -> ScriptResult<()> {
        let items = self.resolved_items(ctx)?;
        let range = span.resolve(items.len(), "list")?;
        Variant::List(items[range].to_vec()).set_property(ctx, property, value)
    }

    /// Remove the items `span` addresses.
    pub fn delete_items(&self, ctx: &mut Context, span: Span) -> ScriptResult<()> {
        let mut items = self.resolved_items(ctx)?;
        let range = span.resolve(items.len(), "list")?;
        items.drain(range);
        self.put_into_contents(ctx, Variant::List(items))
    }

    fn resolved_items(&self, ctx: &Context) -> ScriptResult<Vec<Variant>> {
        match self.as_primitive(ctx)? {
            Variant::List(items) => Ok(items),
            other => Err(unsupported_operation("get items of", other.to_language())),
        }
    }

    fn splice_items(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
        point: SplicePoint,
    ) -> ScriptResult<()> {
        let mut items = self.resolved_items(ctx)?;
        let range = span.resolve(items.len(), "list")?;
        let new = chunk::value_items(ctx, &value)?;
        let at = match point {
            SplicePoint::Replace => range,
            SplicePoint::Before => range.start..range.start,
            SplicePoint::After => range.end..range.end,
        };
        items.splice(at, new);
        self.put_into_contents(ctx, Variant::List(items))
    }
}

#[derive(Clone, Copy)]
enum SplicePoint {
    Replace,
    Before,
    After,
}
