//! The ranged byte protocol for binary-backed containers.
//!
//! Mirrors the item protocol over lists: 1-based inclusive spans, strict
//! range validation, mutation through the owner's put protocol. Byte runs
//! always come back as binary values, even for a single position.

use crate::context::Context;
use crate::errors::{unsupported_operation, ScriptResult};
use crate::handler::Modifier;
use crate::span::Span;
use crate::variant::sort::Comparator;
use crate::variant::{chunk, contents};
use crate::variant::Variant;

impl Variant {
    /// True when this variant currently resolves to binary data.
    pub fn can_get_bytes(&self, ctx: &Context) -> bool {
        matches!(self.as_primitive(ctx), Ok(Variant::Binary(_)))
    }

    /// Ranged writes need both binary data and a writable container.
    pub fn can_put_bytes(&self, ctx: &Context) -> bool {
        self.can_get_bytes(ctx) && self.can_put_contents()
    }

    pub fn can_delete_bytes(&self, ctx: &Context) -> bool {
        self.can_put_bytes(ctx)
    }

    pub fn can_sort_bytes(&self, ctx: &Context) -> bool {
        self.can_put_bytes(ctx)
    }

    /// Number of bytes in the resolved binary.
    pub fn count_bytes(&self, ctx: &Context) -> ScriptResult<usize> {
        Ok(self.resolved_bytes(ctx)?.len())
    }

    /// The bytes `span` addresses, as a fresh binary value.
    pub fn get_bytes(&self, ctx: &Context, span: Span) -> ScriptResult<Variant> {
        let bytes = self.resolved_bytes(ctx)?;
        let range = span.resolve(bytes.len(), "binary")?;
        Ok(Variant::Binary(bytes[range].to_vec()))
    }

    /// Replace the bytes `span` addresses with the bytes of `value`.
    pub fn put_into_bytes(&self, ctx: &mut Context, span: Span, value: Variant) -> ScriptResult<()> {
        self.splice_bytes(ctx, span, value, BytePoint::Replace)
    }

    /// Insert the bytes of `value` just before the span.
    pub fn put_before_bytes(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
    ) -> ScriptResult<()> {
        self.splice_bytes(ctx, span, value, BytePoint::Before)
    }

    /// Insert the bytes of `value` just after the span.
    pub fn put_after_bytes(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
    ) -> ScriptResult<()> {
        self.splice_bytes(ctx, span, value, BytePoint::After)
    }

    /// Property-qualified ranged insertion; the guard runs before any
    /// splice, so a failure mutates nothing.
    pub fn put_into_bytes_with_property(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
        property: &str,
        property_value: Variant,
    ) -> ScriptResult<()> {
        let adjusted = contents::qualify(ctx, value, property, property_value)?;
        self.splice_bytes(ctx, span, adjusted, BytePoint::Replace)
    }

    /// Property-qualified counterpart of [`Variant::put_before_bytes`].
    pub fn put_before_bytes_with_property(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
        property: &str,
        property_value: Variant,
    ) -> ScriptResult<()> {
        let adjusted = contents::qualify(ctx, value, property, property_value)?;
        self.splice_bytes(ctx, span, adjusted, BytePoint::Before)
    }

    /// Property-qualified counterpart of [`Variant::put_after_bytes`].
    pub fn put_after_bytes_with_property(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
        property: &str,
        property_value: Variant,
    ) -> ScriptResult<()> {
        let adjusted = contents::qualify(ctx, value, property, property_value)?;
        self.splice_bytes(ctx, span, adjusted, BytePoint::After)
    }

    /// Sort just the bytes `span` addresses; bytes outside the span keep
    /// their positions.
    pub fn sort_bytes(
        &self,
        ctx: &mut Context,
        span: Span,
        comparator: &mut Comparator<'_>,
    ) -> ScriptResult<()> {
        let mut bytes = self.resolved_bytes(ctx)?;
        let range = span.resolve(bytes.len(), "binary")?;
        bytes[range].sort_by(|a, b| {
            comparator(
                ctx,
                &Variant::Binary(vec![*a]),
                &Variant::Binary(vec![*b]),
            )
        });
        self.put_into_contents(ctx, Variant::Binary(bytes))
    }

    /// Read a property of the run `span` addresses, as if the run were a
    /// free-standing binary value.
    pub fn get_bytes_property(
        &self,
        ctx: &Context,
        modifier: Modifier,
        property: &str,
        span: Span,
    ) -> ScriptResult<Variant> {
        let bytes = self.resolved_bytes(ctx)?;
        let range = span.resolve(bytes.len(), "binary")?;
        Variant::Binary(bytes[range].to_vec()).get_property(ctx, modifier, property)
    }

    /// Whether `property` could be written on the run `span` addresses.
    pub fn can_set_bytes_property(&self, ctx: &Context, property: &str, span: Span) -> bool {
        let Ok(bytes) = self.resolved_bytes(ctx) else {
            return false;
        };
        let Ok(range) = span.resolve(bytes.len(), "binary") else {
            return false;
        };
        Variant::Binary(bytes[range].to_vec()).can_set_property(ctx, property)
    }

    /// Write a property of the run `span` addresses. Delegates to the
    /// run's own property setter; no built-in binary property is
    /// settable, so for the kinds defined here this always fails.
    pub fn set_bytes_property(
        &self,
        ctx: &mut Context,
        property: &str,
        span: Span,
        value: Variant,
    ) -> ScriptResult<()> {
        let bytes = self.resolved_bytes(ctx)?;
        let range = span.resolve(bytes.len(), "binary")?;
        Variant::Binary(bytes[range].to_vec()).set_property(ctx, property, value)
    }

    /// Remove the bytes `span` addresses.
    pub fn delete_bytes(&self, ctx: &mut Context, span: Span) -> ScriptResult<()> {
        let mut bytes = self.resolved_bytes(ctx)?;
        let range = span.resolve(bytes.len(), "binary")?;
        bytes.drain(range);
        self.put_into_contents(ctx, Variant::Binary(bytes))
    }

    fn resolved_bytes(&self, ctx: &Context) -> ScriptResult<Vec<u8>> {
        match self.as_primitive(ctx)? {
            Variant::Binary(bytes) => Ok(bytes),
            other => Err(unsupported_operation("get bytes of", other.to_language())),
        }
    }

    fn splice_bytes(
        &self,
        ctx: &mut Context,
        span: Span,
        value: Variant,
        point: BytePoint,
    ) -> ScriptResult<()> {
        let mut bytes = self.resolved_bytes(ctx)?;
        let range = span.resolve(bytes.len(), "binary")?;
        let new = chunk::value_bytes(ctx, &value)?;
        let at = match point {
            BytePoint::Replace => range,
            BytePoint::Before => range.start..range.start,
            BytePoint::After => range.end..range.end,
        };
        bytes.splice(at, new);
        self.put_into_contents(ctx, Variant::Binary(bytes))
    }
}

#[derive(Clone, Copy)]
enum BytePoint {
    Replace,
    Before,
    After,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::VarName;
    use pretty_assertions::assert_eq;

    fn blob(ctx: &mut Context, name: &str, bytes: &[u8]) -> Variant {
        ctx.scopes_mut()
            .set(VarName::new(name), Variant::Binary(bytes.to_vec()));
        Variant::variable(name)
    }

    fn as_bytes(ctx: &Context, v: &Variant) -> Vec<u8> {
        match v.as_primitive(ctx) {
            Ok(Variant::Binary(bytes)) => bytes,
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn test_get_run_is_binary_even_for_one_byte() {
        let mut ctx = Context::new();
        let v = blob(&mut ctx, "b", &[0xCA, 0xFE, 0xBA, 0xBE]);
        assert_eq!(
            v.get_bytes(&ctx, Span::new(2, 3)),
            Ok(Variant::binary(vec![0xFE, 0xBA]))
        );
        assert_eq!(v.get_bytes(&ctx, Span::at(1)), Ok(Variant::binary(vec![0xCA])));
        assert_eq!(v.count_bytes(&ctx), Ok(4));
    }

    #[test]
    fn test_replace_and_insert() {
        let mut ctx = Context::new();
        let v = blob(&mut ctx, "b", &[1, 2, 3]);
        v.put_into_bytes(&mut ctx, Span::at(2), Variant::binary(vec![8, 9]))
            .expect("replace");
        assert_eq!(as_bytes(&ctx, &v), vec![1, 8, 9, 3]);
        v.put_before_bytes(&mut ctx, Span::at(1), Variant::binary(vec![0]))
            .expect("before");
        v.put_after_bytes(&mut ctx, Span::at(5), Variant::binary(vec![4]))
            .expect("after");
        assert_eq!(as_bytes(&ctx, &v), vec![0, 1, 8, 9, 3, 4]);
    }

    #[test]
    fn test_delete_run() {
        let mut ctx = Context::new();
        let v = blob(&mut ctx, "b", &[1, 2, 3, 4]);
        v.delete_bytes(&mut ctx, Span::new(2, 3)).expect("delete");
        assert_eq!(as_bytes(&ctx, &v), vec![1, 4]);
    }

    #[test]
    fn test_range_violations_fail() {
        let mut ctx = Context::new();
        let v = blob(&mut ctx, "b", &[1, 2]);
        assert!(v.get_bytes(&ctx, Span::new(1, 3)).is_err());
        assert!(v.put_into_bytes(&mut ctx, Span::new(3, 3), Variant::binary(vec![0])).is_err());
        assert_eq!(as_bytes(&ctx, &v), vec![1, 2]);
    }

    #[test]
    fn test_sub_range_sort_leaves_outside_untouched() {
        let mut ctx = Context::new();
        let v = blob(&mut ctx, "b", &[3, 2, 1]);
        // Sorting bytes 2 through 3 of [3,2,1] keeps position 1 at 3.
        v.sort_bytes(&mut ctx, Span::new(2, 3), &mut |_: &Context,
                                                      a: &Variant,
                                                      b: &Variant| {
            match (a, b) {
                (Variant::Binary(a), Variant::Binary(b)) => a.cmp(b),
                _ => std::cmp::Ordering::Equal,
            }
        })
        .expect("sort");
        assert_eq!(as_bytes(&ctx, &v), vec![3, 1, 2]);
    }

    #[test]
    fn test_ranged_property_reads_the_run() {
        let mut ctx = Context::new();
        let v = blob(&mut ctx, "b", &[1, 2, 3, 4]);
        assert_eq!(
            v.get_bytes_property(&ctx, Modifier::Plain, "number", Span::new(1, 3)),
            Ok(Variant::integer(3))
        );
    }

    #[test]
    fn test_ranged_property_write_refused_without_mutating() {
        let mut ctx = Context::new();
        let v = blob(&mut ctx, "b", &[1, 2, 3]);
        assert!(!v.can_set_bytes_property(&ctx, "number", Span::new(1, 2)));
        assert!(v
            .set_bytes_property(&mut ctx, "number", Span::new(1, 2), Variant::integer(5))
            .is_err());
        assert!(!v.can_set_bytes_property(&ctx, "number", Span::new(2, 9)));
        assert_eq!(as_bytes(&ctx, &v), vec![1, 2, 3]);
    }

    #[test]
    fn test_qualified_ranged_put_fails_without_mutating() {
        let mut ctx = Context::new();
        let v = blob(&mut ctx, "b", &[1, 2]);
        let err = v.put_after_bytes_with_property(
            &mut ctx,
            Span::at(2),
            Variant::binary(vec![3]),
            "channel",
            Variant::integer(1),
        );
        assert!(err.is_err());
        assert_eq!(as_bytes(&ctx, &v), vec![1, 2]);
    }

    #[test]
    fn test_text_value_contributes_utf8_bytes() {
        let mut ctx = Context::new();
        let v = blob(&mut ctx, "b", &[0x21]);
        v.put_before_bytes(&mut ctx, Span::at(1), Variant::string("Hi"))
            .expect("before");
        assert_eq!(as_bytes(&ctx, &v), vec![0x48, 0x69, 0x21]);
    }
}
