//! The data type protocol and the shared coercion driver.

use tracing::trace;

use tal_value::{get_error, morph_error, Context, ScriptResult, Variant};

use crate::describability::Describability;

/// A named data type: a coercion target and, when describable, a source
/// of instances for descriptor expressions.
///
/// Implementors supply the two low-level hooks ([`DataType::from_kind`]
/// and [`DataType::from_text`]); the coercion order itself is fixed by the
/// provided [`DataType::morph`] driver and must not vary per type:
///
/// 1. the operand's kind is already acceptable;
/// 2. the operand is a one-element list, unwrapped and retried;
/// 3. the operand's text form parses under the type's literal grammar.
///
/// A type needing different staging (the list type, the any type)
/// overrides `morph_primitive` wholesale rather than bending the hooks.
pub trait DataType {
    /// The name used in descriptors, error messages, and the registry.
    fn type_name(&self) -> &'static str;

    /// Which descriptor forms this type answers to.
    fn describability(&self) -> Describability;

    /// Step 1: accept the operand by kind, already in primitive form.
    /// `None` means the kind alone does not decide.
    fn from_kind(&self, ctx: &mut Context, value: &Variant) -> Option<Variant>;

    /// Step 3: parse the operand's text form under this type's literal
    /// grammar. `None` is an ordinary non-match.
    fn from_text(&self, ctx: &mut Context, text: &str) -> Option<Variant>;

    /// Produce the instance a by-name descriptor addresses, if this type
    /// is describable by name.
    fn instance_named(&self, ctx: &mut Context, name: &str) -> Option<Variant> {
        let _ = (ctx, name);
        None
    }

    /// Whether a by-name descriptor for `name` would produce an instance.
    fn can_get_instance_by_name(&self, ctx: &mut Context, name: &str) -> bool {
        self.describability().contains(Describability::BY_NAME)
            && self.instance_named(ctx, name).is_some()
    }

    /// The instance a by-name descriptor addresses.
    fn get_instance_by_name(&self, ctx: &mut Context, name: &str) -> ScriptResult<Variant> {
        self.instance_named(ctx, name)
            .ok_or_else(|| get_error(self.type_name(), name))
    }

    /// Whether `value` coerces to this type.
    fn can_morph(&self, ctx: &mut Context, value: &Variant) -> bool {
        self.morph(ctx, value).is_ok()
    }

    /// Coerce `value` to this type, resolving variables and chunks first.
    fn morph(&self, ctx: &mut Context, value: &Variant) -> ScriptResult<Variant> {
        let primitive = value.as_primitive(ctx)?;
        trace!(
            target = self.type_name(),
            operand = primitive.kind_name(),
            "morph"
        );
        self.morph_primitive(ctx, &primitive)
    }

    /// The coercion driver over an already-primitive operand.
    fn morph_primitive(&self, ctx: &mut Context, value: &Variant) -> ScriptResult<Variant> {
        if let Some(v) = self.from_kind(ctx, value) {
            return Ok(v);
        }
        if let Variant::List(items) = value {
            if items.len() == 1 {
                let inner = items[0].as_primitive(ctx)?;
                return self.morph_primitive(ctx, &inner);
            }
        }
        let text = value.to_text(ctx);
        self.from_text(ctx, &text)
            .ok_or_else(|| morph_error(self.type_name()))
    }

    /// Whether the pair coerces to this type.
    fn can_morph_pair(&self, ctx: &mut Context, left: &Variant, right: &Variant) -> bool {
        self.morph_pair(ctx, left, right).is_ok()
    }

    /// Coerce a two-operand form (adjacent expressions) to this type.
    ///
    /// An empty side drops out and the other side morphs alone; otherwise
    /// the concatenated text forms are parsed as one literal.
    fn morph_pair(
        &self,
        ctx: &mut Context,
        left: &Variant,
        right: &Variant,
    ) -> ScriptResult<Variant> {
        let left = left.as_primitive(ctx)?;
        let right = right.as_primitive(ctx)?;
        if left.is_empty_value() {
            return self.morph_primitive(ctx, &right);
        }
        if right.is_empty_value() {
            return self.morph_primitive(ctx, &left);
        }
        let mut text = left.to_text(ctx);
        text.push_str(&right.to_text(ctx));
        self.from_text(ctx, &text)
            .ok_or_else(|| morph_error(self.type_name()))
    }
}
