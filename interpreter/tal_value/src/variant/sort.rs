//! Sorting container contents.
//!
//! The order relation belongs to the caller: comparison rules (numeric vs
//! textual, locale collation, direction) live in the command layer, so the
//! sorter only decomposes the content into sortable units, runs a stable
//! sort with the caller's comparator, and reconstitutes the same shape.

use std::cmp::Ordering;

use crate::context::Context;
use crate::errors::ScriptResult;
use crate::lines::split_lines;
use crate::variant::{Dict, Variant};

/// A caller-supplied order relation over variants.
pub type Comparator<'a> = dyn FnMut(&Context, &Variant, &Variant) -> Ordering + 'a;

/// Sort a primitive value, keeping its shape.
///
/// Decomposition by kind: a list sorts its elements, a dictionary sorts
/// by key and re-associates each key with its value, a binary sorts its
/// individual bytes, and anything else degrades to text and sorts its
/// lines. The sort is stable, so equal units keep their relative order.
pub fn sort_value(
    ctx: &Context,
    value: Variant,
    comparator: &mut Comparator<'_>,
) -> ScriptResult<Variant> {
    match value {
        Variant::List(mut items) => {
            items.sort_by(|a, b| comparator(ctx, a, b));
            Ok(Variant::List(items))
        }
        Variant::Dict(dict) => {
            let mut keys: Vec<String> = dict.keys().map(str::to_string).collect();
            keys.sort_by(|a, b| {
                comparator(
                    ctx,
                    &Variant::string(a.clone()),
                    &Variant::string(b.clone()),
                )
            });
            let mut sorted = Dict::new();
            for key in keys {
                if let Some(v) = dict.get(&key) {
                    sorted.insert(key, v.clone());
                }
            }
            Ok(Variant::Dict(sorted))
        }
        Variant::Binary(mut bytes) => {
            bytes.sort_by(|a, b| {
                comparator(
                    ctx,
                    &Variant::Binary(vec![*a]),
                    &Variant::Binary(vec![*b]),
                )
            });
            Ok(Variant::Binary(bytes))
        }
        other => {
            let text = other.to_text(ctx);
            let mut lines: Vec<Variant> =
                split_lines(&text).iter().map(|l| Variant::string(*l)).collect();
            lines.sort_by(|a, b| comparator(ctx, a, b));
            let joined: Vec<String> = lines.into_iter().map(|l| l.to_text(ctx)).collect();
            // Joined with the session line ending, no trailing terminator.
            Ok(Variant::Str(joined.join(ctx.line_ending())))
        }
    }
}
