//! Chunk projection and write-back.
//!
//! A chunk is not a copy of its owner's content; it is an address. Every
//! read re-resolves the owner and slices its current content, and every
//! write splices new content into the owner's current content and stores
//! the whole thing back through the owner's own put protocol. A chunk over
//! a rebound variable therefore always sees the latest binding.

use crate::context::Context;
use crate::errors::{unsupported_operation, ScriptResult};
use crate::variant::Variant;

/// The current content a chunk addresses, as a fresh value.
///
/// A single-position list chunk yields the element itself rather than a
/// one-element list, matching how chunk expressions read.
pub(crate) fn snapshot(ctx: &Context, chunk: &Variant) -> ScriptResult<Variant> {
    match chunk {
        Variant::ListChunk { owner, span } => {
            let items = owner_items(ctx, owner)?;
            let range = span.resolve(items.len(), "list")?;
            let run = &items[range];
            if run.len() == 1 {
                Ok(run[0].clone())
            } else {
                Ok(Variant::List(run.to_vec()))
            }
        }
        Variant::BinaryChunk { owner, span } => {
            let bytes = owner_bytes(ctx, owner)?;
            let range = span.resolve(bytes.len(), "binary")?;
            Ok(Variant::Binary(bytes[range].to_vec()))
        }
        Variant::StrChunk { owner, span } => {
            let chars = owner_chars(ctx, owner)?;
            let range = span.resolve(chars.len(), "string")?;
            Ok(Variant::Str(chars[range].iter().collect()))
        }
        _ => Err(unsupported_operation("take a chunk of", chunk.to_language())),
    }
}

/// How a write lands relative to the addressed span.
#[derive(Clone, Copy)]
pub(crate) enum Placement {
    Into,
    Before,
    After,
}

/// Splice `value` into the chunk's owner at the chunk's span and store the
/// result back through the owner.
pub(crate) fn write(
    ctx: &mut Context,
    chunk: &Variant,
    placement: Placement,
    value: &Variant,
) -> ScriptResult<()> {
    match chunk {
        Variant::ListChunk { owner, span } => {
            let mut items = owner_items(ctx, owner)?;
            let range = span.resolve(items.len(), "list")?;
            let new = value_items(ctx, value)?;
            match placement {
                Placement::Into => {
                    items.splice(range, new);
                }
                Placement::Before => {
                    items.splice(range.start..range.start, new);
                }
                Placement::After => {
                    items.splice(range.end..range.end, new);
                }
            }
            owner.put_into_contents(ctx, Variant::List(items))
        }
        Variant::BinaryChunk { owner, span } => {
            let mut bytes = owner_bytes(ctx, owner)?;
            let range = span.resolve(bytes.len(), "binary")?;
            let new = value_bytes(ctx, value)?;
            match placement {
                Placement::Into => {
                    bytes.splice(range, new);
                }
                Placement::Before => {
                    bytes.splice(range.start..range.start, new);
                }
                Placement::After => {
                    bytes.splice(range.end..range.end, new);
                }
            }
            owner.put_into_contents(ctx, Variant::Binary(bytes))
        }
        Variant::StrChunk { owner, span } => {
            let mut chars = owner_chars(ctx, owner)?;
            let range = span.resolve(chars.len(), "string")?;
            let new: Vec<char> = value.as_primitive(ctx)?.to_text(ctx).chars().collect();
            match placement {
                Placement::Into => {
                    chars.splice(range, new);
                }
                Placement::Before => {
                    chars.splice(range.start..range.start, new);
                }
                Placement::After => {
                    chars.splice(range.end..range.end, new);
                }
            }
            owner.put_into_contents(ctx, Variant::Str(chars.into_iter().collect()))
        }
        _ => Err(unsupported_operation("put into a chunk of", chunk.to_language())),
    }
}

/// Remove the addressed span from the chunk's owner.
pub(crate) fn delete(ctx: &mut Context, chunk: &Variant) -> ScriptResult<()> {
    match chunk {
        Variant::ListChunk { owner, span } => {
            let mut items = owner_items(ctx, owner)?;
            let range = span.resolve(items.len(), "list")?;
            items.drain(range);
            owner.put_into_contents(ctx, Variant::List(items))
        }
        Variant::BinaryChunk { owner, span } => {
            let mut bytes = owner_bytes(ctx, owner)?;
            let range = span.resolve(bytes.len(), "binary")?;
            bytes.drain(range);
            owner.put_into_contents(ctx, Variant::Binary(bytes))
        }
        Variant::StrChunk { owner, span } => {
            let mut chars = owner_chars(ctx, owner)?;
            let range = span.resolve(chars.len(), "string")?;
            chars.drain(range);
            owner.put_into_contents(ctx, Variant::Str(chars.into_iter().collect()))
        }
        _ => Err(unsupported_operation("delete a chunk of", chunk.to_language())),
    }
}

fn owner_items(ctx: &Context, owner: &Variant) -> ScriptResult<Vec<Variant>> {
    match owner.as_primitive(ctx)? {
        Variant::List(items) => Ok(items),
        other => Err(unsupported_operation("get items of", other.to_language())),
    }
}

fn owner_bytes(ctx: &Context, owner: &Variant) -> ScriptResult<Vec<u8>> {
    match owner.as_primitive(ctx)? {
        Variant::Binary(bytes) => Ok(bytes),
        other => Err(unsupported_operation("get bytes of", other.to_language())),
    }
}

fn owner_chars(ctx: &Context, owner: &Variant) -> ScriptResult<Vec<char>> {
    let text = owner.as_primitive(ctx)?.to_text(ctx);
    Ok(text.chars().collect())
}

/// Elements contributed by `value` to a list splice. A list contributes
/// its elements; anything else contributes itself as one element.
pub(crate) fn value_items(ctx: &Context, value: &Variant) -> ScriptResult<Vec<Variant>> {
    match value.as_primitive(ctx)? {
        Variant::List(items) => Ok(items),
        other => Ok(vec![other]),
    }
}

/// Bytes contributed by `value` to a binary splice. A binary value
/// contributes its bytes; anything else contributes its text form in UTF-8.
pub(crate) fn value_bytes(ctx: &Context, value: &Variant) -> ScriptResult<Vec<u8>> {
    match value.as_primitive(ctx)? {
        Variant::Binary(bytes) => Ok(bytes),
        other => Ok(other.to_text(ctx).into_bytes()),
    }
}
