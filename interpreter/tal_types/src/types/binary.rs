//! The binary type. The text form of binary data is uppercase hex, and
//! the text parse accepts exactly that shape back.

use tal_value::{Context, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

pub struct BinaryType;

impl DataType for BinaryType {
    fn type_name(&self) -> &'static str {
        "binary"
    }

    fn describability(&self) -> Describability {
        Describability::NONE
    }

    fn from_kind(&self, _ctx: &mut Context, value: &Variant) -> Option<Variant> {
        match value {
            Variant::Binary(_) => Some(value.clone()),
            Variant::Empty => Some(Variant::binary(vec![])),
            _ => None,
        }
    }

    fn from_text(&self, _ctx: &mut Context, text: &str) -> Option<Variant> {
        parse_hex(text.trim()).map(Variant::Binary)
    }
}

/// An even run of hex digits, optionally prefixed with `$`.
fn parse_hex(text: &str) -> Option<Vec<u8>> {
    let digits = text.strip_prefix('$').unwrap_or(text);
    if digits.len() % 2 != 0 {
        return None;
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let s = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(s, 16).ok()
        })
        .collect()
}
