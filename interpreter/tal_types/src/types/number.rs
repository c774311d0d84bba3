//! The number type: integers and floats both qualify.

use tal_value::{Context, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

pub struct NumberType;

impl DataType for NumberType {
    fn type_name(&self) -> &'static str {
        "number"
    }

    fn describability(&self) -> Describability {
        Describability::NONE
    }

    fn from_kind(&self, _ctx: &mut Context, value: &Variant) -> Option<Variant> {
        match value {
            // Empty (and the empty string) counts as zero.
            v if v.is_empty_value() => Some(Variant::integer(0)),
            // An integer already is a number; no widening to float.
            Variant::Integer(_) | Variant::Number(_) => Some(value.clone()),
            _ => None,
        }
    }

    fn from_text(&self, _ctx: &mut Context, text: &str) -> Option<Variant> {
        let text = text.trim();
        if let Ok(n) = text.parse::<i64>() {
            return Some(Variant::integer(n));
        }
        // f64 parsing covers "inf", "-inf", and "nan", matching the text
        // forms numbers print with.
        text.parse::<f64>().ok().map(Variant::number)
    }
}
