//! The boolean type. Only `true` and `false` qualify; there is no truthy
//! coercion of numbers or nonempty strings.

use tal_value::{Context, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

pub struct BooleanType;

impl DataType for BooleanType {
    fn type_name(&self) -> &'static str {
        "boolean"
    }

    fn describability(&self) -> Describability {
        Describability::NONE
    }

    fn from_kind(&self, _ctx: &mut Context, value: &Variant) -> Option<Variant> {
        matches!(value, Variant::Bool(_)).then(|| value.clone())
    }

    fn from_text(&self, _ctx: &mut Context, text: &str) -> Option<Variant> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(Variant::Bool(true))
        } else if text.eq_ignore_ascii_case("false") {
            Some(Variant::Bool(false))
        } else {
            None
        }
    }
}
