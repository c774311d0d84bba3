//! The string type. Every value has a text form, so this morph never
//! fails.

use tal_value::{Context, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

pub struct StringType;

impl DataType for StringType {
    fn type_name(&self) -> &'static str {
        "string"
    }

    fn describability(&self) -> Describability {
        Describability::NONE
    }

    fn from_kind(&self, _ctx: &mut Context, value: &Variant) -> Option<Variant> {
        match value {
            Variant::Str(_) => Some(value.clone()),
            Variant::Empty => Some(Variant::string("")),
            _ => None,
        }
    }

    fn from_text(&self, _ctx: &mut Context, text: &str) -> Option<Variant> {
        Some(Variant::string(text))
    }
}
