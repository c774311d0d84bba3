//! The variant type: the top of the coercion lattice. Anything morphs to
//! it unchanged, which gives "expects any value" parameters a type to name.

use tal_value::{Context, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

pub struct VariantType;

impl DataType for VariantType {
    fn type_name(&self) -> &'static str {
        "variant"
    }

    fn describability(&self) -> Describability {
        Describability::NONE
    }

    fn from_kind(&self, _ctx: &mut Context, value: &Variant) -> Option<Variant> {
        Some(value.clone())
    }

    fn from_text(&self, _ctx: &mut Context, text: &str) -> Option<Variant> {
        Some(Variant::string(text))
    }
}
