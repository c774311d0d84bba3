//! The reference type. References arise from evaluation, never from
//! descriptors or text, so only the kind step can accept.

use tal_value::{Context, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

pub struct ReferenceType;

impl DataType for ReferenceType {
    fn type_name(&self) -> &'static str {
        "reference"
    }

    fn describability(&self) -> Describability {
        Describability::NONE
    }

    fn from_kind(&self, _ctx: &mut Context, value: &Variant) -> Option<Variant> {
        matches!(value, Variant::Reference(_)).then(|| value.clone())
    }

    fn from_text(&self, _ctx: &mut Context, _text: &str) -> Option<Variant> {
        None
    }

    /// References resolve transparently before kind checks, so only a
    /// reference that survives resolution matches.
    fn morph(&self, ctx: &mut Context, value: &Variant) -> tal_value::ScriptResult<Variant> {
        match value {
            Variant::Reference(_) => Ok(value.clone()),
            _ => {
                let primitive = value.as_primitive(ctx)?;
                self.morph_primitive(ctx, &primitive)
            }
        }
    }
}
