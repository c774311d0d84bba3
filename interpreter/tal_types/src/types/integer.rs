//! The integer type.

use tal_value::{Context, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

pub struct IntegerType;

impl DataType for IntegerType {
    fn type_name(&self) -> &'static str {
        "integer"
    }

    fn describability(&self) -> Describability {
        Describability::NONE
    }

    fn from_kind(&self, _ctx: &mut Context, value: &Variant) -> Option<Variant> {
        match value {
            // Empty (and the empty string) counts as zero everywhere
            // numbers are expected.
            v if v.is_empty_value() => Some(Variant::integer(0)),
            Variant::Integer(_) => Some(value.clone()),
            Variant::Number(n) if is_exact_integer(*n) => Some(Variant::integer(*n as i64)),
            _ => None,
        }
    }

    fn from_text(&self, _ctx: &mut Context, text: &str) -> Option<Variant> {
        text.trim().parse::<i64>().ok().map(Variant::integer)
    }
}

fn is_exact_integer(n: f64) -> bool {
    // i64::MAX as f64 rounds up to 2^63, so the top bound is exclusive;
    // an inclusive check would let the saturating cast through.
    n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64
}
