//! The URL type.

use url::Url;

use tal_value::{Context, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

pub struct UrlType;

impl DataType for UrlType {
    fn type_name(&self) -> &'static str {
        "URL"
    }

    fn describability(&self) -> Describability {
        Describability::BY_NAME
    }

    fn from_kind(&self, _ctx: &mut Context, value: &Variant) -> Option<Variant> {
        matches!(value, Variant::Url(_)).then(|| value.clone())
    }

    /// Absolute URLs parse directly; bare host names get one retry with
    /// an `http://` prefix, so `example.test/x` is a usable URL literal.
    fn from_text(&self, _ctx: &mut Context, text: &str) -> Option<Variant> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(u) = Url::parse(text) {
            return Some(Variant::Url(u));
        }
        Url::parse(&format!("http://{text}")).ok().map(Variant::Url)
    }

    fn instance_named(&self, ctx: &mut Context, name: &str) -> Option<Variant> {
        self.from_text(ctx, name)
    }
}
