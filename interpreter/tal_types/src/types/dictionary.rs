//! The dictionary type.

use tal_value::{Context, Dict, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

pub struct DictionaryType;

impl DataType for DictionaryType {
    fn type_name(&self) -> &'static str {
        "dictionary"
    }

    fn describability(&self) -> Describability {
        Describability::NONE
    }

    fn from_kind(&self, _ctx: &mut Context, value: &Variant) -> Option<Variant> {
        match value {
            Variant::Dict(_) => Some(value.clone()),
            Variant::Empty => Some(Variant::dict(Dict::new())),
            _ => None,
        }
    }

    /// Dictionary literal syntax belongs to the host's descriptor parser;
    /// only the empty text has inherent meaning here.
    fn from_text(&self, ctx: &mut Context, text: &str) -> Option<Variant> {
        if text.is_empty() {
            return Some(Variant::dict(Dict::new()));
        }
        let parser = ctx.descriptor_parser()?;
        match parser.parse_descriptor(ctx, text) {
            Some(Variant::Dict(d)) => Some(Variant::Dict(d)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;
    use tal_value::DescriptorParser;

    #[test]
    fn test_dict_and_empty() {
        let mut ctx = Context::new();
        let d = Variant::dict(Dict::from_pairs(vec![(
            "k".to_string(),
            Variant::integer(1),
        )]));
        assert_eq!(DictionaryType.morph(&mut ctx, &d), Ok(d.clone()));
        assert_eq!(
            DictionaryType.morph(&mut ctx, &Variant::Empty),
            Ok(Variant::dict(Dict::new()))
        );
        assert!(DictionaryType
            .morph(&mut ctx, &Variant::string("not a dict"))
            .is_err());
    }

    #[test]
    fn test_descriptor_parser_is_consulted() {
        struct OneEntry;
        impl DescriptorParser for OneEntry {
            fn parse_descriptor(&self, _ctx: &mut Context, text: &str) -> Option<Variant> {
                (text == "magic").then(|| {
                    Variant::dict(Dict::from_pairs(vec![(
                        "found".to_string(),
                        Variant::Bool(true),
                    )]))
                })
            }
        }

        let mut ctx = Context::new();
        ctx.set_descriptor_parser(Rc::new(OneEntry));
        let morphed = DictionaryType.morph(&mut ctx, &Variant::string("magic"));
        assert_eq!(
            morphed,
            Ok(Variant::dict(Dict::from_pairs(vec![(
                "found".to_string(),
                Variant::Bool(true),
            )])))
        );
        assert!(DictionaryType
            .morph(&mut ctx, &Variant::string("mundane"))
            .is_err());
    }
}
