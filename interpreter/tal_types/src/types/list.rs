//! The list type and its element-typed variants ("integers", "strings").

use std::rc::Rc;

use tal_value::{Context, Variant};

use crate::data_type::DataType;
use crate::describability::Describability;

/// The list type. With an element type attached it morphs each element
/// through that type, giving the plural types their meaning; without one
/// it accepts any elements.
pub struct ListType {
    name: &'static str,
    element: Option<Rc<dyn DataType>>,
}

impl ListType {
    /// The plain `list` type: any elements.
    pub fn any() -> Self {
        ListType {
            name: "list",
            element: None,
        }
    }

    /// An element-typed list, like `integers` over the integer type.
    pub fn of(name: &'static str, element: Rc<dyn DataType>) -> Self {
        ListType {
            name,
            element: Some(element),
        }
    }

    fn morph_elements(
        &self,
        ctx: &mut Context,
        items: &[Variant],
    ) -> Option<Vec<Variant>> {
        match &self.element {
            None => Some(items.to_vec()),
            Some(element) => items
                .iter()
                .map(|item| element.morph(ctx, item).ok())
                .collect(),
        }
    }
}

impl DataType for ListType {
    fn type_name(&self) -> &'static str {
        self.name
    }

    fn describability(&self) -> Describability {
        Describability::NONE
    }

    fn from_kind(&self, ctx: &mut Context, value: &Variant) -> Option<Variant> {
        match value {
            Variant::Empty => Some(Variant::list(vec![])),
            Variant::Str(s) if s.is_empty() => Some(Variant::list(vec![])),
            Variant::List(items) => self.morph_elements(ctx, items).map(Variant::List),
            _ => None,
        }
    }

    fn from_text(&self, ctx: &mut Context, text: &str) -> Option<Variant> {
        let pieces: Vec<Variant> = split_elements(text)
            .into_iter()
            .map(Variant::string)
            .collect();
        self.morph_elements(ctx, &pieces).map(Variant::List)
    }
}

/// Split list text on commas, ignoring commas nested inside parentheses,
/// so the text form of a nested list stays one element.
pub fn split_elements(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::integer::IntegerType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_respects_parens() {
        assert_eq!(split_elements("1,(2,3),4"), vec!["1", "(2,3)", "4"]);
        assert_eq!(split_elements("a"), vec!["a"]);
        assert_eq!(split_elements("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_any_list_from_text() {
        let mut ctx = Context::new();
        assert_eq!(
            ListType::any().morph(&mut ctx, &Variant::string("a,b")),
            Ok(Variant::list(vec![Variant::string("a"), Variant::string("b")]))
        );
    }

    #[test]
    fn test_empty_text_is_empty_list() {
        let mut ctx = Context::new();
        assert_eq!(
            ListType::any().morph(&mut ctx, &Variant::Empty),
            Ok(Variant::list(vec![]))
        );
        assert_eq!(
            ListType::any().morph(&mut ctx, &Variant::string("")),
            Ok(Variant::list(vec![]))
        );
    }

    #[test]
    fn test_scalar_becomes_one_element_list() {
        let mut ctx = Context::new();
        assert_eq!(
            ListType::any().morph(&mut ctx, &Variant::integer(5)),
            Ok(Variant::list(vec![Variant::string("5")]))
        );
    }

    #[test]
    fn test_typed_list_morphs_each_element() {
        let mut ctx = Context::new();
        let integers = ListType::of("integers", Rc::new(IntegerType));
        assert_eq!(
            integers.morph(&mut ctx, &Variant::string("1, 2 ,3")),
            Ok(Variant::list(vec![
                Variant::integer(1),
                Variant::integer(2),
                Variant::integer(3),
            ]))
        );
        assert!(integers.morph(&mut ctx, &Variant::string("1,x")).is_err());
    }

    #[test]
    fn test_typed_list_accepts_matching_list() {
        let mut ctx = Context::new();
        let integers = ListType::of("integers", Rc::new(IntegerType));
        let input = Variant::list(vec![Variant::string("4"), Variant::number(5.0)]);
        assert_eq!(
            integers.morph(&mut ctx, &input),
            Ok(Variant::list(vec![Variant::integer(4), Variant::integer(5)]))
        );
    }
}
