//! The type registry: name-to-type lookup for descriptors and coercion.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use tal_value::VarName;

use crate::data_type::DataType;
use crate::types::{
    BinaryType, BooleanType, DictionaryType, IntegerType, ListType, NumberType, ReferenceType,
    StringType, UrlType, VariantType,
};

/// Registered data types, keyed case-insensitively by name.
#[derive(Default)]
pub struct TypeRegistry {
    types: FxHashMap<VarName, Rc<dyn DataType>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// The registry with every built-in type installed, including the
    /// element-typed plural lists.
    pub fn standard() -> Self {
        let mut registry = TypeRegistry::new();

        let boolean: Rc<dyn DataType> = Rc::new(BooleanType);
        let integer: Rc<dyn DataType> = Rc::new(IntegerType);
        let number: Rc<dyn DataType> = Rc::new(NumberType);
        let string: Rc<dyn DataType> = Rc::new(StringType);
        let url: Rc<dyn DataType> = Rc::new(UrlType);

        registry.register(boolean.clone());
        registry.register(integer.clone());
        registry.register(number.clone());
        registry.register(string.clone());
        registry.register(url.clone());
        registry.register(Rc::new(ListType::any()));
        registry.register(Rc::new(DictionaryType));
        registry.register(Rc::new(BinaryType));
        registry.register(Rc::new(ReferenceType));
        registry.register(Rc::new(VariantType));

        registry.register(Rc::new(ListType::of("booleans", boolean)));
        registry.register(Rc::new(ListType::of("integers", integer)));
        registry.register(Rc::new(ListType::of("numbers", number)));
        registry.register(Rc::new(ListType::of("strings", string)));
        registry.register(Rc::new(ListType::of("URLs", url)));

        registry
    }

    /// Install a type under its own name, replacing any previous holder
    /// of that name.
    pub fn register(&mut self, data_type: Rc<dyn DataType>) {
        debug!(name = data_type.type_name(), "register type");
        self.types
            .insert(VarName::new(data_type.type_name()), data_type);
    }

    /// Look up a type by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<Rc<dyn DataType>> {
        self.types.get(&VarName::new(name)).cloned()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The registered type names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|n| n.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tal_value::{Context, Variant};

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = TypeRegistry::standard();
        assert!(registry.get("Integer").is_some());
        assert!(registry.get("URL").is_some());
        assert!(registry.get("url").is_some());
        assert!(registry.get("no such type").is_none());
    }

    #[test]
    fn test_standard_registry_morphs_through_lookup() {
        let registry = TypeRegistry::standard();
        let mut ctx = Context::new();
        let integers = registry.get("integers").expect("integers registered");
        assert_eq!(
            integers.morph(&mut ctx, &Variant::string("1,2,3")),
            Ok(Variant::list(vec![
                Variant::integer(1),
                Variant::integer(2),
                Variant::integer(3),
            ]))
        );
    }

    #[test]
    fn test_register_replaces_by_name() {
        let mut registry = TypeRegistry::standard();
        let before = registry.len();
        registry.register(Rc::new(crate::types::BooleanType));
        assert_eq!(registry.len(), before);
    }
}
