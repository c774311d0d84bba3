//! The built-in data types.

pub mod binary;
pub mod boolean;
pub mod dictionary;
pub mod integer;
pub mod list;
pub mod number;
pub mod reference;
pub mod string;
pub mod url;
pub mod variant_any;

pub use binary::BinaryType;
pub use boolean::BooleanType;
pub use dictionary::DictionaryType;
pub use integer::IntegerType;
pub use list::{split_elements, ListType};
pub use number::NumberType;
pub use reference::ReferenceType;
pub use string::StringType;
pub use url::UrlType;
pub use variant_any::VariantType;
