//! Data types and coercion for the Tal interpreter.
//!
//! A [`DataType`] is a coercion target with a fixed three-step morph
//! order and, when describable, a source of instances for descriptor
//! expressions. The [`TypeRegistry`] maps type names (case-insensitive)
//! to their implementations and installs the built-in set.

pub mod data_type;
pub mod describability;
pub mod registry;
pub mod types;

pub use data_type::DataType;
pub use describability::Describability;
pub use registry::TypeRegistry;
