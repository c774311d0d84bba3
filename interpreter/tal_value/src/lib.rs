//! Core value model of the Tal interpreter.
//!
//! This crate defines the runtime [`Variant`], the container capability
//! protocol over it (contents, chunks, ranged item and byte access,
//! sorting, properties), and the session state those operations consult:
//! the scope store with its local, shared, and static pools, and the
//! [`Context`] threaded through every call.
//!
//! Type descriptors and coercion live in `tal_types`; message dispatch
//! and the responder chain live in `tal_eval`. Both build on the types
//! here.

pub mod context;
pub mod errors;
pub mod handler;
pub mod lines;
pub mod name;
pub mod scope;
pub mod span;
pub mod variant;

pub use context::{Context, DescriptorParser};
pub use errors::{
    get_error, morph_error, range_error, unsupported_operation, ScriptError, ScriptResult,
};
pub use handler::{CommandHandler, FunctionHandler, HandlerExit, Modifier};
pub use name::VarName;
pub use scope::{ScopeStore, StackFrame, VariableMap, VariableScope};
pub use span::Span;
pub use variant::{sort_value, Comparator, Dict, Variant};
