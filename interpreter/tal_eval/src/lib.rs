//! Message dispatch for the Tal interpreter.
//!
//! Commands and function calls travel along an explicit chain of
//! [`Responder`]s. Frame-local handlers are consulted before the chain;
//! a `pass` moves the message onward and a revisited station ends the
//! walk instead of looping.

pub mod dispatch;
pub mod responder;

pub use dispatch::{send_command, send_function, MessageOutcome};
pub use responder::Responder;
pub use tal_value::{HandlerExit, Modifier};
