//! Handler execution results and handler storage types.

use std::rc::Rc;

use crate::context::Context;
use crate::errors::ScriptResult;
use crate::variant::Variant;

/// Property/function qualifier ("the long name of ...").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Modifier {
    /// No qualifier.
    #[default]
    Plain,
    Long,
    Short,
    Abbreviated,
}

/// How a handler invocation finished.
///
/// `Pass` asks the responder chain to delegate to the next responder;
/// `Exit` and `Error` propagate up without any further chain traversal.
#[derive(Clone, Debug, PartialEq)]
pub enum HandlerExit {
    /// The handler ran to completion, optionally returning a value.
    Normal(Option<Variant>),
    /// The handler exited its enclosing construct early.
    Exit,
    /// The handler declined the message; delegate onward.
    Pass,
    /// The handler raised a script-level error value.
    Error(Variant),
}

impl HandlerExit {
    /// The return value of a `Normal` exit, if any.
    pub fn return_value(&self) -> Option<&Variant> {
        match self {
            HandlerExit::Normal(v) => v.as_ref(),
            _ => None,
        }
    }
}

/// A user-defined command handler body.
///
/// The statement executor that builds these is an external collaborator;
/// the scope store only needs to hold and invoke them.
pub type CommandHandler = Rc<dyn Fn(&mut Context, &[Variant]) -> ScriptResult<HandlerExit>>;

/// A user-defined function handler body.
pub type FunctionHandler = Rc<dyn Fn(&mut Context, Modifier, &Variant) -> ScriptResult<HandlerExit>>;
