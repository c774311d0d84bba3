//! The responder protocol.
//!
//! A responder is one station a message can stop at: a script object, an
//! interpreter built-in layer, or a host-provided backstop. Responders
//! form an explicit chain through [`Responder::next_responder`]; there is
//! no implicit parent lookup anywhere else.

use std::rc::Rc;

use tal_value::{Context, HandlerExit, Modifier, ScriptResult, VarName, Variant};

pub trait Responder {
    /// The next station in the chain, if any.
    fn next_responder(&self) -> Option<Rc<dyn Responder>>;

    /// Whether this responder defines a command handler for `name`.
    fn handles_command(&self, name: &VarName) -> bool;

    /// Run the command handler for `name`. Only called when
    /// [`Responder::handles_command`] is true.
    fn execute_command(
        &self,
        ctx: &mut Context,
        name: &VarName,
        arguments: &[Variant],
    ) -> ScriptResult<HandlerExit>;

    /// Whether this responder defines a function handler for `name`.
    fn handles_function(&self, name: &VarName) -> bool;

    /// Run the function handler for `name`. Only called when
    /// [`Responder::handles_function`] is true.
    fn evaluate_function(
        &self,
        ctx: &mut Context,
        name: &VarName,
        modifier: Modifier,
        argument: &Variant,
    ) -> ScriptResult<HandlerExit>;

    /// Declare a shared variable in the session's pool. Idempotent;
    /// returns the now-current binding.
    fn create_shared_variable(
        &self,
        ctx: &mut Context,
        name: &VarName,
        initial: Variant,
    ) -> Variant {
        ctx.scopes_mut().create_shared(name.clone(), initial)
    }

    fn get_shared_variable(&self, ctx: &Context, name: &VarName) -> Option<Variant> {
        ctx.scopes().get_shared(name)
    }

    /// Declare a static variable keyed by `(handler, name)`. Idempotent;
    /// returns the now-current binding.
    fn create_static_variable(
        &self,
        ctx: &mut Context,
        handler: &VarName,
        name: &VarName,
        initial: Variant,
    ) -> Variant {
        ctx.scopes_mut()
            .create_static(handler.clone(), name.clone(), initial)
    }

    fn get_static_variable(
        &self,
        ctx: &Context,
        handler: &VarName,
        name: &VarName,
    ) -> Option<Variant> {
        ctx.scopes().get_static(handler, name)
    }
}
