//! Walking the responder chain.
//!
//! A message first consults the current stack frame's local handlers,
//! then walks the chain from the given first responder. A `Pass` exit
//! moves to the next station; `Exit` and `Error` stop the walk on the
//! spot. A responder seen twice ends the walk as unhandled rather than
//! looping, so a miswired chain cannot hang the interpreter.

use std::rc::Rc;

use tracing::trace;

use tal_value::{Context, HandlerExit, Modifier, ScriptResult, VarName, Variant};

use crate::responder::Responder;

/// What became of a dispatched message.
#[derive(Clone, Debug, PartialEq)]
pub enum MessageOutcome {
    /// Some handler ran to completion, optionally with a result.
    Handled(Option<Variant>),
    /// A handler exited its enclosing construct.
    Exited,
    /// A handler raised a script-level error value.
    Errored(Variant),
    /// No handler anywhere in the chain took the message.
    Unhandled,
}

/// Dispatch a command message.
pub fn send_command(
    ctx: &mut Context,
    first: Option<Rc<dyn Responder>>,
    name: &VarName,
    arguments: &[Variant],
) -> ScriptResult<MessageOutcome> {
    trace!(command = name.as_str(), "send command");
    let local = ctx
        .scopes()
        .current_frame()
        .and_then(|frame| frame.local_command(name));
    if let Some(handler) = local {
        match handler(ctx, arguments)? {
            HandlerExit::Pass => {}
            exit => return Ok(outcome_of(exit)),
        }
    }
    walk_chain(first, |responder| {
        if !responder.handles_command(name) {
            return Ok(None);
        }
        match responder.execute_command(ctx, name, arguments)? {
            HandlerExit::Pass => Ok(None),
            exit => Ok(Some(outcome_of(exit))),
        }
    })
}

/// Dispatch a function-call message.
pub fn send_function(
    ctx: &mut Context,
    first: Option<Rc<dyn Responder>>,
    name: &VarName,
    modifier: Modifier,
    argument: &Variant,
) -> ScriptResult<MessageOutcome> {
    trace!(function = name.as_str(), "send function");
    let local = ctx
        .scopes()
        .current_frame()
        .and_then(|frame| frame.local_function(name));
    if let Some(handler) = local {
        match handler(ctx, modifier, argument)? {
            HandlerExit::Pass => {}
            exit => return Ok(outcome_of(exit)),
        }
    }
    walk_chain(first, |responder| {
        if !responder.handles_function(name) {
            return Ok(None);
        }
        match responder.evaluate_function(ctx, name, modifier, argument)? {
            HandlerExit::Pass => Ok(None),
            exit => Ok(Some(outcome_of(exit))),
        }
    })
}

fn outcome_of(exit: HandlerExit) -> MessageOutcome {
    match exit {
        HandlerExit::Normal(value) => MessageOutcome::Handled(value),
        HandlerExit::Exit => MessageOutcome::Exited,
        HandlerExit::Error(e) => MessageOutcome::Errored(e),
        HandlerExit::Pass => MessageOutcome::Unhandled,
    }
}

/// Visit each station once; `visit` returns `Some` to stop the walk.
fn walk_chain<F>(first: Option<Rc<dyn Responder>>, mut visit: F) -> ScriptResult<MessageOutcome>
where
    F: FnMut(&Rc<dyn Responder>) -> ScriptResult<Option<MessageOutcome>>,
{
    let mut visited: Vec<Rc<dyn Responder>> = Vec::new();
    let mut current = first;
    while let Some(responder) = current {
        if visited.iter().any(|seen| Rc::ptr_eq(seen, &responder)) {
            trace!("responder chain revisit, stopping walk");
            return Ok(MessageOutcome::Unhandled);
        }
        if let Some(outcome) = visit(&responder)? {
            return Ok(outcome);
        }
        current = responder.next_responder();
        visited.push(responder);
    }
    Ok(MessageOutcome::Unhandled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rustc_hash::FxHashMap;
    use std::cell::RefCell;
    use tal_value::StackFrame;

    type CommandFn = Box<dyn Fn(&mut Context, &[Variant]) -> ScriptResult<HandlerExit>>;

    /// A scripted chain station for tests.
    #[derive(Default)]
    struct Station {
        commands: FxHashMap<VarName, CommandFn>,
        next: Option<Rc<dyn Responder>>,
        hits: RefCell<u32>,
    }

    impl Station {
        fn with_command(
            mut self,
            name: &str,
            f: impl Fn(&mut Context, &[Variant]) -> ScriptResult<HandlerExit> + 'static,
        ) -> Self {
            self.commands.insert(VarName::new(name), Box::new(f));
            self
        }

        fn chained_to(mut self, next: Rc<dyn Responder>) -> Self {
            self.next = Some(next);
            self
        }
    }

    impl Responder for Station {
        fn next_responder(&self) -> Option<Rc<dyn Responder>> {
            self.next.clone()
        }

        fn handles_command(&self, name: &VarName) -> bool {
            self.commands.contains_key(name)
        }

        fn execute_command(
            &self,
            ctx: &mut Context,
            name: &VarName,
            arguments: &[Variant],
        ) -> ScriptResult<HandlerExit> {
            *self.hits.borrow_mut() += 1;
            match self.commands.get(name) {
                Some(f) => f(ctx, arguments),
                None => Ok(HandlerExit::Pass),
            }
        }

        fn handles_function(&self, _name: &VarName) -> bool {
            false
        }

        fn evaluate_function(
            &self,
            _ctx: &mut Context,
            _name: &VarName,
            _modifier: Modifier,
            _argument: &Variant,
        ) -> ScriptResult<HandlerExit> {
            Ok(HandlerExit::Pass)
        }
    }

    #[test]
    fn test_pass_delegates_to_next() {
        let back: Rc<Station> = Rc::new(Station::default().with_command("greet", |_, _| {
            Ok(HandlerExit::Normal(Some(Variant::string("from back"))))
        }));
        let front = Rc::new(
            Station::default()
                .with_command("greet", |_, _| Ok(HandlerExit::Pass))
                .chained_to(back.clone()),
        );

        let mut ctx = Context::new();
        let outcome = send_command(&mut ctx, Some(front.clone()), &VarName::new("greet"), &[]);
        assert_eq!(
            outcome,
            Ok(MessageOutcome::Handled(Some(Variant::string("from back"))))
        );
        assert_eq!(*front.hits.borrow(), 1);
        assert_eq!(*back.hits.borrow(), 1);
    }

    #[test]
    fn test_non_handler_is_skipped_without_running() {
        let back: Rc<Station> = Rc::new(Station::default().with_command("go", |_, _| {
            Ok(HandlerExit::Normal(None))
        }));
        let front = Rc::new(Station::default().chained_to(back.clone()));

        let mut ctx = Context::new();
        let outcome = send_command(&mut ctx, Some(front.clone()), &VarName::new("go"), &[]);
        assert_eq!(outcome, Ok(MessageOutcome::Handled(None)));
        assert_eq!(*front.hits.borrow(), 0);
    }

    #[test]
    fn test_exhausted_chain_is_unhandled() {
        let only: Rc<dyn Responder> = Rc::new(Station::default());
        let mut ctx = Context::new();
        let outcome = send_command(&mut ctx, Some(only), &VarName::new("nobody"), &[]);
        assert_eq!(outcome, Ok(MessageOutcome::Unhandled));
    }

    #[test]
    fn test_exit_stops_the_walk() {
        let back: Rc<Station> = Rc::new(Station::default().with_command("stop", |_, _| {
            Ok(HandlerExit::Normal(None))
        }));
        let front = Rc::new(
            Station::default()
                .with_command("stop", |_, _| Ok(HandlerExit::Exit))
                .chained_to(back.clone()),
        );

        let mut ctx = Context::new();
        let outcome = send_command(&mut ctx, Some(front), &VarName::new("stop"), &[]);
        assert_eq!(outcome, Ok(MessageOutcome::Exited));
        assert_eq!(*back.hits.borrow(), 0);
    }

    #[test]
    fn test_error_exit_carries_the_value() {
        let only = Rc::new(Station::default().with_command("boom", |_, _| {
            Ok(HandlerExit::Error(Variant::string("went wrong")))
        }));
        let mut ctx = Context::new();
        let outcome = send_command(&mut ctx, Some(only), &VarName::new("boom"), &[]);
        assert_eq!(
            outcome,
            Ok(MessageOutcome::Errored(Variant::string("went wrong")))
        );
    }

    #[test]
    fn test_revisit_guard_terminates_cycles() {
        // Two stations pointing at each other, both passing.
        struct Looper {
            next: RefCell<Option<Rc<dyn Responder>>>,
        }
        impl Responder for Looper {
            fn next_responder(&self) -> Option<Rc<dyn Responder>> {
                self.next.borrow().clone()
            }
            fn handles_command(&self, _name: &VarName) -> bool {
                true
            }
            fn execute_command(
                &self,
                _ctx: &mut Context,
                _name: &VarName,
                _arguments: &[Variant],
            ) -> ScriptResult<HandlerExit> {
                Ok(HandlerExit::Pass)
            }
            fn handles_function(&self, _name: &VarName) -> bool {
                false
            }
            fn evaluate_function(
                &self,
                _ctx: &mut Context,
                _name: &VarName,
                _modifier: Modifier,
                _argument: &Variant,
            ) -> ScriptResult<HandlerExit> {
                Ok(HandlerExit::Pass)
            }
        }

        let a = Rc::new(Looper {
            next: RefCell::new(None),
        });
        let b = Rc::new(Looper {
            next: RefCell::new(Some(a.clone() as Rc<dyn Responder>)),
        });
        *a.next.borrow_mut() = Some(b.clone() as Rc<dyn Responder>);

        let mut ctx = Context::new();
        let outcome = send_command(&mut ctx, Some(a), &VarName::new("spin"), &[]);
        assert_eq!(outcome, Ok(MessageOutcome::Unhandled));
    }

    #[test]
    fn test_frame_local_handler_preempts_chain() {
        let chain: Rc<Station> = Rc::new(Station::default().with_command("work", |_, _| {
            Ok(HandlerExit::Normal(Some(Variant::string("chain"))))
        }));

        let mut ctx = Context::new();
        let mut frame = StackFrame::new("caller", vec![]);
        frame.define_local_command(
            VarName::new("work"),
            Rc::new(|_: &mut Context, _: &[Variant]| {
                Ok(HandlerExit::Normal(Some(Variant::string("local"))))
            }),
        );
        ctx.scopes_mut().push_frame(frame);

        let outcome = send_command(
            &mut ctx,
            Some(chain.clone()),
            &VarName::new("work"),
            &[],
        );
        assert_eq!(
            outcome,
            Ok(MessageOutcome::Handled(Some(Variant::string("local"))))
        );
        assert_eq!(*chain.hits.borrow(), 0);
    }

    #[test]
    fn test_local_pass_falls_through_to_chain() {
        let chain: Rc<Station> = Rc::new(Station::default().with_command("work", |_, _| {
            Ok(HandlerExit::Normal(Some(Variant::string("chain"))))
        }));

        let mut ctx = Context::new();
        let mut frame = StackFrame::new("caller", vec![]);
        frame.define_local_command(
            VarName::new("work"),
            Rc::new(|_: &mut Context, _: &[Variant]| Ok(HandlerExit::Pass)),
        );
        ctx.scopes_mut().push_frame(frame);

        let outcome = send_command(&mut ctx, Some(chain), &VarName::new("work"), &[]);
        assert_eq!(
            outcome,
            Ok(MessageOutcome::Handled(Some(Variant::string("chain"))))
        );
    }

    #[test]
    fn test_shared_and_static_defaults_hit_the_store() {
        let station = Station::default();
        let mut ctx = Context::new();

        let first = station.create_shared_variable(
            &mut ctx,
            &VarName::new("pool"),
            Variant::integer(1),
        );
        let second = station.create_shared_variable(
            &mut ctx,
            &VarName::new("POOL"),
            Variant::integer(2),
        );
        assert_eq!(first, Variant::integer(1));
        assert_eq!(second, Variant::integer(1));

        let handler = VarName::new("tick");
        station.create_static_variable(
            &mut ctx,
            &handler,
            &VarName::new("n"),
            Variant::integer(0),
        );
        ctx.scopes_mut()
            .create_static(handler.clone(), VarName::new("n"), Variant::integer(9));
        assert_eq!(
            station.get_static_variable(&ctx, &handler, &VarName::new("n")),
            Some(Variant::integer(0))
        );
    }
}
