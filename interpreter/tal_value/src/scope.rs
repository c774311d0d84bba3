//! The scope store: stack frames, shared and static variable pools.
//!
//! A variable name by itself says nothing about where its storage lives.
//! The current stack frame records, per name, which scope governs it
//! (local by default); resolution walks from that declaration to the
//! frame's local map, the process-wide shared pool, or the per-handler
//! static pool. With no frame on the stack everything falls back to the
//! shared pool, so top-level evaluation still has somewhere to write.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::handler::{CommandHandler, FunctionHandler};
use crate::name::VarName;
use crate::variant::Variant;

/// Which storage governs a variable name inside a handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VariableScope {
    /// Scoped to the current handler invocation. The default.
    #[default]
    Local,
    /// Process-wide, keyed by name alone.
    Shared,
    /// Keyed by (enclosing handler name, variable name); persists across
    /// invocations of that handler.
    Static,
}

/// An ordered set of variable bindings keyed case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct VariableMap {
    values: FxHashMap<VarName, Variant>,
}

impl VariableMap {
    pub fn new() -> Self {
        VariableMap::default()
    }

    /// Declare a binding. Idempotent: if the name is already bound the
    /// existing binding wins and `initial` is discarded.
    pub fn declare(&mut self, name: VarName, initial: Variant) -> &Variant {
        self.values.entry(name).or_insert(initial)
    }

    pub fn is_declared(&self, name: &VarName) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &VarName) -> Option<&Variant> {
        self.values.get(name)
    }

    /// Bind `name` to `value`, replacing any existing binding.
    pub fn set(&mut self, name: VarName, value: Variant) {
        self.values.insert(name, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fold another map's bindings into this one, the other side winning
    /// on collision. Used when an interpreter session absorbs a parent.
    pub fn merge(&mut self, other: VariableMap) {
        self.values.extend(other.values);
    }
}

/// The local state of one handler invocation.
pub struct StackFrame {
    handler_name: VarName,
    parameters: Vec<Variant>,
    scopes: FxHashMap<VarName, VariableScope>,
    locals: VariableMap,
    local_commands: FxHashMap<VarName, CommandHandler>,
    local_functions: FxHashMap<VarName, FunctionHandler>,
}

impl StackFrame {
    pub fn new(handler_name: impl Into<VarName>, parameters: Vec<Variant>) -> Self {
        StackFrame {
            handler_name: handler_name.into(),
            parameters,
            scopes: FxHashMap::default(),
            locals: VariableMap::new(),
            local_commands: FxHashMap::default(),
            local_functions: FxHashMap::default(),
        }
    }

    pub fn handler_name(&self) -> &VarName {
        &self.handler_name
    }

    pub fn parameters(&self) -> &[Variant] {
        &self.parameters
    }

    /// The scope governing `name` in this invocation. Local unless a
    /// scope declaration said otherwise.
    pub fn scope_of(&self, name: &VarName) -> VariableScope {
        self.scopes.get(name).copied().unwrap_or_default()
    }

    pub fn set_scope(&mut self, name: VarName, scope: VariableScope) {
        self.scopes.insert(name, scope);
    }

    pub fn locals(&self) -> &VariableMap {
        &self.locals
    }

    pub fn locals_mut(&mut self) -> &mut VariableMap {
        &mut self.locals
    }

    pub fn define_local_command(&mut self, name: VarName, handler: CommandHandler) {
        self.local_commands.insert(name, handler);
    }

    pub fn local_command(&self, name: &VarName) -> Option<CommandHandler> {
        self.local_commands.get(name).cloned()
    }

    pub fn define_local_function(&mut self, name: VarName, handler: FunctionHandler) {
        self.local_functions.insert(name, handler);
    }

    pub fn local_function(&self, name: &VarName) -> Option<FunctionHandler> {
        self.local_functions.get(name).cloned()
    }
}

/// Call stack plus the process-wide shared and static pools.
#[derive(Default)]
pub struct ScopeStore {
    shared: VariableMap,
    statics: FxHashMap<VarName, VariableMap>,
    frames: Vec<StackFrame>,
}

impl ScopeStore {
    pub fn new() -> Self {
        ScopeStore::default()
    }

    pub fn push_frame(&mut self, frame: StackFrame) {
        self.frames.push(frame);
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    pub fn current_frame(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    pub fn current_frame_mut(&mut self) -> Option<&mut StackFrame> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Declare a local in the current frame (shared pool when no frame is
    /// on the stack). Idempotent; returns the now-current binding.
    pub fn create_local(&mut self, name: VarName, initial: Variant) -> Variant {
        let map = match self.frames.last_mut() {
            Some(frame) => frame.locals_mut(),
            None => &mut self.shared,
        };
        map.declare(name, initial).clone()
    }

    pub fn get_local(&self, name: &VarName) -> Option<Variant> {
        let map = match self.frames.last() {
            Some(frame) => frame.locals(),
            None => &self.shared,
        };
        map.get(name).cloned()
    }

    /// Declare a shared binding. Idempotent; returns the now-current binding.
    pub fn create_shared(&mut self, name: VarName, initial: Variant) -> Variant {
        self.shared.declare(name, initial).clone()
    }

    pub fn get_shared(&self, name: &VarName) -> Option<Variant> {
        self.shared.get(name).cloned()
    }

    /// Declare a static binding under `(handler, name)`. Idempotent;
    /// returns the now-current binding.
    pub fn create_static(
        &mut self,
        handler: VarName,
        name: VarName,
        initial: Variant,
    ) -> Variant {
        self.statics
            .entry(handler)
            .or_default()
            .declare(name, initial)
            .clone()
    }

    pub fn get_static(&self, handler: &VarName, name: &VarName) -> Option<Variant> {
        self.statics.get(handler).and_then(|m| m.get(name)).cloned()
    }

    /// Record a scope declaration for `name` in the current frame.
    /// No-op at top level, where every name resolves to the shared pool.
    pub fn set_scope(&mut self, name: VarName, scope: VariableScope) {
        if let Some(frame) = self.frames.last_mut() {
            frame.set_scope(name, scope);
        }
    }

    /// The variable map `name` currently resolves to, creating the static
    /// sub-map for the current handler on demand.
    pub fn map_for(&mut self, name: &VarName) -> &mut VariableMap {
        let (scope, handler) = self.resolution_of(name);
        trace!(name = name.as_str(), ?scope, "resolve variable map");
        match scope {
            VariableScope::Shared => &mut self.shared,
            VariableScope::Static => self.statics.entry(handler).or_default(),
            VariableScope::Local => match self.frames.last_mut() {
                Some(frame) => frame.locals_mut(),
                None => &mut self.shared,
            },
        }
    }

    /// Read-side resolution: the current binding of `name`, if any.
    pub fn lookup(&self, name: &VarName) -> Option<&Variant> {
        let (scope, handler) = self.resolution_of(name);
        match scope {
            VariableScope::Shared => self.shared.get(name),
            VariableScope::Static => self.statics.get(&handler).and_then(|m| m.get(name)),
            VariableScope::Local => match self.frames.last() {
                Some(frame) => frame.locals().get(name),
                None => self.shared.get(name),
            },
        }
    }

    pub fn is_declared(&self, name: &VarName) -> bool {
        self.lookup(name).is_some()
    }

    /// Bind `name` in whatever map it resolves to.
    pub fn set(&mut self, name: VarName, value: Variant) {
        self.map_for(&name).set(name, value);
    }

    fn resolution_of(&self, name: &VarName) -> (VariableScope, VarName) {
        match self.frames.last() {
            Some(frame) => (frame.scope_of(name), frame.handler_name().clone()),
            None => (VariableScope::Shared, VarName::new("")),
        }
    }
}
