//! Interpreter session state threaded through every variant operation.

use std::rc::Rc;

use crate::scope::ScopeStore;
use crate::variant::Variant;

/// Recognizes textual descriptors and produces variants for them.
///
/// Descriptor syntax belongs to the parsing subsystem, not to this core;
/// a host installs its parser on the [`Context`] and types consult it
/// during morphing. `None` means the text is not a descriptor this parser
/// understands; that is an ordinary non-match, not an error.
pub trait DescriptorParser {
    fn parse_descriptor(&self, ctx: &mut Context, text: &str) -> Option<Variant>;
}

/// Interpreter-global state for one evaluation session.
///
/// Owns the scope store and the session-wide settings variants consult:
/// the configured line ending used when text is reconstituted from lines,
/// the locale tag, and the pluggable descriptor parser. One `Context` is
/// created at session start and passed by reference into every call;
/// there is no hidden global state.
pub struct Context {
    scopes: ScopeStore,
    line_ending: String,
    locale: String,
    descriptor_parser: Option<Rc<dyn DescriptorParser>>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            scopes: ScopeStore::new(),
            line_ending: "\n".to_string(),
            locale: "en".to_string(),
            descriptor_parser: None,
        }
    }

    pub fn scopes(&self) -> &ScopeStore {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeStore {
        &mut self.scopes
    }

    /// The line ending joined between lines when text is reconstituted.
    pub fn line_ending(&self) -> &str {
        &self.line_ending
    }

    pub fn set_line_ending(&mut self, ending: impl Into<String>) {
        self.line_ending = ending.into();
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// The installed descriptor parser, if any. Returned by clone so the
    /// caller can invoke it while continuing to mutate this context.
    pub fn descriptor_parser(&self) -> Option<Rc<dyn DescriptorParser>> {
        self.descriptor_parser.clone()
    }

    pub fn set_descriptor_parser(&mut self, parser: Rc<dyn DescriptorParser>) {
        self.descriptor_parser = Some(parser);
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}
