use super::error;
use crate::errors::{Diagnostic, DiagnosticId, Diagnostics, Phase, Template};
use crate::source::Span;

pub(crate) static DOES_NOT_RETURN: Template = error(
    "DF0001",
    Phase::Flow,
    "does not return",
    "function `{0}` does not return a value on all paths",
);
pub(crate) static USE_BEFORE_INITIALIZATION: Template = error(
    "DF0002",
    Phase::Flow,
    "use before initialization",
    "`{0}` is used before it is initialized",
);
pub(crate) static IMMUTABLE_REASSIGNED: Template = error(
    "DF0003",
    Phase::Flow,
    "immutable reassigned",
    "`{0}` is immutable and might already be initialized",
);

impl Diagnostics {
    pub(crate) fn flow_error(&mut self, at: Span) -> FlowErrors {
        FlowErrors { diagnostics: self, primary: at }
    }
}

pub(crate) struct FlowErrors<'a> {
    diagnostics: &'a mut Diagnostics,
    primary: Span,
}

impl FlowErrors<'_> {
    pub fn does_not_return(&mut self, function: &str) -> DiagnosticId {
        let error = self
            .error(&DOES_NOT_RETURN, function)
            .with_note("the end of the function body is reachable without a `return`");
        self.diagnostics.add(error)
    }

    pub fn use_before_initialization(&mut self, name: &str) -> DiagnosticId {
        let error = self.error(&USE_BEFORE_INITIALIZATION, name);
        self.diagnostics.add(error)
    }

    pub fn immutable_reassigned(&mut self, name: &str, declared: Option<Span>) -> DiagnosticId {
        let mut error = self
            .error(&IMMUTABLE_REASSIGNED, name)
            .with_help("declare it with `var` to allow assigning to it more than once");
        if let Some(declared) = declared {
            error = error.with_label(declared, "declared here");
        }

        self.diagnostics.add(error)
    }

    fn error(&self, template: &'static Template, name: &str) -> Diagnostic {
        Diagnostic::new(template, self.primary, vec![name.to_string()])
    }
}
