use super::error;
use crate::errors::{Diagnostic, DiagnosticId, Diagnostics, Phase, Template};
use crate::source::Span;

pub(crate) static UNDEFINED_REFERENCE: Template =
    error("DB0001", Phase::Binding, "undefined reference", "undefined reference to `{0}`");
pub(crate) static ILLEGAL_SHADOWING: Template = error(
    "DB0002",
    Phase::Binding,
    "illegal shadowing",
    "`{0}` is already declared in this list",
);
pub(crate) static VARIADIC_NOT_LAST: Template = error(
    "DB0003",
    Phase::Binding,
    "variadic parameter not last",
    "variadic parameter `{0}` must be the last parameter",
);
pub(crate) static DUPLICATE_DEFINITION: Template = error(
    "DB0004",
    Phase::Binding,
    "duplicate definition",
    "`{0}` is already defined in this scope",
);
pub(crate) static IMMUTABLE_ASSIGNMENT: Template = error(
    "DB0005",
    Phase::Binding,
    "assignment to immutable",
    "cannot assign to `{0}` because it is immutable",
);
pub(crate) static ILLEGAL_ASSIGNMENT_TARGET: Template = error(
    "DB0006",
    Phase::Binding,
    "illegal assignment target",
    "this expression cannot be assigned to",
);
pub(crate) static JUMP_OUTSIDE_LOOP: Template =
    error("DB0007", Phase::Binding, "jump outside loop", "`{0}` can only appear inside a loop");
pub(crate) static INTEGER_OUT_OF_RANGE: Template = error(
    "DB0008",
    Phase::Binding,
    "integer out of range",
    "integer literal `{0}` is out of range",
);
pub(crate) static NOT_A_TYPE: Template =
    error("DB0009", Phase::Binding, "not a type", "`{0}` is not a type");
pub(crate) static NOT_A_VALUE: Template =
    error("DB0010", Phase::Binding, "not a value", "`{0}` is not a value");
pub(crate) static MISSING_TYPE: Template = error(
    "DB0011",
    Phase::Binding,
    "missing type",
    "`{0}` needs either a type or an initial value",
);

impl Diagnostics {
    pub(crate) fn binding_error(&mut self, at: Span) -> BindingErrors {
        BindingErrors { diagnostics: self, primary: at }
    }
}

pub(crate) struct BindingErrors<'a> {
    diagnostics: &'a mut Diagnostics,
    primary: Span,
}

impl BindingErrors<'_> {
    pub fn undefined_reference(&mut self, name: &str) -> DiagnosticId {
        let error = self.error(&UNDEFINED_REFERENCE, [name]);
        self.diagnostics.add(error)
    }

    pub fn illegal_shadowing(&mut self, first: Span, name: &str) -> DiagnosticId {
        let error = self
            .error(&ILLEGAL_SHADOWING, [name])
            .with_label(first, "first declared here");
        self.diagnostics.add(error)
    }

    pub fn variadic_not_last(&mut self, name: &str) -> DiagnosticId {
        let error = self.error(&VARIADIC_NOT_LAST, [name]);
        self.diagnostics.add(error)
    }

    pub fn duplicate_definition(&mut self, previous: Span, name: &str) -> DiagnosticId {
        let error = self
            .error(&DUPLICATE_DEFINITION, [name])
            .with_label(previous, "previous definition here");
        self.diagnostics.add(error)
    }

    pub fn immutable_assignment(&mut self, name: &str) -> DiagnosticId {
        let error = self.error(&IMMUTABLE_ASSIGNMENT, [name]);
        self.diagnostics.add(error)
    }

    pub fn illegal_assignment_target(&mut self) -> DiagnosticId {
        let error = self
            .error(&ILLEGAL_ASSIGNMENT_TARGET, [] as [&str; 0])
            .with_note("only variables can be assigned to");
        self.diagnostics.add(error)
    }

    pub fn jump_outside_loop(&mut self, keyword: &str) -> DiagnosticId {
        let error = self.error(&JUMP_OUTSIDE_LOOP, [keyword]);
        self.diagnostics.add(error)
    }

    pub fn integer_out_of_range(&mut self, literal: &str) -> DiagnosticId {
        let error = self.error(&INTEGER_OUT_OF_RANGE, [literal]);
        self.diagnostics.add(error)
    }

    pub fn not_a_type(&mut self, name: &str) -> DiagnosticId {
        let error = self.error(&NOT_A_TYPE, [name]);
        self.diagnostics.add(error)
    }

    pub fn not_a_value(&mut self, name: &str) -> DiagnosticId {
        let error = self.error(&NOT_A_VALUE, [name]);
        self.diagnostics.add(error)
    }

    pub fn missing_type(&mut self, name: &str) -> DiagnosticId {
        let error = self
            .error(&MISSING_TYPE, [name])
            .with_help(format!("try adding a type annotation: `{name}: int32`"));
        self.diagnostics.add(error)
    }

    fn error<const N: usize>(&self, template: &'static Template, args: [&str; N]) -> Diagnostic {
        Diagnostic::new(template, self.primary, args.iter().map(|arg| arg.to_string()).collect())
    }
}
