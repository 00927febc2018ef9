//! Every diagnostic the compiler can report, grouped by the phase reporting it.

mod binding;
mod flow;
mod syntax;

use crate::errors::{Phase, Severity, Template};

const fn error(
    code: &'static str,
    phase: Phase,
    title: &'static str,
    format: &'static str,
) -> Template {
    Template { code, phase, severity: Severity::Error, title, format }
}
