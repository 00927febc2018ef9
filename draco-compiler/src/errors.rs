use std::fmt;

use crate::source::Span;

/// Identifies a particular reported diagnostic within a [`Diagnostics`] bag.
#[must_use]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DiagnosticId(usize);

/// The static description of one kind of diagnostic. The format string refers
/// to its arguments positionally, as `{0}`, `{1}`, and so on.
#[derive(Debug, Eq, Hash, PartialEq)]
pub struct Template {
    pub code: &'static str,
    pub phase: Phase,
    pub severity: Severity,
    pub title: &'static str,
    pub format: &'static str,
}

impl Template {
    /// Substitute `args` into the format string of this template.
    pub fn render(&self, args: &[impl AsRef<str>]) -> String {
        let mut result = String::with_capacity(self.format.len());
        let mut rest = self.format;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            rest = &rest[open..];

            let Some(close) = rest.find('}') else { break };
            match rest[1..close].parse::<usize>() {
                Ok(index) if index < args.len() => result.push_str(args[index].as_ref()),
                _ => result.push_str(&rest[..=close]),
            }

            rest = &rest[close + 1..];
        }

        result.push_str(rest);
        result
    }
}

/// Stores reported diagnostics in the order they were reported.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,

    num_errors: usize,
    num_warnings: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) -> DiagnosticId {
        match diagnostic.severity() {
            Severity::Error => self.num_errors += 1,
            Severity::Warning => self.num_warnings += 1,
        };

        let id = DiagnosticId(self.diagnostics.len());
        self.diagnostics.push(diagnostic);
        id
    }

    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in other {
            let _ = self.add(diagnostic);
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.num_errors == 0 && self.num_warnings == 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn num_errors(&self) -> usize {
        self.num_errors
    }

    pub fn num_warnings(&self) -> usize {
        self.num_warnings
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub template: &'static Template,
    pub args: Vec<String>,
    pub at: Span,
    pub labels: Vec<(String, Span)>,
    pub notes: Vec<(String, NoteType)>,
}

impl Diagnostic {
    pub fn new(template: &'static Template, at: Span, args: Vec<String>) -> Self {
        Self { template, args, at, labels: Vec::new(), notes: Vec::new() }
    }

    pub fn with_label(mut self, at: Span, message: impl Into<String>) -> Self {
        self.labels.push((message.into(), at));
        self
    }

    pub fn with_help(mut self, message: impl Into<String>) -> Self {
        self.notes.push((message.into(), NoteType::Help));
        self
    }

    pub fn with_note(mut self, message: impl Into<String>) -> Self {
        self.notes.push((message.into(), NoteType::Note));
        self
    }

    pub fn severity(&self) -> Severity {
        self.template.severity
    }

    /// The formatted message of this diagnostic.
    pub fn message(&self) -> String {
        self.template.render(&self.args)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity(), self.template.code, self.message())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Phase {
    Syntax,
    Binding,
    Flow,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Syntax => "syntax",
            Self::Binding => "binding",
            Self::Flow => "flow",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NoteType {
    Note,
    Help,
}

#[cfg(test)]
mod tests {
    use super::{Diagnostic, Diagnostics, Phase, Severity, Template};
    use crate::source::SourceId;

    const TEST: Template = Template {
        code: "T0001",
        phase: Phase::Syntax,
        severity: Severity::Error,
        title: "test",
        format: "expected {0}, found {1}",
    };

    #[test]
    fn renders_positional_arguments() {
        assert_eq!("expected `)`, found `{`", TEST.render(&["`)`", "`{`"]));
    }

    #[test]
    fn leaves_unknown_placeholders() {
        assert_eq!("expected a, found {1}", TEST.render(&["a"]));
    }

    #[test]
    fn counts_severities() {
        let mut diagnostics = Diagnostics::new();
        let at = SourceId::fresh().span(0, 1);
        let _ = diagnostics.add(Diagnostic::new(&TEST, at, vec!["a".into(), "b".into()]));

        assert_eq!(1, diagnostics.num_errors());
        assert_eq!(0, diagnostics.num_warnings());
        assert!(!diagnostics.is_perfect());
        assert!(Diagnostics::new().is_perfect());
    }
}
