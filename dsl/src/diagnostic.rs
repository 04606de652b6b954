//! Provides definition for diagnostics, which are normally errors and warnings
//! associated with compilation.
//!
//! There exist crates that make this easy, but we need different information
//! for different integrations and there is no one crate that does it all
//! (especially one that works for both command line and language server
//! protocol).

use ferroplc_problems::Problem;

use crate::core::{FileId, Id, SourceSpan};

/// A label that refers to some range in a file and possibly associated
/// with a message related to that range.
///
/// Normally this indicates the location of an error along with a
/// text message describing that position.
#[derive(Debug)]
pub struct Label {
    /// Byte offset from start of the file (0-indexed).
    pub start: usize,
    /// Byte offset of the end of the range (0-indexed).
    pub end: usize,

    /// Identifier for the file.
    pub file_id: FileId,

    /// A message describing this label.
    pub message: String,
}

impl Label {
    /// Creates a label from the source span of a language element.
    pub fn span(span: SourceSpan, message: impl Into<String>) -> Self {
        Self {
            start: span.start,
            end: span.end,
            file_id: span.file_id,
            message: message.into(),
        }
    }

    /// A "position" that refers to a file in its entirety rather than a
    /// particular range.
    pub fn file(file_id: impl Into<FileId>, message: impl Into<String>) -> Self {
        Self {
            start: 0,
            end: 0,
            file_id: file_id.into(),
            message: message.into(),
        }
    }
}

/// A diagnostic. Diagnostics have a code that is indicative of the category,
/// a primary location and possibly non-zero set of secondary locations.
#[derive(Debug)]
pub struct Diagnostic {
    /// A normally unique value describing the type of diagnostic.
    pub code: String,

    description: String,

    /// The primary or first diagnostic.
    pub primary: Label,

    /// Additional descriptions beyond the constant description.
    pub described: Vec<String>,

    /// Additional information about the diagnostic.
    pub secondary: Vec<Label>,
}

impl Diagnostic {
    /// Creates a diagnostic from the problem code and with the specified label.
    ///
    /// The label associates the problem to a particular instance in IEC 61131-3
    /// source.
    pub fn problem(problem: Problem, primary: Label) -> Self {
        Self {
            code: problem.code().to_string(),
            description: problem.message().to_string(),
            primary,
            described: vec![],
            secondary: vec![],
        }
    }

    /// Adds to the problem description (primary text) additional context
    /// about the problem.
    ///
    /// This is similar to adding primary and secondary items except that this
    /// forms part of the main description and does not need to be related to
    /// a position in a source file.
    pub fn with_context(mut self, description: &str, item: &str) -> Self {
        self.described.push(format!("{}={}", description, item));
        self
    }

    /// Adds to the problem description (primary text) additional context
    /// identified by an IEC 61131-3 identifier.
    pub fn with_context_id(mut self, description: &str, item: &Id) -> Self {
        self.described.push(format!("{}={}", description, item));
        self
    }

    pub fn with_secondary(mut self, label: Label) -> Self {
        self.secondary.push(label);
        self
    }

    /// Returns the description for the diagnostic. This may add in other
    /// data in addition that is part of the diagnostic.
    pub fn description(&self) -> String {
        if self.described.is_empty() {
            self.description.clone()
        } else {
            format!("{} ({})", self.description, self.described.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_when_no_context_then_constant_message() {
        let diagnostic = Diagnostic::problem(
            Problem::EnParamRedeclared,
            Label::span(SourceSpan::default(), "Explicit declaration"),
        );
        assert_eq!(diagnostic.code, "P0001");
        assert_eq!(
            diagnostic.description(),
            Problem::EnParamRedeclared.message()
        );
    }

    #[test]
    fn with_secondary_when_added_then_kept_in_order() {
        let diagnostic = Diagnostic::problem(
            Problem::EnParamRedeclared,
            Label::span(SourceSpan::default(), "Explicit declaration"),
        )
        .with_secondary(Label::file(FileId::builtin(), "Implicit declaration"));
        assert_eq!(diagnostic.secondary.len(), 1);
        assert_eq!(diagnostic.secondary[0].message, "Implicit declaration");
        assert!(diagnostic.secondary[0].file_id.is_builtin());
    }

    #[test]
    fn description_when_context_then_appends_context() {
        let diagnostic = Diagnostic::problem(
            Problem::EnoParamRedeclared,
            Label::span(SourceSpan::default(), "Explicit declaration"),
        )
        .with_context_id("callable", &Id::from("Counter"));
        assert_eq!(
            diagnostic.description(),
            format!("{} (callable=Counter)", Problem::EnoParamRedeclared.message())
        );
    }
}
