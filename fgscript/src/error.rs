use std::fmt;
use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

/// Expected argument count of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, n) = match self {
            Arity::Exactly(n) => ("", *n),
            Arity::AtLeast(n) => ("at least ", *n),
        };
        let noun = if n == 1 { "argument" } else { "arguments" };
        write!(f, "{}{} {}", prefix, n, noun)
    }
}

/// Broad category of a [`GenerateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong number of arguments for a keyword.
    Arity,
    /// Malformed argument shape: parameter lists, `for` delimiters.
    Shape,
    /// Block structure violations.
    Structural,
    /// Unrecognized leading keyword.
    Vocabulary,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Arity => write!(f, "arity error"),
            ErrorKind::Shape => write!(f, "malformed statement"),
            ErrorKind::Structural => write!(f, "structural error"),
            ErrorKind::Vocabulary => write!(f, "unknown vocabulary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    ArgumentCount {
        keyword: &'static str,
        expected: Arity,
        found: usize,
    },
    MissingExpression {
        keyword: &'static str,
    },
    ElseArguments {
        found: usize,
    },
    MalformedParameters {
        function: String,
    },
    MissingDelimiter {
        keyword: &'static str,
        delimiter: &'static str,
    },
    NestedFunction {
        name: String,
    },
    ElseWithoutIf,
    UnexpectedEnd,
    UnclosedBlocks {
        innermost: &'static str,
        open: usize,
    },
    OutsideFunction {
        keyword: String,
    },
    EmptyStatement,
    UnknownCommand(String),
}

impl GenerateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::ArgumentCount { .. }
            | GenerateError::MissingExpression { .. }
            | GenerateError::ElseArguments { .. } => ErrorKind::Arity,
            GenerateError::MalformedParameters { .. } | GenerateError::MissingDelimiter { .. } => {
                ErrorKind::Shape
            }
            GenerateError::NestedFunction { .. }
            | GenerateError::ElseWithoutIf
            | GenerateError::UnexpectedEnd
            | GenerateError::UnclosedBlocks { .. }
            | GenerateError::OutsideFunction { .. }
            | GenerateError::EmptyStatement => ErrorKind::Structural,
            GenerateError::UnknownCommand(_) => ErrorKind::Vocabulary,
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::ArgumentCount {
                keyword,
                expected,
                found,
            } => write!(f, "\"{}\" expects {} (found {})", keyword, expected, found),
            GenerateError::MissingExpression { keyword } => {
                write!(f, "\"{}\" expects expression", keyword)
            }
            GenerateError::ElseArguments { found } => {
                write!(f, "\"else\" expects 0 arguments or \"if\" (found {})", found)
            }
            GenerateError::MalformedParameters { function } => {
                write!(f, "function \"{}\" has wrong arguments format", function)
            }
            GenerateError::MissingDelimiter { keyword, delimiter } => {
                write!(f, "\"{}\" expects expression \"{}\"", keyword, delimiter)
            }
            GenerateError::NestedFunction { name } => {
                write!(f, "function \"{}\" is nestedly declared", name)
            }
            GenerateError::ElseWithoutIf => write!(f, "\"else\" must be preceded by an if"),
            GenerateError::UnexpectedEnd => write!(f, "unexpected end of statement"),
            GenerateError::UnclosedBlocks { innermost, .. } => {
                write!(f, "not closed statement: \"{}\" is missing its \"end\"", innermost)
            }
            GenerateError::OutsideFunction { keyword } => {
                write!(f, "statement \"{}\" is not allowed outside of function", keyword)
            }
            GenerateError::EmptyStatement => write!(f, "empty statement"),
            GenerateError::UnknownCommand(word) => write!(f, "unknown command \"{}\"", word),
        }
    }
}

impl std::error::Error for GenerateError {}

/// A [`GenerateError`] located in the source it was raised for.
#[derive(Debug, Clone)]
pub struct TranslateError {
    pub error: GenerateError,
    /// 1-based line number.
    pub line: usize,
    /// Byte span of the offending line.
    pub span: Range<usize>,
    pub file_id: usize,
}

impl TranslateError {
    pub fn new(error: GenerateError, line: usize, span: Range<usize>, file_id: usize) -> Self {
        TranslateError {
            error,
            line,
            span,
            file_id,
        }
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let mut notes = vec![format!("{} on line {}", self.error.kind(), self.line)];
        if let GenerateError::UnclosedBlocks { open, .. } = self.error {
            notes.push(format!("{} block(s) still open at end of input", open));
        }

        Diagnostic::error()
            .with_message(self.error.to_string())
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(notes)
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

impl std::error::Error for TranslateError {}
