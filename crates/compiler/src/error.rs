use std::{
    error::Error,
    fmt::{self, Display},
};

use codemap::{Span, SpanLoc};

pub type SassResult<T> = Result<T, Box<SassError>>;

/// The broad category of an [`Error`](crate::Error)
///
/// Lexical and syntax errors are recoverable: outside of strict mode the
/// [`Calculator`](crate::Calculator) falls back to plain variable substitution
/// when it sees one. Every other kind aborts the evaluation of the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No token pattern matched the input
    Lex,
    /// A required token was absent
    Syntax,
    UndefinedVariable,
    UndefinedFunction,
    /// An operand or argument had an unsuitable type or unit
    Type,
    /// A builtin received a well-typed but meaningless argument
    Domain,
    /// Evaluation nested deeper than [`Options::max_depth`](crate::Options::max_depth)
    RecursionLimit,
}

impl ErrorKind {
    pub(crate) fn is_parse_failure(self) -> bool {
        matches!(self, Self::Lex | Self::Syntax)
    }
}

#[derive(Debug)]
pub struct SassError {
    category: ErrorKind,
    kind: SassErrorKind,
}

#[derive(Debug)]
enum SassErrorKind {
    /// A raw error with no additional metadata
    /// It contains only a `String` message and
    /// a span
    Raw(String, Span),
    ParseError {
        message: String,
        loc: SpanLoc,
        unicode: bool,
    },
}

impl SassError {
    pub fn kind(&self) -> ErrorKind {
        self.category
    }

    pub fn message(&self) -> &str {
        match &self.kind {
            SassErrorKind::Raw(message, ..) | SassErrorKind::ParseError { message, .. } => message,
        }
    }

    pub(crate) fn span(&self) -> Option<Span> {
        match &self.kind {
            SassErrorKind::Raw(_, span) => Some(*span),
            SassErrorKind::ParseError { .. } => None,
        }
    }

    /// Where in the evaluated expression this error was raised, if known
    pub fn location(&self) -> Option<&SpanLoc> {
        match &self.kind {
            SassErrorKind::ParseError { loc, .. } => Some(loc),
            SassErrorKind::Raw(..) => None,
        }
    }

    pub(crate) fn new<S: Into<String>>(category: ErrorKind, message: S, span: Span) -> Box<Self> {
        Box::new(SassError {
            category,
            kind: SassErrorKind::Raw(message.into(), span),
        })
    }

    /// Attach the resolved location of a raw error's span
    pub(crate) fn located(self: Box<Self>, loc: SpanLoc, unicode: bool) -> Box<Self> {
        match self.kind {
            SassErrorKind::Raw(message, ..) => Box::new(SassError {
                category: self.category,
                kind: SassErrorKind::ParseError {
                    message,
                    loc,
                    unicode,
                },
            }),
            SassErrorKind::ParseError { .. } => self,
        }
    }
}

impl Display for SassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (message, loc, unicode) = match &self.kind {
            SassErrorKind::ParseError {
                message,
                loc,
                unicode,
            } => (message, loc, *unicode),
            SassErrorKind::Raw(message, ..) => return write!(f, "Error: {}", message),
        };

        let first_bar = if unicode { '╷' } else { ',' };
        let second_bar = if unicode { '│' } else { '|' };
        let third_bar = if unicode { '╵' } else { '\'' };

        let line = loc.begin.line + 1;
        let col = loc.begin.column + 1;
        writeln!(f, "Error: {}", message)?;
        let padding = " ".repeat(line.to_string().len() + 1);
        writeln!(f, "{}{}", padding, first_bar)?;
        writeln!(
            f,
            "{} {} {}",
            line,
            second_bar,
            loc.file.source_line(loc.begin.line)
        )?;

        let underline_len = if loc.end.line == loc.begin.line {
            loc.end.column.saturating_sub(loc.begin.column).max(1)
        } else {
            1
        };
        writeln!(
            f,
            "{}{} {}{}",
            padding,
            second_bar,
            " ".repeat(loc.begin.column),
            "^".repeat(underline_len)
        )?;
        writeln!(f, "{}{}", padding, third_bar)?;
        writeln!(f, "  ./{}:{}:{}", loc.file.name(), line, col)?;
        Ok(())
    }
}

impl From<(&str, Span)> for Box<SassError> {
    #[inline]
    fn from(error: (&str, Span)) -> Box<SassError> {
        SassError::new(ErrorKind::Type, error.0, error.1)
    }
}

impl From<(String, Span)> for Box<SassError> {
    #[inline]
    fn from(error: (String, Span)) -> Box<SassError> {
        SassError::new(ErrorKind::Type, error.0, error.1)
    }
}

impl<S: Into<String>> From<(ErrorKind, S, Span)> for Box<SassError> {
    #[inline]
    fn from(error: (ErrorKind, S, Span)) -> Box<SassError> {
        SassError::new(error.0, error.1, error.2)
    }
}

impl Error for SassError {}
