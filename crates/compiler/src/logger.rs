use codemap::SpanLoc;
use std::fmt::Debug;

/// Sink for diagnostics raised while evaluating expressions
pub trait Logger: Debug {
    /// Logs low-priority information, such as an expression that failed to
    /// parse and was substituted textually instead
    fn debug(&self, location: SpanLoc, message: &str);

    /// Logs a warning, such as a call to a function nobody registered
    fn warning(&self, location: SpanLoc, message: &str);
}

/// Logs events to standard error
#[derive(Debug)]
pub struct StdLogger;

impl Logger for StdLogger {
    #[inline]
    fn debug(&self, location: SpanLoc, message: &str) {
        eprintln!(
            "{}:{} DEBUG: {}",
            location.file.name(),
            location.begin.column + 1,
            message
        );
    }

    #[inline]
    fn warning(&self, location: SpanLoc, message: &str) {
        eprintln!("{}", warning_text(&location, message));
    }
}

fn warning_text(location: &SpanLoc, message: &str) -> String {
    format!(
        "Warning: {}\n    ./{}:{}:{}",
        message,
        location.file.name(),
        location.begin.line + 1,
        location.begin.column + 1
    )
}

/// Discards all log events
#[derive(Debug)]
pub struct NullLogger;

impl Logger for NullLogger {
    #[inline]
    fn debug(&self, _location: SpanLoc, _message: &str) {}

    #[inline]
    fn warning(&self, _location: SpanLoc, _message: &str) {}
}

#[cfg(test)]
mod test {
    use codemap::CodeMap;

    use super::*;

    #[test]
    fn warnings_point_at_file_line_and_column() {
        let mut map = CodeMap::new();
        let file = map.add_file("expression".to_owned(), "1px foo(2)".to_owned());
        let location = map.look_up_span(file.span.subspan(4, 10));

        assert_eq!(
            warning_text(&location, "Unknown function foo(), emitting it as plain CSS."),
            "Warning: Unknown function foo(), emitting it as plain CSS.\n    ./expression:1:5"
        );
    }
}
