use std::cell::RefCell;

use slate::Logger;
use slate_compiler::codemap::SpanLoc;

#[macro_export]
macro_rules! test {
    (@base $( #[$attr:meta] ),*$func:ident, $input:expr, $output:expr, $options:expr) => {
        $(#[$attr])*
        #[test]
        #[allow(non_snake_case)]
        fn $func() {
            let css = slate::evaluate($input, &$options)
                .expect(concat!("failed to evaluate ", $input));
            assert_eq!(
                String::from($output),
                css
            );
        }
    };
    ($( #[$attr:meta] ),*$func:ident, $input:expr, $output:expr, $options:expr) => {
        test!(@base $(#[$attr])* $func, $input, $output, $options);
    };
    ($( #[$attr:meta] ),*$func:ident, $input:expr, $output:expr) => {
        test!(@base $(#[$attr])* $func, $input, $output, slate::Options::default());
    };
}

/// Verify the error *message*
/// Span information is not yet tested
#[macro_export]
macro_rules! error {
    (@base $( #[$attr:meta] ),*$func:ident, $input:expr, $err:expr, $options:expr) => {
        $(#[$attr])*
        #[test]
        #[allow(non_snake_case)]
        fn $func() {
            match slate::evaluate($input, &$options) {
                Ok(css) => panic!("did not fail, got {:?}", css),
                Err(e) => assert_eq!($err, e.to_string()
                                                .chars()
                                                .take_while(|c| *c != '\n')
                                                .collect::<String>()
                                                .as_str()
                ),
            }
        }
    };
    ($( #[$attr:meta] ),*$func:ident, $input:expr, $err:expr) => {
        error!(@base $(#[$attr])* $func, $input, $err, slate::Options::default());
    };
    ($( #[$attr:meta] ),*$func:ident, $input:expr, $err:expr, $options:expr) => {
        error!(@base $(#[$attr])* $func, $input, $err, $options);
    };
}

#[macro_export]
macro_rules! assert_err {
    ($err:literal, $result:expr) => {
        match $result {
            Ok(..) => panic!("did not fail"),
            Err(e) => assert_eq!(
                $err,
                e.to_string()
                    .chars()
                    .take_while(|c| *c != '\n')
                    .collect::<String>()
                    .as_str()
            ),
        }
    };
}

#[derive(Debug, Default)]
struct TestLoggerState {
    debug_messages: Vec<String>,
    warning_messages: Vec<String>,
}

#[derive(Debug, Default)]
pub struct TestLogger(RefCell<TestLoggerState>);

#[allow(unused)]
impl TestLogger {
    pub fn debug_messages(&self) -> Vec<String> {
        self.0.borrow().debug_messages.clone()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.0.borrow().warning_messages.clone()
    }
}

impl Logger for TestLogger {
    fn debug(&self, _location: SpanLoc, message: &str) {
        self.0.borrow_mut().debug_messages.push(message.into());
    }

    fn warning(&self, _location: SpanLoc, message: &str) {
        self.0.borrow_mut().warning_messages.push(message.into());
    }
}
