use std::collections::BTreeMap;

use crate::{builtin::Builtin, common::Identifier, Logger, StdLogger};

/// Configuration for expression evaluation
///
/// The simplest usage is `slate::Options::default()`; however, a builder pattern
/// is also exposed to offer more control.
#[derive(Debug)]
pub struct Options<'a> {
    pub(crate) logger: &'a dyn Logger,
    pub(crate) style: OutputStyle,
    pub(crate) unicode_error_messages: bool,
    pub(crate) quiet: bool,
    pub(crate) verbose: bool,
    pub(crate) strict: bool,
    pub(crate) max_depth: usize,
    pub(crate) custom_fns: BTreeMap<(Identifier, Option<usize>), Builtin>,
}

impl Default for Options<'_> {
    #[inline]
    fn default() -> Self {
        Self {
            logger: &StdLogger,
            style: OutputStyle::Expanded,
            unicode_error_messages: true,
            quiet: false,
            verbose: false,
            strict: false,
            max_depth: 64,
            custom_fns: BTreeMap::new(),
        }
    }
}

impl<'a> Options<'a> {
    /// This option allows you to define how log events should be handled
    ///
    /// Be default, [`StdLogger`] is used, which writes all events to standard error.
    #[must_use]
    #[inline]
    pub fn logger(mut self, logger: &'a dyn Logger) -> Self {
        self.logger = logger;
        self
    }

    /// `slate` currently offers 2 different output styles
    ///
    ///  - [`OutputStyle::Expanded`] renders values the way they are usually
    ///    written by hand, e.g. `1px, 0.5em` or `rgba(0, 0, 0, 0.5)`.
    ///  - [`OutputStyle::Compressed`] removes as many characters as possible,
    ///    e.g. `1px,.5em` or `rgba(0,0,0,0.5)`, and picks the shortest
    ///    spelling of each color.
    ///
    /// By default, output is expanded.
    #[must_use]
    #[inline]
    pub const fn style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// This flag tells `slate` not to emit any warnings. By default, a warning
    /// is emitted whenever an expression calls a function that is neither
    /// registered nor a known CSS function.
    ///
    /// Setting this option to `true` will stop all logs from reaching the [`crate::Logger`].
    ///
    /// By default, this value is `false` and warnings are emitted.
    #[must_use]
    #[inline]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Report every fallback from a failed parse to textual variable
    /// substitution through [`Logger::debug`].
    ///
    /// By default, this value is `false`.
    #[must_use]
    #[inline]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// In strict mode, an expression that fails to parse is an error instead
    /// of being passed through with its `$variables` substituted.
    ///
    /// By default, this value is `false`.
    #[must_use]
    #[inline]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The deepest that variables holding unparsed source may refer to one
    /// another before evaluation gives up.
    ///
    /// By default, this value is `64`.
    #[must_use]
    #[inline]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// This flag tells `slate` whether to use unicode box-drawing characters
    /// when rendering the source excerpt of an error.
    ///
    /// By default, this value is `true`.
    #[must_use]
    #[inline]
    pub const fn unicode_error_messages(mut self, unicode_error_messages: bool) -> Self {
        self.unicode_error_messages = unicode_error_messages;
        self
    }

    /// Register a function on top of the core library for every
    /// [`Namespace`](crate::Namespace) created with
    /// [`Namespace::from_options`](crate::Namespace::from_options).
    ///
    /// Passing `None` as the arity registers the function for any number of
    /// arguments; an exact arity always takes precedence over it.
    #[must_use]
    #[inline]
    #[cfg(feature = "custom-builtin-fns")]
    pub fn add_custom_fn<S: Into<String>>(
        mut self,
        name: S,
        arity: Option<usize>,
        func: Builtin,
    ) -> Self {
        self.custom_fns
            .insert((Identifier::from(name.into()), arity), func);
        self
    }

    pub(crate) fn is_compressed(&self) -> bool {
        matches!(self.style, OutputStyle::Compressed)
    }
}

/// How rendered values are spelled
///
/// See [`Options::style`] for a description of each variant.
#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputStyle {
    Expanded,
    Compressed,
}
