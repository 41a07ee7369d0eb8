mod functions;

pub use functions::{Builtin, BuiltinFnSignature, FunctionLibrary};

/// Imports common to all builtin fns
mod builtin_imports {
    pub(crate) use std::{cmp::Ordering, sync::Arc};

    pub(crate) use codemap::Span;

    #[cfg(feature = "random")]
    pub(crate) use rand::{thread_rng, Rng};

    pub(crate) use super::functions::FunctionLibrary;

    pub(crate) use crate::{
        ast::ArgumentResult,
        color::{Color, ColorFormat},
        common::{BinaryOp, Identifier, ListSeparator, QuoteKind},
        error::{ErrorKind, SassResult},
        evaluate::Visitor,
        unit::Unit,
        value::{Number, SassNumber, Value},
    };
}
