use std::mem;

use codemap::{Span, Spanned};
use indexmap::IndexMap;

use crate::{
    common::Identifier,
    error::{ErrorKind, SassResult},
    value::Value,
};

use super::AstExpr;

/// One argument as written in a call
#[derive(Debug, Clone)]
pub struct CallArg {
    /// The `$name` of a named argument, as written
    pub name: Option<String>,
    pub value: AstExpr,
}

#[derive(Debug, Clone)]
pub struct ArgumentInvocation {
    pub(crate) args: Vec<CallArg>,
    pub(crate) span: Span,
}

impl ArgumentInvocation {
    pub fn empty(span: Span) -> Self {
        Self {
            args: Vec::new(),
            span,
        }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Function arguments that have been evaluated
///
/// Arguments may be passed either positionally or by name. Named arguments
/// keep the order they were written in.
#[derive(Debug, Clone)]
pub struct ArgumentResult {
    pub(crate) positional: Vec<Value>,
    pub(crate) named: IndexMap<Identifier, Value>,
    pub(crate) span: Span,
}

impl ArgumentResult {
    pub fn new(positional: Vec<Value>, named: IndexMap<Identifier, Value>, span: Span) -> Self {
        Self {
            positional,
            named,
            span,
        }
    }

    /// Get argument by name
    ///
    /// Removes the argument
    pub fn get_named<T: Into<Identifier>>(&mut self, val: T) -> Option<Spanned<Value>> {
        self.named.shift_remove(&val.into()).map(|n| Spanned {
            node: n,
            span: self.span,
        })
    }

    /// Get a positional argument by 0-indexed position
    ///
    /// Replaces argument with [`Value::Null`] gravestone
    pub fn get_positional(&mut self, idx: usize) -> Option<Spanned<Value>> {
        self.positional.get_mut(idx).map(|v| Spanned {
            node: mem::replace(v, Value::Null),
            span: self.span,
        })
    }

    /// Get an argument by either name or position
    ///
    /// If the named argument does not exist, then the position is checked. Like
    /// [`ArgumentResult::get_named`] and [`ArgumentResult::get_positional`], this
    /// function removes the argument or replaces it with a gravestone
    pub fn get<T: Into<Identifier>>(&mut self, position: usize, name: T) -> Option<Spanned<Value>> {
        match self.get_named(name) {
            Some(v) => Some(v),
            None => self.get_positional(position),
        }
    }

    /// Like [`ArgumentResult::get`], but returns a result if the argument doesn't exist
    pub fn get_err(&mut self, position: usize, name: &str) -> SassResult<Value> {
        match self.get(position, name) {
            Some(v) => Ok(v.node),
            None => Err((
                ErrorKind::Type,
                format!("Missing argument ${}.", name),
                self.span(),
            )
                .into()),
        }
    }

    /// Get an argument by name or position. If the argument does not exist, use
    /// the default value provided
    pub fn default_arg(&mut self, position: usize, name: &'static str, default: Value) -> Value {
        match self.get(position, name) {
            Some(val) => val.node,
            None => default,
        }
    }

    pub const fn span(&self) -> Span {
        self.span
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assert that this function has at most `max` number of args
    pub fn max_args(&self, max: usize) -> SassResult<()> {
        let len = self.len();
        if len > max {
            return Err((
                format!(
                    "Only {max} argument{} allowed, but {len} {} passed.",
                    if max == 1 { "" } else { "s" },
                    if len == 1 { "was" } else { "were" },
                ),
                self.span(),
            )
                .into());
        }
        Ok(())
    }

    /// The positional arguments that have not been taken yet, rejecting any
    /// named argument
    pub(crate) fn get_variadic(self) -> SassResult<Vec<Value>> {
        if let Some((name, _)) = self.named.iter().next() {
            return Err((format!("No argument named ${}.", name), self.span).into());
        }

        Ok(self.positional)
    }

    /// Named arguments in the order they were written
    pub(crate) fn take_named(&mut self) -> IndexMap<Identifier, Value> {
        mem::take(&mut self.named)
    }
}
