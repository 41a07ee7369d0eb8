/*!
This crate evaluates the expressions found in [Sass](https://sass-lang.com/)
property values: arithmetic with units, colors, strings, lists, function
calls, `#{}` interpolation and `$variable` references.

It does not parse stylesheets. A rule processor hands it the text of one
value at a time together with the [`Namespace`] of variables, functions and
mixins in scope, and gets back a [`sass_value::Value`] or its CSS text.

Text that is not a valid expression is not an error: outside of
[strict mode](Options::strict) its variables are substituted and it is
passed through, so vendor syntax survives unchanged.

## Use as library
```
# use slate_compiler as slate;
fn main() -> Result<(), Box<slate::Error>> {
    let css = slate::evaluate(
        "(12px / 4) * 2 + 1",
        &slate::Options::default(),
    )?;
    assert_eq!(css, "7px");

    let css = slate::evaluate("12px/1.5 darken(#fff, 10%)", &slate::Options::default())?;
    assert_eq!(css, "12px / 1.5 #e6e6e6");
    Ok(())
}
```

## Use as binary
```bash
cargo install slate
slate '1px + 2px'
```
*/

#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::dbg_macro)]
#![deny(missing_debug_implementations)]
#![allow(
    clippy::use_self,
    renamed_and_removed_lints,
    clippy::unknown_clippy_lints,
    clippy::single_match,
    clippy::new_without_default,
    clippy::single_match_else,
    clippy::multiple_crate_versions,
    clippy::wrong_self_convention,
    clippy::comparison_chain,
    clippy::unwrap_or_default,
    clippy::manual_unwrap_or_default,

    // the cache is deliberately single threaded
    clippy::arc_with_non_send_sync,

    unknown_lints,
)]

#[cfg(feature = "wasm-exports")]
use wasm_bindgen::prelude::*;

pub use crate::error::{ErrorKind, SassError as Error, SassResult as Result};
pub use crate::logger::{Logger, NullLogger, StdLogger};
pub use crate::options::{Options, OutputStyle};
pub use crate::{
    builtin::{Builtin, BuiltinFnSignature, FunctionLibrary},
    calculator::{Calculator, ExpressionCache},
    evaluate::{Binding, Mixin, Namespace, Visitor},
};

pub mod sass_value {
    pub use crate::{
        ast::ArgumentResult,
        color::{Color, ColorFormat},
        common::{BinaryOp, ListSeparator, QuoteKind, UnaryOp},
        unit::Unit,
        value::{Number, SassNumber, Value},
    };
}

pub mod sass_ast {
    pub use crate::ast::*;
}

pub use codemap;

mod ast;
mod builtin;
mod calculator;
mod color;
mod common;
mod error;
mod evaluate;
mod interner;
mod lexer;
mod logger;
mod options;
mod parse;
mod serializer;
mod unit;
mod utils;
mod value;

/// Evaluate a single expression and render it as CSS
///
/// Functions registered with [`Options::add_custom_fn`] are available; no
/// variables are defined.
///
/// ```
/// # use slate_compiler as slate;
/// fn main() -> Result<(), Box<slate::Error>> {
///     let css = slate::evaluate("rgba(#abc, 0.5)", &slate::Options::default())?;
///     assert_eq!(css, "rgba(170, 187, 204, 0.5)");
///     Ok(())
/// }
/// ```
#[inline]
pub fn evaluate(expression: &str, options: &Options) -> Result<String> {
    let namespace = Namespace::from_options(options);
    let cache = ExpressionCache::new();

    Calculator::new(&namespace, options, &cache).compile(expression)
}

#[cfg(feature = "wasm-exports")]
#[wasm_bindgen(js_name = evaluate)]
pub fn evaluate_js(expression: String) -> std::result::Result<String, String> {
    evaluate(&expression, &Options::default()).map_err(|e| e.to_string())
}
