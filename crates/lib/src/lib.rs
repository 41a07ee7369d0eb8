/*!
This crate evaluates the expressions found in [Sass](https://sass-lang.com/)
property values, the way a Sass compiler does while it walks a stylesheet.

Arithmetic follows Sass unit algebra, colors can be created and adjusted with
the usual builtin functions, `#{}` is interpolated, and values that are not
valid expressions fall back to plain `$variable` substitution so vendor
syntax passes through untouched.

## Use as library
```
fn main() -> Result<(), Box<slate::Error>> {
    let css = slate::evaluate("10px + 2 * 3px", &slate::Options::default())?;
    assert_eq!(css, "16px");
    Ok(())
}
```

Within a rule processor, keep one [`ExpressionCache`] for the whole
compilation and evaluate each value with a [`Calculator`] over the
[`Namespace`] in scope:

```
use slate::{Calculator, ExpressionCache, Namespace, Options};

let options = Options::default();
let cache = ExpressionCache::new();

let global = Namespace::from_options(&options);
global.set_source_variable("$base", "4px");

let block = global.derive();
block.set_source_variable("$pad", "$base * 2");

let calculator = Calculator::new(&block, &options, &cache);
assert_eq!(calculator.compile("$pad $base").unwrap(), "8px 4px");
```

## Use as binary
```bash
cargo install slate
slate --define 'base=4px' '$base * 3'
```
*/

#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::dbg_macro)]
#![deny(missing_debug_implementations)]
#![allow(
    clippy::use_self,
    clippy::missing_docs_in_private_items,
    clippy::unreachable,
    clippy::module_name_repetitions,
    renamed_and_removed_lints,
    clippy::unknown_clippy_lints,
    clippy::single_match,
    clippy::option_if_let_else,
    clippy::derive_partial_eq_without_eq,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::multiple_crate_versions,
    clippy::uninlined_format_args,
    unknown_lints,
)]

pub use slate_compiler::*;
