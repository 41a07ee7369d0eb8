pub use args::*;
pub use expr::*;

mod args;
mod expr;
