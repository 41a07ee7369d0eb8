pub use env::{Binding, Mixin, Namespace};
pub use visitor::Visitor;

mod bin_op;
mod env;
mod scope;
mod visitor;
