use std::sync::Arc;

use codemap::{Span, Spanned};

use crate::{
    ast::AstExpr,
    builtin::{Builtin, FunctionLibrary},
    common::Identifier,
    error::{ErrorKind, SassResult},
    value::Value,
    Options,
};

use super::scope::ScopeChain;

/// What a variable is bound to
#[derive(Debug, Clone)]
pub enum Binding {
    Value(Value),
    /// Source text that has not been parsed yet, evaluated each time the
    /// variable is read
    Source(Arc<str>),
}

/// A mixin as seen by the rule processor: its parameters with their default
/// values, and its unparsed body
#[derive(Debug, Clone)]
pub struct Mixin {
    pub params: Vec<(String, Option<AstExpr>)>,
    pub body: Arc<str>,
}

type CallableKey = (Identifier, Option<usize>);

/// The variables, functions and mixins visible at some point of a stylesheet
///
/// Entering a nested rule derives a child namespace. Assigning to a variable
/// that an enclosing namespace already defines updates it there, so the
/// enclosing rule sees the new value; new variables stay local to the child.
///
/// ```
/// # use slate_compiler::{sass_value::Value, Namespace};
/// let outer = Namespace::new();
/// outer.set_variable("$x", Value::True);
///
/// let inner = outer.derive();
/// inner.set_variable("$x", Value::False);
/// inner.set_variable("$y", Value::Null);
///
/// assert!(matches!(outer.variable("$x").unwrap(), slate_compiler::Binding::Value(Value::False)));
/// assert!(!outer.has_variable("$y"));
/// ```
#[derive(Debug, Clone)]
pub struct Namespace {
    variables: ScopeChain<Identifier, Binding>,
    functions: ScopeChain<CallableKey, Builtin>,
    mixins: ScopeChain<CallableKey, Mixin>,
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace {
    /// A namespace with the core function library
    pub fn new() -> Self {
        Self::with_library(&FunctionLibrary::core())
    }

    /// A namespace whose outermost functions are those of `library`
    pub fn with_library(library: &FunctionLibrary) -> Self {
        Self {
            variables: ScopeChain::new(),
            functions: ScopeChain::from_map(library.to_map()).new_child(),
            mixins: ScopeChain::new(),
        }
    }

    /// A namespace with the core function library and any functions
    /// registered through [`Options::add_custom_fn`]
    pub fn from_options(options: &Options) -> Self {
        let mut library = FunctionLibrary::core();
        for ((name, arity), func) in &options.custom_fns {
            library.insert(*name, *arity, func.clone());
        }

        Self::with_library(&library)
    }

    /// A child namespace for a nested context
    pub fn derive(&self) -> Self {
        Self {
            variables: self.variables.new_child(),
            functions: self.functions.new_child(),
            mixins: self.mixins.new_child(),
        }
    }

    /// A child namespace seeing the definitions of every one of `others`,
    /// earlier namespaces taking priority
    pub fn derive_from(others: &[&Namespace]) -> Self {
        Self {
            variables: ScopeChain::merged(others.iter().map(|ns| &ns.variables)),
            functions: ScopeChain::merged(others.iter().map(|ns| &ns.functions)),
            mixins: ScopeChain::merged(others.iter().map(|ns| &ns.mixins)),
        }
    }

    /// How many scopes deep this namespace is
    pub fn depth(&self) -> usize {
        self.variables.depth()
    }
}

/// Variables
impl Namespace {
    pub fn variable(&self, name: &str) -> Option<Binding> {
        self.variables.get(&Identifier::from(name))
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains(&Identifier::from(name))
    }

    pub fn set_variable(&self, name: &str, value: Value) {
        self.variables
            .insert(Identifier::from(name), Binding::Value(value));
    }

    /// Bind a variable to expression source that is evaluated when the
    /// variable is read
    pub fn set_source_variable<S: Into<Arc<str>>>(&self, name: &str, source: S) {
        self.variables
            .insert(Identifier::from(name), Binding::Source(source.into()));
    }

    pub(crate) fn get_var(&self, name: Spanned<Identifier>) -> SassResult<Binding> {
        match self.variables.get(&name.node) {
            Some(binding) => Ok(binding),
            None => Err((ErrorKind::UndefinedVariable, "Undefined variable.", name.span).into()),
        }
    }
}

/// Functions
impl Namespace {
    /// Register a function for exactly `arity` arguments, or for any number
    /// of arguments when `arity` is `None`
    pub fn set_function(&self, name: &str, arity: Option<usize>, func: Builtin) {
        self.functions.insert((Identifier::from(name), arity), func);
    }

    /// Find the function registered for exactly `arity` arguments, falling
    /// back to the one registered for any number of arguments
    pub fn function(&self, name: &str, arity: usize) -> Option<Builtin> {
        self.get_fn(Identifier::from(name), arity)
    }

    pub(crate) fn get_fn(&self, name: Identifier, arity: usize) -> Option<Builtin> {
        self.functions
            .get(&(name, Some(arity)))
            .or_else(|| self.functions.get(&(name, None)))
    }

    pub(crate) fn require_fn(
        &self,
        name: Identifier,
        arity: usize,
        span: Span,
    ) -> SassResult<Builtin> {
        self.get_fn(name, arity).ok_or_else(|| {
            (
                ErrorKind::UndefinedFunction,
                format!("Undefined function {}() with {} arguments.", name, arity),
                span,
            )
                .into()
        })
    }
}

/// Mixins
impl Namespace {
    pub fn set_mixin(&self, name: &str, arity: Option<usize>, mixin: Mixin) {
        self.mixins.insert((Identifier::from(name), arity), mixin);
    }

    pub fn mixin(&self, name: &str, arity: usize) -> Option<Mixin> {
        let name = Identifier::from(name);
        self.mixins
            .get(&(name, Some(arity)))
            .or_else(|| self.mixins.get(&(name, None)))
    }
}
