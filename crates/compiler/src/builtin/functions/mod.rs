// A reference to the visitor is only necessary for some functions
#![allow(unused_variables)]

use std::{
    collections::BTreeMap,
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

use once_cell::sync::Lazy;

use crate::{ast::ArgumentResult, common::Identifier, error::SassResult, evaluate::Visitor, value::Value};

pub mod color;
pub mod list;
pub mod math;
pub mod meta;
pub mod string;

/// The signature every builtin function body has
pub type BuiltinFnSignature = fn(ArgumentResult, &mut Visitor) -> SassResult<Value>;

/// Functions are looked up by name and exact arity, where an arity of `None`
/// accepts any number of arguments
pub(crate) type FunctionKey = (Identifier, Option<usize>);

static FUNCTION_COUNT: AtomicUsize = AtomicUsize::new(0);

/// A function callable from expressions
///
/// Two builtins are equal only if they were created by the same call to
/// [`Builtin::new`].
#[derive(Clone)]
pub struct Builtin(BuiltinFnSignature, usize);

impl Builtin {
    pub fn new(body: BuiltinFnSignature) -> Builtin {
        let count = FUNCTION_COUNT.fetch_add(1, Ordering::Relaxed);
        Self(body, count)
    }

    pub(crate) fn call(&self, args: ArgumentResult, visitor: &mut Visitor) -> SassResult<Value> {
        (self.0)(args, visitor)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Builtin").field(&self.1).finish()
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl Eq for Builtin {}

/// A set of functions keyed by name and arity
///
/// [`FunctionLibrary::core`] holds every builtin; a [`Namespace`](crate::Namespace)
/// is seeded from a library, which sits beneath all of its scopes.
#[derive(Debug, Clone, Default)]
pub struct FunctionLibrary {
    functions: BTreeMap<FunctionKey, Builtin>,
}

static CORE_LIBRARY: Lazy<FunctionLibrary> = Lazy::new(|| {
    let mut f = FunctionLibrary::new();
    color::declare(&mut f);
    list::declare(&mut f);
    math::declare(&mut f);
    meta::declare(&mut f);
    string::declare(&mut f);
    f
});

impl FunctionLibrary {
    /// An empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the builtin function library
    pub fn core() -> Self {
        CORE_LIBRARY.clone()
    }

    /// Add `func` under `name`, replacing whatever was registered for the
    /// same name and arity
    pub fn register(&mut self, name: &str, arity: Option<usize>, func: Builtin) {
        self.insert(Identifier::from(name), arity, func);
    }

    /// The function registered for exactly `arity` arguments, or else the
    /// one registered for any number of arguments
    pub fn get(&self, name: &str, arity: usize) -> Option<&Builtin> {
        let name = Identifier::from(name);
        self.functions
            .get(&(name, Some(arity)))
            .or_else(|| self.functions.get(&(name, None)))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub(crate) fn insert(&mut self, name: Identifier, arity: Option<usize>, func: Builtin) {
        self.functions.insert((name, arity), func);
    }

    pub(crate) fn to_map(&self) -> BTreeMap<FunctionKey, Builtin> {
        self.functions.clone()
    }

    /// Register `body` under every one of `names`, sharing one [`Builtin`]
    fn declare(&mut self, names: &[&str], arity: Option<usize>, body: BuiltinFnSignature) {
        let func = Builtin::new(body);
        for name in names {
            self.insert(Identifier::from(*name), arity, func.clone());
        }
    }
}
