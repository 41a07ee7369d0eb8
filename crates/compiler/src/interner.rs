use std::fmt::{self, Display};

use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;

static STRINGS: Lazy<ThreadedRodeo<Spur>> = Lazy::new(ThreadedRodeo::default);

/// A cheaply copyable handle to a string stored for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    pub fn get_or_intern<T: AsRef<str>>(s: T) -> Self {
        Self(STRINGS.get_or_intern(s))
    }

    pub fn resolve_ref(self) -> &'static str {
        STRINGS.resolve(&self.0)
    }
}

impl Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resolve_ref())
    }
}
