use std::collections::{BTreeMap, HashMap};
use std::env;
use std::hash::BuildHasher;

/// Source of environment variable values
///
/// Absence is a normal outcome, never an error.
pub trait Lookup {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Reads the process environment
///
/// A variable whose value is not valid unicode is treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Lookup for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl<S: BuildHasher> Lookup for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<L: Lookup + ?Sized> Lookup for &L {
    fn lookup(&self, name: &str) -> Option<String> {
        (**self).lookup(name)
    }
}

/// Adapts a closure into a [`Lookup`]
#[derive(Debug, Clone, Copy)]
pub struct FnLookup<F>(F);

impl<F> Lookup for FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }
}

/// Builds a [`Lookup`] from a closure
///
/// # Example
/// ```rust
/// use envbind::{Lookup, lookup_fn};
///
/// let env = lookup_fn(|name| (name == "PORT").then(|| "80".to_string()));
/// assert_eq!(env.lookup("PORT").as_deref(), Some("80"));
/// assert_eq!(env.lookup("HOST"), None);
/// ```
pub fn lookup_fn<F>(f: F) -> FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    FnLookup(f)
}
