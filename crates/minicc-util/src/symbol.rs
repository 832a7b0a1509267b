//! Symbol module - global string interning.
//!
//! Identifiers, function names, and IR symbol names appear many times per
//! compilation; interning stores each distinct string once and hands out a
//! 4-byte [`Symbol`] with O(1) equality and hashing.
//!
//! The interner is a process-wide table behind a lock-free concurrent map.
//! Interned strings are leaked: a compiler process interns a bounded set of
//! names and the table lives for the whole run.
//!
//! # Examples
//!
//! ```
//! use minicc_util::Symbol;
//!
//! let a = Symbol::intern("factorial");
//! let b = Symbol::intern("factorial");
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "factorial");
//! ```

use dashmap::DashMap;
use std::fmt;
use std::sync::{Mutex, OnceLock};

/// An interned string, represented as an index into the global table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

struct Interner {
    /// string -> index lookup
    map: DashMap<&'static str, u32>,
    /// index -> string lookup, append-only
    strings: Mutex<Vec<&'static str>>,
}

fn interner() -> &'static Interner {
    static INTERNER: OnceLock<Interner> = OnceLock::new();
    INTERNER.get_or_init(|| Interner {
        map: DashMap::new(),
        strings: Mutex::new(Vec::new()),
    })
}

impl Symbol {
    /// Intern a string, returning its symbol.
    ///
    /// Interning the same string twice returns the same symbol.
    pub fn intern(string: &str) -> Self {
        let interner = interner();
        if let Some(index) = interner.map.get(string) {
            return Symbol(*index);
        }

        let mut strings = interner.strings.lock().expect("interner poisoned");
        // Re-check under the lock so concurrent interns of the same string
        // cannot allocate two slots.
        if let Some(index) = interner.map.get(string) {
            return Symbol(*index);
        }
        let leaked: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let index = strings.len() as u32;
        strings.push(leaked);
        interner.map.insert(leaked, index);
        Symbol(index)
    }

    /// Get the string this symbol refers to.
    pub fn as_str(&self) -> &'static str {
        let strings = interner().strings.lock().expect("interner poisoned");
        strings[self.0 as usize]
    }

    /// The raw table index.
    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
