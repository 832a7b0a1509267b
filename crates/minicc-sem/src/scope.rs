//! Local scope stack.
//!
//! One frame per function body, branch arm, or loop body. Declaring a name
//! twice in the same frame is refused; shadowing an outer frame is fine.
//! Lookup walks from the innermost frame outward; a miss here falls through
//! to the global table in the analyzer.

use minicc_ir::InstId;
use minicc_par::Ty;
use minicc_util::Symbol;
use rustc_hash::FxHashMap;

/// A resolved local variable: its stack slot and declared type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalSlot {
    pub slot: InstId,
    pub ty: Ty,
}

/// A stack of scope frames.
#[derive(Default)]
pub struct ScopeStack {
    frames: Vec<FxHashMap<Symbol, LocalSlot>>,
}

impl ScopeStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a new innermost frame.
    pub fn push_frame(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    /// Leave the innermost frame.
    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    /// The number of live frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Record a declaration in the innermost frame.
    ///
    /// Returns false if the name is already declared in that frame.
    pub fn declare(&mut self, name: Symbol, local: LocalSlot) -> bool {
        match self.frames.last_mut() {
            Some(frame) => {
                if frame.contains_key(&name) {
                    return false;
                }
                frame.insert(name, local);
                true
            }
            None => false,
        }
    }

    /// Resolve a name against the live frames, innermost first.
    pub fn lookup(&self, name: Symbol) -> Option<LocalSlot> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(&name).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(n: u32) -> LocalSlot {
        LocalSlot {
            slot: InstId(n),
            ty: Ty::Int,
        }
    }

    #[test]
    fn test_declare_and_lookup() {
        let mut scopes = ScopeStack::new();
        scopes.push_frame();
        let x = Symbol::intern("x");
        assert!(scopes.declare(x, slot(0)));
        assert_eq!(scopes.lookup(x), Some(slot(0)));
    }

    #[test]
    fn test_same_frame_redefinition_refused() {
        let mut scopes = ScopeStack::new();
        scopes.push_frame();
        let x = Symbol::intern("x");
        assert!(scopes.declare(x, slot(0)));
        assert!(!scopes.declare(x, slot(1)));
        // The original declaration wins
        assert_eq!(scopes.lookup(x), Some(slot(0)));
    }

    #[test]
    fn test_shadowing_resolves_innermost() {
        let mut scopes = ScopeStack::new();
        let x = Symbol::intern("x");
        scopes.push_frame();
        scopes.declare(x, slot(0));
        scopes.push_frame();
        assert!(scopes.declare(x, slot(1)));
        assert_eq!(scopes.lookup(x), Some(slot(1)));
        scopes.pop_frame();
        assert_eq!(scopes.lookup(x), Some(slot(0)));
    }

    #[test]
    fn test_miss_is_none() {
        let mut scopes = ScopeStack::new();
        scopes.push_frame();
        assert_eq!(scopes.lookup(Symbol::intern("ghost")), None);
    }

    #[test]
    fn test_popped_frame_is_gone() {
        let mut scopes = ScopeStack::new();
        let y = Symbol::intern("y");
        scopes.push_frame();
        scopes.push_frame();
        scopes.declare(y, slot(2));
        scopes.pop_frame();
        assert_eq!(scopes.lookup(y), None);
    }
}
