//! Variable binding frames.
//!
//! A frame is an ordered list of bindings plus an optional parent link.
//! Frames form a tree rooted at the global frame: a child's parent is fixed
//! at creation, so there is never a cycle.

use std::sync::{Arc, RwLock};

use crate::intern::{InternedSymbol, well_known};
use crate::language::{AtomType, Value};

struct Frame {
    bindings: Vec<(InternedSymbol, Value)>,
    parent: Option<Environment>,
}

/// A chain of binding frames.
///
/// Cheap to clone (an `Arc` increment). Writes to a frame are serialized
/// behind the lock, which is the discipline any concurrent driver would
/// need; the language itself only ever mutates from a single thread.
#[derive(Clone)]
pub struct Environment {
    state: Arc<RwLock<Frame>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a global frame with no parent.
    pub fn new() -> Self {
        Environment {
            state: Arc::new(RwLock::new(Frame {
                bindings: Vec::new(),
                parent: None,
            })),
        }
    }

    /// Create an empty call frame whose parent is this environment.
    pub fn child(&self) -> Self {
        Environment {
            state: Arc::new(RwLock::new(Frame {
                bindings: Vec::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Add a binding to this frame.
    ///
    /// The newest entry shadows any older entry with the same name; older
    /// entries stay in the frame, unreachable but never removed.
    pub fn bind(&self, name: InternedSymbol, value: Value) {
        let mut state = self.state.write().unwrap();
        state.bindings.push((name, value));
    }

    /// Resolve a symbol, scanning this frame newest-first and then walking
    /// the parent chain.
    ///
    /// Lookup never fails: an unbound symbol evaluates to itself, except
    /// the literal name `nil`, which resolves to the nil constant. That
    /// exception is how `nil` behaves as an always-available constant
    /// without being a reserved binding.
    pub fn lookup(&self, name: InternedSymbol) -> Value {
        let mut current = Some(self.clone());
        while let Some(env) = current {
            let state = env.state.read().unwrap();
            for (bound, value) in state.bindings.iter().rev() {
                if *bound == name {
                    return value.clone();
                }
            }
            current = state.parent.clone();
        }

        if name == *well_known::NIL {
            Value::Nil
        } else {
            Value::Atom(AtomType::Symbol(name))
        }
    }

    #[cfg(test)]
    fn binding_count(&self) -> usize {
        self.state.read().unwrap().bindings.len()
    }
}
