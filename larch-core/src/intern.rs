use once_cell::sync::Lazy;
use std::fmt;
use std::sync::RwLock;
use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

static INTERNER: Lazy<RwLock<StringInterner<DefaultBackend>>> =
    Lazy::new(|| RwLock::new(StringInterner::default()));

/// A symbol interned in the process-wide string interner.
///
/// Copyable handle; equality is interner-key equality, so two symbols with
/// the same text always compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternedSymbol(DefaultSymbol);

impl InternedSymbol {
    /// Intern a string and return its symbol handle.
    pub fn new(s: &str) -> Self {
        let mut interner = INTERNER.write().unwrap();
        InternedSymbol(interner.get_or_intern(s))
    }

    /// Resolve the symbol back to an owned String.
    pub fn resolve(&self) -> String {
        self.with_str(str::to_string)
    }

    /// Run a function over the symbol's text without allocating.
    pub fn with_str<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        let interner = INTERNER.read().unwrap();
        let s = interner
            .resolve(self.0)
            .expect("interned symbol should always resolve");
        f(s)
    }
}

impl fmt::Display for InternedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| write!(f, "{s}"))
    }
}

/// Symbols the evaluator compares against on every call.
pub mod well_known {
    use super::InternedSymbol;
    use once_cell::sync::Lazy;

    /// The name that resolves to the nil constant when unbound.
    pub static NIL: Lazy<InternedSymbol> = Lazy::new(|| InternedSymbol::new("nil"));
    /// The canonical truth symbol.
    pub static T: Lazy<InternedSymbol> = Lazy::new(|| InternedSymbol::new("t"));
    /// Head symbol of a lambda literal.
    pub static LAMBDA: Lazy<InternedSymbol> = Lazy::new(|| InternedSymbol::new("lambda"));
    /// Always-true test position in `cond`.
    pub static ELSE: Lazy<InternedSymbol> = Lazy::new(|| InternedSymbol::new("else"));
    /// Head symbol produced by the reader's `'` desugaring.
    pub static QUOTE: Lazy<InternedSymbol> = Lazy::new(|| InternedSymbol::new("quote"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_same_string_returns_same_symbol() {
        let sym1 = InternedSymbol::new("foo");
        let sym2 = InternedSymbol::new("foo");
        assert_eq!(sym1, sym2);
    }

    #[test]
    fn test_intern_different_strings_returns_different_symbols() {
        let sym1 = InternedSymbol::new("foo");
        let sym2 = InternedSymbol::new("bar");
        assert_ne!(sym1, sym2);
    }

    #[test]
    fn test_resolve_returns_original_string() {
        let sym = InternedSymbol::new("hello");
        assert_eq!(sym.resolve(), "hello");
    }

    #[test]
    fn test_well_known_symbols_match_plain_interning() {
        assert_eq!(*well_known::NIL, InternedSymbol::new("nil"));
        assert_eq!(*well_known::LAMBDA, InternedSymbol::new("lambda"));
    }

    #[test]
    fn test_display() {
        let sym = InternedSymbol::new("display-test");
        assert_eq!(format!("{sym}"), "display-test");
    }
}
