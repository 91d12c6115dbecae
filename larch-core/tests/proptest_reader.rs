use larch::language::{Value, cons, number, string, symbol};
use larch::{print, read};
use proptest::prelude::*;

// ============================================================================
// Strategies for Generating Values
// ============================================================================

/// Finite floats print in shortest round-trip form, so they read back to
/// the same value.
fn number_atom() -> impl Strategy<Value = Value> {
    any::<f64>()
        .prop_filter("must be finite", |f| f.is_finite())
        .prop_map(number)
}

fn symbol_atom() -> impl Strategy<Value = Value> {
    "[a-z][a-z0-9?*-]{0,8}".prop_map(|s| symbol(&s))
}

/// No embedded double quote: the printer does not escape.
fn string_atom() -> impl Strategy<Value = Value> {
    "[a-zA-Z0-9 _.,!()-]{0,12}".prop_map(|s| string(s))
}

/// Dotted-pair-free values: atoms, nil, and proper lists thereof.
fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        number_atom(),
        symbol_atom(),
        string_atom(),
        Just(Value::Nil),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop::collection::vec(inner, 0..8).prop_map(|elements| {
            elements
                .into_iter()
                .rev()
                .fold(Value::Nil, |acc, val| cons(val, acc))
        })
    })
}

// ============================================================================
// Round-Trip Properties
// ============================================================================

proptest! {
    #[test]
    fn read_print_round_trip(value in value()) {
        let printed = print(&value);
        prop_assert_eq!(read(&printed), value);
    }

    #[test]
    fn print_is_stable_under_reread(value in value()) {
        let printed = print(&value);
        prop_assert_eq!(print(&read(&printed)), printed);
    }
}
