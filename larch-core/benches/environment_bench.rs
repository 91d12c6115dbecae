use std::time::{Duration, Instant};

use larch::environment::Environment;
use larch::intern::InternedSymbol;
use larch::language::number;

fn bench_bind(n: usize) -> Duration {
    let start = Instant::now();

    let env = Environment::new();
    for i in 0..n {
        env.bind(InternedSymbol::new(&format!("var{i}")), number(i as f64));
    }

    start.elapsed()
}

fn bench_lookup_through_depth(depth: usize, lookups: usize) -> Duration {
    let root = Environment::new();
    let needle = InternedSymbol::new("needle");
    root.bind(needle, number(42.0));

    let mut env = root;
    for _ in 0..depth {
        env = env.child();
    }

    let start = Instant::now();
    for _ in 0..lookups {
        let _ = env.lookup(needle);
    }
    start.elapsed()
}

fn main() {
    println!("Environment bind/lookup benchmark");
    println!("=================================\n");

    for size in [10, 100, 1000, 10000] {
        let duration = bench_bind(size);
        let per_op = duration.as_nanos() / size as u128;
        println!("{size:5} bindings: {duration:?} ({per_op} ns/op)");
    }

    println!();

    let lookups = 10_000;
    for depth in [1, 8, 64] {
        let duration = bench_lookup_through_depth(depth, lookups);
        let per_op = duration.as_nanos() / lookups as u128;
        println!("depth {depth:3}: {lookups} lookups in {duration:?} ({per_op} ns/op)");
    }
}
