//! Rule databases and goal builders shared by tests, benches and examples.
use jdformal::prelude::*;

use crate::rules::{Rule, RuleDatabase};

/// The unary family `P/1`.
pub fn nat_family() -> JudgmentFamily {
    JudgmentFamily::new("P", 1)
}

/// `P(t)`.
pub fn nat_judgment(t: Term) -> Judgment {
    Judgment::new(app("P", [t]), nat_family())
}

/// The numeral `s(s(...z...))` with `n` successors.
pub fn numeral(n: usize) -> Term {
    (0..n).fold(cnst("z"), |acc, _| app("s", [acc]))
}

/// `{ base: P(z); step: P(s(n)) :- P(n) }`.
pub fn nat_rules() -> RuleDatabase {
    RuleDatabase::from_rules([
        Rule::axiom("base", nat_judgment(cnst("z"))).unwrap(),
        Rule::new(
            "step",
            [nat_judgment(var("n"))],
            nat_judgment(app("s", [var("n")])),
        )
        .unwrap(),
    ])
    .unwrap()
}

/// The ternary family `plus/3`.
pub fn plus_family() -> JudgmentFamily {
    JudgmentFamily::new("plus", 3)
}

/// `plus(a, b, c)`.
pub fn plus_judgment(a: Term, b: Term, c: Term) -> Judgment {
    Judgment::new(app("plus", [a, b, c]), plus_family())
}

/// Peano addition:
/// `{ plus_z: plus(z, n, n); plus_s: plus(s(m), n, s(k)) :- plus(m, n, k) }`.
pub fn plus_rules() -> RuleDatabase {
    RuleDatabase::from_rules([
        Rule::axiom("plus_z", plus_judgment(cnst("z"), var("n"), var("n"))).unwrap(),
        Rule::new(
            "plus_s",
            [plus_judgment(var("m"), var("n"), var("k"))],
            plus_judgment(app("s", [var("m")]), var("n"), app("s", [var("k")])),
        )
        .unwrap(),
    ])
    .unwrap()
}

/// Natural numbers and even numbers, with a decoy rule declared first so
/// that the prover must backtrack:
/// `{ base; step; even_loop: E(n) :- E(n); even_z: E(z); even_ss: E(s(s(n))) :- E(n) }`.
pub fn even_rules() -> RuleDatabase {
    let even = JudgmentFamily::new("E", 1);
    let e = |t: Term| Judgment::new(app("E", [t]), even.clone());

    let mut db = nat_rules();
    for rule in [
        Rule::new("even_loop", [e(var("n"))], e(var("n"))).unwrap(),
        Rule::axiom("even_z", e(cnst("z"))).unwrap(),
        Rule::new("even_ss", [e(var("n"))], e(app("s", [app("s", [var("n")])]))).unwrap(),
    ] {
        db.add(rule).unwrap();
    }
    db
}

/// `E(t)`.
pub fn even_judgment(t: Term) -> Judgment {
    Judgment::new(app("E", [t]), JudgmentFamily::new("E", 1))
}

/// `le(a, b)`.
pub fn le_judgment(a: Term, b: Term) -> Judgment {
    Judgment::new(app("le", [a, b]), JudgmentFamily::new("le", 2))
}

/// Natural numbers plus an order whose transitivity rule has a premise-only
/// metavariable `b`:
/// `{ base; step; le_trans: le(a, c) :- le(a, b), le(b, c); le_refl: le(n, n);
///    le_s: le(n, s(m)) :- le(n, m) }`.
pub fn order_rules() -> RuleDatabase {
    let mut db = nat_rules();
    for rule in [
        Rule::new(
            "le_trans",
            [
                le_judgment(var("a"), var("b")),
                le_judgment(var("b"), var("c")),
            ],
            le_judgment(var("a"), var("c")),
        )
        .unwrap(),
        Rule::axiom("le_refl", le_judgment(var("n"), var("n"))).unwrap(),
        Rule::new(
            "le_s",
            [le_judgment(var("n"), var("m"))],
            le_judgment(var("n"), app("s", [var("m")])),
        )
        .unwrap(),
    ] {
        db.add(rule).unwrap();
    }
    db
}
