use criterion::{Criterion, black_box, criterion_group, criterion_main};

use jdformal::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

const NAMES: [&str; 4] = ["x", "y", "n", "m"];

fn random_term(budget: usize, rng: &mut impl Rng) -> Term {
    if budget == 0 || rng.random_bool(0.2) {
        return match rng.random_range(0..=2) {
            0 => cnst("z"),
            _ => var(NAMES[rng.random_range(0..NAMES.len())]),
        };
    }

    match rng.random_range(0..=3) {
        0 => app("s", [random_term(budget - 1, rng)]),
        1 => app(
            "pair",
            [random_term(budget - 1, rng), random_term(budget - 1, rng)],
        ),
        2 => abs(
            NAMES[rng.random_range(0..NAMES.len())],
            random_term(budget - 1, rng),
        ),
        _ => app(
            "f",
            [
                random_term(budget - 1, rng),
                random_term(budget - 1, rng),
                random_term(budget - 1, rng),
            ],
        ),
    }
}

fn build_substitution(rng: &mut impl Rng) -> Substitution {
    NAMES
        .iter()
        .map(|name| (Variable::new(*name), random_term(3, rng)))
        .collect()
}

fn bench_substitution(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::seed_from_u64(0x42);
    let term = random_term(10, &mut rng);
    let sub = build_substitution(&mut rng);

    c.bench_function("substitute_random_term", |b| {
        b.iter(|| black_box(sub.apply(black_box(&term))))
    });
}

fn bench_alpha_equality(c: &mut Criterion) {
    // Same seed twice: structurally identical terms in distinct allocations.
    let term = random_term(10, &mut ChaCha20Rng::seed_from_u64(0x43));
    let other = random_term(10, &mut ChaCha20Rng::seed_from_u64(0x43));

    c.bench_function("alpha_equality_random_term", |b| {
        b.iter(|| black_box(black_box(&term) == black_box(&other)))
    });
}

fn bench_matching(c: &mut Criterion) {
    let mut goal = cnst("z");
    for _ in 0..64 {
        goal = app("s", [goal]);
    }
    let goal = app("P", [goal]);
    let pattern = app("P", [app("s", [var("n")])]);

    c.bench_function("match_deep_successor", |b| {
        b.iter(|| black_box(match_pattern(black_box(&pattern), black_box(&goal))))
    });
}

criterion_group!(
    benches,
    bench_substitution,
    bench_alpha_equality,
    bench_matching
);
criterion_main!(benches);
