use jdcore::prelude::*;
use jdcore::tests_utils::{
    even_judgment, even_rules, nat_judgment, nat_rules, numeral, plus_judgment, plus_rules,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[test]
fn numeral_needs_one_level_per_constructor() {
    let db = nat_rules();
    let prover = BackwardChainer::new(&db);
    let mut rng = ChaCha20Rng::seed_from_u64(11);

    for _ in 0..100 {
        let n = rng.random_range(0..8);
        let bound = rng.random_range(0..10);
        let result = prover.search_goal(nat_judgment(numeral(n)), bound);
        assert_eq!(result.is_ok(), bound > n, "n = {n}, bound = {bound}");

        if let Ok(proof) = result {
            assert!(proof.is_complete());
            assert_eq!(proof.height(), n + 1);
            assert!(proof.height() <= bound);
            assert_eq!(proof.check(&db), Ok(()));
        }
    }
}

#[test]
fn success_is_monotone_in_the_bound() {
    let db = even_rules();
    let prover = BackwardChainer::new(&db);
    let mut rng = ChaCha20Rng::seed_from_u64(12);

    for _ in 0..40 {
        let goal = even_judgment(numeral(rng.random_range(0..9)));
        let bound = rng.random_range(0..7);
        if let Ok(proof) = prover.search_goal(goal.clone(), bound) {
            let larger = prover.search_goal(goal, bound + 1).unwrap();
            assert!(larger.height() <= bound + 1);
            assert_eq!(proof.check(&db), Ok(()));
        }
    }
}

#[test]
fn addition_is_decided_within_the_bound() {
    let db = plus_rules();
    let prover = BackwardChainer::new(&db);
    let mut rng = ChaCha20Rng::seed_from_u64(13);

    for _ in 0..100 {
        let a = rng.random_range(0..5);
        let b = rng.random_range(0..5);
        let c = rng.random_range(0..10);
        let result = prover.search_goal(plus_judgment(numeral(a), numeral(b), numeral(c)), 8);

        assert_eq!(result.is_ok(), a + b == c, "{a} + {b} = {c}");
        if let Ok(proof) = result {
            assert_eq!(proof.size(), a + 1);
            assert_eq!(proof.check(&db), Ok(()));
        }
    }
}

#[test]
fn search_is_deterministic() {
    let db = even_rules();
    let prover = BackwardChainer::new(&db);

    for n in 0..8 {
        let goal = even_judgment(numeral(n));
        let (first, first_stats) = prover.search_with_stats(Proof::open(goal.clone()), 5);
        let (second, second_stats) = prover.search_with_stats(Proof::open(goal), 5);
        assert_eq!(first, second);
        assert_eq!(first_stats, second_stats);
    }
}

#[test]
fn failures_never_carry_a_partial_proof() {
    let db = even_rules();
    let prover = BackwardChainer::new(&db);

    let err = prover.search_goal(even_judgment(numeral(5)), 6).unwrap_err();
    let ProveError::SearchExhausted { goal, attempts, reason, .. } = err else {
        panic!("expected an exhausted search");
    };
    assert_eq!(goal, even_judgment(numeral(5)));
    assert!(attempts > 0);
    assert_eq!(reason, ExhaustionReason::SearchSpace);
}

#[test]
fn attempts_grow_with_the_bound_on_a_looping_rule() {
    let db = even_rules();
    let prover = BackwardChainer::new(&db);
    let goal = even_judgment(numeral(1));

    let mut previous = 0;
    for bound in 1..6 {
        let (result, stats) = prover.search_with_stats(Proof::open(goal.clone()), bound);
        assert!(result.is_err());
        assert!(stats.attempts > previous);
        assert!(stats.attempts <= 3usize.pow(bound as u32), "bound {bound}: {stats:?}");
        assert_eq!(stats.max_depth_reached, bound);
        previous = stats.attempts;
    }
}

#[test]
fn attempts_are_bounded_by_the_search_tree_size() {
    // `E` has three candidate rules with at most one premise each, so level k
    // holds at most 3^(k-1) goals and each of them tries at most 3 rules.
    let db = even_rules();
    let prover = BackwardChainer::new(&db);
    let candidates = db.candidates(&JudgmentFamily::new("E", 1)).count();
    assert_eq!(candidates, 3);

    for n in 0..8 {
        for bound in 1..7u32 {
            let goal = even_judgment(numeral(n));
            let (_, stats) = prover.search_with_stats(Proof::open(goal), bound as usize);
            let limit = candidates * (candidates.pow(bound) - 1) / (candidates - 1);
            assert!(stats.attempts <= limit, "n = {n}, bound = {bound}: {stats:?}");
        }
    }
}
