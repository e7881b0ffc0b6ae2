use jdcore::diagnostics::render_report;
use jdcore::prelude::*;
use jdcore::tests_utils::{nat_judgment, nat_rules, numeral};
use termcolor::NoColor;

const SOURCE: &str = "theorem two: exists P(s(s(z))).\n  d1: P(s(s(z))) by solve\nend theorem\n";

fn step(goal: Judgment) -> SolveStep<Judgment> {
    let start = SOURCE.find("d1").unwrap();
    let end = start + SOURCE[start..].find('\n').unwrap();
    SolveStep::new(
        "d1",
        goal,
        Some(Span::in_source(Some("two.slf".into()), SOURCE, start..end)),
    )
}

fn solve(config: SolveConfig, goal: Judgment) -> (SolveOutcome, Vec<Diagnostic>, String) {
    let db = nat_rules();
    let solver = Solver::new(&db, config);
    let mut diagnostics = Vec::new();
    let mut out = NoColor::new(Vec::new());
    let outcome = solver
        .solve(&step(goal), &Substitution::identity(), &mut diagnostics, &mut out)
        .unwrap();
    (
        outcome,
        diagnostics,
        String::from_utf8(out.into_inner()).unwrap(),
    )
}

#[test]
fn two_is_proved_with_the_default_bound() {
    let (outcome, diagnostics, printed) = solve(SolveConfig::default(), nat_judgment(numeral(2)));

    let proof = outcome.try_as_proved().unwrap();
    assert_eq!(proof.rule_names(), ["step", "step", "base"]);
    assert!(printed.starts_with("P(s(s(z))) by rule step\n"));
    assert!(printed.ends_with("by rule base\n\n"));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].full_message(),
        "two.slf:2:3: warning: proof by solve is not reliable"
    );
}

#[test]
fn two_is_not_found_with_bound_one() {
    let config = SolveConfig::from_toml_str("depth_bound = 1").unwrap();
    let (outcome, diagnostics, printed) = solve(config, nat_judgment(numeral(2)));

    assert!(outcome.is_not_found());
    assert!(printed.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_error());
    assert_eq!(diagnostics[0].full_message(), "two.slf:2:3: Unable to find proof");

    let report = render_report(&diagnostics[0], SOURCE).unwrap();
    assert!(report.contains("Unable to find proof"));
    assert!(report.contains("two.slf"));
}

#[test]
fn goal_of_an_unknown_family_always_fails() {
    let q = Judgment::new(app("Q", [cnst("z")]), JudgmentFamily::new("Q", 1));
    for bound in [1, 5, 50] {
        let (outcome, diagnostics, _) = solve(SolveConfig::default().with_depth_bound(bound), q.clone());
        assert!(outcome.is_not_found());
        assert_eq!(diagnostics[0].kind, DiagnosticKind::SolveFailed);
    }
}

#[test]
fn attempt_budget_from_configuration_is_honoured() {
    let config = SolveConfig::from_toml_str("attempt_budget = 2").unwrap();
    let (outcome, diagnostics, _) = solve(config, nat_judgment(numeral(2)));

    assert!(outcome.is_not_found());
    let debug_info = diagnostics[0].debug_info.as_deref().unwrap();
    assert!(debug_info.contains("attempt budget spent"), "{debug_info}");
}
