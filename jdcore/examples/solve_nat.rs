//! Check three `by solve` steps against the rules of natural numbers and
//! print the found proofs and the diagnostics.
use jdcore::diagnostics::render_report;
use jdcore::prelude::*;
use jdcore::tests_utils::{nat_judgment, nat_rules, numeral};
use termcolor::{ColorChoice, StandardStream};

const SOURCE: &str = "\
d1: P(s(s(z))) by solve
d2: P(s(s(z))) by solve
d3: Q(z) by solve
";

fn span_of(line: usize) -> Option<Span> {
    let start: usize = SOURCE.lines().take(line).map(|l| l.len() + 1).sum();
    let end = start + SOURCE.lines().nth(line).map_or(0, str::len);
    Some(Span::in_source(Some("nat.slf".into()), SOURCE, start..end))
}

fn main() -> JdResult<()> {
    let db = nat_rules();
    println!("Rules:");
    for rule in db.iter() {
        println!("  {rule}");
    }
    println!();

    let q = Judgment::new(app("Q", [cnst("z")]), JudgmentFamily::new("Q", 1));
    let steps = [
        (SolveConfig::default(), SolveStep::new("d1", nat_judgment(numeral(2)), span_of(0))),
        (SolveConfig::default().with_depth_bound(1), SolveStep::new("d2", nat_judgment(numeral(2)), span_of(1))),
        (SolveConfig::default(), SolveStep::new("d3", q, span_of(2))),
    ];

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut diagnostics = Vec::new();
    for (config, step) in &steps {
        println!("{step} (depth bound {})", config.depth_bound);
        let solver = Solver::new(&db, config.clone());
        solver.solve(step, &Substitution::identity(), &mut diagnostics, &mut stdout)?;
    }

    for diagnostic in &diagnostics {
        eprint!("{}", render_report(diagnostic, SOURCE)?);
    }
    Ok(())
}
