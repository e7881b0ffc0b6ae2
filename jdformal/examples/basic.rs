use jdformal::prelude::*;

fn main() {
    // \x. plus(x, n, s(n))  with  n := s(x): the binder must be renamed.
    let body = abs("x", app("plus", [var("x"), var("n"), app("s", [var("n")])]));
    let sub = Substitution::singleton(Variable::new("n"), app("s", [var("x")]));

    body.pretty_print().unwrap();
    println!();
    sub.apply(&body).pretty_print().unwrap();
    println!();
}
