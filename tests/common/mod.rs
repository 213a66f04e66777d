// tests/common/mod.rs

#![allow(dead_code)]

use lambdaf::{interpret, parse, Term};

pub fn interp(input: &str) -> String {
    match interpret(input) {
        Ok(output) => output,
        Err(e) => panic!("interpreting {:?} failed: {}", input, e),
    }
}

pub fn term(input: &str) -> Term {
    match parse(input) {
        Ok(t) => t,
        Err(e) => panic!("parsing {:?} failed: {}", input, e),
    }
}

/// Equality up to renaming of bound variables. Fresh binder names depend on
/// how many renames the whole test process has done, so exact names can't be
/// asserted.
pub fn alpha_equivalent(a: &Term, b: &Term) -> bool {
    alpha_eq(a, b, &mut Vec::new())
}

fn alpha_eq(a: &Term, b: &Term, bound: &mut Vec<(String, String)>) -> bool {
    match (a, b) {
        (Term::Var(x), Term::Var(y)) => {
            match bound.iter().rev().find(|(p, q)| p == x || q == y) {
                Some((p, q)) => p == x && q == y,
                None => x == y,
            }
        }
        (Term::Lam(x, ba), Term::Lam(y, bb)) => under(x, y, bound, |bound| alpha_eq(ba, bb, bound)),
        (Term::Let(x, va, ba), Term::Let(y, vb, bb)) => {
            alpha_eq(va, vb, bound) && under(x, y, bound, |bound| alpha_eq(ba, bb, bound))
        }
        (Term::Letrec(x, va, ba), Term::Letrec(y, vb, bb)) => under(x, y, bound, |bound| {
            alpha_eq(va, vb, bound) && alpha_eq(ba, bb, bound)
        }),
        (Term::Num(x), Term::Num(y)) => x == y,
        (Term::Nil, Term::Nil) => true,
        (Term::App(a1, a2), Term::App(b1, b2))
        | (Term::Plus(a1, a2), Term::Plus(b1, b2))
        | (Term::Minus(a1, a2), Term::Minus(b1, b2))
        | (Term::Times(a1, a2), Term::Times(b1, b2))
        | (Term::Leq(a1, a2), Term::Leq(b1, b2))
        | (Term::Eq(a1, a2), Term::Eq(b1, b2))
        | (Term::Seq(a1, a2), Term::Seq(b1, b2))
        | (Term::Cons(a1, a2), Term::Cons(b1, b2)) => {
            alpha_eq(a1, b1, bound) && alpha_eq(a2, b2, bound)
        }
        (Term::Neg(x), Term::Neg(y))
        | (Term::Fix(x), Term::Fix(y))
        | (Term::Hd(x), Term::Hd(y))
        | (Term::Tl(x), Term::Tl(y)) => alpha_eq(x, y, bound),
        (Term::If(c1, t1, e1), Term::If(c2, t2, e2)) => {
            alpha_eq(c1, c2, bound) && alpha_eq(t1, t2, bound) && alpha_eq(e1, e2, bound)
        }
        _ => false,
    }
}

fn under<F>(x: &str, y: &str, bound: &mut Vec<(String, String)>, f: F) -> bool
where
    F: FnOnce(&mut Vec<(String, String)>) -> bool,
{
    bound.push((x.to_string(), y.to_string()));
    let result = f(bound);
    bound.pop();
    result
}

/// Asserts that `actual` matches the expected program text up to bound names.
pub fn assert_alpha_eq(actual: &Term, expected_src: &str) {
    let expected = term(expected_src);
    assert!(
        alpha_equivalent(actual, &expected),
        "expected a term alpha-equivalent to {}, got {}",
        expected,
        actual
    );
}
