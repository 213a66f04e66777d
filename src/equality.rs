// src/equality.rs

use std::mem::discriminant;

use crate::ast::Term;

/// Equality used by `==`. Numbers compare by value, lists element-wise; any
/// other pair of terms must be syntactically identical, bound names included.
/// Alpha-equivalent lambdas with different binder names are *not* equal.
pub fn structurally_equal(left: &Term, right: &Term) -> bool {
    if discriminant(left) != discriminant(right) {
        return false;
    }
    match (left, right) {
        (Term::Num(a), Term::Num(b)) => a == b,
        (Term::Nil, Term::Nil) => true,
        (Term::Cons(h1, t1), Term::Cons(h2, t2)) => {
            structurally_equal(h1, h2) && structurally_equal(t1, t2)
        }
        _ => left == right,
    }
}
