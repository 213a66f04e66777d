// src/substitution.rs

use crate::ast::Term;
use crate::fresh::fresh;

// --- Capture-Avoiding Substitution ---
impl Term {
    /// Replaces every free occurrence of `name` with `replacement`.
    ///
    /// Binders other than `name` are always renamed to a fresh name before
    /// descending, so free variables of `replacement` can never be captured.
    /// The rename happens first, then the substitution proper.
    pub fn substitute(&self, name: &str, replacement: &Term) -> Term {
        let sub = |t: &Term| Box::new(t.substitute(name, replacement));

        match self {
            Term::Var(n) => {
                if n == name {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }

            Term::Lam(param, body) => {
                if param == name {
                    return self.clone();
                }
                let (renamed, body) = rename_then_substitute(param, body, name, replacement);
                Term::Lam(renamed, body)
            }

            Term::Let(bound, value, body) => {
                // The value lives in the outer scope and never sees the binder.
                if bound == name {
                    return Term::Let(bound.clone(), sub(value), body.clone());
                }
                // Binder and body first, then the value: fresh names are numbered in that order.
                let (renamed, body) = rename_then_substitute(bound, body, name, replacement);
                Term::Let(renamed, sub(value), body)
            }

            Term::Letrec(bound, value, body) => {
                if bound == name {
                    return self.clone();
                }
                // The binder scopes over both the value and the body.
                let renamed = fresh();
                let as_var = Term::Var(renamed.clone());
                let value = value.substitute(bound, &as_var).substitute(name, replacement);
                let body = body.substitute(bound, &as_var).substitute(name, replacement);
                Term::Letrec(renamed, Box::new(value), Box::new(body))
            }

            Term::App(func, arg) => Term::App(sub(func), sub(arg)),
            Term::Plus(l, r) => Term::Plus(sub(l), sub(r)),
            Term::Minus(l, r) => Term::Minus(sub(l), sub(r)),
            Term::Times(l, r) => Term::Times(sub(l), sub(r)),
            Term::Neg(e) => Term::Neg(sub(e)),
            Term::Leq(l, r) => Term::Leq(sub(l), sub(r)),
            Term::Eq(l, r) => Term::Eq(sub(l), sub(r)),
            Term::If(cond, then_branch, else_branch) => {
                Term::If(sub(cond), sub(then_branch), sub(else_branch))
            }
            Term::Fix(e) => Term::Fix(sub(e)),
            Term::Seq(l, r) => Term::Seq(sub(l), sub(r)),
            Term::Cons(head, tail) => Term::Cons(sub(head), sub(tail)),
            Term::Hd(e) => Term::Hd(sub(e)),
            Term::Tl(e) => Term::Tl(sub(e)),

            Term::Num(_) | Term::Nil => self.clone(),
        }
    }
}

// body[fresh/old][replacement/name], returning the fresh binder alongside.
fn rename_then_substitute(old: &str, body: &Term, name: &str, replacement: &Term) -> (String, Box<Term>) {
    let renamed = fresh();
    let body = body
        .substitute(old, &Term::Var(renamed.clone()))
        .substitute(name, replacement);
    (renamed, Box::new(body))
}
