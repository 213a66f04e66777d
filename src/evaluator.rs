// src/evaluator.rs

use tracing::trace;

use crate::ast::Term;
use crate::equality::structurally_equal;
use crate::error::EvalError;

/// Drives a term to normal form.
///
/// Applications and `let` are call-by-name: the argument is substituted
/// unevaluated. Arithmetic, comparisons and `==` force their operands. `if`
/// forces only its condition. Lambda bodies are never reduced under the binder.
///
/// Without a depth limit a divergent program recurses until the stack runs
/// out. `max_depth` bounds the nesting of normalization calls instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    max_depth: Option<usize>,
}

impl Normalizer {
    pub fn new() -> Self {
        Normalizer { max_depth: None }
    }

    pub fn with_max_depth(limit: usize) -> Self {
        Normalizer { max_depth: Some(limit) }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn normalize(&self, term: &Term) -> Result<Term, EvalError> {
        self.eval(term, 0)
    }

    fn eval(&self, term: &Term, depth: usize) -> Result<Term, EvalError> {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(EvalError::DepthExceeded(limit));
            }
        }
        let next = depth + 1;

        match term {
            Term::Var(_) | Term::Num(_) | Term::Lam(_, _) | Term::Nil => Ok(term.clone()),

            Term::App(func, arg) => {
                let func_val = self.eval(func, next)?;
                match func_val {
                    Term::Lam(param, body) => {
                        trace!(param = %param, "beta reduction");
                        let reduced = body.substitute(&param, arg);
                        self.eval(&reduced, next)
                    }
                    stuck => Ok(Term::App(Box::new(stuck), arg.clone())),
                }
            }

            Term::Plus(l, r) => self.arithmetic(l, r, next, Term::Plus, |a, b| a + b),
            Term::Minus(l, r) => self.arithmetic(l, r, next, Term::Minus, |a, b| a - b),
            Term::Times(l, r) => self.arithmetic(l, r, next, Term::Times, |a, b| a * b),
            Term::Leq(l, r) => {
                self.arithmetic(l, r, next, Term::Leq, |a, b| if a <= b { 1.0 } else { 0.0 })
            }

            Term::Neg(e) => match self.eval(e, next)? {
                Term::Num(n) => Ok(Term::Num(-n)),
                stuck => Ok(Term::neg(stuck)),
            },

            Term::Eq(l, r) => {
                let left = self.eval(l, next)?;
                let right = self.eval(r, next)?;
                Ok(Term::Num(if structurally_equal(&left, &right) { 1.0 } else { 0.0 }))
            }

            Term::If(cond, then_branch, else_branch) => match self.eval(cond, next)? {
                Term::Num(n) if n != 0.0 => self.eval(then_branch, next),
                Term::Num(_) => self.eval(else_branch, next),
                stuck => Ok(Term::If(Box::new(stuck), then_branch.clone(), else_branch.clone())),
            },

            // let x = e1 in e2  ~>  (\x.e2) e1
            Term::Let(name, value, body) => {
                let desugared = Term::App(Box::new(Term::Lam(name.clone(), body.clone())), value.clone());
                self.eval(&desugared, next)
            }

            // letrec f = e1 in e2  ~>  let f = fix (\f.e1) in e2
            Term::Letrec(name, value, body) => {
                let fixed = Term::fix(Term::Lam(name.clone(), value.clone()));
                let desugared = Term::Let(name.clone(), Box::new(fixed), body.clone());
                self.eval(&desugared, next)
            }

            // fix F  ~>  F (fix F)
            Term::Fix(f) => {
                let f_val = self.eval(f, next)?;
                trace!("unfolding fix");
                let unfolded = Term::app(f_val.clone(), Term::fix(f_val));
                self.eval(&unfolded, next)
            }

            Term::Seq(l, r) => Ok(Term::seq(self.eval(l, next)?, self.eval(r, next)?)),

            Term::Cons(head, tail) => Ok(Term::cons(self.eval(head, next)?, self.eval(tail, next)?)),

            Term::Hd(e) => match self.eval(e, next)? {
                Term::Cons(head, _) => Ok(*head),
                stuck => Ok(Term::hd(stuck)),
            },

            Term::Tl(e) => match self.eval(e, next)? {
                Term::Cons(_, tail) => Ok(*tail),
                stuck => Ok(Term::tl(stuck)),
            },
        }
    }

    // Strict binary operator: both sides are normalized, folded when both are numbers.
    fn arithmetic(
        &self,
        l: &Term,
        r: &Term,
        depth: usize,
        rebuild: fn(Box<Term>, Box<Term>) -> Term,
        op: fn(f64, f64) -> f64,
    ) -> Result<Term, EvalError> {
        let left = self.eval(l, depth)?;
        let right = self.eval(r, depth)?;
        match (left, right) {
            (Term::Num(a), Term::Num(b)) => Ok(Term::Num(op(a, b))),
            (left, right) => Ok(rebuild(Box::new(left), Box::new(right))),
        }
    }
}

impl Term {
    /// Normal form under the unbounded [`Normalizer`].
    pub fn normalize(&self) -> Term {
        match Normalizer::new().normalize(self) {
            Ok(term) => term,
            Err(e) => unreachable!("unbounded normalization reported {}", e),
        }
    }
}
