// src/ast.rs

use paste::paste;

// AST Definition
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Var(String),
    Lam(String, Box<Term>),
    App(Box<Term>, Box<Term>),
    Num(f64),
    Plus(Box<Term>, Box<Term>),
    Minus(Box<Term>, Box<Term>),
    Times(Box<Term>, Box<Term>),
    Neg(Box<Term>),
    Leq(Box<Term>, Box<Term>),
    Eq(Box<Term>, Box<Term>),
    If(Box<Term>, Box<Term>, Box<Term>),
    Let(String, Box<Term>, Box<Term>),
    Letrec(String, Box<Term>, Box<Term>),
    Fix(Box<Term>),
    Seq(Box<Term>, Box<Term>),
    Cons(Box<Term>, Box<Term>),
    Nil,
    Hd(Box<Term>),
    Tl(Box<Term>),
}

// Generates `Term::plus(l, r)`, `Term::neg(e)`, ... so callers don't have to box by hand.
macro_rules! term_constructors {
    (
        unary: [$($unary:ident),*],
        binary: [$($binary:ident),*]
    ) => {
        paste! {
            impl Term {
                $(
                    pub fn [<$unary:lower>](operand: Term) -> Term {
                        Term::$unary(Box::new(operand))
                    }
                )*
                $(
                    pub fn [<$binary:lower>](left: Term, right: Term) -> Term {
                        Term::$binary(Box::new(left), Box::new(right))
                    }
                )*
            }
        }
    };
}

term_constructors! {
    unary: [Neg, Fix, Hd, Tl],
    binary: [App, Plus, Minus, Times, Leq, Eq, Seq, Cons]
}

impl Term {
    pub fn var(name: &str) -> Term {
        Term::Var(name.to_string())
    }

    pub fn lam(param: &str, body: Term) -> Term {
        Term::Lam(param.to_string(), Box::new(body))
    }

    pub fn if_(cond: Term, then_branch: Term, else_branch: Term) -> Term {
        Term::If(Box::new(cond), Box::new(then_branch), Box::new(else_branch))
    }

    pub fn let_(name: &str, value: Term, body: Term) -> Term {
        Term::Let(name.to_string(), Box::new(value), Box::new(body))
    }

    pub fn letrec(name: &str, value: Term, body: Term) -> Term {
        Term::Letrec(name.to_string(), Box::new(value), Box::new(body))
    }

    /// Builds `e1 : e2 : ... : #` from its elements.
    pub fn list(items: Vec<Term>) -> Term {
        items
            .into_iter()
            .rev()
            .fold(Term::Nil, |tail, head| Term::cons(head, tail))
    }
}
