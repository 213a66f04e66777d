// src/printer.rs

// Canonical printer: every compound form is fully parenthesized so the output
// reads back unambiguously. Seq is the one form printed without parentheses.

use std::fmt;

use crate::ast::Term;

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(name) => write!(f, "{}", name),
            Term::Lam(param, body) => write!(f, "(\\{}.{})", param, body),
            Term::App(func, arg) => write!(f, "({} {})", func, arg),
            Term::Num(n) => write!(f, "{}", format_number(*n)),
            Term::Plus(l, r) => write!(f, "({} + {})", l, r),
            Term::Minus(l, r) => write!(f, "({} - {})", l, r),
            Term::Times(l, r) => write!(f, "({} * {})", l, r),
            Term::Neg(e) => write!(f, "(-{})", e),
            Term::Leq(l, r) => write!(f, "({} <= {})", l, r),
            Term::Eq(l, r) => write!(f, "({} == {})", l, r),
            Term::If(cond, then_branch, else_branch) => {
                write!(f, "(if {} then {} else {})", cond, then_branch, else_branch)
            }
            Term::Let(name, value, body) => write!(f, "(let {} = {} in {})", name, value, body),
            Term::Letrec(name, value, body) => {
                write!(f, "(letrec {} = {} in {})", name, value, body)
            }
            Term::Fix(e) => write!(f, "(fix {})", e),
            Term::Seq(l, r) => write!(f, "{} ;; {}", l, r),
            Term::Cons(head, tail) => write!(f, "({} : {})", head, tail),
            Term::Nil => write!(f, "#"),
            Term::Hd(e) => write!(f, "(hd {})", e),
            Term::Tl(e) => write!(f, "(tl {})", e),
        }
    }
}

/// Renders a term in canonical form.
pub fn render(term: &Term) -> String {
    term.to_string()
}

/// Formats a number the way the test corpus expects: whole numbers always
/// carry a `.0`, small fractions switch to a two-digit exponent (`1e-05`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "nan".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if n == 0.0 {
        // Covers -0.0 too.
        return "0.0".to_string();
    }
    if n.fract() == 0.0 {
        return format!("{:.1}", n);
    }
    if n.abs() < 1e-4 {
        return format_exponent(n);
    }
    format!("{}", n)
}

fn format_exponent(n: f64) -> String {
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}
