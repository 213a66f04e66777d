// src/parser.rs

use phf::phf_map;

use crate::ast::Term;
use crate::error::{ParseError, ParseErrorKind};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Keyword {
    If,
    Then,
    Else,
    Let,
    Letrec,
    In,
    Hd,
    Tl,
    Fix,
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "if" => Keyword::If,
    "then" => Keyword::Then,
    "else" => Keyword::Else,
    "let" => Keyword::Let,
    "letrec" => Keyword::Letrec,
    "in" => Keyword::In,
    "hd" => Keyword::Hd,
    "tl" => Keyword::Tl,
    "fix" => Keyword::Fix,
};

// --- The Parser ---
//
// Precedence, loosest first:
//   ;;   binders (\x. / if / let / letrec)   == <=   + -   *   unary -
//   application   hd tl fix (nestable)   :   atoms
//
// Binder bodies extend as far right as possible, `;;` included.
pub struct Parser {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Parser {
    pub fn new(input: &str) -> Self {
        Parser {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn current_char(&self) -> Option<char> { self.input.get(self.pos).copied() }
    fn peek_char(&self) -> Option<char> { self.input.get(self.pos + 1).copied() }

    fn advance(&mut self) {
        if let Some(c) = self.current_char() {
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars().enumerate().all(|(i, c)| self.input.get(self.pos + i) == Some(&c))
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError { kind, line: self.line, col: self.col }
    }

    fn unexpected(&self) -> ParseError {
        match self.current_char() {
            Some(c) => self.error(ParseErrorKind::UnexpectedChar(c)),
            None => self.error(ParseErrorKind::UnexpectedEnd),
        }
    }

    pub fn parse(&mut self) -> Result<Term, ParseError> {
        self.skip_whitespace();
        let term = self.parse_seq()?;
        self.skip_whitespace();
        if self.current_char().is_some() {
            Err(self.unexpected())
        } else {
            Ok(term)
        }
    }

    // Identifier-shaped word at the cursor, without consuming it.
    fn peek_word(&self) -> String {
        self.input[self.pos..]
            .iter()
            .take_while(|c| c.is_ascii_alphanumeric() || **c == '_')
            .collect()
    }

    fn peek_keyword(&self) -> Option<Keyword> {
        match self.current_char() {
            Some(c) if c.is_ascii_lowercase() => KEYWORDS.get(self.peek_word().as_str()).copied(),
            _ => None,
        }
    }

    fn consume_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.peek_word() == keyword {
            self.advance_by(keyword.chars().count());
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::InvalidSyntax(format!("Expected keyword '{}'", keyword))))
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.current_char() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::InvalidSyntax(format!("Expected '{}'", expected))))
        }
    }

    fn parse_seq(&mut self) -> Result<Term, ParseError> {
        let first = self.parse_expr()?;
        self.skip_whitespace();
        if self.starts_with(";;") {
            self.advance_by(2);
            let rest = self.parse_seq()?;
            Ok(Term::seq(first, rest))
        } else {
            Ok(first)
        }
    }

    fn parse_expr(&mut self) -> Result<Term, ParseError> {
        self.skip_whitespace();
        match self.current_char() {
            Some('\\') | Some('λ') => self.parse_lambda(),
            _ => match self.peek_keyword() {
                Some(Keyword::If) => self.parse_if(),
                Some(Keyword::Let) => self.parse_let("let"),
                Some(Keyword::Letrec) => self.parse_let("letrec"),
                _ => self.parse_comparison(),
            },
        }
    }

    fn parse_lambda(&mut self) -> Result<Term, ParseError> {
        self.advance(); // consume 'λ' or '\'
        self.skip_whitespace();
        let param = self.parse_name()?;
        self.skip_whitespace();
        if self.current_char() != Some('.') {
            return Err(self.error(ParseErrorKind::InvalidSyntax("Expected '.' in lambda".to_string())));
        }
        self.advance(); // consume '.'
        let body = self.parse_seq()?;
        Ok(Term::Lam(param, Box::new(body)))
    }

    fn parse_if(&mut self) -> Result<Term, ParseError> {
        self.consume_keyword("if")?;
        let cond = self.parse_seq()?;
        self.consume_keyword("then")?;
        let then_branch = self.parse_seq()?;
        self.consume_keyword("else")?;
        let else_branch = self.parse_seq()?;
        Ok(Term::if_(cond, then_branch, else_branch))
    }

    fn parse_let(&mut self, keyword: &str) -> Result<Term, ParseError> {
        self.consume_keyword(keyword)?;
        self.skip_whitespace();
        let name = self.parse_name()?;
        self.skip_whitespace();
        if self.current_char() != Some('=') || self.peek_char() == Some('=') {
            return Err(self.error(ParseErrorKind::InvalidSyntax(format!("Expected '=' after '{} {}'", keyword, name))));
        }
        self.advance(); // consume '='
        let value = self.parse_seq()?;
        self.consume_keyword("in")?;
        let body = self.parse_seq()?;

        if keyword == "letrec" {
            Ok(Term::Letrec(name, Box::new(value), Box::new(body)))
        } else {
            Ok(Term::Let(name, Box::new(value), Box::new(body)))
        }
    }

    // Comparisons do not chain: `a == b == c` is a syntax error.
    fn parse_comparison(&mut self) -> Result<Term, ParseError> {
        let left = self.parse_additive()?;
        self.skip_whitespace();
        if self.starts_with("==") {
            self.advance_by(2);
            let right = self.parse_additive()?;
            Ok(Term::eq(left, right))
        } else if self.starts_with("<=") {
            self.advance_by(2);
            let right = self.parse_additive()?;
            Ok(Term::leq(left, right))
        } else {
            Ok(left)
        }
    }

    fn parse_additive(&mut self) -> Result<Term, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            self.skip_whitespace();
            match self.current_char() {
                Some('+') => {
                    self.advance();
                    let right = self.parse_multiplicative()?;
                    left = Term::plus(left, right);
                }
                Some('-') => {
                    self.advance();
                    let right = self.parse_multiplicative()?;
                    left = Term::minus(left, right);
                }
                _ => return Ok(left),
            }
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Term, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            self.skip_whitespace();
            if self.current_char() == Some('*') {
                self.advance();
                let right = self.parse_unary()?;
                left = Term::times(left, right);
            } else {
                return Ok(left);
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Term, ParseError> {
        self.skip_whitespace();
        if self.current_char() == Some('-') {
            self.advance();
            let operand = self.parse_unary()?;
            Ok(Term::neg(operand))
        } else {
            self.parse_application()
        }
    }

    fn parse_application(&mut self) -> Result<Term, ParseError> {
        let mut app = self.parse_prefixed()?;
        loop {
            self.skip_whitespace();
            if !self.at_operand() {
                return Ok(app);
            }
            let arg = self.parse_prefixed()?;
            app = Term::app(app, arg);
        }
    }

    // Whether the next token can start another argument of an application.
    fn at_operand(&self) -> bool {
        match self.current_char() {
            Some('(') | Some('#') => true,
            Some(c) if c.is_ascii_digit() => true,
            Some(c) if c.is_ascii_lowercase() => matches!(
                self.peek_keyword(),
                None | Some(Keyword::Hd) | Some(Keyword::Tl) | Some(Keyword::Fix)
            ),
            _ => false,
        }
    }

    fn parse_prefixed(&mut self) -> Result<Term, ParseError> {
        self.skip_whitespace();
        match self.peek_keyword() {
            Some(Keyword::Hd) => {
                self.consume_keyword("hd")?;
                Ok(Term::hd(self.parse_prefixed()?))
            }
            Some(Keyword::Tl) => {
                self.consume_keyword("tl")?;
                Ok(Term::tl(self.parse_prefixed()?))
            }
            Some(Keyword::Fix) => {
                self.consume_keyword("fix")?;
                Ok(Term::fix(self.parse_prefixed()?))
            }
            _ => self.parse_cons(),
        }
    }

    fn parse_cons(&mut self) -> Result<Term, ParseError> {
        let head = self.parse_atom()?;
        self.skip_whitespace();
        if self.current_char() == Some(':') {
            self.advance();
            let tail = self.parse_cons()?;
            Ok(Term::cons(head, tail))
        } else {
            Ok(head)
        }
    }

    fn parse_atom(&mut self) -> Result<Term, ParseError> {
        self.skip_whitespace();
        match self.current_char() {
            Some('(') => {
                self.advance();
                let inner = self.parse_seq()?;
                self.expect_char(')')?;
                Ok(inner)
            }
            Some('#') => {
                self.advance();
                Ok(Term::Nil)
            }
            Some(c) if c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_ascii_lowercase() => Ok(Term::Var(self.parse_name()?)),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_number(&mut self) -> Result<Term, ParseError> {
        let start_line = self.line;
        let start_col = self.col;
        let mut s = String::new();

        while let Some(c) = self.current_char() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }

        // Only a '.' followed by a digit belongs to the number.
        if self.current_char() == Some('.') && self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            s.push('.');
            self.advance();
            while let Some(c) = self.current_char() {
                if c.is_ascii_digit() {
                    s.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        s.parse::<f64>()
            .map(Term::Num)
            .map_err(|_| ParseError {
                kind: ParseErrorKind::InvalidNumber(s),
                line: start_line,
                col: start_col,
            })
    }

    // Names start with a lowercase letter; this keeps the `Var<n>` namespace
    // used for fresh binders out of reach of source programs.
    fn parse_name(&mut self) -> Result<String, ParseError> {
        match self.current_char() {
            Some(c) if c.is_ascii_lowercase() => {}
            Some(c) => return Err(self.error(ParseErrorKind::UnexpectedChar(c))),
            None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
        let word = self.peek_word();
        if KEYWORDS.contains_key(word.as_str()) {
            return Err(self.error(ParseErrorKind::InvalidSyntax(format!(
                "Keyword '{}' cannot be used as a name",
                word
            ))));
        }
        self.advance_by(word.chars().count());
        Ok(word)
    }
}

// Convenience function for parsing
pub fn parse(input: &str) -> Result<Term, ParseError> {
    Parser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(name: &str) -> Term { Term::var(name) }

    #[test]
    fn test_parse_variables_and_application() {
        assert_eq!(parse("x").unwrap(), v("x"));
        assert_eq!(parse("(((x)) ((y)))").unwrap(), Term::app(v("x"), v("y")));
        assert_eq!(parse("x y z").unwrap(), Term::app(Term::app(v("x"), v("y")), v("z")));
    }

    #[test]
    fn test_parse_lambda_bodies_extend_right() {
        assert_eq!(parse("\\x.y").unwrap(), Term::lam("x", v("y")));
        assert_eq!(
            parse("\\x.x y z").unwrap(),
            Term::lam("x", Term::app(Term::app(v("x"), v("y")), v("z")))
        );
        assert_eq!(
            parse("\\x. \\y. \\z. x y z").unwrap(),
            Term::lam("x", Term::lam("y", Term::lam("z", Term::app(Term::app(v("x"), v("y")), v("z")))))
        );
        assert_eq!(
            parse("\\x. x (\\y. y (\\z. z z2))").unwrap(),
            Term::lam("x", Term::app(v("x"), Term::lam("y", Term::app(v("y"), Term::lam("z", Term::app(v("z"), v("z2")))))))
        );
        assert_eq!(parse("λx.x").unwrap(), parse("\\x.x").unwrap());
    }

    #[test]
    fn test_parse_arithmetic_precedence() {
        let one = Term::Num(1.0);
        // 1-2*3-4 == (1 - (2*3)) - 4
        assert_eq!(
            parse("1-2*3-4").unwrap(),
            Term::minus(
                Term::minus(one.clone(), Term::times(Term::Num(2.0), Term::Num(3.0))),
                Term::Num(4.0)
            )
        );
        assert_eq!(parse("1--2").unwrap(), Term::minus(one, Term::neg(Term::Num(2.0))));
        // application binds tighter than '*'
        assert_eq!(
            parse("f 2 * 3").unwrap(),
            Term::times(Term::app(v("f"), Term::Num(2.0)), Term::Num(3.0))
        );
    }

    #[test]
    fn test_parse_cons_binds_tighter_than_application() {
        assert_eq!(
            parse("f 1:# a").unwrap(),
            Term::app(Term::app(v("f"), Term::cons(Term::Num(1.0), Term::Nil)), v("a"))
        );
        assert_eq!(
            parse("hd 1:2:#").unwrap(),
            Term::hd(Term::list(vec![Term::Num(1.0), Term::Num(2.0)]))
        );
        assert_eq!(
            parse("1:2 == 1:2").unwrap(),
            Term::eq(
                Term::cons(Term::Num(1.0), Term::Num(2.0)),
                Term::cons(Term::Num(1.0), Term::Num(2.0))
            )
        );
    }

    #[test]
    fn test_parse_binders_and_sequencing() {
        assert_eq!(
            parse("let x = 1 in x").unwrap(),
            Term::let_("x", Term::Num(1.0), v("x"))
        );
        assert_eq!(
            parse("letrec f = f in fix f").unwrap(),
            Term::letrec("f", v("f"), Term::fix(v("f")))
        );
        assert_eq!(
            parse("if a <= 1 then b else c").unwrap(),
            Term::if_(Term::leq(v("a"), Term::Num(1.0)), v("b"), v("c"))
        );
        assert_eq!(
            parse("1 ;; 2 ;; 3").unwrap(),
            Term::seq(Term::Num(1.0), Term::seq(Term::Num(2.0), Term::Num(3.0)))
        );
    }

    #[test]
    fn test_prefix_operators_nest() {
        assert_eq!(parse("hd tl x").unwrap(), Term::hd(Term::tl(v("x"))));
        assert_eq!(parse("hd fix f").unwrap(), Term::hd(Term::fix(v("f"))));
        // The argument after a prefixed operand belongs to the outer application.
        assert_eq!(parse("fix f x").unwrap(), Term::app(Term::fix(v("f")), v("x")));
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        assert_eq!(parse("iff").unwrap(), v("iff"));
        assert_eq!(parse("lets in2").unwrap(), Term::app(v("lets"), v("in2")));
        assert!(parse("if 1 thenn 2 else 3").is_err());
        assert!(parse("\\in.in").is_err());
    }

    #[test]
    fn test_reserved_fresh_namespace_is_rejected() {
        let err = parse("Var1").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar('V'));
        assert!(parse("\\Var1.Var1").is_err());
    }

    #[test]
    fn test_parse_errors_report_position() {
        let err = parse("(x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidSyntax("Expected ')'".to_string()));
        assert_eq!((err.line, err.col), (1, 3));

        let err = parse("x\n  ;").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedChar(';'));
        assert_eq!((err.line, err.col), (2, 3));

        assert_eq!(parse("1 +").unwrap_err().kind, ParseErrorKind::UnexpectedEnd);
        assert!(parse("a == b == c").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse("42").unwrap(), Term::Num(42.0));
        assert_eq!(parse("3.25").unwrap(), Term::Num(3.25));
        assert_eq!(parse("-2").unwrap(), Term::neg(Term::Num(2.0)));
    }
}
