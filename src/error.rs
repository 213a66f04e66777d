// src/error.rs

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Normalization nested deeper than the configured limit.
    DepthExceeded(usize),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DepthExceeded(limit) => {
                write!(f, "Normalization exceeded the maximum depth of {}", limit)
            }
        }
    }
}

impl std::error::Error for EvalError {}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidNumber(String),
    InvalidSyntax(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax error at {}:{}: {}", self.line, self.col, self.kind)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedChar(c) => write!(f, "Unexpected character: '{}'", c),
            ParseErrorKind::UnexpectedEnd => write!(f, "Unexpected end of input"),
            ParseErrorKind::InvalidNumber(s) => write!(f, "Invalid number: '{}'", s),
            ParseErrorKind::InvalidSyntax(s) => write!(f, "Invalid syntax: {}", s),
        }
    }
}

impl std::error::Error for ParseError {}

/// Everything `interpret` can fail with.
#[derive(Debug, Clone, PartialEq)]
pub enum InterpretError {
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for InterpretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpretError::Parse(e) => write!(f, "{}", e),
            InterpretError::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InterpretError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InterpretError::Parse(e) => Some(e),
            InterpretError::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for InterpretError {
    fn from(e: ParseError) -> Self {
        InterpretError::Parse(e)
    }
}

impl From<EvalError> for InterpretError {
    fn from(e: EvalError) -> Self {
        InterpretError::Eval(e)
    }
}
