// src/lib.rs

// --- Module Declarations ---
pub mod ast;
pub mod equality;
pub mod error;
pub mod evaluator;
pub mod fresh;
pub mod parser;
pub mod printer;
pub mod substitution;

// --- Public API Re-exports ---
pub use ast::Term;
pub use equality::structurally_equal;
pub use error::{EvalError, InterpretError, ParseError, ParseErrorKind};
pub use evaluator::Normalizer;
pub use fresh::fresh;
pub use parser::parse;
pub use printer::render;

use tracing::debug;

/// Parses, normalizes and renders a program.
pub fn interpret(source: &str) -> Result<String, InterpretError> {
    interpret_with(source, &Normalizer::new())
}

/// Like [`interpret`], with a caller-configured normalizer.
pub fn interpret_with(source: &str, normalizer: &Normalizer) -> Result<String, InterpretError> {
    let term = parse(source)?;
    debug!(term = %term, "parsed");
    let normal_form = normalizer.normalize(&term)?;
    debug!(result = %normal_form, "normalized");
    Ok(render(&normal_form))
}
