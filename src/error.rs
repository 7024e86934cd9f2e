//! Parse error types

use thiserror::Error;

/// Result type for formula parsing.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors produced while parsing a formula string.
///
/// Evaluation never returns these: evaluation failures are logged and the
/// failing node contributes `0.0` instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input contained no operand at all.
    #[error("formula is empty")]
    EmptyFormula,

    /// No function call, literal, or variable matched at the given offset.
    #[error("expected an operand at offset {0}")]
    ExpectedOperand(usize),

    /// An operand was followed by something that is not a binary operator.
    #[error("expected an operator at offset {0}")]
    ExpectedOperator(usize),

    /// The input ended right after a binary operator.
    #[error("operator at end of formula has no right-hand operand")]
    MissingOperand,

    /// A function call's argument list never reached its closing parenthesis.
    #[error("unterminated argument list in call to `{0}`")]
    UnterminatedCall(String),

    /// An argument substring was empty, e.g. `MIN(1,)`.
    #[error("argument #{index} in call to `{name}` is empty")]
    EmptyArgument { name: String, index: usize },
}
