pub mod ast;
pub mod error;
pub mod formula;
pub mod functions;

pub use ast::{Expression, FunctionRegistry, Operand, Operator, VariableValueProvider};
pub use error::{ParseError, ParseResult};
pub use formula::{ApplicationMethod, Formula, FormulaDef};

/// Parses `formula` and evaluates it against `context` in one call, using the
/// built-in function set.
pub fn evaluate_formula(
    formula: &str,
    context: &std::collections::HashMap<String, f64>,
) -> Result<f64, ParseError> {
    let expression = Expression::parse(formula)?;
    Ok(expression.evaluate(context))
}
