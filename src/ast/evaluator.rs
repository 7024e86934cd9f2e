use std::collections::HashMap;
use std::sync::Arc;

use log::error;

use crate::ast::{Expression, Operand, Operator};
use crate::functions;

/// Caller-supplied capability resolving a variable name to a numeric value.
///
/// Resolution happens once per variable occurrence, every evaluation; the
/// engine never enumerates or caches names.
pub trait VariableValueProvider {
    fn resolve(&self, name: &str) -> Option<f64>;
}

impl VariableValueProvider for HashMap<String, f64> {
    fn resolve(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<P: VariableValueProvider + ?Sized> VariableValueProvider for &P {
    fn resolve(&self, name: &str) -> Option<f64> {
        (**self).resolve(name)
    }
}

/// A registered function: evaluated argument values in, one value out.
pub type NumericFn = Arc<dyn Fn(&[f64]) -> Result<f64, String> + Send + Sync>;

/// Name → implementation table for function calls.
///
/// The default table carries the nine built-ins and is built once
/// process-wide; a custom registry can layer additional entries on top.
/// Arity is never checked at parse time — a shortfall surfaces as an
/// evaluation failure from the implementation itself.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, NumericFn>,
}

impl FunctionRegistry {
    /// Creates an empty registry. Use [`functions::register_functions`] or
    /// [`FunctionRegistry::with_builtins`] to populate it.
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Creates a registry pre-populated with the built-in function set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        functions::register_functions(&mut registry);
        registry
    }

    /// Registers a function under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        self.functions.insert(name.to_string(), Arc::new(function));
    }

    pub fn get(&self, name: &str) -> Option<&NumericFn> {
        self.functions.get(name)
    }
}

impl Expression {
    /// Evaluates the expression against `provider` using the built-in
    /// function set.
    pub fn evaluate<P: VariableValueProvider>(&self, provider: &P) -> f64 {
        self.evaluate_with(provider, functions::builtins())
    }

    /// Evaluates the expression against `provider`, dispatching function
    /// calls through `registry`.
    ///
    /// Precedence climbing over explicit stacks: runs of operators with
    /// equal-or-higher precedence are reduced left to right before a
    /// lower-precedence operator is allowed to combine with them. Failing
    /// nodes (unresolved variable, unknown function, argument shortfall) are
    /// logged and contribute `0.0`; evaluation itself never fails.
    pub fn evaluate_with<P: VariableValueProvider>(
        &self,
        provider: &P,
        registry: &FunctionRegistry,
    ) -> f64 {
        if self.operators.is_empty() {
            return self.operands[0].evaluate_with(provider, registry);
        }

        let mut values: Vec<f64> = Vec::with_capacity(self.operands.len());
        let mut pending: Vec<Operator> = Vec::with_capacity(self.operators.len());

        values.push(self.operands[0].evaluate_with(provider, registry));
        values.push(self.operands[1].evaluate_with(provider, registry));
        pending.push(self.operators[0]);
        let mut next_operand = 2;

        for &next_operator in &self.operators[1..] {
            while values.len() > 1
                && pending
                    .last()
                    .is_some_and(|top| top.precedence() >= next_operator.precedence())
            {
                reduce_top(&mut values, &mut pending);
            }
            if next_operand >= self.operands.len() {
                error!("expression ran out of operands during evaluation");
                return 0.0;
            }
            values.push(self.operands[next_operand].evaluate_with(provider, registry));
            next_operand += 1;
            pending.push(next_operator);
        }

        while !pending.is_empty() {
            reduce_top(&mut values, &mut pending);
        }
        values.pop().unwrap_or_else(|| {
            error!("expression evaluation left an empty value stack");
            0.0
        })
    }
}

fn reduce_top(values: &mut Vec<f64>, pending: &mut Vec<Operator>) {
    let (Some(right), Some(left), Some(operator)) = (values.pop(), values.pop(), pending.pop())
    else {
        error!("operand/operator stacks out of balance during evaluation");
        values.push(0.0);
        return;
    };
    values.push(operator.apply(left, right));
}

impl Operand {
    /// Evaluates a single operand. Failing nodes are logged and contribute
    /// `0.0`.
    pub fn evaluate_with<P: VariableValueProvider>(
        &self,
        provider: &P,
        registry: &FunctionRegistry,
    ) -> f64 {
        match self {
            Operand::Literal(value) => *value,
            Operand::Variable(name) => match provider.resolve(name) {
                Some(value) => value,
                None => {
                    error!("failed to evaluate variable `{name}`");
                    0.0
                }
            },
            Operand::FunctionCall { name, args } => {
                let values: Vec<f64> = args
                    .iter()
                    .map(|arg| arg.evaluate_with(provider, registry))
                    .collect();
                let Some(function) = registry.get(name) else {
                    error!("failed to evaluate function call `{name}`: not registered");
                    return 0.0;
                };
                match function(&values) {
                    Ok(value) => value,
                    Err(message) => {
                        error!(
                            "failed to evaluate function call `{name}` with {} arguments: {message}",
                            values.len()
                        );
                        0.0
                    }
                }
            }
            Operand::Expression(expression) => expression.evaluate_with(provider, registry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expression;

    fn provider() -> HashMap<String, f64> {
        HashMap::from([
            ("VarA".to_string(), 1.0),
            ("VarB".to_string(), 2.0),
            ("var_C10".to_string(), 10.0),
            ("var_20D".to_string(), 20.0),
            ("v69_x".to_string(), 69.0),
            ("v0_52x".to_string(), 0.52),
            ("neg_100".to_string(), -100.0),
        ])
    }

    fn eval(formula: &str) -> f64 {
        Expression::parse(formula).unwrap().evaluate(&provider())
    }

    #[test]
    fn test_single_literal_evaluates_to_its_value() {
        assert_eq!(eval("420.69"), 420.69);
        assert_eq!(eval("-12.3"), -12.3);
    }

    #[test]
    fn test_additive_chains_accumulate_left_to_right() {
        assert_eq!(eval("3 + 5"), 8.0);
        assert_eq!(eval("1 + 2 + 3"), 6.0);
        assert_eq!(eval("1000 + 20000 + 30000"), 51000.0);
        assert_eq!(eval("1 + 1 - 2"), 0.0);
    }

    #[test]
    fn test_multiplicative_chains() {
        assert_eq!(eval("3 * 5"), 15.0);
        assert_eq!(eval("1 * 2 * 3"), 6.0);
        assert_eq!(eval("1000 * 20000 * 30000"), 1000.0 * 20000.0 * 30000.0);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 5 - 4"), 13.0);
        assert_eq!(eval("7 * 2 + 5 * 3 + 1"), 30.0);
    }

    #[test]
    fn test_trailing_lower_precedence_chain() {
        assert_eq!(eval("7 * 2 + 5 * 3 + 1 / 10 * 3.2"), 29.32);
    }

    #[test]
    fn test_variable_substitution() {
        assert_eq!(eval("VarA"), 1.0);
        assert_eq!(eval("VarA + VarB"), 3.0);
        assert_eq!(eval("VarB * var_C10 + VarA"), 21.0);
        assert_eq!(eval("VarB * var_C10 + VarA / var_20D"), 20.05);
        assert_eq!(eval("v69_x - VarB * var_C10 + VarA / var_20D"), 49.05);
    }

    #[test]
    fn test_function_calls_inside_arithmetic() {
        assert_eq!(eval("MAX(VarA, VarB) / ABS(neg_100)"), 0.02);
        assert_eq!(eval("POW(VarB, var_C10) + VarB"), 1026.0);
        assert_eq!(eval("VarB * var_C10 + ROUND(v0_52x)"), 21.0);
    }

    #[test]
    fn test_nested_function_arguments() {
        assert_eq!(eval("MAX( CEILING(v0_52x), FLOOR(v0_52x) ) + 32"), 33.0);
        assert_eq!(eval("MAX( CEILING(0.52), FLOOR(0.52) ) + 32"), 33.0);
    }

    #[test]
    fn test_negation_through_function() {
        assert_eq!(eval("NEG(MAX(4 - 1, 0))"), -3.0);
    }

    #[test]
    fn test_division_follows_ieee_semantics() {
        assert_eq!(eval("1 / 0"), f64::INFINITY);
        assert!(eval("0 / 0").is_nan());
        assert_eq!(eval("7.5 % 2"), 1.5);
    }

    #[test]
    fn test_unresolved_variable_contributes_zero() {
        assert_eq!(eval("Missing + 5"), 5.0);
    }

    #[test]
    fn test_unknown_function_contributes_zero() {
        assert_eq!(eval("CLAMP(1, 2) + 5"), 5.0);
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = FunctionRegistry::with_builtins();
        registry.register("DOUBLE", |args: &[f64]| {
            args.first()
                .map(|value| value * 2.0)
                .ok_or_else(|| "expected argument 0 for `DOUBLE`".to_string())
        });

        let expression = Expression::parse("DOUBLE(MAX(2, 3))").unwrap();
        assert_eq!(expression.evaluate_with(&provider(), &registry), 6.0);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let expression = Expression::parse("v0_52x * 3 + 1 / 7").unwrap();
        let first = expression.evaluate(&provider());
        let second = expression.evaluate(&provider());
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_concurrent_evaluation_of_shared_tree() {
        let expression = Expression::parse("MAX(UnitRank - TargetRank, 0) * VarB").unwrap();
        let sequential = expression.evaluate(&HashMap::from([
            ("UnitRank".to_string(), 4.0),
            ("TargetRank".to_string(), 1.0),
            ("VarB".to_string(), 2.0),
        ]));

        std::thread::scope(|scope| {
            for rank in 1..5 {
                let expression = &expression;
                scope.spawn(move || {
                    let vars = HashMap::from([
                        ("UnitRank".to_string(), 4.0),
                        ("TargetRank".to_string(), rank as f64),
                        ("VarB".to_string(), 2.0),
                    ]);
                    let result = expression.evaluate(&vars);
                    assert_eq!(result, (4.0 - rank as f64).max(0.0) * 2.0);
                });
            }
        });
        assert_eq!(sequential, 6.0);
    }
}
