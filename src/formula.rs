//! Formula facade: a parsed expression plus the host-facing metadata that
//! travels with it in configuration documents.

use serde::{Deserialize, Serialize};

use crate::ast::{Expression, FunctionRegistry, VariableValueProvider};
use crate::error::ParseError;

/// How a formula's computed value is combined with a base stat. The
/// combination itself happens host-side; the engine only carries the mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationMethod {
    None,
    #[default]
    AddValue,
    AddPercent,
    MultiplyByValue,
    AddPercentAndMultiply,
    All,
}

/// A parsed formula, its source text, and its application method.
///
/// The expression tree is immutable after parsing and safe to evaluate
/// concurrently against different providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FormulaDef", into = "FormulaDef")]
pub struct Formula {
    source: String,
    expression: Expression,
    application_method: ApplicationMethod,
}

impl Formula {
    pub fn parse(source: &str) -> Result<Formula, ParseError> {
        let expression = Expression::parse(source)?;
        Ok(Formula {
            source: source.to_string(),
            expression,
            application_method: ApplicationMethod::default(),
        })
    }

    /// Evaluates against `provider` with the built-in function set.
    pub fn evaluate<P: VariableValueProvider>(&self, provider: &P) -> f64 {
        self.expression.evaluate(provider)
    }

    /// Evaluates against `provider`, dispatching functions through `registry`.
    pub fn evaluate_with<P: VariableValueProvider>(
        &self,
        provider: &P,
        registry: &FunctionRegistry,
    ) -> f64 {
        self.expression.evaluate_with(provider, registry)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn application_method(&self) -> ApplicationMethod {
        self.application_method
    }

    pub fn set_application_method(&mut self, method: ApplicationMethod) {
        self.application_method = method;
    }
}

/// Serialized form of a [`Formula`], as it appears in configuration
/// documents. Field names match the document keys the host reads and
/// writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormulaDef {
    pub formula: String,
    #[serde(default)]
    pub application_method: ApplicationMethod,
}

impl TryFrom<FormulaDef> for Formula {
    type Error = ParseError;

    fn try_from(def: FormulaDef) -> Result<Formula, ParseError> {
        let mut formula = Formula::parse(&def.formula)?;
        formula.set_application_method(def.application_method);
        Ok(formula)
    }
}

impl From<Formula> for FormulaDef {
    fn from(formula: Formula) -> FormulaDef {
        FormulaDef {
            formula: formula.source,
            application_method: formula.application_method,
        }
    }
}
