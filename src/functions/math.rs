use statformula_macros::formula_fn;

use crate::ast::FunctionRegistry;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("MIN", min);
    registry.register("MAX", max);
    registry.register("POW", pow);
    registry.register("SQRT", sqrt);
    registry.register("ROUND", round);
    registry.register("FLOOR", floor);
    registry.register("CEILING", ceiling);
    registry.register("ABS", abs);
    registry.register("NEG", neg);
}

#[formula_fn]
fn min(a: f64, b: f64) -> Result<f64, String> {
    Ok(a.min(b))
}

#[formula_fn]
fn max(a: f64, b: f64) -> Result<f64, String> {
    Ok(a.max(b))
}

#[formula_fn]
fn pow(a: f64, b: f64) -> Result<f64, String> {
    Ok(a.powf(b))
}

#[formula_fn]
fn sqrt(a: f64) -> Result<f64, String> {
    Ok(a.sqrt())
}

// Half away from zero, like `f64::round`.
#[formula_fn]
fn round(a: f64) -> Result<f64, String> {
    Ok(a.round())
}

#[formula_fn]
fn floor(a: f64) -> Result<f64, String> {
    Ok(a.floor())
}

#[formula_fn]
fn ceiling(a: f64) -> Result<f64, String> {
    Ok(a.ceil())
}

#[formula_fn]
fn abs(a: f64) -> Result<f64, String> {
    Ok(a.abs())
}

#[formula_fn]
fn neg(a: f64) -> Result<f64, String> {
    Ok(-a)
}
