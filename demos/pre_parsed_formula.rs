use statformula_rs::Expression;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let expression =
        Expression::parse("POW(VarB, var_C10) + SQRT(ABS(neg_100))").expect("Failed to parse");

    let context: HashMap<String, f64> = [
        ("VarB".to_string(), 2.0),
        ("var_C10".to_string(), 10.0),
        ("neg_100".to_string(), -100.0),
    ]
    .iter()
    .cloned()
    .collect();

    println!("Result: {}", expression.evaluate(&context));
}
