use statformula_rs::evaluate_formula;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let context = HashMap::from([
        ("UnitRank".to_string(), 4.0),
        ("TargetRank".to_string(), 1.0),
    ]);

    let formula = "MAX(UnitRank - TargetRank, 0)";

    match evaluate_formula(formula, &context) {
        Ok(result) => println!("{formula} = {result}"),
        Err(err) => println!("Error: {err}"),
    }
}
