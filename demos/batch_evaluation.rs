use statformula_rs::Formula;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        HashMap::from([
            ("UnitRank".to_string(), 4.0),
            ("TargetRank".to_string(), 1.0),
        ]),
        HashMap::from([
            ("UnitRank".to_string(), 2.0),
            ("TargetRank".to_string(), 5.0),
        ]),
    ];

    let formula = Formula::parse("MAX(UnitRank - TargetRank, 0)").expect("Failed to parse");

    for (i, context) in contexts.iter().enumerate() {
        let result = formula.evaluate(context);
        println!("Result {}: {}", i, result);
    }
}
