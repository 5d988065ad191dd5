use serde_json::{json, Value};

use zscore_core::benchmark::Industry;
use zscore_core::scoring::{analyze_record, FinancialRecord};

pub fn run_example() -> Result<Value, Box<dyn std::error::Error>> {
    let result = analyze_record(&FinancialRecord::example())?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_industries() -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = Industry::ALL
        .iter()
        .map(|i| {
            json!({
                "industry": i.name(),
                "tickers": i.tickers().join(", "),
            })
        })
        .collect();
    Ok(Value::Array(rows))
}
