use serde_json::Value;
use tabled::{builder::Builder, Table};

use coupon_core::monte_carlo::simulation::histogram;

const HISTOGRAM_BINS: usize = 12;
const BAR_WIDTH: usize = 40;

/// Format output as a table using the tabled crate. Simulation results get a
/// textual histogram instead of the raw per-trial sequence.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_fields(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    print_fields(result);

    if let Some(draws) = extract_draws(result) {
        print_distribution(&draws);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            // The raw results sequence is summarised by the distribution
            // view below rather than dumped into a cell.
            if key == "results" {
                let len = val.as_array().map(|a| a.len()).unwrap_or(0);
                builder.push_record([key.as_str(), &format!("({len} trial results)")]);
                continue;
            }
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{}", value);
    }
}

/// Pull the per-trial draw counts out of a simulation summary, if present.
fn extract_draws(result: &Value) -> Option<Vec<u64>> {
    let arr = result.get("results")?.as_array()?;
    let draws: Vec<u64> = arr.iter().filter_map(|v| v.as_u64()).collect();
    if draws.len() == arr.len() && !draws.is_empty() {
        Some(draws)
    } else {
        None
    }
}

fn print_distribution(draws: &[u64]) {
    let bins = match histogram(draws, HISTOGRAM_BINS) {
        Ok(bins) => bins,
        Err(_) => return,
    };
    let peak = bins.iter().map(|b| b.count).max().unwrap_or(1).max(1);

    println!("\nDistribution of draws:");
    for bin in &bins {
        let bar_len = (bin.count as usize * BAR_WIDTH) / peak as usize;
        println!(
            "  {:>9.1} - {:>9.1}  {:<width$} {:>6}",
            bin.lower,
            bin.upper,
            "#".repeat(bar_len),
            bin.count,
            width = BAR_WIDTH
        );
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
