//! Console tables and JSON export of evaluated rate constants.
use crate::Kinetics::mechanism_rates::{BranchingRatios, TotalRates};
use crate::Kinetics::rate_parameters::{MechanismRateMap, RateTable};
use prettytable::{Cell, Row, Table, row};
use serde_json::{Map, Number, Value, json};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// one row per pressure key, one column per temperature
pub fn rate_table_to_table(rate_table: &RateTable, temps: &[f64]) -> Table {
    let mut table = Table::new();
    let mut header = vec![Cell::new("P, atm \\ T, K")];
    header.extend(temps.iter().map(|t| Cell::new(&format!("{}", t))));
    table.add_row(Row::new(header));
    for (pressure, ks) in rate_table {
        let mut cells = vec![Cell::new(&pressure.to_string())];
        cells.extend(ks.iter().map(|k| Cell::new(&format!("{:.4e}", k))));
        table.add_row(Row::new(cells));
    }
    table
}

pub fn pretty_print_rate_map(rate_map: &MechanismRateMap, temps: &[f64]) {
    for (key, rate_table) in rate_map {
        println!("__________ {} __________", key);
        rate_table_to_table(rate_table, temps).printstd();
    }
}

pub fn pretty_print_branching(branching: &BranchingRatios, totals: &TotalRates, temps: &[f64]) {
    for (reactants, total) in totals {
        println!(
            "\n__________TOTAL RATE OF {}__________",
            reactants.join("+")
        );
        rate_table_to_table(total, temps).printstd();
        for (key, fractions) in branching.iter().filter(|(k, _)| &k.reactants == reactants) {
            println!("branching ratio of {}", key);
            rate_table_to_table(fractions, temps).printstd();
        }
    }
}

/// short summary of a mechanism evaluation
pub fn summary_table(rate_map: &MechanismRateMap) -> Table {
    let mut table = Table::new();
    table.add_row(row!["reaction", "pressures"]);
    for (key, rate_table) in rate_map {
        let pressures: Vec<String> = rate_table.keys().map(|p| p.to_string()).collect();
        table.add_row(row![key.to_string(), pressures.join(", ")]);
    }
    table
}

/// JSON number, or `"NaN"`, `"Infinity"`, `"-Infinity"` where JSON has no number
fn rate_value_json(k: f64) -> Value {
    match Number::from_f64(k) {
        Some(number) => Value::Number(number),
        None if k.is_nan() => Value::String("NaN".to_string()),
        None if k > 0.0 => Value::String("Infinity".to_string()),
        None => Value::String("-Infinity".to_string()),
    }
}

fn rate_table_json(table: &RateTable) -> Value {
    let entries: Map<String, Value> = table
        .iter()
        .map(|(pressure, ks)| {
            let values = ks.iter().map(|k| rate_value_json(*k)).collect();
            (pressure.to_string(), Value::Array(values))
        })
        .collect();
    Value::Object(entries)
}

fn tables_json<'a>(tables: impl Iterator<Item = (String, &'a RateTable)>) -> Value {
    Value::Object(
        tables
            .map(|(name, table)| (name, rate_table_json(table)))
            .collect(),
    )
}

/// JSON document with reaction keys written as `"A+B=>C"` and pressure keys as strings.
/// Non-finite rates and fractions (zero totals, overflow) are written as the strings
/// `"NaN"`, `"Infinity"` and `"-Infinity"` so they survive the export.
pub fn rates_to_json(
    temps: &[f64],
    rate_map: &MechanismRateMap,
    branching: Option<(&BranchingRatios, &TotalRates)>,
) -> Value {
    let mut document = json!({
        "temperatures": temps,
        "rate_constants": tables_json(rate_map.iter().map(|(key, table)| (key.to_string(), table))),
    });
    if let Some((branching, totals)) = branching {
        document["branching_ratios"] =
            tables_json(branching.iter().map(|(key, table)| (key.to_string(), table)));
        document["total_rates"] = tables_json(
            totals
                .iter()
                .map(|(reactants, table)| (reactants.join("+"), table)),
        );
    }
    document
}

pub fn save_rates_json(path: &Path, document: &Value) -> std::io::Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, document)?;
    Ok(())
}
