//! Reader of the CHEMKIN THERMO block.
//!
//! Each species takes four fixed-column lines: name and temperature ranges on the first, then
//! fourteen coefficients in 15-character fields (high-temperature set first). A line of two
//! or three numbers right after the THERMO keyword gives default temperatures for entries
//! whose own Tmid is blank.
use crate::Thermodynamics::NASAdata::{NASAdata, ThermoError};
use log::{info, warn};
use std::collections::BTreeMap;

const COEFF_WIDTH: usize = 15;

fn strip_comment(line: &str) -> &str {
    match line.find('!') {
        Some(position) => &line[..position],
        None => line,
    }
}

fn is_thermo_header(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .map(|word| word.to_uppercase().starts_with("THER"))
        .unwrap_or(false)
}

/// Lines of the THERMO block between the header and END; column positions are kept.
pub fn thermo_block(mech_str: &str) -> Option<Vec<String>> {
    let mut lines = mech_str.lines().map(strip_comment);
    lines.find(|line| is_thermo_header(line))?;
    Some(
        lines
            .take_while(|line| !line.trim().to_uppercase().starts_with("END"))
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim_end().to_string())
            .collect(),
    )
}

/// fixed-width column, empty when the line is shorter
fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

fn parse_field(field: &str, species: &str) -> Result<f64, ThermoError> {
    field
        .replace(['D', 'd'], "E")
        .parse::<f64>()
        .map_err(|_| ThermoError::MalformedEntry {
            species: species.to_string(),
            reason: format!("cannot read number '{}'", field),
        })
}

fn optional_field(field: &str, species: &str) -> Result<Option<f64>, ThermoError> {
    if field.is_empty() {
        Ok(None)
    } else {
        parse_field(field, species).map(Some)
    }
}

/// Tlow, Thigh [, Tmid] given on the line after THERMO
fn global_temperatures(line: &str) -> Option<(f64, f64, Option<f64>)> {
    let values: Vec<f64> = line
        .split_whitespace()
        .map(|token| token.parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        [t_low, t_mid, t_high] => Some((*t_low, *t_high, Some(*t_mid))),
        [t_low, t_high] => Some((*t_low, *t_high, None)),
        _ => None,
    }
}

/// one four-line entry
pub fn parse_entry(
    lines: &[&str],
    default_t_mid: Option<f64>,
) -> Result<NASAdata, ThermoError> {
    let first = lines.first().copied().unwrap_or_default();
    let species = column(first, 0, 18)
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();
    if lines.len() != 4 {
        return Err(ThermoError::MalformedEntry {
            species,
            reason: format!("expected 4 lines, found {}", lines.len()),
        });
    }
    let t_low = parse_field(column(first, 45, 55), &species)?;
    let t_high = parse_field(column(first, 55, 65), &species)?;
    // Tmid often spills past its 8 columns into the unused atom field
    let t_mid_field = column(first, 65, 78)
        .split_whitespace()
        .next()
        .unwrap_or_default();
    let t_mid = match optional_field(t_mid_field, &species)? {
        Some(t_mid) => t_mid,
        None => default_t_mid.ok_or_else(|| ThermoError::MalformedEntry {
            species: species.clone(),
            reason: "no Tmid in the entry and no default temperature line".to_string(),
        })?,
    };

    let mut coefficients = Vec::with_capacity(14);
    for (line, count) in lines[1..].iter().zip([5, 5, 4]) {
        for i in 0..count {
            let field = column(line, i * COEFF_WIDTH, (i + 1) * COEFF_WIDTH);
            coefficients.push(parse_field(field, &species)?);
        }
    }
    let mut high = [0.0; 7];
    let mut low = [0.0; 7];
    high.copy_from_slice(&coefficients[..7]);
    low.copy_from_slice(&coefficients[7..]);
    NASAdata::new(&species, (t_low, t_mid, t_high), low, high)
}

/// NASA polynomials of every species of the THERMO block, keyed by species name.
/// An empty map is returned when the text has no THERMO block.
pub fn parse_thermo(mech_str: &str) -> Result<BTreeMap<String, NASAdata>, ThermoError> {
    let mut polynomials = BTreeMap::new();
    let Some(block) = thermo_block(mech_str) else {
        warn!("no THERMO block found");
        return Ok(polynomials);
    };
    let mut lines: Vec<&str> = block.iter().map(String::as_str).collect();
    let mut default_t_mid = None;
    if let Some((_, _, t_mid)) = lines.first().and_then(|line| global_temperatures(line)) {
        default_t_mid = t_mid;
        lines.remove(0);
    }
    for entry in lines.chunks(4) {
        let nasa = parse_entry(entry, default_t_mid)?;
        polynomials.insert(nasa.species.clone(), nasa);
    }
    info!("parsed NASA polynomials of {} species", polynomials.len());
    Ok(polynomials)
}
