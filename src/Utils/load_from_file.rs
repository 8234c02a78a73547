use crate::Kinetics::chemkin_parser::{parse_reactions, reaction_units, warn_ambiguous_forms};
use crate::Kinetics::rate_parameters::ReactionRecord;
use crate::Kinetics::units::UnitSpec;
use crate::Thermodynamics::NASAdata::NASAdata;
use crate::Thermodynamics::thermo_parser::parse_thermo;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// everything the rate engine needs from one mechanism file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mechanism {
    #[serde(default)]
    pub units: UnitSpec,
    pub reactions: Vec<ReactionRecord>,
    #[serde(default)]
    pub thermo: BTreeMap<String, NASAdata>,
}

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    /// CHEMKIN text, or JSON when the file name ends with `.json`
    pub fn load_mechanism(&self) -> Result<Mechanism, String> {
        let is_json = Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            load_mechanism_json(&self.file_name)
        } else {
            load_chemkin_mechanism(&self.file_name)
        }
    }
}

fn read_file(file_name: &str) -> Result<String, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }
    fs::read_to_string(path).map_err(|e| format!("Failed to open file '{}': {}", file_name, e))
}

/// Reads units, reactions and (if present) NASA polynomials from a CHEMKIN mechanism file.
pub fn load_chemkin_mechanism(file_name: &str) -> Result<Mechanism, String> {
    let mech_str = read_file(file_name)?;
    let units = reaction_units(&mech_str);
    let reactions = parse_reactions(&mech_str).map_err(|e| {
        let msg = format!("Error parsing reactions in '{}': {}", file_name, e);
        error!("{}", msg);
        msg
    })?;
    if reactions.is_empty() {
        warn!("REACTIONS block of '{}' is empty", file_name);
    }
    let thermo = parse_thermo(&mech_str).map_err(|e| {
        let msg = format!("Error parsing THERMO block in '{}': {}", file_name, e);
        error!("{}", msg);
        msg
    })?;
    info!(
        "Loaded {} reactions and {} NASA polynomials from '{}' in units {}",
        reactions.len(),
        thermo.len(),
        file_name,
        units
    );
    Ok(Mechanism {
        units,
        reactions,
        thermo,
    })
}

/// Reads a mechanism stored as JSON in the layout of [`Mechanism`].
pub fn load_mechanism_json(file_name: &str) -> Result<Mechanism, String> {
    let content = read_file(file_name)?;
    match serde_json::from_str::<Mechanism>(&content) {
        Ok(mechanism) => {
            warn_ambiguous_forms(&mechanism.reactions);
            info!(
                "Successfully parsed {} reactions from file '{}'",
                mechanism.reactions.len(),
                file_name
            );
            Ok(mechanism)
        }
        Err(e) => {
            let error_line = e.line();
            let error_column = e.column();
            let error_msg = format!(
                "Error parsing mechanism at line {}, column {}: {}",
                error_line, error_column, e
            );
            error!("{}", error_msg);
            // show the problematic line with a pointer to the column
            if let Some(problem_line) = content.lines().nth(error_line.saturating_sub(1)) {
                error!("Problematic line: {}", problem_line);
                if error_column >= 1 && error_column <= problem_line.len() {
                    let pointer = " ".repeat(error_column - 1) + "^";
                    error!("{}", pointer);
                }
            }
            Err(error_msg)
        }
    }
}
