//! NASA 7-coefficient polynomials in kcal/mol units.
//!
//! A polynomial carries two coefficient sets: the low one is valid on [Tlow, Tmid], the high
//! one on (Tmid, Thigh]. Temperatures outside [Tlow, Thigh] have no coefficients.
use log::warn;
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

/// gas constant, kcal/(mol K)
#[allow(non_upper_case_globals)]
const R: f64 = 1.98720425864083e-3;

#[derive(Debug, Clone, PartialEq)]
pub enum ThermoError {
    NoCoefficientsFound { temperature: f64, range: String },
    InvalidTemperatureRange { species: String },
    MalformedEntry { species: String, reason: String },
}

impl fmt::Display for ThermoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ThermoError::NoCoefficientsFound { temperature, range } => {
                write!(
                    f,
                    "No coefficients found for temperature {} K. Valid range: {}",
                    temperature, range
                )
            }
            ThermoError::InvalidTemperatureRange { species } => {
                write!(f, "Invalid temperature range in NASA data of {}", species)
            }
            ThermoError::MalformedEntry { species, reason } => {
                write!(f, "Malformed THERMO entry '{}': {}", species, reason)
            }
        }
    }
}

impl Error for ThermoError {}

#[allow(non_snake_case)]
fn Cp(t: f64, a: &[f64; 7]) -> f64 {
    R * (a[0] + a[1] * t + a[2] * t.powi(2) + a[3] * t.powi(3) + a[4] * t.powi(4))
}
fn dh(t: f64, a: &[f64; 7]) -> f64 {
    R * t
        * (a[0]
            + a[1] * t / 2.0
            + a[2] * t.powi(2) / 3.0
            + a[3] * t.powi(3) / 4.0
            + a[4] * t.powi(4) / 5.0
            + a[5] / t)
}
fn ds(t: f64, a: &[f64; 7]) -> f64 {
    R * (a[0] * t.ln()
        + a[1] * t
        + a[2] * t.powi(2) / 2.0
        + a[3] * t.powi(3) / 3.0
        + a[4] * t.powi(4) / 4.0
        + a[6])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NASAdata {
    pub species: String,
    pub t_low: f64,
    pub t_mid: f64,
    pub t_high: f64,
    /// coefficients for Tlow <= T <= Tmid
    pub low: [f64; 7],
    /// coefficients for Tmid < T <= Thigh
    pub high: [f64; 7],
}

impl NASAdata {
    pub fn new(
        species: &str,
        (t_low, t_mid, t_high): (f64, f64, f64),
        low: [f64; 7],
        high: [f64; 7],
    ) -> Result<Self, ThermoError> {
        if !(t_low < t_mid && t_mid < t_high) {
            return Err(ThermoError::InvalidTemperatureRange {
                species: species.to_string(),
            });
        }
        Ok(Self {
            species: species.to_string(),
            t_low,
            t_mid,
            t_high,
            low,
            high,
        })
    }
    /// the 7 constants valid at temperature t
    pub fn extract_coefficients(&self, t: f64) -> Result<&[f64; 7], ThermoError> {
        if self.t_low <= t && t <= self.t_mid {
            Ok(&self.low)
        } else if self.t_mid < t && t <= self.t_high {
            Ok(&self.high)
        } else {
            Err(ThermoError::NoCoefficientsFound {
                temperature: t,
                range: format!("{} - {} - {}", self.t_low, self.t_mid, self.t_high),
            })
        }
    }
    /// Cp, kcal/(mol K)
    pub fn heat_capacity(&self, t: f64) -> Result<f64, ThermoError> {
        Ok(Cp(t, self.extract_coefficients(t)?))
    }
    /// H, kcal/mol
    pub fn enthalpy(&self, t: f64) -> Result<f64, ThermoError> {
        Ok(dh(t, self.extract_coefficients(t)?))
    }
    /// S, kcal/(mol K)
    pub fn entropy(&self, t: f64) -> Result<f64, ThermoError> {
        Ok(ds(t, self.extract_coefficients(t)?))
    }
    /// G = H - T*S, kcal/mol
    pub fn gibbs(&self, t: f64) -> Result<f64, ThermoError> {
        Ok(self.enthalpy(t)? - t * self.entropy(t)?)
    }
    /// heat capacity, enthalpy and entropy at t
    #[allow(non_snake_case)]
    pub fn calculate_Cp_dH_dS(&self, t: f64) -> Result<(f64, f64, f64), ThermoError> {
        let a = self.extract_coefficients(t)?;
        Ok((Cp(t, a), dh(t, a), ds(t, a)))
    }
}

/// H, Cp, S and G of one species over a temperature grid; None where the polynomial
/// has no coefficients
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SpeciesThermo {
    pub enthalpy: Vec<Option<f64>>,
    pub heat_capacity: Vec<Option<f64>>,
    pub entropy: Vec<Option<f64>>,
    pub gibbs: Vec<Option<f64>>,
}

/// thermochemistry of every species of a mechanism
pub fn mechanism_thermo(
    polynomials: &BTreeMap<String, NASAdata>,
    temps: &[f64],
) -> BTreeMap<String, SpeciesThermo> {
    let mut thermo = BTreeMap::new();
    for (name, nasa) in polynomials {
        let mut species = SpeciesThermo::default();
        for &t in temps {
            match nasa.calculate_Cp_dH_dS(t) {
                Ok((cp, h, s)) => {
                    species.enthalpy.push(Some(h));
                    species.heat_capacity.push(Some(cp));
                    species.entropy.push(Some(s));
                    species.gibbs.push(Some(h - t * s));
                }
                Err(e) => {
                    warn!("{}: {}", name, e);
                    species.enthalpy.push(None);
                    species.heat_capacity.push(None);
                    species.entropy.push(None);
                    species.gibbs.push(None);
                }
            }
        }
        thermo.insert(name.clone(), species);
    }
    thermo
}

/// one row per temperature: T, H, Cp, S, G
pub fn thermo_to_table(thermo: &SpeciesThermo, temps: &[f64]) -> Table {
    let show = |value: Option<f64>| value.map_or("-".to_string(), |v| format!("{:.4}", v));
    let mut table = Table::new();
    table.add_row(row!["T, K", "H, kcal/mol", "Cp, kcal/mol/K", "S, kcal/mol/K", "G, kcal/mol"]);
    for (i, t) in temps.iter().enumerate() {
        table.add_row(row![
            t,
            show(thermo.enthalpy[i]),
            show(thermo.heat_capacity[i]),
            show(thermo.entropy[i]),
            show(thermo.gibbs[i])
        ]);
    }
    table
}

pub fn pretty_print_thermo(thermo: &BTreeMap<String, SpeciesThermo>, temps: &[f64]) {
    for (species, data) in thermo {
        println!("__________{}__________", species);
        thermo_to_table(data, temps).printstd();
    }
}
