//! Unit normalization of mechanism parameters.
//!
//! Mechanism files declare the units of activation energies and pre-exponential factors once,
//! on the `REACTIONS` line. Evaluation works in kcal/mole and mole-based A-factors, so every
//! Arrhenius block (high-pressure, low-pressure and every PLOG line) is converted with the same
//! [`UnitSpec`] before use. Conversions return new values; records are never modified in place.
use crate::Kinetics::rate_parameters::{Arrhenius, PlogEntry, PlogParams};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Avogadro's number, 1/mol
pub const NAVO: f64 = 6.0221409e+23;
/// gas constant in kcal/(mol K)
pub const RC_KCAL: f64 = 1.98720425864083e-3;
/// gas constant in cm^3 atm/(mol K)
pub const RC_CM3_ATM: f64 = 82.0575;
pub const CAL2KCAL: f64 = 1.0e-3;
pub const J2KCAL: f64 = 1.0 / 4184.0;
pub const KJ2KCAL: f64 = 1.0 / 4.184;
/// an activation "energy" in kelvin times R gives kcal/mol
pub const KEL2KCAL: f64 = RC_KCAL;

/// units of activation energies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    CalPerMole,
    KcalPerMole,
    JoulesPerMole,
    KjoulesPerMole,
    Kelvin,
}

impl EnergyUnit {
    /// factor converting a value in this unit to kcal/mole
    pub fn to_kcal_factor(&self) -> f64 {
        match self {
            EnergyUnit::CalPerMole => CAL2KCAL,
            EnergyUnit::KcalPerMole => 1.0,
            EnergyUnit::JoulesPerMole => J2KCAL,
            EnergyUnit::KjoulesPerMole => KJ2KCAL,
            EnergyUnit::Kelvin => KEL2KCAL,
        }
    }
    /// recognizes CHEMKIN unit keywords (any case); None for anything else
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "cal/mole" | "cal/mol" => Some(EnergyUnit::CalPerMole),
            "kcal/mole" | "kcal/mol" => Some(EnergyUnit::KcalPerMole),
            "joules/mole" | "joules/mol" => Some(EnergyUnit::JoulesPerMole),
            "kjoules/mole" | "kjoules/mol" => Some(EnergyUnit::KjoulesPerMole),
            "kelvin" | "kelvins" => Some(EnergyUnit::Kelvin),
            _ => None,
        }
    }
    /// unrecognized strings pass values through unchanged (factor 1.0, i.e. kcal/mole)
    pub fn from_str_lenient(word: &str) -> Self {
        Self::from_keyword(word).unwrap_or_else(|| {
            warn!(
                "unrecognized energy unit '{}', activation energies are used as given",
                word
            );
            EnergyUnit::KcalPerMole
        })
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            EnergyUnit::CalPerMole => "cal/mole",
            EnergyUnit::KcalPerMole => "kcal/mole",
            EnergyUnit::JoulesPerMole => "joules/mole",
            EnergyUnit::KjoulesPerMole => "kjoules/mole",
            EnergyUnit::Kelvin => "kelvin",
        };
        write!(f, "{}", name)
    }
}

/// units of pre-exponential factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrefactorUnit {
    Moles,
    Molecules,
}

impl PrefactorUnit {
    pub fn to_mole_factor(&self) -> f64 {
        match self {
            PrefactorUnit::Moles => 1.0,
            PrefactorUnit::Molecules => NAVO,
        }
    }
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "moles" | "mole" => Some(PrefactorUnit::Moles),
            "molecules" | "molecule" => Some(PrefactorUnit::Molecules),
            _ => None,
        }
    }
}

impl fmt::Display for PrefactorUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrefactorUnit::Moles => write!(f, "moles"),
            PrefactorUnit::Molecules => write!(f, "molecules"),
        }
    }
}

/// units declared by one mechanism file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub ea_unit: EnergyUnit,
    pub a_unit: PrefactorUnit,
}

impl Default for UnitSpec {
    /// CHEMKIN defaults
    fn default() -> Self {
        Self {
            ea_unit: EnergyUnit::CalPerMole,
            a_unit: PrefactorUnit::Moles,
        }
    }
}

impl UnitSpec {
    pub fn new(ea_unit: EnergyUnit, a_unit: PrefactorUnit) -> Self {
        Self { ea_unit, a_unit }
    }
    /// internal reference units: kcal/mole and moles
    pub fn reference() -> Self {
        Self::new(EnergyUnit::KcalPerMole, PrefactorUnit::Moles)
    }
    /// units from free-form strings, e.g. ("cal/mole", "moles")
    pub fn from_strs(ea_unit: &str, a_unit: &str) -> Self {
        let a_unit = PrefactorUnit::from_keyword(a_unit).unwrap_or_else(|| {
            warn!("unrecognized A-factor unit '{}', assuming moles", a_unit);
            PrefactorUnit::Moles
        });
        Self::new(EnergyUnit::from_str_lenient(ea_unit), a_unit)
    }
    /// Arrhenius parameters expressed in kcal/mole and mole-based A
    pub fn normalize(&self, params: &Arrhenius) -> Arrhenius {
        Arrhenius {
            A: params.A * self.a_unit.to_mole_factor(),
            n: params.n,
            Ea: params.Ea * self.ea_unit.to_kcal_factor(),
        }
    }
    /// every PLOG line normalized independently
    pub fn normalize_plog(&self, plog: &PlogParams) -> PlogParams {
        let entries = plog
            .entries
            .iter()
            .map(|entry| PlogEntry {
                pressure: entry.pressure,
                rate: self.normalize(&entry.rate),
            })
            .collect();
        PlogParams::new(entries)
    }
}

impl fmt::Display for UnitSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.ea_unit, self.a_unit)
    }
}
