//! Data model of the rate-constant engine: Arrhenius triples, the pressure-dependent
//! parameter sets (PLOG, Chebyshev, Troe, Lindemann), reaction records as they come out of
//! the mechanism parser, and the pressure-keyed rate tables produced by evaluation.
use crate::Kinetics::kinetics_errors::RateError;
use crate::Kinetics::units::UnitSpec;
use enum_dispatch::enum_dispatch;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/////////////////////////ARRHENIUS///////////////////////////////////////////////////////////////
/// modified Arrhenius triple k = A*(T/Tref)^n*exp(-Ea/(R*T))
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct Arrhenius {
    /// pre-exponential factor
    pub A: f64,
    /// temperature exponent
    pub n: f64,
    /// activation energy
    pub Ea: f64,
}

impl Arrhenius {
    #[allow(non_snake_case)]
    pub fn new(A: f64, n: f64, Ea: f64) -> Self {
        Self { A, n, Ea }
    }
}
//________________________________________________________________
/// f64 with total ordering and hashing so pressures can be used as map keys
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct F64Wrapper(pub f64);

impl PartialOrd for F64Wrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for F64Wrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Eq for F64Wrapper {}

impl Hash for F64Wrapper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let bits = self.0.to_bits();
        bits.hash(state);
    }
}
/////////////////////////RATE TABLES///////////////////////////////////////////////////////////////
/// key of a rate table: a pressure in atm or the high-pressure limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PressureKey {
    Pressure(F64Wrapper),
    High,
}

impl PressureKey {
    pub fn atm(pressure: f64) -> Self {
        PressureKey::Pressure(F64Wrapper(pressure))
    }
    pub fn as_pressure(&self) -> Option<f64> {
        match self {
            PressureKey::Pressure(p) => Some(p.0),
            PressureKey::High => None,
        }
    }
}

impl fmt::Display for PressureKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PressureKey::Pressure(p) => write!(f, "{}", p.0),
            PressureKey::High => write!(f, "high"),
        }
    }
}
// pressure keys are written as strings so rate tables serialize as JSON objects
impl Serialize for PressureKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PressureKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PressureKeyVisitor;

        impl<'de> Visitor<'de> for PressureKeyVisitor {
            type Value = PressureKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"high\" or a pressure in atm")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PressureKey, E> {
                if v.eq_ignore_ascii_case("high") {
                    return Ok(PressureKey::High);
                }
                v.trim()
                    .parse::<f64>()
                    .map(PressureKey::atm)
                    .map_err(|_| E::custom(format!("invalid pressure key: {}", v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<PressureKey, E> {
                Ok(PressureKey::atm(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<PressureKey, E> {
                Ok(PressureKey::atm(v as f64))
            }
        }

        deserializer.deserialize_any(PressureKeyVisitor)
    }
}

/// pressure-keyed rate constants; every value vector is aligned with the temperature grid
pub type RateTable = BTreeMap<PressureKey, Vec<f64>>;

/// identity of a reaction channel: order-sensitive on both sides, reverse reactions are distinct
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReactionKey {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
}

impl ReactionKey {
    pub fn new(reactants: Vec<String>, products: Vec<String>) -> Self {
        Self {
            reactants,
            products,
        }
    }
}

impl fmt::Display for ReactionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}=>{}",
            self.reactants.join("+"),
            self.products.join("+")
        )
    }
}

/// rate tables of all channels of a mechanism
pub type MechanismRateMap = BTreeMap<ReactionKey, RateTable>;
/////////////////////////PRESSURE DEPENDENT PARAMETERS///////////////////////////////////////////////
/// one PLOG line: Arrhenius parameters valid at one pressure (atm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlogEntry {
    pub pressure: f64,
    pub rate: Arrhenius,
}

/// PLOG table; the reaction's own high-pressure parameters play the role of the high-pressure entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlogParams {
    pub entries: Vec<PlogEntry>,
}

impl PlogParams {
    /// entries are kept sorted by pressure
    pub fn new(mut entries: Vec<PlogEntry>) -> Self {
        entries.sort_by(|a, b| a.pressure.total_cmp(&b.pressure));
        Self { entries }
    }
    /// distinct pressures with every Arrhenius set given at that pressure
    /// (several lines at one pressure are summed, as CHEMKIN does)
    pub fn levels(&self) -> Vec<(f64, Vec<Arrhenius>)> {
        let mut levels: Vec<(f64, Vec<Arrhenius>)> = Vec::new();
        for entry in &self.entries {
            match levels.last_mut() {
                Some((p, rates)) if *p == entry.pressure => rates.push(entry.rate),
                _ => levels.push((entry.pressure, vec![entry.rate])),
            }
        }
        levels
    }
}

/// Chebyshev fit as declared in the mechanism: limits, declared shape and raw coefficient rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChebyshevParams {
    /// (Tmin, Tmax) in K
    pub t_limits: (f64, f64),
    /// (Pmin, Pmax) in atm
    pub p_limits: (f64, f64),
    /// declared (rows, cols) = (temperature order, pressure order)
    pub alpha_dim: (usize, usize),
    pub alpha_elm: Vec<Vec<f64>>,
}

/// Troe broadening parameters: alpha, T***, T* and optional T**
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct TroeCoefficients {
    pub alpha: f64,
    /// T***
    pub T3: f64,
    /// T*
    pub T1: f64,
    /// T**, absent in the 3-parameter form
    pub T2: Option<f64>,
}

impl TroeCoefficients {
    #[allow(non_snake_case)]
    pub fn new(alpha: f64, T3: f64, T1: f64, T2: Option<f64>) -> Self {
        Self { alpha, T3, T1, T2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TroeParams {
    pub low: Arrhenius,
    pub troe: TroeCoefficients,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LindemannParams {
    pub low: Arrhenius,
}

/// common interface of all pressure-dependent forms
#[enum_dispatch]
pub trait PressureDependentRate {
    /// name used in logs and errors
    fn form_name(&self) -> &'static str;
    /// rate constants keyed by every pressure of the grid
    fn pdep_rates(
        &self,
        high: &Arrhenius,
        units: &UnitSpec,
        t_ref: f64,
        temps: &[f64],
        pressures: Option<&[f64]>,
    ) -> Result<RateTable, RateError>;
}

/// the single pressure-dependent form of a reaction
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch(PressureDependentRate)]
pub enum PressureDependence {
    Plog(PlogParams),
    Chebyshev(ChebyshevParams),
    Troe(TroeParams),
    Lindemann(LindemannParams),
}
/////////////////////////REACTION RECORD///////////////////////////////////////////////////////////////
/// one reaction as supplied by the mechanism parser (or a JSON file with the same layout)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRecord {
    /// equation as written in the mechanism
    #[serde(default)]
    pub equation: String,
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    pub high_p: Arrhenius,
    #[serde(default)]
    pub low_p: Option<Arrhenius>,
    #[serde(default)]
    pub troe: Option<TroeCoefficients>,
    #[serde(default)]
    pub chebyshev: Option<ChebyshevParams>,
    #[serde(default)]
    pub plog: Option<PlogParams>,
    /// DUPLICATE keyword seen
    #[serde(default)]
    pub duplicate: bool,
}

impl ReactionRecord {
    /// record with only high-pressure parameters
    pub fn elementary(reactants: &[&str], products: &[&str], high_p: Arrhenius) -> Self {
        let reactants: Vec<String> = reactants.iter().map(|s| s.to_string()).collect();
        let products: Vec<String> = products.iter().map(|s| s.to_string()).collect();
        Self {
            equation: format!("{}=>{}", reactants.join("+"), products.join("+")),
            reactants,
            products,
            high_p,
            low_p: None,
            troe: None,
            chebyshev: None,
            plog: None,
            duplicate: false,
        }
    }
    pub fn reactant_names(&self) -> &[String] {
        &self.reactants
    }
    pub fn product_names(&self) -> &[String] {
        &self.products
    }
    pub fn high_p_parameters(&self) -> &Arrhenius {
        &self.high_p
    }
    pub fn low_p_parameters(&self) -> Option<&Arrhenius> {
        self.low_p.as_ref()
    }
    pub fn troe_parameters(&self) -> Option<&TroeCoefficients> {
        self.troe.as_ref()
    }
    pub fn chebyshev_parameters(&self) -> Option<&ChebyshevParams> {
        self.chebyshev.as_ref()
    }
    pub fn plog_parameters(&self) -> Option<&PlogParams> {
        self.plog.as_ref()
    }

    pub fn key(&self) -> ReactionKey {
        ReactionKey::new(self.reactants.clone(), self.products.clone())
    }

    /// number of pressure-dependent forms declared (PLOG, CHEB, LOW); a well-formed record has at most one
    pub fn declared_pressure_forms(&self) -> usize {
        [
            self.plog.is_some(),
            self.chebyshev.is_some(),
            self.low_p.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// pressure-dependent form of the reaction; PLOG wins over Chebyshev, Chebyshev over a LOW block.
    /// The mechanism readers warn once about records declaring more than one form.
    pub fn pressure_dependence(&self) -> Option<PressureDependence> {
        match (&self.plog, &self.chebyshev, &self.low_p) {
            (Some(plog), _, _) => Some(plog.clone().into()),
            (None, Some(cheb), _) => Some(cheb.clone().into()),
            (None, None, Some(low)) => match self.troe {
                Some(troe) => Some(TroeParams { low: *low, troe }.into()),
                None => Some(LindemannParams { low: *low }.into()),
            },
            (None, None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_key_order_puts_high_last() {
        let mut table = RateTable::new();
        table.insert(PressureKey::High, vec![3.0]);
        table.insert(PressureKey::atm(10.0), vec![2.0]);
        table.insert(PressureKey::atm(0.1), vec![1.0]);
        let keys: Vec<String> = table.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["0.1", "10", "high"]);
    }

    #[test]
    fn test_rate_table_json_roundtrip_keys() {
        let mut table = RateTable::new();
        table.insert(PressureKey::High, vec![1.0, 2.0]);
        table.insert(PressureKey::atm(5.0), vec![0.5, 1.5]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["high"][1], 2.0);
        assert_eq!(json["5"][0], 0.5);
        let back: RateTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_reaction_key_is_order_sensitive() {
        let k1 = ReactionKey::new(vec!["H".into(), "O2".into()], vec!["HO2".into()]);
        let k2 = ReactionKey::new(vec!["O2".into(), "H".into()], vec!["HO2".into()]);
        let reverse = ReactionKey::new(vec!["HO2".into()], vec!["H".into(), "O2".into()]);
        assert_ne!(k1, k2);
        assert_ne!(k1, reverse);
        assert_eq!(k1.to_string(), "H+O2=>HO2");
    }

    #[test]
    fn test_plog_levels_group_repeated_pressures() {
        let plog = PlogParams::new(vec![
            PlogEntry {
                pressure: 10.0,
                rate: Arrhenius::new(3.0, 0.0, 0.0),
            },
            PlogEntry {
                pressure: 1.0,
                rate: Arrhenius::new(1.0, 0.0, 0.0),
            },
            PlogEntry {
                pressure: 1.0,
                rate: Arrhenius::new(2.0, 0.0, 0.0),
            },
        ]);
        let levels = plog.levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].0, 1.0);
        assert_eq!(levels[0].1.len(), 2);
        assert_eq!(levels[1].0, 10.0);
    }

    #[test]
    fn test_pressure_dependence_priority() {
        let mut record =
            ReactionRecord::elementary(&["H", "O2"], &["HO2"], Arrhenius::new(1e12, 0.5, 0.0));
        assert!(record.pressure_dependence().is_none());
        assert_eq!(record.declared_pressure_forms(), 0);

        record.low_p = Some(Arrhenius::new(1e18, -1.0, 0.0));
        assert!(matches!(
            record.pressure_dependence(),
            Some(PressureDependence::Lindemann(_))
        ));

        record.troe = Some(TroeCoefficients::new(0.5, 100.0, 1000.0, None));
        assert!(matches!(
            record.pressure_dependence(),
            Some(PressureDependence::Troe(_))
        ));

        record.chebyshev = Some(ChebyshevParams {
            t_limits: (300.0, 2500.0),
            p_limits: (0.001, 100.0),
            alpha_dim: (1, 1),
            alpha_elm: vec![vec![1.0]],
        });
        assert!(matches!(
            record.pressure_dependence(),
            Some(PressureDependence::Chebyshev(_))
        ));

        record.plog = Some(PlogParams::new(vec![PlogEntry {
            pressure: 1.0,
            rate: Arrhenius::new(1.0, 0.0, 0.0),
        }]));
        assert!(matches!(
            record.pressure_dependence(),
            Some(PressureDependence::Plog(_))
        ));
        assert_eq!(record.declared_pressure_forms(), 3);
        // resolving again gives the same form
        assert_eq!(record.pressure_dependence(), record.pressure_dependence());
    }

    #[test]
    fn test_record_from_json() {
        let json = serde_json::json!({
            "reactants": ["H", "O2"],
            "products": ["O", "OH"],
            "high_p": {"A": 3.5e15, "n": -0.4, "Ea": 16600.0}
        });
        let record: ReactionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.reactant_names(), &["H".to_string(), "O2".to_string()]);
        assert!(record.low_p_parameters().is_none());
        assert!(!record.duplicate);
    }
}
