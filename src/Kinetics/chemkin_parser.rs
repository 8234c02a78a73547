//! Reader for the REACTIONS block of a CHEMKIN mechanism.
//!
//! A reaction line holds the equation followed by A, n and Ea. The lines after it until the
//! next reaction line are auxiliary lines of that reaction: `LOW`, `TROE`, `PLOG`, `TCHEB`,
//! `PCHEB`, `CHEB` and `DUP`/`DUPLICATE` are used; third-body efficiencies, `REV`, `FORD`,
//! `RORD` and other keywords are skipped.
use crate::Kinetics::kinetics_errors::ChemkinParseError;
use crate::Kinetics::rate_parameters::{
    Arrhenius, ChebyshevParams, PlogEntry, PlogParams, ReactionRecord, TroeCoefficients,
};
use crate::Kinetics::units::{EnergyUnit, PrefactorUnit, UnitSpec};
use log::{debug, info, warn};
use regex::Regex;
use std::sync::LazyLock;

/// Chebyshev temperature range when TCHEB is not given, K
pub const CHEB_DEFAULT_T_LIMITS: (f64, f64) = (300.0, 2500.0);
/// Chebyshev pressure range when PCHEB is not given, atm
pub const CHEB_DEFAULT_P_LIMITS: (f64, f64) = (0.001, 100.0);

static REACTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<equation>.*=.*?)\s+(?P<A>\S+)\s+(?P<n>\S+)\s+(?P<Ea>\S+)\s*$").unwrap()
});
static AUXILIARY_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<keyword>[^\s/]+)\s*/(?P<values>[^/]*)/").unwrap());
static EQUATION_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<=>|=>|=").unwrap());
static FALLOFF_COLLIDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\+[^)]*\)").unwrap());
static STOICHIOMETRIC_COEFFICIENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<coeff>\d+)(?P<species>[A-Za-z(].*)$").unwrap());

fn strip_comment(line: &str) -> &str {
    match line.find('!') {
        Some(position) => &line[..position],
        None => line,
    }
}

fn is_reactions_header(line: &str) -> bool {
    matches!(
        line.split_whitespace()
            .next()
            .map(|word| word.to_uppercase())
            .as_deref(),
        Some("REACTIONS") | Some("REAC")
    )
}

/// Lines of the REACTIONS block (header and END excluded), comments and blank lines removed.
pub fn reaction_block(mech_str: &str) -> Option<String> {
    let mut lines = mech_str.lines().map(strip_comment);
    lines.find(|line| is_reactions_header(line))?;
    let block: Vec<&str> = lines
        .take_while(|line| !line.trim().to_uppercase().starts_with("END"))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    Some(block.join("\n"))
}

/// Units declared on the REACTIONS line; cal/mole and moles unless stated otherwise.
pub fn reaction_units(mech_str: &str) -> UnitSpec {
    let mut units = UnitSpec::default();
    let Some(header) = mech_str
        .lines()
        .map(strip_comment)
        .find(|line| is_reactions_header(line))
    else {
        return units;
    };
    for word in header.split_whitespace().skip(1) {
        if let Some(ea_unit) = EnergyUnit::from_keyword(word) {
            units.ea_unit = ea_unit;
        } else if let Some(a_unit) = PrefactorUnit::from_keyword(word) {
            units.a_unit = a_unit;
        } else {
            warn!("ignoring '{}' on the REACTIONS line", word);
        }
    }
    units
}

/// Splits a reaction block into one string per reaction record (reaction line plus its
/// auxiliary lines).
pub fn data_strings(block: &str) -> Result<Vec<String>, ChemkinParseError> {
    let mut records: Vec<Vec<&str>> = Vec::new();
    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if REACTION_LINE.is_match(line) {
            records.push(vec![line]);
        } else {
            match records.last_mut() {
                Some(record) => record.push(line),
                None => return Err(ChemkinParseError::OrphanAuxiliaryLine(line.to_string())),
            }
        }
    }
    Ok(records.iter().map(|lines| lines.join("\n")).collect())
}

fn parse_number(token: &str, line: &str) -> Result<f64, ChemkinParseError> {
    // Fortran-style exponents: 1.0D+10
    token
        .replace(['D', 'd'], "E")
        .parse::<f64>()
        .map_err(|_| ChemkinParseError::BadNumber {
            token: token.to_string(),
            line: line.to_string(),
        })
}

fn parse_values(values: &str, line: &str) -> Result<Vec<f64>, ChemkinParseError> {
    values
        .split_whitespace()
        .map(|token| parse_number(token, line))
        .collect()
}

fn expect_count(
    keyword: &str,
    values: &[f64],
    allowed: &[usize],
    line: &str,
) -> Result<(), ChemkinParseError> {
    if allowed.contains(&values.len()) {
        Ok(())
    } else {
        let expected: Vec<String> = allowed.iter().map(|n| n.to_string()).collect();
        Err(ChemkinParseError::WrongValueCount {
            keyword: keyword.to_string(),
            expected: expected.join(" or "),
            found: values.len(),
            line: line.to_string(),
        })
    }
}

/// species names of one side of an equation, in written order
fn side_species(side: &str) -> Vec<String> {
    let side = FALLOFF_COLLIDER.replace_all(side, "");
    let mut species = Vec::new();
    for term in side.split('+').map(str::trim).filter(|t| !t.is_empty()) {
        if term.eq_ignore_ascii_case("M") {
            continue;
        }
        match STOICHIOMETRIC_COEFFICIENT.captures(term) {
            Some(caps) => {
                let name = caps["species"].trim().to_string();
                let count: usize = caps["coeff"].parse().unwrap_or(1);
                species.extend(std::iter::repeat_n(name, count));
            }
            None => species.push(term.to_string()),
        }
    }
    species
}

/// reactant and product names of an equation such as `H + O2 (+M) <=> HO2 (+M)`
pub fn split_equation(equation: &str) -> Result<(Vec<String>, Vec<String>), ChemkinParseError> {
    let sides: Vec<&str> = EQUATION_SEPARATOR.split(equation).collect();
    if sides.len() != 2 {
        return Err(ChemkinParseError::NoEquationSeparator(equation.to_string()));
    }
    Ok((side_species(sides[0]), side_species(sides[1])))
}

/// Parses one reaction record produced by [`data_strings`].
pub fn parse_reaction_record(data_str: &str) -> Result<ReactionRecord, ChemkinParseError> {
    let mut lines = data_str.lines().map(str::trim);
    let first = lines.next().unwrap_or_default();
    let caps = REACTION_LINE
        .captures(first)
        .ok_or_else(|| ChemkinParseError::NoEquationSeparator(first.to_string()))?;
    let equation = caps["equation"].trim().to_string();
    let (reactants, products) = split_equation(&equation)?;
    let high_p = Arrhenius::new(
        parse_number(&caps["A"], first)?,
        parse_number(&caps["n"], first)?,
        parse_number(&caps["Ea"], first)?,
    );

    let mut record = ReactionRecord {
        equation,
        reactants,
        products,
        high_p,
        low_p: None,
        troe: None,
        chebyshev: None,
        plog: None,
        duplicate: false,
    };
    let mut plog_entries: Vec<PlogEntry> = Vec::new();
    let mut cheb_values: Vec<f64> = Vec::new();
    let mut t_limits = None;
    let mut p_limits = None;

    for line in lines {
        for word in line.split_whitespace() {
            let word = word.to_uppercase();
            if word == "DUP" || word == "DUPLICATE" {
                record.duplicate = true;
            }
        }
        for entry in AUXILIARY_ENTRY.captures_iter(line) {
            let keyword = entry["keyword"].to_uppercase();
            match keyword.as_str() {
                "LOW" => {
                    let v = parse_values(&entry["values"], line)?;
                    expect_count("LOW", &v, &[3], line)?;
                    record.low_p = Some(Arrhenius::new(v[0], v[1], v[2]));
                }
                "TROE" => {
                    let v = parse_values(&entry["values"], line)?;
                    expect_count("TROE", &v, &[3, 4], line)?;
                    record.troe = Some(TroeCoefficients::new(v[0], v[1], v[2], v.get(3).copied()));
                }
                "PLOG" => {
                    let v = parse_values(&entry["values"], line)?;
                    expect_count("PLOG", &v, &[4], line)?;
                    plog_entries.push(PlogEntry {
                        pressure: v[0],
                        rate: Arrhenius::new(v[1], v[2], v[3]),
                    });
                }
                "TCHEB" => {
                    let v = parse_values(&entry["values"], line)?;
                    expect_count("TCHEB", &v, &[2], line)?;
                    t_limits = Some((v[0], v[1]));
                }
                "PCHEB" => {
                    let v = parse_values(&entry["values"], line)?;
                    expect_count("PCHEB", &v, &[2], line)?;
                    p_limits = Some((v[0], v[1]));
                }
                "CHEB" => cheb_values.extend(parse_values(&entry["values"], line)?),
                // third-body efficiencies, REV, FORD, RORD, ...
                other => debug!("{}: skipping auxiliary entry {}", record.equation, other),
            }
        }
    }

    if !plog_entries.is_empty() {
        record.plog = Some(PlogParams::new(plog_entries));
    }
    if !cheb_values.is_empty() {
        record.chebyshev = Some(chebyshev_from_values(
            &record.equation,
            &cheb_values,
            t_limits.unwrap_or(CHEB_DEFAULT_T_LIMITS),
            p_limits.unwrap_or(CHEB_DEFAULT_P_LIMITS),
        )?);
    }
    Ok(record)
}

/// CHEB values are the two dimensions followed by the coefficients in row-major order.
/// Rows are cut at the declared column count; a short or long coefficient list is left for
/// the evaluator to reject.
fn chebyshev_from_values(
    equation: &str,
    values: &[f64],
    t_limits: (f64, f64),
    p_limits: (f64, f64),
) -> Result<ChebyshevParams, ChemkinParseError> {
    if values.len() < 2 {
        return Err(ChemkinParseError::WrongValueCount {
            keyword: "CHEB".to_string(),
            expected: "at least 2".to_string(),
            found: values.len(),
            line: equation.to_string(),
        });
    }
    let dimension = |value: f64| -> Result<usize, ChemkinParseError> {
        if value >= 0.0 && value.fract() == 0.0 {
            Ok(value as usize)
        } else {
            Err(ChemkinParseError::BadNumber {
                token: value.to_string(),
                line: equation.to_string(),
            })
        }
    };
    let rows = dimension(values[0])?;
    let cols = dimension(values[1])?;
    let coefficients = &values[2..];
    let alpha_elm = if cols == 0 {
        Vec::new()
    } else {
        coefficients.chunks(cols).map(|row| row.to_vec()).collect()
    };
    Ok(ChebyshevParams {
        t_limits,
        p_limits,
        alpha_dim: (rows, cols),
        alpha_elm,
    })
}

/// Warns once per record declaring more than one of PLOG, CHEB and LOW; the evaluation
/// then uses the first of them. Returns the number of such records.
pub fn warn_ambiguous_forms(records: &[ReactionRecord]) -> usize {
    let mut ambiguous = 0;
    for record in records {
        let declared = record.declared_pressure_forms();
        if declared > 1 {
            warn!(
                "reaction {} declares {} pressure-dependent forms, using the first of PLOG, CHEB, LOW",
                record.equation, declared
            );
            ambiguous += 1;
        }
    }
    ambiguous
}

/// All reaction records of a mechanism, in file order.
pub fn parse_reactions(mech_str: &str) -> Result<Vec<ReactionRecord>, ChemkinParseError> {
    let block = reaction_block(mech_str).ok_or(ChemkinParseError::NoReactionBlock)?;
    let records = data_strings(&block)?
        .iter()
        .map(|data_str| parse_reaction_record(data_str))
        .collect::<Result<Vec<_>, _>>()?;
    warn_ambiguous_forms(&records);
    info!("parsed {} reaction records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kinetics::rate_parameters::PressureDependence;

    #[test]
    fn test_reaction_units_header() {
        let mech = "ELEMENTS H O END\nREACTIONS  KJOULES/MOLE  MOLECULES\nEND\n";
        let units = reaction_units(mech);
        assert_eq!(units.ea_unit, EnergyUnit::KjoulesPerMole);
        assert_eq!(units.a_unit, PrefactorUnit::Molecules);
    }

    #[test]
    fn test_reaction_units_defaults() {
        assert_eq!(reaction_units("REACTIONS\nEND"), UnitSpec::default());
        assert_eq!(reaction_units("REAC KELVINS\nEND").ea_unit, EnergyUnit::Kelvin);
        assert_eq!(reaction_units("no reactions here"), UnitSpec::default());
    }

    #[test]
    fn test_reaction_block_strips_comments() {
        let mech = "SPECIES H O2 END\nREACTIONS ! units follow\nH+O2=O+OH 1.0 0.0 0.0 ! chain branching\n\nEND\n";
        let block = reaction_block(mech).unwrap();
        assert_eq!(block, "H+O2=O+OH 1.0 0.0 0.0");
    }

    #[test]
    fn test_split_equation() {
        let (r, p) = split_equation("H + O2 (+M) <=> HO2 (+M)").unwrap();
        assert_eq!(r, vec!["H", "O2"]);
        assert_eq!(p, vec!["HO2"]);
        let (r, p) = split_equation("2OH=H2O2").unwrap();
        assert_eq!(r, vec!["OH", "OH"]);
        assert_eq!(p, vec!["H2O2"]);
        let (r, p) = split_equation("H+OH+M=>H2O+M").unwrap();
        assert_eq!(r, vec!["H", "OH"]);
        assert_eq!(p, vec!["H2O"]);
        assert!(split_equation("A+B").is_err());
    }

    #[test]
    fn test_orphan_auxiliary_line() {
        let result = data_strings("LOW / 1.0 0.0 0.0 /\nH+O2=HO2 1.0 0.0 0.0");
        assert!(matches!(
            result,
            Err(ChemkinParseError::OrphanAuxiliaryLine(_))
        ));
    }

    #[test]
    fn test_troe_record_with_efficiencies() {
        let data = "H+O2(+M)=HO2(+M) 4.65E12 0.44 0.0\n\
                    LOW / 6.366E20 -1.72 524.8 /\n\
                    TROE / 0.5 1.0E-30 1.0E+30 /\n\
                    H2/2.0/ H2O/14.0/ O2/0.78/";
        let record = parse_reaction_record(data).unwrap();
        assert_eq!(record.reactants, vec!["H", "O2"]);
        assert_eq!(record.low_p, Some(Arrhenius::new(6.366e20, -1.72, 524.8)));
        let troe = record.troe.unwrap();
        assert_eq!(troe.T2, None);
        assert_eq!(troe.T1, 1.0e30);
    }

    #[test]
    fn test_plog_and_duplicate() {
        let data = "CH3+OH=CH2OH+H 1.0 0.0 0.0\n\
                    DUPLICATE\n\
                    PLOG / 10.0 3.0D10 0.0 1000.0 /\n\
                    PLOG / 0.1 1.0D10 0.0 1000.0 /";
        let record = parse_reaction_record(data).unwrap();
        assert!(record.duplicate);
        let plog = record.plog.unwrap();
        assert_eq!(plog.entries[0].pressure, 0.1);
        assert_eq!(plog.entries[1].rate.A, 3.0e10);
    }

    #[test]
    fn test_chebyshev_over_several_lines() {
        let data = "CH4+OH=CH3+H2O 1.0 0.0 0.0\n\
                    TCHEB / 500.0 2000.0 / PCHEB / 0.01 10.0 /\n\
                    CHEB / 2 3 /\n\
                    CHEB / 1.0 2.0 3.0 /\n\
                    CHEB / 4.0 5.0 6.0 /";
        let cheb = parse_reaction_record(data).unwrap().chebyshev.unwrap();
        assert_eq!(cheb.t_limits, (500.0, 2000.0));
        assert_eq!(cheb.p_limits, (0.01, 10.0));
        assert_eq!(cheb.alpha_dim, (2, 3));
        assert_eq!(cheb.alpha_elm, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_chebyshev_default_limits() {
        let data = "A=B 1.0 0.0 0.0\nCHEB / 1 1 7.5 /";
        let cheb = parse_reaction_record(data).unwrap().chebyshev.unwrap();
        assert_eq!(cheb.t_limits, CHEB_DEFAULT_T_LIMITS);
        assert_eq!(cheb.p_limits, CHEB_DEFAULT_P_LIMITS);
        assert_eq!(cheb.alpha_elm, vec![vec![7.5]]);
    }

    #[test]
    fn test_wrong_value_count_and_bad_number() {
        assert!(matches!(
            parse_reaction_record("A=B 1.0 0.0 0.0\nLOW / 1.0 2.0 /"),
            Err(ChemkinParseError::WrongValueCount { .. })
        ));
        assert!(matches!(
            parse_reaction_record("A=B 1.0 zero 0.0"),
            Err(ChemkinParseError::BadNumber { .. })
        ));
    }

    #[test]
    fn test_missing_reaction_block() {
        assert_eq!(
            parse_reactions("SPECIES H END"),
            Err(ChemkinParseError::NoReactionBlock)
        );
    }

    #[test]
    fn test_plog_and_low_on_one_record() {
        let mech = "REACTIONS
CH3+OH=CH2OH+H   1.0E13 0.0 0.0
LOW / 1.0E20 -1.0 0.0 /
PLOG / 1.0 1.0E12 0.0 1000.0 /
PLOG / 10.0 1.0E13 0.0 1000.0 /
CH3+OH=CH2(S)+H2O   1.0E13 0.0 0.0
END";
        let records = parse_reactions(mech).unwrap();
        assert_eq!(records[0].declared_pressure_forms(), 2);
        assert!(matches!(
            records[0].pressure_dependence(),
            Some(PressureDependence::Plog(_))
        ));
        assert_eq!(warn_ambiguous_forms(&records), 1);
    }
}
