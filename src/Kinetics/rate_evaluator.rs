//! Single-channel rate evaluation: one function per functional form, each taking parameters
//! already normalized to kcal/mole and mole-based A-factors. Pressure-dependent forms need a
//! pressure grid; calling them without one is a caller error ([`RateError::Configuration`]).
//!
//! The [`PressureDependentRate`] implementations below are what the reaction assembler calls:
//! they normalize the raw mechanism parameters with the mechanism's [`UnitSpec`] and then
//! forward to the functions of this module.
use crate::Kinetics::kinetics_errors::RateError;
use crate::Kinetics::rate_kernels::{
    arrhenius_ks, chebyshev_table, lindemann_table, plog_table, troe_table,
};
use crate::Kinetics::rate_parameters::{
    Arrhenius, ChebyshevParams, LindemannParams, PlogParams, PressureDependentRate, RateTable,
    TroeCoefficients, TroeParams,
};
use crate::Kinetics::units::UnitSpec;
use log::debug;
use nalgebra::DMatrix;

fn require_pressures<'a>(
    form: &'static str,
    pressures: Option<&'a [f64]>,
) -> Result<&'a [f64], RateError> {
    pressures.ok_or(RateError::Configuration { form })
}

/// high-pressure (or any plain) Arrhenius rate constants
pub fn arrhenius(params: &Arrhenius, t_ref: f64, temps: &[f64]) -> Vec<f64> {
    arrhenius_ks(params, t_ref, temps)
}

/// PLOG rate constants at every pressure of the grid
pub fn plog(
    params: &PlogParams,
    t_ref: f64,
    pressures: Option<&[f64]>,
    temps: &[f64],
) -> Result<RateTable, RateError> {
    let pressures = require_pressures("PLOG", pressures)?;
    if params.entries.is_empty() {
        return Err(RateError::MalformedInput(
            "PLOG table has no pressure entries".to_string(),
        ));
    }
    Ok(plog_table(&params.levels(), t_ref, pressures, temps))
}

/// declared shape of the Chebyshev coefficients checked against the data, then packed
/// into a matrix
pub fn chebyshev_alpha(params: &ChebyshevParams) -> Result<DMatrix<f64>, RateError> {
    let (rows, cols) = params.alpha_dim;
    if rows == 0 || cols == 0 {
        return Err(RateError::MalformedInput(format!(
            "Chebyshev dimensions must be positive, got {}x{}",
            rows, cols
        )));
    }
    if params.alpha_elm.len() != rows {
        return Err(RateError::MalformedInput(format!(
            "Chebyshev alpha declared as {}x{} but has {} rows",
            rows,
            cols,
            params.alpha_elm.len()
        )));
    }
    if let Some((i, row)) = params
        .alpha_elm
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != cols)
    {
        return Err(RateError::MalformedInput(format!(
            "Chebyshev alpha declared as {}x{} but row {} has {} elements",
            rows,
            cols,
            i,
            row.len()
        )));
    }
    let flat: Vec<f64> = params.alpha_elm.iter().flatten().copied().collect();
    Ok(DMatrix::from_row_slice(rows, cols, &flat))
}

/// Chebyshev rate constants at every pressure of the grid
pub fn chebyshev(
    params: &ChebyshevParams,
    pressures: Option<&[f64]>,
    temps: &[f64],
) -> Result<RateTable, RateError> {
    let pressures = require_pressures("Chebyshev", pressures)?;
    let alpha = chebyshev_alpha(params)?;
    let (t_min, t_max) = params.t_limits;
    let (p_min, p_max) = params.p_limits;
    if !(t_min > 0.0 && t_max > t_min && p_min > 0.0 && p_max > p_min) {
        return Err(RateError::MalformedInput(format!(
            "Chebyshev limits must be positive and increasing, got T [{}, {}] P [{}, {}]",
            t_min, t_max, p_min, p_max
        )));
    }
    Ok(chebyshev_table(
        &alpha,
        params.t_limits,
        params.p_limits,
        pressures,
        temps,
    ))
}

/// Troe fall-off; the three-parameter form simply has no T**
pub fn troe(
    high: &Arrhenius,
    low: &Arrhenius,
    t_ref: f64,
    pressures: Option<&[f64]>,
    temps: &[f64],
    coefficients: &TroeCoefficients,
) -> Result<RateTable, RateError> {
    let pressures = require_pressures("Troe", pressures)?;
    let highp_ks = arrhenius_ks(high, t_ref, temps);
    let lowp_ks = arrhenius_ks(low, t_ref, temps);
    Ok(troe_table(
        &highp_ks,
        &lowp_ks,
        pressures,
        temps,
        coefficients,
    ))
}

/// Lindemann fall-off
pub fn lindemann(
    high: &Arrhenius,
    low: &Arrhenius,
    t_ref: f64,
    pressures: Option<&[f64]>,
    temps: &[f64],
) -> Result<RateTable, RateError> {
    let pressures = require_pressures("Lindemann", pressures)?;
    let highp_ks = arrhenius_ks(high, t_ref, temps);
    let lowp_ks = arrhenius_ks(low, t_ref, temps);
    Ok(lindemann_table(&highp_ks, &lowp_ks, pressures, temps))
}
/////////////////////////DISPATCH FROM RAW PARAMETERS//////////////////////////////////////////////
impl PressureDependentRate for PlogParams {
    fn form_name(&self) -> &'static str {
        "PLOG"
    }
    fn pdep_rates(
        &self,
        _high: &Arrhenius,
        units: &UnitSpec,
        t_ref: f64,
        temps: &[f64],
        pressures: Option<&[f64]>,
    ) -> Result<RateTable, RateError> {
        debug!("PLOG with {} entries", self.entries.len());
        plog(&units.normalize_plog(self), t_ref, pressures, temps)
    }
}

impl PressureDependentRate for ChebyshevParams {
    fn form_name(&self) -> &'static str {
        "Chebyshev"
    }
    // Chebyshev coefficients fit log10 k directly, no unit conversion applies
    fn pdep_rates(
        &self,
        _high: &Arrhenius,
        _units: &UnitSpec,
        _t_ref: f64,
        temps: &[f64],
        pressures: Option<&[f64]>,
    ) -> Result<RateTable, RateError> {
        chebyshev(self, pressures, temps)
    }
}

impl PressureDependentRate for TroeParams {
    fn form_name(&self) -> &'static str {
        "Troe"
    }
    fn pdep_rates(
        &self,
        high: &Arrhenius,
        units: &UnitSpec,
        t_ref: f64,
        temps: &[f64],
        pressures: Option<&[f64]>,
    ) -> Result<RateTable, RateError> {
        troe(
            &units.normalize(high),
            &units.normalize(&self.low),
            t_ref,
            pressures,
            temps,
            &self.troe,
        )
    }
}

impl PressureDependentRate for LindemannParams {
    fn form_name(&self) -> &'static str {
        "Lindemann"
    }
    fn pdep_rates(
        &self,
        high: &Arrhenius,
        units: &UnitSpec,
        t_ref: f64,
        temps: &[f64],
        pressures: Option<&[f64]>,
    ) -> Result<RateTable, RateError> {
        lindemann(
            &units.normalize(high),
            &units.normalize(&self.low),
            t_ref,
            pressures,
            temps,
        )
    }
}
