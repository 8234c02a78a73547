//! Rate table of one reaction record: the high-pressure Arrhenius evaluation under the
//! `"high"` key, plus the entries of the reaction's single pressure-dependent form.
use crate::Kinetics::kinetics_errors::RateError;
use crate::Kinetics::rate_evaluator::arrhenius;
use crate::Kinetics::rate_parameters::{
    PressureDependentRate, PressureKey, RateTable, ReactionRecord,
};
use crate::Kinetics::units::UnitSpec;
use log::debug;

/// Evaluates one reaction record over the temperature grid (and the pressure grid if the
/// reaction is pressure dependent).
///
/// Form selection follows [`ReactionRecord::pressure_dependence`]: PLOG, then Chebyshev,
/// then a LOW block (Troe when TROE is given, Lindemann otherwise). Raw parameters are
/// normalized with `units`; the record itself is left untouched.
///
/// # Errors
/// [`RateError::Configuration`] when the reaction is pressure dependent and `pressures` is
/// `None`, [`RateError::MalformedInput`] for inconsistent Chebyshev data.
pub fn evaluate_reaction(
    record: &ReactionRecord,
    units: &UnitSpec,
    t_ref: f64,
    temps: &[f64],
    pressures: Option<&[f64]>,
) -> Result<RateTable, RateError> {
    let high = units.normalize(record.high_p_parameters());
    let mut rate_table = RateTable::new();

    if let Some(form) = record.pressure_dependence() {
        debug!("{}: {} rate constants", record.equation, form.form_name());
        let pdep =
            form.pdep_rates(record.high_p_parameters(), units, t_ref, temps, pressures)?;
        rate_table.extend(pdep);
    } else {
        debug!("{}: Arrhenius rate constants", record.equation);
    }
    rate_table.insert(PressureKey::High, arrhenius(&high, t_ref, temps));
    Ok(rate_table)
}
