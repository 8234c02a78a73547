//! Mechanism-level evaluation: every reaction record is evaluated with
//! [`evaluate_reaction`], repeated reaction keys (DUPLICATE channels) are summed, and
//! channels sharing the same reactants give branching ratios.
use crate::Kinetics::kinetics_errors::RateError;
use crate::Kinetics::rate_parameters::{
    MechanismRateMap, PressureKey, RateTable, ReactionKey, ReactionRecord,
};
use crate::Kinetics::reaction_rates::evaluate_reaction;
use crate::Kinetics::units::UnitSpec;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// branching fraction of every channel of a multi-channel reactant group
pub type BranchingRatios = BTreeMap<ReactionKey, RateTable>;
/// total consumption rate of every multi-channel reactant group
pub type TotalRates = BTreeMap<Vec<String>, RateTable>;

/// Union of two rate tables: pressures present in both are summed elementwise, pressures
/// present in only one pass through unchanged.
///
/// # Errors
/// [`RateError::ShapeMismatch`] when a shared pressure has sequences of different length.
pub fn combine_rate_tables(first: &RateTable, second: &RateTable) -> Result<RateTable, RateError> {
    let mut combined = first.clone();
    for (pressure, ks) in second {
        match combined.get_mut(pressure) {
            Some(existing) => {
                if existing.len() != ks.len() {
                    return Err(RateError::ShapeMismatch(format!(
                        "at pressure {} one table has {} values and the other {}",
                        pressure,
                        existing.len(),
                        ks.len()
                    )));
                }
                for (k, other) in existing.iter_mut().zip(ks) {
                    *k += other;
                }
            }
            None => {
                combined.insert(*pressure, ks.clone());
            }
        }
    }
    Ok(combined)
}

/// Rate tables of all channels of a mechanism, DUPLICATE channels summed.
pub fn evaluate_mechanism(
    records: &[ReactionRecord],
    units: &UnitSpec,
    t_ref: f64,
    temps: &[f64],
    pressures: Option<&[f64]>,
) -> Result<MechanismRateMap, RateError> {
    info!(
        "evaluating {} reactions in units {} at {} temperatures",
        records.len(),
        units,
        temps.len()
    );
    let mut rate_map = MechanismRateMap::new();
    // whether every record seen so far under a key carried the DUPLICATE flag
    let mut flagged: BTreeMap<ReactionKey, bool> = BTreeMap::new();
    for record in records {
        let key = record.key();
        let rate_table = evaluate_reaction(record, units, t_ref, temps, pressures)?;
        match rate_map.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(rate_table);
                flagged.insert(key, record.duplicate);
            }
            Entry::Occupied(mut slot) => {
                let all_flagged = flagged.get(&key).copied().unwrap_or(false) && record.duplicate;
                if !all_flagged {
                    warn!(
                        "reaction {} appears more than once without DUPLICATE, rates are summed",
                        key
                    );
                }
                let combined = combine_rate_tables(slot.get(), &rate_table)?;
                slot.insert(combined);
                flagged.insert(key, all_flagged);
            }
        }
    }
    info!(
        "{} reaction records gave {} distinct channels",
        records.len(),
        rate_map.len()
    );
    Ok(rate_map)
}

/// channels grouped by their reactants; only groups with more than one channel are kept
fn multi_channel_groups(rate_map: &MechanismRateMap) -> BTreeMap<Vec<String>, Vec<&ReactionKey>> {
    let mut groups: BTreeMap<Vec<String>, Vec<&ReactionKey>> = BTreeMap::new();
    for key in rate_map.keys() {
        groups.entry(key.reactants.clone()).or_default().push(key);
    }
    groups.retain(|_, channels| channels.len() > 1);
    groups
}

/// pressures present in every channel of a group, in table order
fn shared_pressures(rate_map: &MechanismRateMap, channels: &[&ReactionKey]) -> Vec<PressureKey> {
    rate_map[channels[0]]
        .keys()
        .filter(|pressure| channels.iter().all(|key| rate_map[*key].contains_key(*pressure)))
        .copied()
        .collect()
}

/// Branching ratios of an evaluated mechanism.
///
/// For every reactant group with more than one product channel the total rate is the sum
/// over channels at each pressure, and each channel's fraction is its rate divided by the
/// total. A zero total gives NaN (or Inf) fractions; those are kept as they are.
///
/// Only pressures shared by all channels of a group are used: a plain Arrhenius channel
/// next to a fall-off channel of the same reactants gives ratios at `"high"` alone. A group
/// with no shared pressure is skipped with a warning.
///
/// # Errors
/// [`RateError::ShapeMismatch`] when channels of one group have sequences of different
/// length at a shared pressure.
pub fn branching_ratios_from_map(
    rate_map: &MechanismRateMap,
) -> Result<(BranchingRatios, TotalRates), RateError> {
    let mut branching = BranchingRatios::new();
    let mut totals = TotalRates::new();

    for (reactants, channels) in multi_channel_groups(rate_map) {
        let shared = shared_pressures(rate_map, &channels);
        if shared.is_empty() {
            warn!(
                "no pressure common to all channels of {}, branching skipped",
                reactants.join("+")
            );
            continue;
        }
        for key in &channels {
            if rate_map[*key].len() > shared.len() {
                debug!(
                    "{}: branching uses {} of {} pressures",
                    key,
                    shared.len(),
                    rate_map[*key].len()
                );
            }
        }

        let first = &rate_map[channels[0]];
        let mut total: RateTable = shared
            .iter()
            .map(|pressure| (*pressure, vec![0.0; first[pressure].len()]))
            .collect();
        for key in &channels {
            let table = &rate_map[*key];
            for (pressure, sum) in total.iter_mut() {
                let ks = &table[pressure];
                if sum.len() != ks.len() {
                    return Err(RateError::ShapeMismatch(format!(
                        "channel {} has {} values at pressure {}, expected {}",
                        key,
                        ks.len(),
                        pressure,
                        sum.len()
                    )));
                }
                for (s, k) in sum.iter_mut().zip(ks) {
                    *s += k;
                }
            }
        }
        for key in &channels {
            let table = &rate_map[*key];
            let fractions: RateTable = total
                .iter()
                .map(|(pressure, sums)| {
                    let ratios = table[pressure]
                        .iter()
                        .zip(sums)
                        .map(|(k, sum)| k / sum)
                        .collect();
                    (*pressure, ratios)
                })
                .collect();
            branching.insert((*key).clone(), fractions);
        }
        totals.insert(reactants, total);
    }
    Ok((branching, totals))
}

/// Evaluates the mechanism and returns `(branching ratios, total rates)`.
pub fn branching_ratios(
    records: &[ReactionRecord],
    units: &UnitSpec,
    t_ref: f64,
    temps: &[f64],
    pressures: Option<&[f64]>,
) -> Result<(BranchingRatios, TotalRates), RateError> {
    let rate_map = evaluate_mechanism(records, units, t_ref, temps, pressures)?;
    branching_ratios_from_map(&rate_map)
}
