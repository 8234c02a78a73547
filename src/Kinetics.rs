/// Errors of the rate engine (`RateError`) and of the reaction-block reader (`ChemkinParseError`)
pub mod kinetics_errors;
/// Data model: Arrhenius triples, PLOG/Chebyshev/Troe/Lindemann parameter sets, reaction records,
/// pressure-keyed rate tables and the mechanism rate map.
pub mod rate_parameters;
/// eng
/// Conversion of activation energies (cal/mole, kcal/mole, joules/mole, kjoules/mole, kelvin) and
/// pre-exponential factors (moles, molecules) into kcal/mole and mole-based units.
/// Physical constants (gas constant, Avogadro's number) live here as well.
pub mod units;
/// Numerical kernels of the functional forms: modified Arrhenius, PLOG interpolation,
/// Lindemann and Troe fall-off, Chebyshev expansion
pub mod rate_kernels;
/// One evaluation function per functional form, plus validation of the inputs
/// (pressure grid present, Chebyshev shape consistent)
pub mod rate_evaluator;
/// Rate table of one reaction record.
///
///  # Examples
/// ```
/// use KiRates::Kinetics::rate_parameters::{Arrhenius, PressureKey, ReactionRecord};
/// use KiRates::Kinetics::reaction_rates::evaluate_reaction;
/// use KiRates::Kinetics::units::UnitSpec;
/// let mut record = ReactionRecord::elementary(&["H", "O2"], &["HO2"], Arrhenius::new(4.65e12, 0.44, 0.0));
/// record.low_p = Some(Arrhenius::new(6.366e20, -1.72, 524.8));
/// let temps = [500.0, 1000.0, 1500.0, 2000.0];
/// let pressures = [1.0, 5.0, 10.0];
/// let table = evaluate_reaction(&record, &UnitSpec::default(), 1.0, &temps, Some(&pressures)).unwrap();
/// assert_eq!(table.len(), 4);
/// assert!(table.contains_key(&PressureKey::High));
/// ```
pub mod reaction_rates;
/// eng
/// Evaluation of a whole mechanism: every record is evaluated, records with the same
/// reactants and products (DUPLICATE reactions) are summed into one channel, and channels
/// sharing reactants give branching ratios and total consumption rates.
///
///  # Examples
/// ```
/// use KiRates::Kinetics::chemkin_parser::{parse_reactions, reaction_units};
/// use KiRates::Kinetics::mechanism_rates::{branching_ratios, evaluate_mechanism};
/// let mech = "REACTIONS CAL/MOLE MOLES
/// H+O2=O+OH   3.5E15 -0.4 16600.0
/// DUP
/// H+O2=O+OH   1.0E13  0.0 15000.0
/// DUP
/// H+O2=H2+O   1.0E12  0.0 30000.0
/// END";
/// let records = parse_reactions(mech).unwrap();
/// let units = reaction_units(mech);
/// let temps = [1000.0, 2000.0];
/// let rates = evaluate_mechanism(&records, &units, 1.0, &temps, None).unwrap();
/// assert_eq!(rates.len(), 2);
/// let (branching, totals) = branching_ratios(&records, &units, 1.0, &temps, None).unwrap();
/// assert_eq!(branching.len(), 2);
/// assert_eq!(totals.len(), 1);
/// ```
pub mod mechanism_rates;
/// Reader of the REACTIONS block of CHEMKIN mechanism files
pub mod chemkin_parser;
/// prettytable output and JSON export
pub mod rates_output;
