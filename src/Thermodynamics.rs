/// NASA 7-coefficient polynomials: heat capacity, enthalpy, entropy and Gibbs energy in kcal/mol
///
///  # Examples
/// ```
/// use KiRates::Thermodynamics::NASAdata::NASAdata;
/// let ar = NASAdata::new("AR", (300.0, 1000.0, 5000.0), [2.5, 0.0, 0.0, 0.0, 0.0, -745.375, 4.366], [2.5, 0.0, 0.0, 0.0, 0.0, -745.375, 4.366]).unwrap();
/// let cp = ar.heat_capacity(500.0).unwrap();
/// assert!((cp - 2.5 * 1.98720425864083e-3).abs() < 1e-12);
/// assert!(ar.enthalpy(6000.0).is_err());
/// ```
#[allow(non_snake_case)]
pub mod NASAdata;
/// reader of the THERMO block of CHEMKIN files
pub mod thermo_parser;
#[allow(non_snake_case)]
mod NASAdata_tests;
