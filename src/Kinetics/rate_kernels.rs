//! Dense numerical kernels for the rate-constant functional forms. All functions work on
//! parameters already normalized to kcal/mole and mole-based A-factors and return
//! vectors aligned with the temperature grid. Nothing here checks for overflow: very
//! large activation energies at low temperatures give 0.0, large negative ones give Inf,
//! divisions by zero give Inf/NaN, and callers receive those values unchanged.
use crate::Kinetics::rate_parameters::{Arrhenius, PressureKey, RateTable, TroeCoefficients};
use crate::Kinetics::units::{RC_CM3_ATM, RC_KCAL};
use log::warn;
use nalgebra::{DMatrix, DVector};

/////////////////////////ARRHENIUS///////////////////////////////////////////////////////////////
/// k = A*(T/Tref)^n*exp(-Ea/(R*T)) at one temperature
pub fn arrhenius_k(params: &Arrhenius, t_ref: f64, temp: f64) -> f64 {
    // (T/Tref)^0 is 1 even where the ratio is 0 or not finite
    let temperature_factor = if params.n == 0.0 {
        1.0
    } else {
        (temp / t_ref).powf(params.n)
    };
    params.A * temperature_factor * f64::exp(-params.Ea / (RC_KCAL * temp))
}

/// Arrhenius rate constants over the temperature grid
pub fn arrhenius_ks(params: &Arrhenius, t_ref: f64, temps: &[f64]) -> Vec<f64> {
    temps
        .iter()
        .map(|temp| arrhenius_k(params, t_ref, *temp))
        .collect()
}

/// sum of several Arrhenius expressions (PLOG lines repeated at one pressure)
pub fn summed_arrhenius_ks(params: &[Arrhenius], t_ref: f64, temps: &[f64]) -> Vec<f64> {
    let mut ks = vec![0.0; temps.len()];
    for p in params {
        for (k, ki) in ks.iter_mut().zip(arrhenius_ks(p, t_ref, temps)) {
            *k += ki;
        }
    }
    ks
}
/////////////////////////PLOG///////////////////////////////////////////////////////////////
/// PLOG rate constants at the requested pressures.
/// `levels` are distinct table pressures in ascending order with their Arrhenius sets.
/// Between two table pressures ln k is linear in ln P; outside the table the closest
/// pressure's rate is used.
pub fn plog_table(
    levels: &[(f64, Vec<Arrhenius>)],
    t_ref: f64,
    pressures: &[f64],
    temps: &[f64],
) -> RateTable {
    let level_ks: Vec<Vec<f64>> = levels
        .iter()
        .map(|(_, params)| summed_arrhenius_ks(params, t_ref, temps))
        .collect();
    let table_pressures: Vec<f64> = levels.iter().map(|(p, _)| *p).collect();

    let mut rate_table = RateTable::new();
    if levels.is_empty() {
        return rate_table;
    }
    for &pressure in pressures {
        let location = table_pressures.binary_search_by(|v| v.total_cmp(&pressure));
        let ks = match location {
            Ok(i) => level_ks[i].clone(),
            Err(i) if i > 0 && i < table_pressures.len() => {
                let (p_low, p_high) = (table_pressures[i - 1], table_pressures[i]);
                let weight = (pressure.ln() - p_low.ln()) / (p_high.ln() - p_low.ln());
                level_ks[i - 1]
                    .iter()
                    .zip(level_ks[i].iter())
                    .map(|(k_low, k_high)| log_interpolate(*k_low, *k_high, weight))
                    .collect()
            }
            Err(i) => {
                let closest = if i == 0 { 0 } else { table_pressures.len() - 1 };
                warn!(
                    "pressure {} atm is outside the PLOG table [{}, {}], using rates at {} atm",
                    pressure,
                    table_pressures[0],
                    table_pressures[table_pressures.len() - 1],
                    table_pressures[closest]
                );
                level_ks[closest].clone()
            }
        };
        rate_table.insert(PressureKey::atm(pressure), ks);
    }
    rate_table
}

fn log_interpolate(k_low: f64, k_high: f64, weight: f64) -> f64 {
    f64::exp(k_low.ln() + weight * (k_high.ln() - k_low.ln()))
}
/////////////////////////FALLOFF///////////////////////////////////////////////////////////////
/// reduced pressure Pr = k0*[M]/k_inf with [M] = P/(R*T), mol/cm^3
fn reduced_pressure(k_high: f64, k_low: f64, pressure: f64, temp: f64) -> f64 {
    let concentration = pressure / (RC_CM3_ATM * temp);
    k_low * concentration / k_high
}

/// Lindemann fall-off: k = k_inf * Pr/(1+Pr)
pub fn lindemann_table(
    highp_ks: &[f64],
    lowp_ks: &[f64],
    pressures: &[f64],
    temps: &[f64],
) -> RateTable {
    let mut rate_table = RateTable::new();
    for &pressure in pressures {
        let ks = temps
            .iter()
            .enumerate()
            .map(|(i, temp)| {
                let p_r = reduced_pressure(highp_ks[i], lowp_ks[i], pressure, *temp);
                highp_ks[i] * (p_r / (1.0 + p_r))
            })
            .collect();
        rate_table.insert(PressureKey::atm(pressure), ks);
    }
    rate_table
}

/// centering factor Fcent = (1-a)exp(-T/T***) + a*exp(-T/T*) [+ exp(-T**/T)]
#[allow(non_snake_case)]
pub fn troe_f_cent(troe: &TroeCoefficients, temp: f64) -> f64 {
    let A = troe.alpha;
    let mut F_c = (1.0 - A) * f64::exp(-temp / troe.T3) + A * f64::exp(-temp / troe.T1);
    if let Some(T_2) = troe.T2 {
        F_c += f64::exp(-T_2 / temp);
    }
    F_c
}

/// Troe broadening factor F for reduced pressure Pr
#[allow(non_snake_case)]
pub fn troe_broadening(F_c: f64, P_r: f64) -> f64 {
    let log_F_c = F_c.log10();
    let C: f64 = -0.4 - 0.67 * log_F_c;
    let N: f64 = 0.75 - 1.27 * log_F_c;
    let log_P_r = P_r.log10();
    let f_1: f64 = (log_P_r + C) / (N - 0.14 * (log_P_r + C));
    10.0_f64.powf(log_F_c / (1.0 + f_1.powi(2)))
}

/// Troe fall-off: k = k_inf * Pr/(1+Pr) * F
#[allow(non_snake_case)]
pub fn troe_table(
    highp_ks: &[f64],
    lowp_ks: &[f64],
    pressures: &[f64],
    temps: &[f64],
    troe: &TroeCoefficients,
) -> RateTable {
    let F_cs: Vec<f64> = temps.iter().map(|temp| troe_f_cent(troe, *temp)).collect();
    let mut rate_table = RateTable::new();
    for &pressure in pressures {
        let ks = temps
            .iter()
            .enumerate()
            .map(|(i, temp)| {
                let P_r = reduced_pressure(highp_ks[i], lowp_ks[i], pressure, *temp);
                let F = troe_broadening(F_cs[i], P_r);
                highp_ks[i] * (P_r / (1.0 + P_r)) * F
            })
            .collect();
        rate_table.insert(PressureKey::atm(pressure), ks);
    }
    rate_table
}
/////////////////////////CHEBYSHEV///////////////////////////////////////////////////////////////
/// Chebyshev polynomials T_0(x)..T_{order-1}(x) from the three-term recurrence
pub fn chebyshev_basis(x: f64, order: usize) -> DVector<f64> {
    let mut basis = DVector::<f64>::zeros(order);
    for i in 0..order {
        basis[i] = match i {
            0 => 1.0,
            1 => x,
            _ => 2.0 * x * basis[i - 1] - basis[i - 2],
        };
    }
    basis
}

/// Chebyshev rate constants: log10 k = sum_ij alpha_ij T_i(T~) T_j(P~).
/// `alpha` rows follow temperature order, columns pressure order.
pub fn chebyshev_table(
    alpha: &DMatrix<f64>,
    t_limits: (f64, f64),
    p_limits: (f64, f64),
    pressures: &[f64],
    temps: &[f64],
) -> RateTable {
    let (t_min, t_max) = t_limits;
    let (p_min, p_max) = p_limits;
    let reduced_temp =
        |temp: f64| (2.0 / temp - 1.0 / t_min - 1.0 / t_max) / (1.0 / t_max - 1.0 / t_min);
    let reduced_pres = |pressure: f64| {
        (2.0 * pressure.log10() - p_min.log10() - p_max.log10())
            / (p_max.log10() - p_min.log10())
    };
    if temps.iter().any(|t| *t < t_min || *t > t_max) {
        warn!(
            "temperatures outside the Chebyshev range [{}, {}] K are extrapolated",
            t_min, t_max
        );
    }

    let temp_bases: Vec<DVector<f64>> = temps
        .iter()
        .map(|temp| chebyshev_basis(reduced_temp(*temp), alpha.nrows()))
        .collect();
    let mut rate_table = RateTable::new();
    for &pressure in pressures {
        if pressure < p_min || pressure > p_max {
            warn!(
                "pressure {} atm is outside the Chebyshev range [{}, {}] atm and is extrapolated",
                pressure, p_min, p_max
            );
        }
        let pres_basis = chebyshev_basis(reduced_pres(pressure), alpha.ncols());
        let alpha_p = alpha * pres_basis;
        let ks = temp_bases
            .iter()
            .map(|temp_basis| 10.0_f64.powf(temp_basis.dot(&alpha_p)))
            .collect();
        rate_table.insert(PressureKey::atm(pressure), ks);
    }
    rate_table
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arrhenius_at_reference_temperature() {
        for n in [0.0, 1.7, -2.3] {
            let params = Arrhenius::new(5.0e12, n, 10.0);
            let k = arrhenius_k(&params, 1000.0, 1000.0);
            assert_eq!(k, 5.0e12 * f64::exp(-10.0 / (RC_KCAL * 1000.0)));
        }
    }

    #[test]
    fn test_arrhenius_zero_exponent_with_zero_reference_ratio() {
        let params = Arrhenius::new(2.0, 0.0, 0.0);
        // T/Tref would be inf here; the n = 0 factor stays 1
        assert_eq!(arrhenius_k(&params, 0.0, 300.0), 2.0);
    }

    #[test]
    fn test_arrhenius_underflow_is_kept() {
        let params = Arrhenius::new(1.0e13, 0.0, 1.0e6);
        let ks = arrhenius_ks(&params, 1.0, &[10.0]);
        assert_eq!(ks[0], 0.0);
    }

    #[test]
    fn test_arrhenius_overflow_is_kept() {
        let params = Arrhenius::new(1.0e13, 0.0, -1.0e6);
        let ks = arrhenius_ks(&params, 1.0, &[10.0, 1.0e9]);
        assert!(ks[0].is_infinite() && ks[0] > 0.0);
        assert!(ks[1].is_finite());
    }

    #[test]
    fn test_plog_exact_between_and_outside() {
        let levels = vec![
            (1.0, vec![Arrhenius::new(1.0e10, 0.0, 0.0)]),
            (100.0, vec![Arrhenius::new(1.0e12, 0.0, 0.0)]),
        ];
        let table = plog_table(&levels, 1.0, &[0.1, 1.0, 10.0, 1000.0], &[1000.0]);
        assert_relative_eq!(table[&PressureKey::atm(0.1)][0], 1.0e10, max_relative = 1e-12);
        assert_relative_eq!(table[&PressureKey::atm(1.0)][0], 1.0e10, max_relative = 1e-12);
        // halfway in ln P is halfway in ln k
        assert_relative_eq!(table[&PressureKey::atm(10.0)][0], 1.0e11, max_relative = 1e-9);
        assert_relative_eq!(table[&PressureKey::atm(1000.0)][0], 1.0e12, max_relative = 1e-12);
    }

    #[test]
    fn test_lindemann_limits() {
        let temps = [1000.0];
        let high = [1.0e13];
        let low = [1.0e16];
        let table = lindemann_table(&high, &low, &[1.0e-9, 1.0e9], &temps);
        let k_low_p = table[&PressureKey::atm(1.0e-9)][0];
        let k_high_p = table[&PressureKey::atm(1.0e9)][0];
        let m = 1.0e-9 / (RC_CM3_ATM * 1000.0);
        assert_relative_eq!(k_low_p, 1.0e16 * m, max_relative = 1e-6);
        assert_relative_eq!(k_high_p, 1.0e13, max_relative = 1e-6);
    }

    #[test]
    fn test_troe_f_cent_three_and_four_parameters() {
        let three = TroeCoefficients::new(0.5, 100.0, 1000.0, None);
        let four = TroeCoefficients::new(0.5, 100.0, 1000.0, Some(5000.0));
        let t = 800.0;
        let expected3 = 0.5 * f64::exp(-t / 100.0) + 0.5 * f64::exp(-t / 1000.0);
        assert_relative_eq!(troe_f_cent(&three, t), expected3, epsilon = 1e-14);
        assert_relative_eq!(
            troe_f_cent(&four, t),
            expected3 + f64::exp(-5000.0 / t),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_troe_with_unit_f_cent_equals_lindemann() {
        // Fcent = 1 makes F = 1 at every pressure
        let troe = TroeCoefficients::new(0.0, 1.0e300, 1.0, None);
        let temps = [500.0, 1500.0];
        let high = [1.0e13, 2.0e13];
        let low = [1.0e18, 3.0e18];
        let pressures = [0.1, 1.0, 10.0];
        let lind = lindemann_table(&high, &low, &pressures, &temps);
        let troe_rates = troe_table(&high, &low, &pressures, &temps, &troe);
        for p in pressures {
            for i in 0..temps.len() {
                assert_relative_eq!(
                    troe_rates[&PressureKey::atm(p)][i],
                    lind[&PressureKey::atm(p)][i],
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_chebyshev_basis_matches_cosine_form() {
        let x: f64 = 0.3;
        let basis = chebyshev_basis(x, 5);
        for i in 0..5 {
            assert_relative_eq!(basis[i], (i as f64 * x.acos()).cos(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_chebyshev_constant_fit() {
        let alpha = DMatrix::from_row_slice(1, 1, &[8.0]);
        let table = chebyshev_table(&alpha, (300.0, 2500.0), (0.001, 100.0), &[1.0], &[1000.0]);
        assert_relative_eq!(table[&PressureKey::atm(1.0)][0], 1.0e8, max_relative = 1e-12);
    }

    #[test]
    fn test_chebyshev_reduced_coordinates_at_limits() {
        // log10 k = a00 + a10*T~ ; at Tmin T~ = -1, at Tmax T~ = +1
        let alpha = DMatrix::from_row_slice(2, 1, &[10.0, 1.0]);
        let table = chebyshev_table(
            &alpha,
            (300.0, 2500.0),
            (0.001, 100.0),
            &[1.0],
            &[300.0, 2500.0],
        );
        let ks = &table[&PressureKey::atm(1.0)];
        assert_relative_eq!(ks[0], 1.0e9, max_relative = 1e-9);
        assert_relative_eq!(ks[1], 1.0e11, max_relative = 1e-9);
    }
}
