///////////////////////////TESTING////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use crate::Thermodynamics::NASAdata::{NASAdata, ThermoError, mechanism_thermo, thermo_to_table};
    use crate::Thermodynamics::thermo_parser::{parse_entry, parse_thermo, thermo_block};
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    const THERMO: &str = "\
THERMO ALL
   300.000  1000.000  5000.000
! hydrogen, GRI-Mech 3.0
H2                TPIS78H   2               G   200.000  3500.000  1000.000    1
 3.33727920E+00-4.94024731E-05 4.99456778E-07-1.79566394E-10 2.00255376E-14    2
-9.50158922E+02-3.20502331E+00 2.34433112E+00 7.98052075E-03-1.94781510E-05    3
 2.01572094E-08-7.37611761E-12-9.17935173E+02 6.83010238E-01                   4
AR                120186AR  1               G   300.000  5000.000              1
 0.02500000E+02 0.00000000E+00 0.00000000E+00 0.00000000E+00 0.00000000E+00    2
-0.07453750E+04 0.04366000E+02 0.02500000E+02 0.00000000E+00 0.00000000E+00    3
 0.00000000E+00 0.00000000E+00-0.07453750E+04 0.04366000E+02                   4
END
";

    fn h2() -> NASAdata {
        NASAdata::new(
            "H2",
            (200.0, 1000.0, 3500.0),
            [
                2.34433112E+00,
                7.98052075E-03,
                -1.94781510E-05,
                2.01572094E-08,
                -7.37611761E-12,
                -9.17935173E+02,
                6.83010238E-01,
            ],
            [
                3.33727920E+00,
                -4.94024731E-05,
                4.99456778E-07,
                -1.79566394E-10,
                2.00255376E-14,
                -9.50158922E+02,
                -3.20502331E+00,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_h2_at_room_temperature() {
        let nasa = h2();
        assert_relative_eq!(nasa.heat_capacity(298.15).unwrap(), 6.892013e-3, max_relative = 1e-6);
        assert_relative_eq!(nasa.entropy(298.15).unwrap(), 3.1233334e-2, max_relative = 1e-6);
        // H2 is a reference element
        assert!(nasa.enthalpy(298.15).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_polynomials_meet_at_t_mid() {
        let nasa = h2();
        let (cp_low, h_low, s_low) = nasa.calculate_Cp_dH_dS(1000.0).unwrap();
        let (cp_high, h_high, s_high) = nasa.calculate_Cp_dH_dS(1000.0 + 1e-9).unwrap();
        assert_relative_eq!(cp_low, cp_high, max_relative = 1e-6);
        assert_relative_eq!(h_low, h_high, max_relative = 1e-6);
        assert_relative_eq!(s_low, s_high, max_relative = 1e-6);
    }

    #[test]
    fn test_gibbs_is_h_minus_ts() {
        let nasa = h2();
        let t = 2000.0;
        let g = nasa.gibbs(t).unwrap();
        assert_relative_eq!(
            g,
            nasa.enthalpy(t).unwrap() - t * nasa.entropy(t).unwrap(),
            epsilon = 1e-12
        );
        assert_relative_eq!(nasa.enthalpy(t).unwrap(), 12.653279, max_relative = 1e-6);
    }

    #[test]
    fn test_range_limits_are_inclusive() {
        let nasa = h2();
        assert!(nasa.extract_coefficients(200.0).is_ok());
        assert!(nasa.extract_coefficients(3500.0).is_ok());
        assert_eq!(nasa.extract_coefficients(1000.0).unwrap(), &nasa.low);
        assert!(matches!(
            nasa.extract_coefficients(3600.0),
            Err(ThermoError::NoCoefficientsFound {
                temperature: 3600.0,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_temperature_range() {
        let result = NASAdata::new("X", (1000.0, 300.0, 5000.0), [0.0; 7], [0.0; 7]);
        assert!(matches!(
            result,
            Err(ThermoError::InvalidTemperatureRange { .. })
        ));
    }

    #[test]
    fn test_mechanism_thermo_marks_missing_points() {
        let mut polynomials = BTreeMap::new();
        polynomials.insert("H2".to_string(), h2());
        let temps = [100.0, 500.0, 4000.0];
        let thermo = mechanism_thermo(&polynomials, &temps);
        let h2_thermo = &thermo["H2"];
        assert_eq!(h2_thermo.enthalpy[0], None);
        assert!(h2_thermo.heat_capacity[1].is_some());
        assert_eq!(h2_thermo.gibbs[2], None);
        // header plus one row per temperature
        assert_eq!(thermo_to_table(h2_thermo, &temps).len(), 4);
    }

    #[test]
    fn test_parse_thermo_block() {
        assert_eq!(thermo_block(THERMO).unwrap().len(), 9);
        let polynomials = parse_thermo(THERMO).unwrap();
        assert_eq!(polynomials.len(), 2);
        assert_eq!(polynomials["H2"], h2());
        // Tmid blank in the entry: taken from the default temperature line
        let ar = &polynomials["AR"];
        assert_eq!((ar.t_low, ar.t_mid, ar.t_high), (300.0, 1000.0, 5000.0));
        assert_relative_eq!(ar.heat_capacity(1500.0).unwrap(), 2.5 * 1.98720425864083e-3, epsilon = 1e-15);
    }

    #[test]
    fn test_no_thermo_block_gives_empty_map() {
        assert!(parse_thermo("REACTIONS\nEND").unwrap().is_empty());
    }

    #[test]
    fn test_truncated_entry() {
        let lines = [
            "H2                TPIS78H   2               G   200.000  3500.000  1000.000    1",
            " 3.33727920E+00-4.94024731E-05 4.99456778E-07-1.79566394E-10 2.00255376E-14    2",
        ];
        assert!(matches!(
            parse_entry(&lines, None),
            Err(ThermoError::MalformedEntry { .. })
        ));
    }
}
