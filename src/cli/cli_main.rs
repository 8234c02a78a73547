use crate::Kinetics::kinetics_errors::RateError;
use crate::Kinetics::mechanism_rates::{
    BranchingRatios, TotalRates, branching_ratios_from_map, evaluate_mechanism,
};
use crate::Kinetics::rate_parameters::MechanismRateMap;
use crate::Kinetics::rates_output::{
    pretty_print_branching, pretty_print_rate_map, rates_to_json, save_rates_json, summary_table,
};
use crate::Thermodynamics::NASAdata::{SpeciesThermo, mechanism_thermo, pretty_print_thermo};
use crate::Utils::load_from_file::{LoadData, Mechanism};
use crate::settings::RateSettings;
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::collections::BTreeMap;
use std::error::Error;
use std::io::{self, Write};
use std::path::Path;

const DEFAULT_SETTINGS_FILE: &str = "rate_settings.json";

/// everything computed for one mechanism
#[derive(Debug, Clone)]
pub struct RatesReport {
    pub rate_map: MechanismRateMap,
    pub branching: BranchingRatios,
    pub totals: TotalRates,
    pub thermo: BTreeMap<String, SpeciesThermo>,
}

pub fn init_logger(level: LevelFilter) {
    // a second call only adjusts the level
    if TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        log::set_max_level(level);
    }
}

/// rate map, branching ratios and thermochemistry of a loaded mechanism
pub fn compute_report(
    mechanism: &Mechanism,
    settings: &RateSettings,
) -> Result<RatesReport, RateError> {
    let rate_map = evaluate_mechanism(
        &mechanism.reactions,
        &mechanism.units,
        settings.t_ref,
        &settings.temperatures,
        settings.pressure_grid(),
    )?;
    let (branching, totals) = branching_ratios_from_map(&rate_map)?;
    let thermo = mechanism_thermo(&mechanism.thermo, &settings.temperatures);
    Ok(RatesReport {
        rate_map,
        branching,
        totals,
        thermo,
    })
}

pub fn print_report(report: &RatesReport, temps: &[f64]) {
    println!("\n__________REACTION CHANNELS__________");
    summary_table(&report.rate_map).printstd();
    pretty_print_rate_map(&report.rate_map, temps);
    if !report.totals.is_empty() {
        println!("\n__________BRANCHING RATIOS__________");
        pretty_print_branching(&report.branching, &report.totals, temps);
    }
    if !report.thermo.is_empty() {
        println!("\n__________THERMOCHEMISTRY__________");
        pretty_print_thermo(&report.thermo, temps);
    }
}

/// loads, evaluates, prints and (if configured) writes JSON
pub fn run_mechanism(
    mechanism_file: &str,
    settings: &RateSettings,
) -> Result<RatesReport, Box<dyn Error>> {
    let mechanism = LoadData::new(mechanism_file.to_string()).load_mechanism()?;
    let report = compute_report(&mechanism, settings)?;
    print_report(&report, &settings.temperatures);
    if let Some(output) = &settings.output_json {
        let document = rates_to_json(
            &settings.temperatures,
            &report.rate_map,
            Some((&report.branching, &report.totals)),
        );
        save_rates_json(Path::new(output), &document)?;
        info!("results written to {}", output);
    }
    Ok(report)
}

/// `KiRates <mechanism> [settings.json]`
pub fn run_from_args(args: &[String]) -> Result<(), Box<dyn Error>> {
    let mechanism_file = args.first().ok_or("usage: KiRates <mechanism> [settings.json]")?;
    let settings_file = args.get(1).map(String::as_str).unwrap_or(DEFAULT_SETTINGS_FILE);
    let settings = RateSettings::load(settings_file)?;
    init_logger(settings.level_filter());
    run_mechanism(mechanism_file, &settings)?;
    Ok(())
}

pub fn run_interactive_menu() {
    let mut settings = RateSettings::load(DEFAULT_SETTINGS_FILE).unwrap_or_else(|e| {
        println!("Cannot read {}: {}. Using defaults.", DEFAULT_SETTINGS_FILE, e);
        RateSettings::default()
    });
    init_logger(settings.level_filter());
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => evaluate_from_file(&settings),
            "2" => {
                settings = load_settings_dialog(settings);
                init_logger(settings.level_filter());
            }
            "3" => match settings.save(DEFAULT_SETTINGS_FILE) {
                Ok(()) => println!("Settings written to {}", DEFAULT_SETTINGS_FILE),
                Err(e) => println!("Cannot write settings: {}", e),
            },
            "4" => println!("{:#?}", settings),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn show_main_menu() {
    println!(
        "\x1b[34m\n KiRates: rate constants, branching ratios and NASA thermochemistry\n
    from CHEMKIN mechanisms \n \x1b[0m"
    );
    println!("\x1b[33m1. Evaluate mechanism file\x1b[0m");
    println!("\x1b[33m2. Load settings file\x1b[0m");
    println!("\x1b[33m3. Save current settings as template\x1b[0m");
    println!("\x1b[33m4. Show current settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

fn evaluate_from_file(settings: &RateSettings) {
    print!("\x1b[36mEnter mechanism file path: \x1b[0m");
    let _ = io::stdout().flush();
    let file_path = get_user_input();
    let file_path = file_path.trim();
    if !Path::new(file_path).exists() {
        println!("File not found: {}", file_path);
        return;
    }
    if let Err(e) = run_mechanism(file_path, settings) {
        println!("\x1b[31mError: {}\x1b[0m", e);
    }
}

fn load_settings_dialog(current: RateSettings) -> RateSettings {
    print!("\x1b[36mEnter settings file path: \x1b[0m");
    let _ = io::stdout().flush();
    let file_path = get_user_input();
    match RateSettings::load(file_path.trim()) {
        Ok(settings) => settings,
        Err(e) => {
            println!("Cannot read settings: {}", e);
            current
        }
    }
}

fn get_user_input() -> String {
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        input.clear();
    }
    input
}
