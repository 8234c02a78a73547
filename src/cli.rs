/// command line: `KiRates <mechanism> [settings.json]`, or an interactive menu without arguments
pub mod cli_main;
