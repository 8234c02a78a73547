use KiRates::cli::cli_main::{run_from_args, run_interactive_menu};

pub fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive_menu();
    } else if let Err(e) = run_from_args(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
