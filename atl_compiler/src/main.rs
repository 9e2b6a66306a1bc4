use atl_compiler::{logging, pipeline};
use std::env;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize global logging system
    logging::init_global_logging()?;

    // Validate pipeline configuration
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <records.txt>", args[0]);
        eprintln!("       {} --trigger '<definition>' [--canonical]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[1..]);

    match &options.trigger {
        Some(definition) => check_trigger(definition, &options),
        None => match &options.input_path {
            Some(path) => process_record_file(path),
            None => {
                eprintln!("Error: no input given (record file or --trigger)");
                std::process::exit(1);
            }
        },
    }
}

#[derive(Debug, Default)]
struct CliOptions {
    input_path: Option<String>,
    trigger: Option<String>,
    print_canonical: bool,
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--trigger" => {
                if i + 1 < args.len() {
                    options.trigger = Some(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("Warning: --trigger requires a definition string");
                }
            }
            "--canonical" => {
                options.print_canonical = true;
            }
            other if other.starts_with("--") => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            other => {
                options.input_path = Some(other.to_string());
            }
        }
        i += 1;
    }

    options
}

fn print_help(program_name: &str) {
    println!("ATL Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Achievement trigger definition parser, validator and serializer");
    println!();
    println!("USAGE:");
    println!(
        "    {} <records.txt>                    # Check every record in a file",
        program_name
    );
    println!(
        "    {} --trigger '<definition>'         # Check one trigger definition",
        program_name
    );
    println!();
    println!("OPTIONS:");
    println!("    --help          Show this help message");
    println!("    --trigger S     Parse and validate a single trigger definition");
    println!("    --canonical     Also print the canonical serialization");
    println!();
    println!("OUTPUT:");
    println!("    Record files: per-line outcomes plus a cargo-style error summary");
    println!("    Single triggers: the first validation message, or a clean result");
    println!();
    println!("Configuration profile: {}", atl_compiler::config::build_info::source_info());
}

fn check_trigger(
    definition: &str,
    options: &CliOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    match pipeline::process_trigger(definition) {
        Ok(report) => {
            if options.print_canonical {
                println!("canonical: {}", report.canonical);
            }

            match &report.validation {
                Some(error) => {
                    println!(
                        "INVALID: {} ({} group(s), {} condition(s))",
                        error,
                        report.group_count,
                        report.condition_count
                    );
                    std::process::exit(1);
                }
                None => {
                    println!(
                        "OK: {} group(s), {} condition(s)",
                        report.group_count, report.condition_count
                    );
                }
            }
        }
        Err(error) => {
            eprintln!("PARSE FAILED: {}", error);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn process_record_file(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        eprintln!("Error: file not found: {}", path);
        std::process::exit(1);
    }

    println!("Processing record file: {}", path);

    match pipeline::process_record_file(path) {
        Ok(report) => {
            println!();
            println!("Record file summary:");
            println!("  Lines skipped: {}", report.skipped_lines);
            println!("  Records decoded: {}", report.records.len());
            println!("  Undecodable lines: {}", report.failures.len());
            println!("  Invalid triggers: {}", report.invalid_trigger_count());

            for outcome in &report.records {
                if let Some(error) = &outcome.validation {
                    println!(
                        "  line {} (achievement {}): {}",
                        outcome.line_number, outcome.record.id, error
                    );
                }
            }
            for failure in &report.failures {
                println!("  line {}: {}", failure.line_number, failure.error);
            }

            logging::print_cargo_style_summary();

            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("FAILED: {}", error);
            logging::print_cargo_style_summary();
            std::process::exit(1);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_trigger() {
        let args = vec![
            "--trigger".to_string(),
            "0xH1234=5".to_string(),
            "--canonical".to_string(),
        ];

        let options = parse_options(&args);
        assert_eq!(options.trigger.as_deref(), Some("0xH1234=5"));
        assert!(options.print_canonical);
        assert!(options.input_path.is_none());
    }

    #[test]
    fn test_parse_options_file() {
        let args = vec!["records.txt".to_string(), "--unknown".to_string()];

        let options = parse_options(&args);
        assert_eq!(options.input_path.as_deref(), Some("records.txt"));
        assert!(options.trigger.is_none());
        assert!(!options.print_canonical);
    }
}
