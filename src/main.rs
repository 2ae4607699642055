use clap::Parser;
use cnpj_exporter::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(cnpj_exporter::Error::interrupted(
                    "Run interrupted by user".to_string(),
                ))
            }
        }
    });

    match result {
        Ok(_stats) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("CNPJ Exporter - Bulk Registry Lookups with XLSX Export");
    println!("======================================================");
    println!();
    println!("Fetch BrasilAPI registration records for a list of CNPJ identifiers");
    println!("and export the aggregated results as an XLSX workbook.");
    println!();
    println!("USAGE:");
    println!("    cnpj-exporter <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    export      Fetch every identifier and write the workbook (main command)");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Export with default paths (exports/cnpjs.txt -> exports/cnpjs.xlsx):");
    println!("    cnpj-exporter export");
    println!();
    println!("    # Export with custom paths:");
    println!("    cnpj-exporter export --input ids.txt --output companies.xlsx");
    println!();
    println!("    # Preview which identifiers would be fetched:");
    println!("    cnpj-exporter export --dry-run");
    println!();
    println!("For detailed help on any command, use:");
    println!("    cnpj-exporter export --help");
}
