/*!
 * Command-line interface for projcat
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};

use projcat::config::{Args, Config};
use projcat::report::{ReportFormat, Reporter};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    setup_logging(args.quiet, args.verbose);
    debug!("CLI args parsed: {:?}", args);

    match run_app(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
}

fn run_app(args: Args) -> projcat::Result<()> {
    let quiet = args.quiet;
    let config = Config::from_args(args)?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}")
        {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    let result = projcat::run(&config, Arc::new(progress.clone()));
    progress.finish_and_clear();
    let summary = result?;

    if config.report {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        reporter.print_report(&summary.to_report(&config));
    }

    println!(
        "Aggregated file created at {}",
        config.output_file.display()
    );
    Ok(())
}
