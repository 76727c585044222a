use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use fedsetup_cli::cli;
use fedsetup_cli::commands;
use fedsetup_cli::logging;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let command_name = match args.command {
        cli::Command::Install(_) => "install",
        cli::Command::Check(_) => "check",
        cli::Command::Completions(_) | cli::Command::Version => {
            return run_plain(&args.command);
        }
    };

    logging::init_subscriber(args.verbose, command_name);
    let log = Arc::new(logging::Logger::new(command_name));

    ctrlc::set_handler(|| {
        eprintln!("\ninterrupted");
        std::process::exit(130);
    })
    .ok();

    match args.command {
        cli::Command::Install(ref opts) => commands::install::run(&args.global, opts, &log),
        cli::Command::Check(ref opts) => commands::check::run(&args.global, opts, &log),
        cli::Command::Completions(_) | cli::Command::Version => unreachable!("handled above"),
    }
}

/// Subcommands that print to stdout without the logging pipeline.
fn run_plain(command: &cli::Command) -> Result<()> {
    match command {
        cli::Command::Completions(opts) => {
            let mut cmd = cli::Cli::command();
            clap_complete::generate(opts.shell, &mut cmd, "fedsetup", &mut std::io::stdout());
            Ok(())
        }
        cli::Command::Version => {
            let version = option_env!("FEDSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("fedsetup {version}");
            Ok(())
        }
        cli::Command::Install(_) | cli::Command::Check(_) => unreachable!("handled by caller"),
    }
}
