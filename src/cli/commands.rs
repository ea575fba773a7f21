//! Command dispatch

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::session::Session;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = effective_settings(cli)?;
    match &cli.command {
        None | Some(Commands::Repl) => repl(&settings),
        Some(Commands::Run { script }) => run_script(&settings, script),
        Some(Commands::Config { command }) => config_command(command, &settings),
        Some(Commands::Completion { shell }) => {
            print_completions(*shell);
            Ok(())
        }
    }
}

/// Loaded settings with command-line overrides applied on top.
fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(traversal) = cli.traversal {
        settings.traversal = traversal;
    }
    if let Some(renderer) = cli.renderer {
        settings.renderer = renderer;
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

#[instrument(skip(settings))]
fn repl(settings: &Settings) -> CliResult<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout();
    Session::new(settings).run(stdin.lock(), &mut stdout, interactive)
}

#[instrument(skip(settings))]
fn run_script(settings: &Settings, script: &Path) -> CliResult<()> {
    let reader = BufReader::new(File::open(script)?);
    let mut stdout = io::stdout();
    Session::new(settings).run(reader, &mut stdout, false)
}

fn config_command(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("<no config directory>"),
        },
        ConfigCommands::Init => {
            let path = Settings::default().write_global()?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
