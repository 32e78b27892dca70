//! Command dispatch

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{
    parse, parse_batch, parse_tree, try_parse, ApplicationError, BatchSummary,
};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{expand_path, global_config_path, Settings};
use crate::domain::{MaxRepetitions, ParseOptions};
use crate::tree_traits::TreeNodeConvert;

/// Resolve effective settings: config layers plus CLI flag.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(max) = cli.max_repetitions {
        settings.max_repetitions =
            MaxRepetitions::try_from(max).map_err(|message| ApplicationError::Config { message })?;
    }
    debug!("resolve_settings: {:?}", settings);
    Ok(settings)
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    let settings = resolve_settings(cli)?;
    let options = settings.parse_options();

    match command {
        Commands::Parse { numerals } => cmd_parse(numerals, options),
        Commands::Check { numerals } => cmd_check(numerals, options),
        Commands::Tree { numeral } => cmd_tree(numeral, options),
        Commands::Batch { file } => cmd_batch(file.as_deref(), options),
        Commands::Config { command } => cmd_config(command, cli, &settings),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

#[instrument(level = "debug")]
fn cmd_parse(numerals: &[String], options: ParseOptions) -> CliResult<()> {
    for numeral in numerals {
        let value = parse(numeral, options)?;
        output::info(&value);
    }
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_check(numerals: &[String], options: ParseOptions) -> CliResult<()> {
    let mut invalid = Vec::new();
    for numeral in numerals {
        match try_parse(numeral, options) {
            (true, value) => output::success(&format!("{numeral} = {value}")),
            (false, _) => {
                output::failure(numeral);
                invalid.push(numeral.as_str());
            }
        }
    }
    if invalid.is_empty() {
        return Ok(());
    }
    output::warning(&format!("invalid: {}", invalid.iter().join(", ")));
    Err(CliError::InvalidNumerals {
        invalid: invalid.len(),
        total: numerals.len(),
    })
}

#[instrument(level = "debug")]
fn cmd_tree(numeral: &str, options: ParseOptions) -> CliResult<()> {
    let tree = parse_tree(numeral, options)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_batch(file: Option<&Path>, options: ParseOptions) -> CliResult<()> {
    let lines = match file {
        Some(path) => {
            let path = expand_path(path);
            let f = File::open(&path)
                .map_err(|e| CliError::io(format!("open {}", path.display()), e))?;
            read_lines(BufReader::new(f))?
        }
        None => read_lines(io::stdin().lock())?,
    };

    let entries = parse_batch(&lines, options);
    for entry in &entries {
        match &entry.result {
            Ok(value) => output::info(&format!("{}: {} = {}", entry.line, entry.input, value)),
            Err(e) => output::error(&format!("{}: {}", entry.line, e)),
        }
    }

    let summary = BatchSummary::from_entries(&entries);
    debug!("cmd_batch: {:?}", summary);
    if summary.invalid > 0 {
        return Err(CliError::InvalidNumerals {
            invalid: summary.invalid,
            total: summary.total(),
        });
    }
    Ok(())
}

fn read_lines(reader: impl BufRead) -> CliResult<Vec<String>> {
    reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::io("read input", e))
}

fn cmd_config(command: &ConfigCommands, cli: &Cli, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail(&"global: <no config directory>"),
            }
            if let Some(path) = &cli.config {
                output::detail(&format!("file:   {}", expand_path(path).display()));
            }
        }
    }
    Ok(())
}
