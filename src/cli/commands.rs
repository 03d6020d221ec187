//! Command dispatch: one handler per subcommand

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::ArithmeticService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{self, Settings, LOCAL_CONFIG_FILE};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, run with --help".to_string(),
        ));
    };

    // completions must work even when the config is broken
    let load = || -> CliResult<ServiceContainer> {
        let settings = Settings::load(cli.config.as_deref())?;
        debug!(?settings, "settings loaded");
        Ok(ServiceContainer::new(settings))
    };

    match command {
        Commands::Solve { file } => _solve(&load()?.arithmetic, file),
        Commands::Sum { file } => _sum(&load()?.arithmetic, file),
        Commands::Largest { file } => _largest(&load()?.arithmetic, file),
        Commands::Add { left, right } => _add(&load()?.arithmetic, left, right),
        Commands::Reduce { expression, steps } => {
            _reduce(&load()?.arithmetic, expression, *steps)
        }
        Commands::Magnitude { expression } => _magnitude(&load()?.arithmetic, expression),
        Commands::Tree { expression } => _tree(&load()?.arithmetic, expression),
        Commands::Config { command } => _config(&load()?.settings, command, cli),
        Commands::Completion { shell } => _completion(*shell),
    }
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[instrument(skip(service))]
fn _solve(service: &ArithmeticService, file: &Path) -> CliResult<()> {
    let answers = service.solve(file)?;
    output::action("part 1", &answers.part1);
    match answers.part2 {
        Some(part2) => output::action("part 2", &part2),
        None => output::warning("part 2 needs at least two snailfish numbers"),
    }
    Ok(())
}

#[instrument(skip(service))]
fn _sum(service: &ArithmeticService, file: &Path) -> CliResult<()> {
    let numbers = service.read_numbers(file)?;
    let sum = service.final_sum(&numbers)?;
    output::info(&sum);
    output::action("magnitude", &sum.magnitude()?);
    Ok(())
}

#[instrument(skip(service))]
fn _largest(service: &ArithmeticService, file: &Path) -> CliResult<()> {
    let numbers = service.read_numbers(file)?;
    output::info(&service.largest_pair_magnitude(&numbers)?);
    Ok(())
}

#[instrument(skip(service))]
fn _add(service: &ArithmeticService, left: &str, right: &str) -> CliResult<()> {
    let left = service.parse_expression(left)?;
    let right = service.parse_expression(right)?;
    output::info(&service.add(&left, &right)?);
    Ok(())
}

#[instrument(skip(service))]
fn _reduce(service: &ArithmeticService, expression: &str, steps: bool) -> CliResult<()> {
    let mut tree = service.parse_expression(expression)?;
    if steps {
        output::step("start", &tree);
    }
    let report = service.reduce(&mut tree, |action, tree| {
        if steps {
            output::step(&action.to_string(), tree);
        }
    })?;
    if steps {
        output::detail(&format!(
            "{} explodes, {} splits",
            report.explodes, report.splits
        ));
    }
    output::info(&tree);
    Ok(())
}

#[instrument(skip(service))]
fn _magnitude(service: &ArithmeticService, expression: &str) -> CliResult<()> {
    let tree = service.parse_expression(expression)?;
    output::info(&tree.magnitude()?);
    Ok(())
}

#[instrument(skip(service))]
fn _tree(service: &ArithmeticService, expression: &str) -> CliResult<()> {
    let tree = service.parse_expression(expression)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

fn _config(settings: &Settings, command: &ConfigCommands, cli: &Cli) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files (lowest to highest precedence)");
            match config::global_config_path() {
                Some(path) => output::detail(&describe(&path)),
                None => output::detail("global: no config directory available"),
            }
            let local = match &cli.config {
                Some(path) => path.clone(),
                None => Path::new(LOCAL_CONFIG_FILE).to_path_buf(),
            };
            output::detail(&describe(&local));
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                config::global_config_path().ok_or_else(|| {
                    CliError::Usage("no config directory available on this system".to_string())
                })?
            } else {
                Path::new(LOCAL_CONFIG_FILE).to_path_buf()
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    InfraError::io(format!("create {}", parent.display()), e)
                })?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}

fn describe(path: &Path) -> String {
    let status = if path.exists() { "found" } else { "not found" };
    format!("{} ({})", path.display(), status)
}
