use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use robolint_core::{validate_plugin, Repository, Result};

mod args;
use args::{Cli, Commands, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let root = resolve_root(cli.root);

    let result = match cli.command {
        Some(Commands::Validate { file, json }) => handle_validate(&file, json),
        Some(Commands::ValidateAll) => handle_validate_all(&root),
        Some(Commands::UpdateIndex) => handle_update_index(&root),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            Cli::command().print_help().ok();
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn resolve_root(cli_root: Option<PathBuf>) -> PathBuf {
    if let Some(root) = cli_root {
        return root;
    }

    if let Ok(root) = std::env::var("ROBOLINT_ROOT") {
        return PathBuf::from(root);
    }

    PathBuf::from(".")
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "robolint", &mut io::stdout());
}

fn handle_validate(file: &Path, json: bool) -> Result<ExitCode> {
    if !json {
        println!("{} Validating plugin: {}", "[INFO]".blue().bold(), file.display());
    }

    let validation = validate_plugin(file)?;
    let report = &validation.report;

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(exit_for(report.is_valid()));
    }

    if !report.errors.is_empty() {
        println!("{} Validation failed:", "[ERROR]".red().bold());
        for error in &report.errors {
            println!("  - {error}");
        }
    }

    if !report.warnings.is_empty() {
        println!("{} Warnings:", "[WARN]".yellow().bold());
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }

    if report.is_valid() {
        println!("{} Plugin validation passed!", "[OK]".green().bold());
        if report.warnings.is_empty() {
            println!("{} No warnings found", "[OK]".green().bold());
        }
    }

    Ok(exit_for(report.is_valid()))
}

fn handle_validate_all(root: &Path) -> Result<ExitCode> {
    let repo = Repository::with_root(root);

    println!("{} Validating all plugins...", "[INFO]".blue().bold());

    let manifest = repo.validate_manifest()?;
    if !manifest.report.is_valid() {
        println!("{} Repository validation failed:", "[ERROR]".red().bold());
        for error in &manifest.report.errors {
            println!("  - {error}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let index = repo.load_index()?;

    let mut all_valid = true;
    for file in &index {
        // One broken file must not abort the rest of the sweep.
        match validate_plugin(&repo.plugin_path(file)) {
            Ok(validation) if validation.report.is_valid() => {
                println!("{} {file}: valid", "[OK]".green().bold());
            }
            Ok(validation) => {
                println!(
                    "{} {file}: {} errors",
                    "[ERROR]".red().bold(),
                    validation.report.errors.len()
                );
                for error in &validation.report.errors {
                    println!("    - {error}");
                }
                all_valid = false;
            }
            Err(e) => {
                println!("{} {file}: {e}", "[ERROR]".red().bold());
                all_valid = false;
            }
        }
    }

    if all_valid {
        println!("{} All plugins are valid!", "[OK]".green().bold());
    }

    Ok(exit_for(all_valid))
}

fn handle_update_index(root: &Path) -> Result<ExitCode> {
    println!("{} Updating plugin index...", "[INFO]".blue().bold());

    let repo = Repository::with_root(root);
    let update = repo.update_index()?;

    println!(
        "{} Updated index.json with {} plugins",
        "[OK]".green().bold(),
        update.count()
    );
    if update.manifest_updated {
        println!(
            "{} Updated repository stats: {} plugins",
            "[OK]".green().bold(),
            update.count()
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn exit_for(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
