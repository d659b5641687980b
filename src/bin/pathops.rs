// pathops: command-line front end for the fs_op operations.
// Usage: pathops <zip|unzip|rm|cp|mkdir> ...

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pathops::fs_op::{
    copy_path, ensure_dir_with_mode, remove_path, unzip_path_with, zip_path_with, Excludes,
};
use pathops::settings::{default_settings_path, load_settings, Settings};

#[derive(Debug, Parser)]
#[command(name = "pathops", version, about = "Zip, unzip, copy, delete and mkdir, recursively")]
struct Cli {
    /// Settings file (defaults to the per-user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, overriding the settings file (e.g. `debug`)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Zip a file or directory (the directory itself is not a top-level entry)
    Zip { source: PathBuf, destination: PathBuf },
    /// Extract an archive into a directory
    Unzip {
        source: PathBuf,
        destination: PathBuf,
        /// Delete the destination first instead of merging into it
        #[arg(long)]
        overwrite: bool,
    },
    /// Delete a file or directory tree
    #[command(alias = "delete")]
    Rm { path: PathBuf },
    /// Copy a file or directory tree
    #[command(alias = "copy")]
    Cp {
        source: PathBuf,
        destination: PathBuf,
        /// Base name to skip at any depth (repeatable)
        #[arg(long = "exclude", short = 'x')]
        excludes: Vec<String>,
    },
    /// Create a directory and any missing parents
    Mkdir {
        path: PathBuf,
        /// Octal mode, e.g. 750
        #[arg(long, value_parser = parse_mode)]
        mode: Option<u32>,
    },
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0o");
    u32::from_str_radix(digits, 8).map_err(|e| format!("invalid octal mode `{}`: {}", s, e))
}

fn load(cli: &Cli) -> Result<Settings> {
    let path = match &cli.config {
        Some(p) => p.clone(),
        None => match default_settings_path() {
            Some(p) => p,
            None => return Ok(Settings::default()),
        },
    };
    load_settings(&path).with_context(|| format!("loading {}", path.display()))
}

fn run(cli: Cli) -> Result<()> {
    let settings = load(&cli)?;
    let filter = cli.log_level.as_deref().unwrap_or(&settings.log_level);
    pathops::logging::init(filter);

    match cli.command {
        Command::Zip {
            source,
            destination,
        } => {
            zip_path_with(&source, &destination, &settings.pack_options())
                .with_context(|| format!("zip {}", source.display()))?;
        }
        Command::Unzip {
            source,
            destination,
            overwrite,
        } => {
            unzip_path_with(&source, &destination, &settings.unpack_options(overwrite))
                .with_context(|| format!("unzip {}", source.display()))?;
        }
        Command::Rm { path } => {
            remove_path(&path).with_context(|| format!("rm {}", path.display()))?;
        }
        Command::Cp {
            source,
            destination,
            excludes,
        } => {
            copy_path(&source, &destination, &Excludes::new(&excludes))
                .with_context(|| format!("cp {}", source.display()))?;
        }
        Command::Mkdir { path, mode } => {
            ensure_dir_with_mode(&path, mode.unwrap_or(settings.dir_mode))
                .with_context(|| format!("mkdir {}", path.display()))?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pathops: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
