use std::path::Path;

use clap::Parser;

use tagver::bump::BumpKind;
use tagver::{bump, check, config, resolver, ui, Result, TagVerError};

#[derive(clap::Parser)]
#[command(
    name = "tagver",
    about = "Derive the project version from git tags and run guarded version bumps"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the version resolved from git tags (or packaged metadata)
    Version {
        #[arg(
            long,
            help = "Verify declared version literals against the resolved version"
        )]
        check: bool,
    },

    /// Bump the version: update sources, create an annotated tag, push it
    Bump {
        #[arg(value_enum, help = "Which component to bump")]
        what: BumpKind,

        #[arg(long, help = "Apply the bump; without this flag nothing is modified")]
        commit: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match run(args) {
        Ok(()) => Ok(()),
        Err(err) if err.is_usage() => {
            // Operator mistakes get a plain message, no backtrace
            ui::display_error(&err.to_string());
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn run(args: Args) -> Result<()> {
    let project_root = std::env::current_dir()?;
    let config = config::load_config(args.config.as_deref(), &project_root)?;

    match args.command {
        Commands::Version { check } => print_version(&config, &project_root, check),
        Commands::Bump { what, commit } => bump::bump(&config, &project_root, what, commit),
    }
}

fn print_version(config: &config::Config, project_root: &Path, check: bool) -> Result<()> {
    let resolved = resolver::resolve(project_root, true)?.ok_or_else(|| {
        TagVerError::usage("Could not determine version from git tags or PKG-INFO")
    })?;

    if resolved.broken {
        return Err(TagVerError::usage(format!(
            "Invalid git version tag: {}",
            resolved.text
        )));
    }

    println!("{}", resolved.canonical);

    if check {
        if let Some(warning) = check::verify_declared(&resolved, &config.sources) {
            ui::display_warning(&warning);
        }
    }

    Ok(())
}
