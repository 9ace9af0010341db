//! makeshift CLI
//!
//! Generates premake5 descriptors from Makefile variables, or dumps the variables of one
//! Makefile as resolved for one configuration.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use makeshift::errors::GenerateError;
use makeshift::{ConfigRegistry, Generator, LibrarySpec, Manifest, MakeshiftResult};
use makeshift_vars::{resolve, Diagnostics, Flags, Makefile, ProcessEnvironment};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "makeshift",
    about = "Generate premake5 descriptors from Makefile variables",
    version
)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write premake5.lua for each library
    Generate(GenerateArgs),

    /// Print the resolved variables of a Makefile
    Vars(VarsArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Directory holding the configuration headers and one directory per library
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// TOML manifest replacing the built-in configurations and libraries
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Print descriptors instead of writing them
    #[arg(long)]
    stdout: bool,

    /// Libraries to generate (default: all)
    libraries: Vec<String>,
}

#[derive(Args)]
struct VarsArgs {
    makefile: PathBuf,

    /// Configuration header providing the flags
    #[arg(long)]
    header: PathBuf,

    /// Only print these variables
    #[arg(long = "name")]
    names: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => generate(args, cli.quiet),
        Commands::Vars(args) => vars(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn generate(args: GenerateArgs, quiet: bool) -> MakeshiftResult<ExitCode> {
    let manifest = match &args.manifest {
        Some(path) => Manifest::load_from(path)?,
        None => Manifest::default(),
    };

    let mut unknown = vec![];
    let libraries: Vec<&LibrarySpec> = if args.libraries.is_empty() {
        manifest.libraries.iter().collect()
    } else {
        args.libraries
            .iter()
            .filter_map(|name| {
                let library = manifest.library(name);
                if library.is_none() {
                    unknown.push(GenerateError::UnknownLibrary(name.clone()));
                }
                library
            })
            .collect()
    };

    for e in &unknown {
        error!("{e}");
    }

    let registry = ConfigRegistry::load(&args.root, &manifest.configs)?;
    let generator = Generator::new(&args.root, &registry, &ProcessEnvironment);
    let summary = generator.run(libraries, !args.stdout);

    for report in &summary.reports {
        if args.stdout {
            print!("{}", report.descriptor);
        }

        let unresolved = report.unresolved_extensions();
        if unresolved > 0 {
            eprintln!(
                "{}: {} classes, {} filter scopes, {unresolved} UNRESOLVED OBJECT(S)",
                report.library, report.classes, report.filter_scopes
            );
        } else if !quiet {
            eprintln!(
                "{}: {} classes, {} filter scopes",
                report.library, report.classes, report.filter_scopes
            );
        }
    }

    for (library, _) in &summary.failures {
        eprintln!("{library}: failed");
    }

    if summary.is_success() && unknown.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn vars(args: VarsArgs) -> MakeshiftResult<ExitCode> {
    let flags = Flags::from_config_header_path(&args.header)?;

    let mut diagnostics = Diagnostics::for_origin(args.makefile.display().to_string());
    let makefile = Makefile::from_path(&args.makefile, &mut diagnostics)?;
    let table = resolve(&makefile, &flags, &ProcessEnvironment, &mut diagnostics);

    if args.names.is_empty() {
        for (key, value) in table.iter() {
            println!("{key} = {value}");
        }
    } else {
        for name in &args.names {
            match table.get_var(name) {
                Some(value) => println!("{name} = {value}"),
                None => println!("{name} is not defined"),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
