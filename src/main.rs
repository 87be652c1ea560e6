//! License Forge CLI
//!
//! Usage:
//!   license-forge [OPTIONS] <COMMAND>
//!
//! Commands:
//!   list       List all known licenses
//!   generate   Generate license files for a project
//!
//! Options:
//!   --licenses-dir <DIR>  Directory containing license templates
//!   -v, --verbose         Log catalog loading and generation details
//!   -h, --help            Print help

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use license_forge::catalog::CatalogError;
use license_forge::config::{self, ConfigError, Prompter};
use license_forge::{
    generate_all, Catalog, Configuration, Error, OutputSink, ParseError, ProjectConfig,
};

const DEFAULT_LICENSES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/licenses");

#[derive(Parser)]
#[command(name = "license-forge")]
#[command(about = "Generate license files for your projects")]
struct Cli {
    /// Directory containing license templates
    #[arg(
        long,
        global = true,
        env = "LICENSE_FORGE_LICENSES_DIR",
        default_value = DEFAULT_LICENSES_DIR
    )]
    licenses_dir: PathBuf,

    /// Log catalog loading and generation details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List all known licenses
    List,

    /// Generate license files. Run `license-forge list` to get a list of known licenses.
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Project directory holding the configuration file and receiving license files
    #[arg(long, default_value = ".")]
    project_dir: PathBuf,

    /// Do not write the license to a file; output to stdout instead
    #[arg(short, long, conflicts_with = "file")]
    no_file: bool,

    /// License to generate; skips the configuration file and interactive prompts
    #[arg(short, long)]
    license: Option<String>,

    /// License file, relative to the project directory [default: LICENSE]
    #[arg(short, long, requires = "license")]
    file: Option<PathBuf>,

    #[arg(long, requires = "license")]
    copyright_holders: Option<String>,

    /// [default: current year]
    #[arg(long, requires = "license")]
    copyright_year_start: Option<String>,

    /// [default: current year]
    #[arg(long, requires = "license")]
    copyright_year_end: Option<String>,

    #[arg(long, requires = "license")]
    organization: Option<String>,

    #[arg(long, requires = "license")]
    project_name: Option<String>,

    #[arg(long, requires = "license")]
    homepage: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return;
    };

    let from_flags = matches!(&command, Command::Generate(args) if args.license.is_some());
    let result = match command {
        Command::List => list(&cli.licenses_dir),
        Command::Generate(args) => generate(&cli.licenses_dir, args),
    };

    if let Err(e) = result {
        report(&e, from_flags);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "license_forge=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn list(licenses_dir: &Path) -> Result<(), Error> {
    let catalog = Catalog::load(licenses_dir)?;
    println!("{}", catalog.listing());
    Ok(())
}

fn generate(licenses_dir: &Path, args: GenerateArgs) -> Result<(), Error> {
    let catalog = Catalog::load(licenses_dir)?;
    let project_dir = std::path::absolute(&args.project_dir).unwrap_or_else(|_| args.project_dir.clone());
    let year = config::current_year();

    let project = match flag_configuration(&args, &project_dir, &year) {
        Some(config) => ProjectConfig::new(vec![config]),
        None => match config::file::load(&project_dir, &catalog)? {
            Some(project) => project,
            None => {
                let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
                let session = prompter.session(&catalog, &project_dir, &year)?;
                if let Some(path) = &session.saved {
                    eprintln!("Saved settings to {}", path.display());
                }
                session.project
            }
        },
    };
    let project = if args.no_file {
        project.to_stdout()
    } else {
        project
    };

    let mut sink = OutputSink::stdout();
    for generated in generate_all(&catalog, &project, &mut sink)? {
        if let Some(note) = generated.note {
            eprintln!("note ({}): {}", generated.spdx_id, note);
        }
    }
    Ok(())
}

/// Build a configuration from command-line flags, when a license was named
fn flag_configuration(args: &GenerateArgs, project_dir: &Path, year: &str) -> Option<Configuration> {
    let spdx_id = args.license.as_ref()?;
    let file = args
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_LICENSE_FILE_NAME));

    Some(Configuration {
        spdx_id: spdx_id.clone(),
        license_file: Some(project_dir.join(file)),
        copyright_year_start: args.copyright_year_start.clone(),
        copyright_year_end: args.copyright_year_end.clone(),
        copyright_holders: args.copyright_holders.clone(),
        project_name: args.project_name.clone(),
        organization: args.organization.clone(),
        homepage: args.homepage.clone(),
    }
    .with_default_years(year))
}

/// Print an error, with source context for syntax errors
fn report(err: &Error, from_flags: bool) {
    let parse_error: Option<&ParseError> = match err {
        Error::Catalog(CatalogError::Parse(e)) | Error::Config(ConfigError::Parse(e)) => Some(e),
        _ => None,
    };
    if let Some(parse_error) = parse_error {
        if let Ok(source) = fs::read_to_string(&parse_error.path) {
            eprint!("{}", parse_error.format(&source));
            return;
        }
    }

    match err.resolve_error().and_then(|e| e.missing_field()) {
        Some(field) if from_flags => {
            eprintln!("Error: Missing license input element: '{}'.", flag_token(field));
        }
        _ => eprintln!("Error: {}", err),
    }
}

/// Render a configuration field as the flag that sets it
fn flag_token(field: &str) -> String {
    format!("--{}", field.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_token() {
        assert_eq!(flag_token("copyright_holders"), "--copyright-holders");
        assert_eq!(flag_token("homepage"), "--homepage");
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flag_configuration_defaults() {
        let cli = Cli::parse_from([
            "license-forge",
            "generate",
            "--license",
            "mit",
            "--copyright-holders",
            "Jane",
        ]);
        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        let config = flag_configuration(&args, Path::new("/p"), "2023").expect("flags");
        assert_eq!(config.license_file, Some(PathBuf::from("/p/LICENSE")));
        assert_eq!(config.copyright_year_start.as_deref(), Some("2023"));
        assert_eq!(config.copyright_holders.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_no_license_flag_means_no_flag_configuration() {
        let cli = Cli::parse_from(["license-forge", "generate", "--no-file"]);
        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert!(args.no_file);
        assert!(flag_configuration(&args, Path::new("/p"), "2023").is_none());
    }
}
