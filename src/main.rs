//! onfs CLI - generate preconfigured manifests to run an NFS server on top of OpenEBS

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use onfs::commands::generate::{GenerateOptions, generate as generate_manifest};
use onfs::manifest::params::{DEFAULT_OPENEBS_STORAGE_CLASS, DEFAULT_STORAGE_SIZE};
use onfs::manifest::validate::validate_size;
use onfs::utils::{display_error_and_exit, enhance_error, logger};
use std::io;

#[derive(Parser, Debug)]
#[command(name = "onfs")]
#[command(
    author,
    version,
    about = "onfs is a cli tool for generating preconfigured yamls to run nfs server on top of openebs",
    long_about = None
)]
struct Cli {
    /// Name of the application that has to be deployed on NFS
    #[arg(
        short = 'a',
        long = "appname",
        required_unless_present = "completion"
    )]
    appname: Option<String>,

    /// Space needed, in G
    #[arg(short, long, default_value_t = DEFAULT_STORAGE_SIZE, value_parser = parse_size)]
    size: f64,

    /// Storage class of OpenEBS backing the NFS export
    #[arg(short = 'c', long = "openebsstorageclass", default_value = DEFAULT_OPENEBS_STORAGE_CLASS)]
    openebs_storage_class: String,

    /// Use the application name as-is, even if derived names are not valid Kubernetes names
    #[arg(long)]
    skip_name_validation: bool,

    /// Print the manifest to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completion: Option<Shell>,
}

/// Parse a storage size in GiB, applying the same checks as generation
fn parse_size(value: &str) -> Result<f64, String> {
    let size: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;

    validate_size(size).map_err(|err| err.to_string())?;
    Ok(size)
}

/// Parse arguments, exiting with code 1 on any usage error
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                std::process::exit(1);
            }
        },
    }
}

fn main() {
    let cli = parse_cli();
    logger::init(cli.verbose);

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "onfs", &mut io::stdout());
        return;
    }

    // Guaranteed by `required_unless_present`
    let Some(app_name) = cli.appname else {
        std::process::exit(1);
    };

    let options = GenerateOptions {
        app_name,
        size: cli.size,
        openebs_storage_class: cli.openebs_storage_class,
        skip_name_validation: cli.skip_name_validation,
        dry_run: cli.dry_run,
        output_dir: None,
    };

    if let Err(err) = generate_manifest(options) {
        display_error_and_exit(enhance_error(err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["onfs", "-a", "myapp"]).unwrap();
        assert_eq!(cli.appname.as_deref(), Some("myapp"));
        assert_eq!(cli.size, 5.0);
        assert_eq!(cli.openebs_storage_class, "openebs-jiva-default");
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "onfs",
            "--appname",
            "foo",
            "--size",
            "10",
            "--openebsstorageclass",
            "openebs-cstor",
        ])
        .unwrap();
        assert_eq!(cli.size, 10.0);
        assert_eq!(cli.openebs_storage_class, "openebs-cstor");
    }

    #[test]
    fn test_appname_required() {
        let err = Cli::try_parse_from(["onfs", "-s", "3"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_completion_without_appname() {
        let cli = Cli::try_parse_from(["onfs", "--completion", "bash"]).unwrap();
        assert_eq!(cli.completion, Some(Shell::Bash));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("2.5"), Ok(2.5));
        assert!(parse_size("0").is_err());
        assert!(parse_size("-4").is_err());
        assert!(parse_size("lots").is_err());
        assert!(parse_size("0.004").is_err());
        assert!(parse_size("1.7e308").is_err());
    }
}
