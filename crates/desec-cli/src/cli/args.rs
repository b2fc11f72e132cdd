//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Apply a directory of JSON record definitions to a deSEC zone
///
/// Every `*.json` file in the records directory is validated, normalized and
/// written with replace-or-create semantics. Running it twice with the same
/// files changes nothing on the remote side.
///
/// Create a token at: https://desec.io/tokens
#[derive(Parser, Debug)]
#[command(name = "desec-apply")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// deSEC API token (or set DESEC_TOKEN env var)
    #[arg(long, env = "DESEC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Zone to manage [default: is-dev.me]
    #[arg(short, long, env = "DESEC_DOMAIN")]
    pub domain: Option<String>,

    /// API base URL [default: https://desec.io/api/v1]
    #[arg(long, env = "DESEC_API_BASE")]
    pub api_base: Option<String>,

    /// Directory holding the record documents [default: records]
    #[arg(short, long, env = "DESEC_RECORDS_DIR")]
    pub records_dir: Option<PathBuf>,

    /// Config file to read instead of the platform default
    #[arg(short, long, env = "DESEC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Do not try to enable DNSSEC for the zone
    #[arg(long)]
    pub no_dnssec: bool,

    /// Validate and print what would be applied without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_is_valid() {
        let cli = Cli::try_parse_from(["desec-apply"]).unwrap();
        assert!(!cli.dry_run);
        assert!(!cli.no_dnssec);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "desec-apply",
            "--domain",
            "example.dedyn.io",
            "-r",
            "zones",
            "--no-dnssec",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.domain.as_deref(), Some("example.dedyn.io"));
        assert_eq!(cli.records_dir, Some(PathBuf::from("zones")));
        assert!(cli.no_dnssec);
        assert!(cli.dry_run);
    }
}
