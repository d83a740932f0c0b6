//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Keep files identical to their canonical copies in a source repository
///
/// Reads `.sync-files.toml` from the current directory or the nearest
/// ancestor up to the repository root. Without a config file there is
/// nothing to do and the command succeeds.
///
/// Examples:
///   sync-files                 # Check for drift (or use the configured mode)
///   sync-files --write         # Overwrite drifted files from the source
///   sync-files --json          # Machine-readable report on stdout
#[derive(Parser, Debug)]
#[command(name = "sync-files")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Overwrite or create local files to match the source
    #[arg(long)]
    pub write: bool,

    /// Use this config file instead of searching for one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, env = "SYNC_FILES_DEBUG")]
    pub debug: bool,
}

impl Cli {
    /// Directory discovery starts from.
    pub fn start_dir(&self) -> std::io::Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Explicit config path; relative paths follow `--dir`.
    pub fn config_path(&self) -> Option<PathBuf> {
        let path = self.config.as_ref()?;
        Some(match &self.dir {
            Some(dir) => dir.join(path),
            None => path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["sync-files"]).unwrap();
        assert!(!cli.write);
        assert!(!cli.json);
        assert!(cli.config.is_none());
        assert!(cli.dir.is_none());
    }

    #[test]
    fn parse_all_flags() {
        let cli = Cli::try_parse_from([
            "sync-files",
            "--write",
            "--json",
            "--config",
            "ci/sync.toml",
            "-C",
            "/work/consumer",
            "-d",
        ])
        .unwrap();
        assert!(cli.write);
        assert!(cli.json);
        assert!(cli.debug);
        assert_eq!(
            cli.config_path(),
            Some(PathBuf::from("/work/consumer/ci/sync.toml"))
        );
        assert_eq!(cli.start_dir().unwrap(), PathBuf::from("/work/consumer"));
    }

    #[test]
    fn absolute_config_ignores_dir() {
        let cli =
            Cli::try_parse_from(["sync-files", "-C", "/a", "--config", "/b/sync.toml"]).unwrap();
        assert_eq!(cli.config_path(), Some(PathBuf::from("/b/sync.toml")));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["sync-files", "--fix"]).is_err());
    }
}
