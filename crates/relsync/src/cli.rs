use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(name = "relsync", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Configuration file; a commented default is written if it is missing
    #[arg(short, long, value_name = "FILE", default_value = "relsync.toml")]
    pub config: PathBuf,

    /// Log at debug level on the console
    #[arg(short, long)]
    pub verbose: bool,

    /// Resolve the release and print what would be installed
    #[arg(long, conflicts_with = "minimal")]
    pub dry_run: bool,

    /// Deploy this local minimal archive instead of downloading
    #[arg(long, value_name = "ZIP")]
    pub minimal: Option<PathBuf>,

    /// Local full archive to take dependencies from (with --minimal)
    #[arg(long, value_name = "ZIP", requires = "minimal")]
    pub full: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Update,
    DryRun,
    Local {
        minimal: PathBuf,
        full: Option<PathBuf>,
    },
}

impl App {
    pub fn mode(&self) -> Mode {
        match (&self.minimal, self.dry_run) {
            (Some(minimal), _) => Mode::Local {
                minimal: minimal.clone(),
                full: self.full.clone(),
            },
            (None, true) => Mode::DryRun,
            (None, false) => Mode::Update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        App::command().debug_assert();
    }

    #[test]
    fn test_default_mode() {
        let app = App::try_parse_from(["relsync"]).unwrap();
        assert_eq!(app.config, PathBuf::from("relsync.toml"));
        assert!(!app.verbose);
        assert_eq!(app.mode(), Mode::Update);
    }

    #[test]
    fn test_dry_run() {
        let app = App::try_parse_from(["relsync", "--dry-run", "-c", "other.toml"]).unwrap();
        assert_eq!(app.config, PathBuf::from("other.toml"));
        assert_eq!(app.mode(), Mode::DryRun);
    }

    #[test]
    fn test_local_archives() {
        let app =
            App::try_parse_from(["relsync", "--minimal", "lite.zip", "--full", "full.zip"]).unwrap();
        assert_eq!(
            app.mode(),
            Mode::Local {
                minimal: "lite.zip".into(),
                full: Some("full.zip".into()),
            }
        );
    }

    #[test]
    fn test_full_requires_minimal() {
        assert!(App::try_parse_from(["relsync", "--full", "full.zip"]).is_err());
        assert!(App::try_parse_from(["relsync", "--dry-run", "--minimal", "a.zip"]).is_err());
    }
}
