//! Command-line arguments and their resolution into [`ReleaseOptions`].

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::cli::orchestration::ReleaseOptions;
use crate::config::Config;
use crate::environment::Environment;
use crate::error::Result;
use crate::manifest::LineEnding;

/// Multi-letter short flags accepted for compatibility, and their long form.
const LEGACY_SHORT_FLAGS: &[(&str, &str)] = &[("-sv", "--skip-version")];

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "helleaser",
    about = "Bump the package version, build, commit and merge a release"
)]
pub struct Args {
    #[arg(long, value_name = "BRANCH", help = "Branch to merge into after the release commit")]
    pub merge: Option<String>,

    #[arg(
        long,
        value_name = "SCRIPT",
        help = "Custom build script to run before release, defaults to 'build'"
    )]
    pub build: Option<String>,

    #[arg(short, long, help = "Use staging environment, otherwise production")]
    pub staging: bool,

    #[arg(
        long,
        help = "Do not generate a new version, release the current manifest version [short: -sv]"
    )]
    pub skip_version: bool,

    #[arg(short, long, value_name = "PATH", help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(short, long, help = "Print version information")]
    pub version: bool,
}

/// Rewrites legacy multi-letter short flags to their long form.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            LEGACY_SHORT_FLAGS
                .iter()
                .find(|(short, _)| arg.to_str() == Some(*short))
                .map(|(_, long)| OsString::from(*long))
                .unwrap_or(arg)
        })
        .collect()
}

impl Args {
    /// Parses a full argv (program name first).
    pub fn parse_from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Args::try_parse_from(normalize_legacy_flags(args))
    }

    /// Resolves the run settings: flags first, then configuration, then defaults.
    pub fn into_options(self, config: &Config) -> Result<ReleaseOptions> {
        let environment = if self.staging {
            Environment::Staging
        } else {
            config.release.environment.parse()?
        };

        Ok(ReleaseOptions {
            environment,
            merge_target: self
                .merge
                .or_else(|| config.git.merge_target.clone())
                .filter(|branch| !branch.is_empty()),
            package_manager: config.build.package_manager.clone(),
            build_script: self.build.unwrap_or_else(|| config.build.script.clone()),
            manifest_path: PathBuf::from(&config.release.manifest),
            line_ending: LineEnding::native(),
            git_program: config.git.program.clone(),
            remote: config.git.remote.clone(),
            skip_version: self.skip_version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseError;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Args {
        let argv = std::iter::once("helleaser").chain(args.iter().copied());
        Args::parse_from_args(argv).unwrap()
    }

    #[test]
    fn test_no_arguments() {
        let args = parse(&[]);
        assert!(!args.staging);
        assert!(args.merge.is_none());
        assert!(args.build.is_none());
        assert!(!args.skip_version);
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&["--merge", "main", "--build", "build:staging", "-s", "-sv"]);
        assert_eq!(args.merge.as_deref(), Some("main"));
        assert_eq!(args.build.as_deref(), Some("build:staging"));
        assert!(args.staging);
        assert!(args.skip_version);
        assert!(!args.version);
    }

    #[test]
    fn test_short_version_flag() {
        assert!(parse(&["-v"]).version);
        assert!(parse(&["--version"]).version);
    }

    #[test]
    fn test_normalize_only_rewrites_exact_matches() {
        let normalized = normalize_legacy_flags(["helleaser", "-sv", "--merge", "-svx"]);
        assert_eq!(
            normalized,
            vec![
                OsString::from("helleaser"),
                OsString::from("--skip-version"),
                OsString::from("--merge"),
                OsString::from("-svx"),
            ]
        );
    }

    #[test]
    fn test_help_and_unknown_flags() {
        let help = Args::parse_from_args(["helleaser", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);

        let unknown = Args::parse_from_args(["helleaser", "--no-such-flag"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.git.merge_target = Some("release".to_string());
        config.build.script = "bundle".to_string();

        let options = parse(&["-s", "--merge", "main", "--build", "build:staging"])
            .into_options(&config)
            .unwrap();
        assert_eq!(options.environment, Environment::Staging);
        assert_eq!(options.merge_target.as_deref(), Some("main"));
        assert_eq!(options.build_script, "build:staging");

        let options = parse(&["-s"]).into_options(&config).unwrap();
        assert_eq!(options.merge_target.as_deref(), Some("release"));
        assert_eq!(options.build_script, "bundle");
    }

    #[test]
    fn test_empty_merge_target_is_absent() {
        let options = parse(&["-s", "--merge", ""])
            .into_options(&Config::default())
            .unwrap();
        assert!(options.merge_target.is_none());

        let mut config = Config::default();
        config.git.merge_target = Some(String::new());
        let options = parse(&["-s"]).into_options(&config).unwrap();
        assert!(options.merge_target.is_none());
    }

    #[test]
    fn test_environment_defaults_to_production() {
        let options = parse(&[]).into_options(&Config::default()).unwrap();
        assert_eq!(options.environment, Environment::Production);
        assert_eq!(options.manifest_path, PathBuf::from("package.json"));
        assert_eq!(options.remote, "origin");
    }

    #[test]
    fn test_unknown_configured_environment() {
        let mut config = Config::default();
        config.release.environment = "qa".to_string();

        let err = parse(&[]).into_options(&config).unwrap_err();
        assert!(matches!(err, ReleaseError::UnknownEnvironment(_)));

        let options = parse(&["--staging"]).into_options(&config).unwrap();
        assert_eq!(options.environment, Environment::Staging);
    }
}
