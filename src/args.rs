use std::path::PathBuf;
use std::str::FromStr;

use argh::FromArgs;

/// The draco compiler.
#[derive(FromArgs, Debug)]
pub struct Args {
    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
pub enum Command {
    Check(Check),
}

/// Check a source file for errors.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "check")]
pub struct Check {
    /// the source file to check
    #[argh(positional)]
    pub path: PathBuf,

    /// the amount of logging to perform
    #[argh(option, default = "LogLevel::Off")]
    pub log: LogLevel,

    /// how to print diagnostics: `human` or `json`
    #[argh(option, default = "Format::Human")]
    pub format: Format,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Human,
    Json,
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err("expected one of `human` or `json`"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),

            _ => Err("expected one of `off`, `trace`, `debug`, `info`, `warning`, or `error`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use argh::FromArgs;

    use super::{Args, Command, Format};

    #[test]
    fn check_defaults() {
        let args = Args::from_args(&["dracoc"], &["check", "main.draco"]).unwrap();
        let Command::Check(check) = args.command;

        assert_eq!("main.draco", check.path.to_str().unwrap());
        assert_eq!(Format::Human, check.format);
        assert_eq!(log::LevelFilter::Off, check.log.to_level_filter());
    }

    #[test]
    fn check_options() {
        let args = Args::from_args(
            &["dracoc"],
            &["check", "main.draco", "--log", "debug", "--format", "json"],
        )
        .unwrap();
        let Command::Check(check) = args.command;

        assert_eq!(Format::Json, check.format);
        assert_eq!(log::LevelFilter::Debug, check.log.to_level_filter());
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!(Args::from_args(&["dracoc"], &["check", "a", "--format", "xml"]).is_err());
    }
}
