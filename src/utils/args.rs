use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::io;
use thiserror::Error;

use crate::types::{Cli, Invocation};

/// Reasons the pipeline cannot start from the given arguments
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("help requested")]
    HelpRequested,
    #[error("no arguments given")]
    NoArguments,
    #[error("-i <url_file> is required.")]
    MissingInput,
    #[error(transparent)]
    Invalid(#[from] clap::Error),
}

impl UsageError {
    pub fn exit_code(&self) -> i32 {
        match self {
            UsageError::HelpRequested => 0,
            UsageError::Invalid(err) if err.kind() == ErrorKind::DisplayVersion => 0,
            _ => 1,
        }
    }
}

/// Option known to the CLI, addressed by its long name after normalization
struct FlagSpec {
    short: Option<char>,
    long: String,
    takes_value: bool,
}

/// Parse the process arguments into an invocation.
///
/// Unknown tokens are skipped rather than rejected, and a value-taking
/// option consumes the next token whatever it looks like. Values are kept as
/// OS strings, so paths need not be valid UTF-8.
pub fn parse_arguments<I, T>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let bin = args
        .next()
        .unwrap_or_else(|| OsString::from(env!("CARGO_PKG_NAME")));
    let rest: Vec<OsString> = args.collect();

    if rest.iter().any(|arg| arg == "-h" || arg == "--help") {
        return Err(UsageError::HelpRequested);
    }
    if rest.is_empty() {
        return Err(UsageError::NoArguments);
    }

    let normalized = normalize_arguments(&rest);
    let cli = Cli::try_parse_from(std::iter::once(bin).chain(normalized))?;
    let input = cli.input.clone().ok_or(UsageError::MissingInput)?;

    Ok(Invocation { input, cli })
}

/// Print the usage text, preceded by the error when there is one
pub fn report_usage_error(err: &UsageError) -> io::Result<()> {
    match err {
        UsageError::HelpRequested | UsageError::NoArguments => {}
        UsageError::MissingInput => eprintln!("Error: {}", err),
        UsageError::Invalid(clap_err) => {
            clap_err.print()?;
            if clap_err.kind() == ErrorKind::DisplayVersion {
                return Ok(());
            }
        }
    }
    Cli::command().print_help()
}

fn known_flags() -> Vec<FlagSpec> {
    let mut command = Cli::command();
    command.build();
    command
        .get_arguments()
        .filter(|arg| !arg.is_positional())
        .filter_map(|arg| {
            Some(FlagSpec {
                short: arg.get_short(),
                long: arg.get_long()?.to_string(),
                takes_value: arg.get_action().takes_values(),
            })
        })
        .collect()
}

/// Rewrite recognised options into `--long[=value]` form and drop the rest
fn normalize_arguments(args: &[OsString]) -> Vec<OsString> {
    let flags = known_flags();
    let mut normalized = Vec::new();
    let mut index = 0;

    while index < args.len() {
        let token = &args[index];

        // Option names are ASCII, so a lossy view is enough to read them
        let lossy = token.to_string_lossy();
        if let Some((name, _)) = lossy.strip_prefix("--").and_then(|t| t.split_once('=')) {
            if flags.iter().any(|flag| flag.long == name && flag.takes_value) {
                normalized.push(token.clone());
            }
            index += 1;
            continue;
        }

        match token.to_str().and_then(|t| find_flag(&flags, t)) {
            Some(flag) if flag.takes_value => {
                if let Some(value) = args.get(index + 1) {
                    let mut arg = OsString::from(format!("--{}=", flag.long));
                    arg.push(value);
                    normalized.push(arg);
                    index += 2;
                } else {
                    index += 1;
                }
            }
            Some(flag) => {
                normalized.push(OsString::from(format!("--{}", flag.long)));
                index += 1;
            }
            None => index += 1,
        }
    }

    normalized
}

fn find_flag<'a>(flags: &'a [FlagSpec], token: &str) -> Option<&'a FlagSpec> {
    if let Some(long) = token.strip_prefix("--") {
        return flags.iter().find(|flag| flag.long == long);
    }
    let mut chars = token.strip_prefix('-')?.chars();
    let short = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    flags.iter().find(|flag| flag.short == Some(short))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Result<Invocation, UsageError> {
        parse_arguments(std::iter::once("wordforge").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_input_and_output() {
        let invocation = parse(&["-i", "urls.txt", "-o", "out/acme"]).unwrap();
        assert_eq!(invocation.input, PathBuf::from("urls.txt"));
        assert_eq!(invocation.output_prefix(), "out/acme");
    }

    #[test]
    fn test_default_output_prefix() {
        let invocation = parse(&["-i", "urls.txt"]).unwrap();
        assert_eq!(invocation.output_prefix(), "output");
        assert_eq!(invocation.cli.timeout, 5);
        assert!(!invocation.cli.tolerant_markers);
    }

    #[test]
    fn test_help_anywhere_wins() {
        let err = parse(&["-i", "urls.txt", "--help"]).unwrap_err();
        assert!(matches!(err, UsageError::HelpRequested));
        assert_eq!(err.exit_code(), 0);

        let err = parse(&["-h"]).unwrap_err();
        assert!(matches!(err, UsageError::HelpRequested));
    }

    #[test]
    fn test_no_arguments() {
        let err = parse(&[]).unwrap_err();
        assert!(matches!(err, UsageError::NoArguments));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_input() {
        let err = parse(&["-o", "prefix"]).unwrap_err();
        assert!(matches!(err, UsageError::MissingInput));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_unknown_tokens_are_skipped() {
        let invocation = parse(&["stray", "-w", "-i", "urls.txt", "--bogus", "x"]).unwrap();
        assert_eq!(invocation.input, PathBuf::from("urls.txt"));
    }

    #[test]
    fn test_trailing_flag_without_value_is_ignored() {
        let err = parse(&["-o", "prefix", "-i"]).unwrap_err();
        assert!(matches!(err, UsageError::MissingInput));
    }

    #[test]
    fn test_value_flag_consumes_next_token() {
        let invocation = parse(&["-i", "-o"]).unwrap();
        assert_eq!(invocation.input, PathBuf::from("-o"));
        assert_eq!(invocation.output_prefix(), "output");
    }

    #[test]
    fn test_last_occurrence_wins() {
        let invocation = parse(&["-i", "first.txt", "-i", "second.txt"]).unwrap();
        assert_eq!(invocation.input, PathBuf::from("second.txt"));
    }

    #[test]
    fn test_long_options_with_equals() {
        let invocation =
            parse(&["--input=urls.txt", "--timeout=9", "--tolerant-markers", "-v"]).unwrap();
        assert_eq!(invocation.input, PathBuf::from("urls.txt"));
        assert_eq!(invocation.cli.timeout, 9);
        assert!(invocation.cli.tolerant_markers);
        assert!(invocation.cli.verbose);
    }

    #[test]
    fn test_invalid_option_value() {
        let err = parse(&["-i", "urls.txt", "--timeout", "soon"]).unwrap_err();
        assert!(matches!(err, UsageError::Invalid(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_input_path() {
        use std::os::unix::ffi::OsStringExt;

        let raw = b"lists/urls\xff.txt".to_vec();
        let args = vec![
            OsString::from("wordforge"),
            OsString::from("-o"),
            OsString::from("out/acme"),
            OsString::from("-i"),
            OsString::from_vec(raw.clone()),
        ];

        let invocation = parse_arguments(args).unwrap();
        assert_eq!(invocation.input, PathBuf::from(OsString::from_vec(raw)));
        assert_eq!(invocation.output_prefix(), "out/acme");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_long_option_with_equals() {
        use std::os::unix::ffi::OsStringExt;

        let mut raw = b"--input=urls".to_vec();
        raw.push(0xfe);
        let invocation =
            parse_arguments(vec![OsString::from("wordforge"), OsString::from_vec(raw)]).unwrap();
        assert_eq!(
            invocation.input,
            PathBuf::from(OsString::from_vec(b"urls\xfe".to_vec()))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_unknown_token_is_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let invocation = parse_arguments(vec![
            OsString::from("wordforge"),
            OsString::from_vec(b"-\xff".to_vec()),
            OsString::from("-i"),
            OsString::from("urls.txt"),
        ])
        .unwrap();
        assert_eq!(invocation.input, PathBuf::from("urls.txt"));
    }

    #[test]
    fn test_version_exits_cleanly() {
        let err = parse(&["--version"]).unwrap_err();
        assert_eq!(err.exit_code(), 0);
    }
}
