//! Command line: `echo-agent [--loopback] [--config <path>] <message>...`
//!
//! Everything after `--` is taken as a message, even if it looks like a flag.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub loopback: bool,
    pub config:   Option<PathBuf>,
    pub messages: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("--config needs a path")]
    MissingConfigPath,

    #[error("usage: echo-agent [--loopback] [--config <path>] <message>...")]
    NoMessages,
}

/// Parse the arguments that follow the program name.
pub fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args, ArgsError> {
    let mut args = Args { loopback: false, config: None, messages: Vec::new() };
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--loopback" => args.loopback = true,
            "--config" => {
                let path = argv.next().ok_or(ArgsError::MissingConfigPath)?;
                args.config = Some(PathBuf::from(path));
            }
            "--" => args.messages.extend(argv.by_ref()),
            _ => args.messages.push(arg),
        }
    }
    if args.messages.is_empty() {
        return Err(ArgsError::NoMessages);
    }
    Ok(args)
}
