// src/main.rs

//! Echo agent entry-point.
//!
//! 1. Parse arguments & configuration, set up structured logging
//! 2. Open `/dev/echodev` (or load the driver in-process with `--loopback`)
//! 3. For every message: write it, read the annotated echo back, print it
//!
//! Usage: `echo-agent [--loopback] [--config <path>] <message>...`

// ───── std / 3rd-party imports ──────────────────────────────────────────────
use anyhow::{Context, Result};
use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

// ───── local imports ────────────────────────────────────────────────────────
use agent::cli::{Args, parse_args};
use agent::comms::{DeviceClient, Loopback};
use agent::config::{AgentConfig, load_or_default};
use agent::logging;

// ───── helpers ──────────────────────────────────────────────────────────────

/// Print an error with context and terminate the process.
macro_rules! fatal {
    ($ctx:expr, $($arg:tt)+) => {{
        eprintln!(
            "[{}][ERROR][{}] {}",
            chrono::Local::now().to_rfc3339(),
            $ctx,
            format!($($arg)+)
        );
        std::process::exit(1);
    }};
}

/// Directory that contains the running executable.
fn exe_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}

/// Echo every message through `client`, printing the replies.
fn echo_all<D: Read + Write>(client: &mut DeviceClient<D>, messages: &[String]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for msg in messages {
        let reply = client
            .echo(msg)
            .with_context(|| format!("echo of {:?} failed", msg))?;
        writeln!(out, "{}", reply)?;
    }
    Ok(())
}

// ───── agent logic ──────────────────────────────────────────────────────────

fn run(args: Args, cfg: AgentConfig) -> Result<()> {
    let read_buffer = cfg.device.read_buffer;

    if args.loopback {
        Loopback::session(read_buffer, |client| echo_all(client, &args.messages))?;
    } else {
        let mut client = DeviceClient::open(&cfg.device.path, read_buffer)?;
        echo_all(&mut client, &args.messages)?;
    }
    Ok(())
}

fn main() {
    // 1 ─ Arguments
    let args = parse_args(std::env::args().skip(1)).unwrap_or_else(|e| fatal!("args", "{}", e));

    // 2 ─ Context & config
    let exe_dir = exe_dir().unwrap_or_else(|e| fatal!("main", "cannot locate executable: {}", e));
    let cfg_path = args.config.clone().unwrap_or_else(|| exe_dir.join("default.toml"));
    let (cfg, source) = load_or_default(&cfg_path).unwrap_or_else(|e| fatal!("config", "{}", e));

    // 3 ─ Logging
    logging::dispatch(&exe_dir, &cfg.logging)
        .and_then(|d| Ok(d.chain(std::io::stderr()).apply()?))
        .unwrap_or_else(|e| fatal!("logging", "{}", e));
    source.report();
    log::info!("Agent started ({} message(s))", args.messages.len());

    // 4 ─ Echo
    if let Err(e) = run(args, cfg) {
        fatal!("device", "{:#}", e);
    }
    log::info!("Agent finished");
}
