use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand};
use vessel::{estimate_all, validate, RawInput, Session, TankProfile};

mod config;
mod display;

use self::config::Config;

#[derive(Parser)]
#[command(name = "filltime")]
#[command(about = "Estimates when a tank reaches its target level", long_about = None)]
struct Cli {
  /// YAML file with tank calibrations
  #[arg(long, global = true, env = "FILLTIME_CONFIG")]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Estimate the completion time once
  Estimate {
    /// Current level in mm
    #[arg(long, default_value = "1603")]
    current: Option<String>,
    /// Inflow rate in m³/h
    #[arg(long, default_value = "335")]
    rate: Option<String>,
    /// Target level in mm
    #[arg(long, default_value = "1800")]
    target: Option<String>,
    /// Only estimate for these tanks
    #[arg(long = "tank")]
    tanks: Vec<String>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
    /// Reference time (RFC 3339) instead of the current time
    #[arg(long)]
    now: Option<String>,
  },
  /// Read `current,rate,target` lines from stdin and re-estimate after each one
  Watch {
    #[arg(long = "tank")]
    tanks: Vec<String>,
  },
  /// List configured tanks
  Tanks,
}

fn now(reference: Option<&str>) -> Result<DateTime<FixedOffset>> {
  match reference {
    Some(reference) => DateTime::parse_from_rfc3339(reference).with_context(|| format!("Invalid time '{}'", reference)),
    None => Ok(Local::now().fixed_offset()),
  }
}

const VALIDATION_FAILURE: i32 = 2;

/// Splits a `current,rate,target` line, `None` if it has more than three fields.
fn parse_line(line: &str) -> Option<RawInput> {
  let mut fields = line.split(',').map(|field| field.trim().to_owned());

  let input = RawInput { current_level: fields.next(), inflow_rate: fields.next(), target_level: fields.next() };

  if fields.next().is_some() {
    return None
  }

  Some(input)
}

/// Prints the estimates for all profiles and returns the process exit code.
fn run_estimate<W: Write, E: Write>(
  input: &RawInput,
  profiles: &[TankProfile],
  now: DateTime<FixedOffset>,
  json: bool,
  out: &mut W,
  err: &mut E,
) -> Result<i32> {
  let input = match validate(input) {
    Ok(input) => input,
    Err(e) => {
      writeln!(err, "error: {}", e)?;
      return Ok(VALIDATION_FAILURE)
    },
  };

  let estimates = estimate_all(&input, profiles, now);

  if json {
    writeln!(out, "{}", serde_json::to_string_pretty(&display::estimates_json(&estimates))?)?;
  } else {
    for estimate in &estimates {
      writeln!(out, "{}", display::estimate_line(estimate))?;
    }
  }

  Ok(0)
}

fn watch<R, W, C>(session: &mut Session, reader: R, out: &mut W, mut clock: C) -> Result<()>
where
  R: BufRead,
  W: Write,
  C: FnMut() -> DateTime<FixedOffset>,
{
  for line in reader.lines() {
    let line = line.context("Failed to read from stdin")?;

    let lines = match parse_line(&line) {
      Some(input) => display::state_lines(session.update(&input, clock())),
      None => {
        session.reset();
        vec!["error: expected current,rate,target".to_owned()]
      },
    };

    for output in lines {
      writeln!(out, "{}", output)?;
    }
    out.flush()?;
  }

  Ok(())
}

fn main() -> Result<()> {
  env_logger::init();

  let cli = Cli::parse();

  let config = match &cli.config {
    Some(path) => Config::load(path)?,
    None => Config::default(),
  };

  match cli.command {
    Commands::Estimate { current, rate, target, tanks, json, now: reference } => {
      let profiles = config.profiles(&tanks)?;
      let input = RawInput { current_level: current, inflow_rate: rate, target_level: target };

      let code = run_estimate(&input, &profiles, now(reference.as_deref())?, json, &mut io::stdout(), &mut io::stderr())?;
      if code != 0 {
        process::exit(code);
      }
    },
    Commands::Watch { tanks } => {
      let mut session = Session::new(config.profiles(&tanks)?);
      log::info!("Watching stdin for {} tank(s) …", session.profiles().len());
      watch(&mut session, io::stdin().lock(), &mut io::stdout(), || Local::now().fixed_offset())?;
    },
    Commands::Tanks => {
      for profile in config.profiles(&[])? {
        println!("{}", display::tank_line(&profile));
      }
    },
  }

  Ok(())
}
