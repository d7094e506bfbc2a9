//! # Calculation Subcommands
//!
//! `sora ground`, `sora air`, and `sora complete` read a JSON request
//! from a file (or stdin with `-`), run the corresponding engine, and
//! print the result as pretty JSON.
//!
//! Regulatory terminal outcomes (out of scope, Category C) print like
//! any other result — the exit code is non-zero only for malformed
//! input or I/O failures.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Deserialize;

use sora_air::{
    determine_initial_arc, determine_residual_arc, AirspaceEnvironment, StrategicMitigations,
};
use sora_core::SoraVersion;
use sora_engine::{execute_complete, SoraCompleteRequest};
use sora_ground::{compute_ground_risk, GroundMitigation, GroundRiskContext, UaProfile};

/// Arguments shared by the calculation subcommands.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Path to the JSON request document, or `-` for stdin.
    #[arg(long, short, default_value = "-")]
    pub input: PathBuf,
}

fn read_input(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading request from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading request from {}", path.display()))
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ground calculation input document.
#[derive(Debug, Deserialize)]
pub struct GroundInput {
    /// The aircraft.
    pub ua: UaProfile,
    /// Version and exposure selectors.
    #[serde(flatten)]
    pub context: GroundRiskContext,
    /// Claimed mitigations.
    #[serde(default)]
    pub mitigations: Vec<GroundMitigation>,
}

/// Run `sora ground`.
pub fn run_ground(args: &CalcArgs) -> anyhow::Result<()> {
    let input: GroundInput =
        serde_json::from_str(&read_input(&args.input)?).context("parsing ground request")?;
    let result = compute_ground_risk(&input.ua, &input.context, &input.mitigations)?;
    print_json(&result)
}

/// Air calculation input document.
#[derive(Debug, Deserialize)]
pub struct AirInput {
    /// The SORA edition.
    pub sora_version: SoraVersion,
    /// The airspace environment.
    pub airspace: AirspaceEnvironment,
    /// Strategic mitigation claims.
    #[serde(default)]
    pub strategic_mitigations: StrategicMitigations,
}

/// Run `sora air`.
pub fn run_air(args: &CalcArgs) -> anyhow::Result<()> {
    let input: AirInput =
        serde_json::from_str(&read_input(&args.input)?).context("parsing air request")?;
    let initial = determine_initial_arc(input.sora_version, &input.airspace)?;
    let result = determine_residual_arc(&initial, &input.strategic_mitigations)?;
    print_json(&result)
}

/// Run `sora complete`.
pub fn run_complete(args: &CalcArgs) -> anyhow::Result<()> {
    let request: SoraCompleteRequest =
        serde_json::from_str(&read_input(&args.input)?).context("parsing complete request")?;
    let result = execute_complete(&request)?;
    print_json(&result)
}
