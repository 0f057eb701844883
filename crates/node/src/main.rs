// Path: crates/node/src/main.rs

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use asset_registry_services::AssetRegistry;
use asset_registry_state::MemoryLedger;
use asset_registry_telemetry::prometheus::{PrometheusSink, TallySnapshot};
use asset_registry_types::app::{Invocation, InvocationResult, SerializedIdentity};
use asset_registry_types::config::{IdentityConfig, NodeConfig};
use clap::{Parser, Subcommand};
use prost::Message;
use std::path::PathBuf;
use std::sync::Arc;

mod script;

use script::ReplayScript;

#[derive(Parser, Debug)]
#[clap(
    name = "asset-registry-node",
    about = "Runs asset registry invocations against an in-memory ledger."
)]
struct Cli {
    #[clap(long, help = "Path to the node.toml configuration file.")]
    config: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs a single invocation on a fresh ledger.
    Invoke {
        function: String,
        args: Vec<String>,
    },
    /// Runs every invocation of a script, in order, on one ledger.
    Replay { script: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => NodeConfig::load(path)?,
        None => NodeConfig::default(),
    };
    asset_registry_telemetry::init::init_tracing(&config.telemetry)?;

    let (invocations, replay) = match cli.command {
        Command::Invoke { function, args } => (vec![Invocation::new(function, args)], false),
        Command::Replay { script } => (ReplayScript::load(&script)?.invocations, true),
    };

    let tally = Arc::new(PrometheusSink::new()?);
    let registry = AssetRegistry::with_metrics(config.registry.clone(), tally.clone());
    let mut ledger = build_ledger(config.identity.as_ref())?;

    let init = ledger.instantiate(&registry)?;
    tracing::info!(target: "node", status = init.status(), "registry instantiated");

    for invocation in &invocations {
        let result = ledger.execute(&registry, invocation)?;
        print_result(invocation, &result);
    }

    if replay {
        print_tally(&tally.snapshot());
        tracing::debug!(target: "node", "metrics:\n{}", tally.encode_text()?);
    }
    Ok(())
}

fn build_ledger(identity: Option<&IdentityConfig>) -> Result<MemoryLedger> {
    let mut ledger = MemoryLedger::new();
    if let Some(identity) = identity {
        let pem = std::fs::read(&identity.certificate_pem).with_context(|| {
            format!(
                "failed to read caller certificate {}",
                identity.certificate_pem.display()
            )
        })?;
        let envelope = SerializedIdentity {
            mspid: identity.msp_id.clone(),
            id_bytes: pem,
        };
        ledger.set_creator(envelope.encode_to_vec());
        tracing::info!(target: "node", msp_id = %identity.msp_id, "caller identity loaded");
    }
    Ok(ledger)
}

fn print_result(invocation: &Invocation, result: &InvocationResult) {
    match result {
        InvocationResult::Success(payload) => println!(
            "{} {} -> {} {}",
            invocation.function,
            invocation.args.join(" "),
            result.status(),
            String::from_utf8_lossy(payload)
        ),
        InvocationResult::Error(message) => println!(
            "{} {} -> {} {}",
            invocation.function,
            invocation.args.join(" "),
            result.status(),
            message
        ),
    }
}

fn print_tally(snapshot: &TallySnapshot) {
    println!(
        "invocations: {} failures: {} identity failures: {} history records: {}",
        snapshot.total_invocations(),
        snapshot.total_failures(),
        snapshot.identity_failures,
        snapshot.history_records
    );
    for (function, counts) in &snapshot.functions {
        println!(
            "  {function}: {} invocations, {} failures",
            counts.invocations, counts.failures
        );
    }
}
