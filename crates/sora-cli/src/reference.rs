//! # Reference Subcommands
//!
//! `sora reference <table>` prints a static regulatory table as JSON:
//! the OSO requirement set, the SAIL matrix, the AEC table, or the
//! TMPR map.

use clap::{Args, Subcommand};
use serde_json::json;

use sora_air::aec::aec_table;
use sora_core::{AirRiskClass, Sail, SoraVersion};
use sora_oso::{oso_requirements, tmpr_for};
use sora_sail::sail_matrix;

/// Arguments for the reference subcommand.
#[derive(Args, Debug)]
pub struct ReferenceArgs {
    #[command(subcommand)]
    pub table: ReferenceTable,
}

/// Which table to print.
#[derive(Subcommand, Debug)]
pub enum ReferenceTable {
    /// The OSO requirement table for a version.
    Osos {
        /// SORA edition ("2.0" or "2.5").
        #[arg(long, default_value = "2.0")]
        sora_version: SoraVersion,
        /// Restrict output to the robustness mandated at this SAIL.
        #[arg(long)]
        sail: Option<Sail>,
    },
    /// The (final GRC x residual ARC) SAIL matrix.
    SailMatrix,
    /// The AEC attribute table.
    Aec,
    /// The residual-ARC-to-TMPR map for a version.
    Tmpr {
        /// SORA edition ("2.0" or "2.5").
        #[arg(long, default_value = "2.0")]
        sora_version: SoraVersion,
    },
}

/// Run `sora reference`.
pub fn run_reference(args: &ReferenceArgs) -> anyhow::Result<()> {
    let value = match &args.table {
        ReferenceTable::Osos { sora_version, sail } => {
            let osos: Vec<serde_json::Value> = oso_requirements(*sora_version)
                .into_iter()
                .map(|oso| match sail {
                    Some(sail) => json!({
                        "id": oso.id,
                        "description": oso.description,
                        "required_robustness": oso.required_at(*sail),
                    }),
                    None => serde_json::to_value(oso).expect("OSO row serializes"),
                })
                .collect();
            json!({ "sora_version": sora_version, "osos": osos })
        }
        ReferenceTable::SailMatrix => {
            let rows: Vec<serde_json::Value> = sail_matrix()
                .iter()
                .enumerate()
                .map(|(i, row)| json!({ "final_grc": i + 1, "sail": row }))
                .collect();
            json!({ "arc_columns": ["a", "b", "c", "d"], "rows": rows })
        }
        ReferenceTable::Aec => serde_json::to_value(aec_table())?,
        ReferenceTable::Tmpr { sora_version } => {
            let map: Vec<_> = AirRiskClass::all()
                .iter()
                .map(|arc| tmpr_for(*sora_version, *arc))
                .collect();
            json!({ "sora_version": sora_version, "map": map })
        }
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_print() {
        for table in [
            ReferenceTable::Osos {
                sora_version: SoraVersion::V2_5,
                sail: Some(Sail::Iv),
            },
            ReferenceTable::SailMatrix,
            ReferenceTable::Aec,
            ReferenceTable::Tmpr {
                sora_version: SoraVersion::V2_0,
            },
        ] {
            run_reference(&ReferenceArgs { table }).unwrap();
        }
    }
}
