//! # Reference Data Routes
//!
//! Read-only lookups over the static regulatory tables, for UI pickers
//! and audit tooling. Nothing here computes — every response is a
//! serialization of a table built at compile time.

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sora_air::aec::aec_table;
use sora_air::AecAttributes;
use sora_core::{AirRiskClass, Robustness, Sail, SoraVersion};
use sora_ground::mitigation::mitigation_credit;
use sora_ground::GroundMitigationType;
use sora_oso::{oso_requirements, tmpr_for, Dependency, OsoCategory, RequiredRobustness, TmprResult};
use sora_sail::sail_matrix;

use crate::state::AppState;

/// Query selecting the SORA edition.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VersionQuery {
    /// The SORA edition ("2.0" or "2.5").
    #[schema(value_type = String, example = "2.5")]
    pub sora_version: SoraVersion,
}

/// Query for the OSO listing: edition plus an optional SAIL filter.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OsoQuery {
    /// The SORA edition ("2.0" or "2.5").
    #[schema(value_type = String, example = "2.0")]
    pub sora_version: SoraVersion,
    /// When set, each row also carries the robustness mandated at this
    /// SAIL ("I"–"VI").
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "IV")]
    pub sail: Option<Sail>,
}

/// One OSO row in the reference listing.
#[derive(Debug, Serialize)]
pub struct OsoRow {
    pub id: u8,
    pub description: &'static str,
    pub category: OsoCategory,
    pub dependencies: &'static [Dependency],
    /// Mandated robustness per SAIL I–VI.
    pub robustness: [RequiredRobustness; 6],
    /// Mandated robustness at the queried SAIL, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_robustness: Option<RequiredRobustness>,
}

/// OSO listing response.
#[derive(Debug, Serialize)]
pub struct OsoListing {
    pub sora_version: SoraVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sail: Option<Sail>,
    pub osos: Vec<OsoRow>,
}

/// GET /v1/reference/osos — the OSO requirement table.
#[utoipa::path(
    get,
    path = "/v1/reference/osos",
    params(
        ("sora_version" = String, Query, description = "SORA edition"),
        ("sail" = Option<String>, Query, description = "Optional SAIL filter"),
    ),
    responses((status = 200, description = "OSO requirement rows for the edition")),
    tag = "reference"
)]
pub async fn osos(Query(query): Query<OsoQuery>) -> Json<OsoListing> {
    let osos = oso_requirements(query.sora_version)
        .into_iter()
        .map(|oso| OsoRow {
            id: oso.id,
            description: oso.description,
            category: oso.category,
            dependencies: oso.dependencies,
            robustness: oso.robustness,
            required_robustness: query.sail.map(|sail| oso.required_at(sail)),
        })
        .collect();
    Json(OsoListing {
        sora_version: query.sora_version,
        sail: query.sail,
        osos,
    })
}

/// One SAIL matrix row.
#[derive(Debug, Serialize)]
pub struct SailMatrixRow {
    pub final_grc: u8,
    /// SAIL per residual ARC a–d.
    pub sail: [Sail; 4],
}

/// SAIL matrix response.
#[derive(Debug, Serialize)]
pub struct SailMatrixListing {
    pub arc_columns: [&'static str; 4],
    pub rows: Vec<SailMatrixRow>,
}

/// GET /v1/reference/sail-matrix — the (GRC × ARC) matrix.
#[utoipa::path(
    get,
    path = "/v1/reference/sail-matrix",
    responses((status = 200, description = "The SAIL determination matrix")),
    tag = "reference"
)]
pub async fn sail_matrix_listing() -> Json<SailMatrixListing> {
    let rows = sail_matrix()
        .iter()
        .enumerate()
        .map(|(i, row)| SailMatrixRow {
            final_grc: (i + 1) as u8,
            sail: *row,
        })
        .collect();
    Json(SailMatrixListing {
        arc_columns: ["a", "b", "c", "d"],
        rows,
    })
}

/// GET /v1/reference/aec — the AEC attribute table.
#[utoipa::path(
    get,
    path = "/v1/reference/aec",
    responses((status = 200, description = "AEC attributes 1-12")),
    tag = "reference"
)]
pub async fn aec() -> Json<&'static [AecAttributes; 12]> {
    Json(aec_table())
}

/// TMPR map response.
#[derive(Debug, Serialize)]
pub struct TmprListing {
    pub sora_version: SoraVersion,
    pub map: Vec<TmprResult>,
}

/// GET /v1/reference/tmpr — the residual-ARC-to-TMPR map.
#[utoipa::path(
    get,
    path = "/v1/reference/tmpr",
    params(("sora_version" = String, Query, description = "SORA edition")),
    responses((status = 200, description = "TMPR level per residual ARC")),
    tag = "reference"
)]
pub async fn tmpr(Query(query): Query<VersionQuery>) -> Json<TmprListing> {
    let map = AirRiskClass::all()
        .iter()
        .map(|arc| tmpr_for(query.sora_version, *arc))
        .collect();
    Json(TmprListing {
        sora_version: query.sora_version,
        map,
    })
}

/// One mitigation credit row.
#[derive(Debug, Serialize)]
pub struct MitigationCreditRow {
    #[serde(rename = "type")]
    pub mitigation_type: GroundMitigationType,
    pub robustness: Robustness,
    pub credit: i8,
}

/// Mitigation credit table response.
#[derive(Debug, Serialize)]
pub struct MitigationListing {
    pub sora_version: SoraVersion,
    pub credits: Vec<MitigationCreditRow>,
}

/// GET /v1/reference/mitigations — the ground mitigation credit table.
#[utoipa::path(
    get,
    path = "/v1/reference/mitigations",
    params(("sora_version" = String, Query, description = "SORA edition")),
    responses((status = 200, description = "Credit per (type, robustness) for the edition")),
    tag = "reference"
)]
pub async fn mitigations(Query(query): Query<VersionQuery>) -> Json<MitigationListing> {
    let mut credits = Vec::new();
    for mitigation in GroundMitigationType::all() {
        if !mitigation.defined_for(query.sora_version) {
            continue;
        }
        for robustness in Robustness::all() {
            // defined_for() was checked, so the credit lookup cannot
            // report a version mismatch.
            if let Ok(credit) = mitigation_credit(query.sora_version, *mitigation, *robustness) {
                credits.push(MitigationCreditRow {
                    mitigation_type: *mitigation,
                    robustness: *robustness,
                    credit,
                });
            }
        }
    }
    Json(MitigationListing {
        sora_version: query.sora_version,
        credits,
    })
}

/// The reference-data router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/reference/osos", get(osos))
        .route("/v1/reference/sail-matrix", get(sail_matrix_listing))
        .route("/v1/reference/aec", get(aec))
        .route("/v1/reference/tmpr", get(tmpr))
        .route("/v1/reference/mitigations", get(mitigations))
}
