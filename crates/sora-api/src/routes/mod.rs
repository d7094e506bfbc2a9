//! # API Routes
//!
//! One module per route family. Handlers hold no business logic — they
//! validate, delegate to the engine crates, and wrap the result in a
//! response envelope stamped with a calculation id and timestamp.
//!
//! The engines themselves are pure; the id and timestamp exist only at
//! this layer so identical requests still produce identical regulatory
//! results.

pub mod air;
pub mod complete;
pub mod ground;
pub mod reference;
pub mod sail;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Response envelope for calculation routes.
#[derive(Debug, Serialize)]
pub struct CalculationEnvelope<T: Serialize> {
    /// Server-assigned id for this calculation.
    pub calculation_id: Uuid,
    /// When the server computed the result.
    pub computed_at: DateTime<Utc>,
    /// The engine result, untouched.
    pub result: T,
}

impl<T: Serialize> CalculationEnvelope<T> {
    /// Stamp an engine result into an envelope.
    pub fn new(result: T) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            computed_at: Utc::now(),
            result,
        }
    }
}
