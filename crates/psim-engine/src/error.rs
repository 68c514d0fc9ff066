//! Engine error type.

use thiserror::Error;

use psim_core::{IncidentId, ParcelId};
use psim_wkt::WktError;

/// Errors produced by `psim-engine` commands.
///
/// Note the narrow scope: per-tick simulation operations never fail (they
/// degrade to no-ops), so only id lookups and geometry decoding appear
/// here.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("parcel {0} not found")]
    ParcelNotFound(ParcelId),

    #[error("incident {0} not found")]
    IncidentNotFound(IncidentId),

    #[error("route geometry rejected: {0}")]
    Geometry(#[from] WktError),
}

pub type SimResult<T> = Result<T, SimError>;
