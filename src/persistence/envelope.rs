//! JSON save format
//!
//! Current saves are `{"version": 1, "score", "status", "cells"}`. Saves written
//! before versioning carry only `{score, status, cells}` and load as version 0.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PersistError;
use crate::sim::Snapshot;

pub const SAVE_VERSION: u32 = 1;

/// Why a stored snapshot was rejected
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed save data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("save version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("save data holds tiles that are not powers of two in range")]
    IllegalTiles,
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveEnvelope {
    version: u32,
    #[serde(flatten)]
    snapshot: Snapshot,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredSave {
    Versioned(SaveEnvelope),
    Legacy(Snapshot),
}

pub fn encode_snapshot(snapshot: &Snapshot) -> Result<String, PersistError> {
    let envelope = SaveEnvelope {
        version: SAVE_VERSION,
        snapshot: snapshot.clone(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse and validate stored save data
pub fn decode_snapshot(json: &str) -> Result<Snapshot, SnapshotError> {
    let snapshot = match serde_json::from_str::<StoredSave>(json)? {
        StoredSave::Versioned(envelope) => {
            if envelope.version > SAVE_VERSION {
                return Err(SnapshotError::UnsupportedVersion {
                    found: envelope.version,
                    supported: SAVE_VERSION,
                });
            }
            envelope.snapshot
        }
        StoredSave::Legacy(snapshot) => snapshot,
    };
    if !snapshot.is_valid() {
        return Err(SnapshotError::IllegalTiles);
    }
    Ok(snapshot)
}
