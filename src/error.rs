//! Error types for configuration loading and the simulation pass

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::EntityId;

/// Malformed static configuration, reported at load time
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entity {id}: no shape, needs a radius or width and height")]
    MissingShape { id: EntityId },

    #[error("entity {id}: carries both a radius and width/height")]
    ContradictoryShape { id: EntityId },

    #[error("entity {id}: rectangle needs both width and height")]
    IncompleteRect { id: EntityId },

    #[error("entity {id}: dimensions must be positive and finite")]
    BadDimensions { id: EntityId },

    #[error("entity {id}: position must be finite")]
    BadPosition { id: EntityId },

    #[error("duplicate entity id {0}")]
    DuplicateId(EntityId),

    #[error("entity id {0} is reserved for the player")]
    ReservedId(EntityId),

    #[error("unknown behavior type code {0}")]
    UnknownBehavior(u8),

    #[error("entity {id}: projectile template must be a circle")]
    ProjectileShape { id: EntityId },

    #[error("map bounds must be positive, got {width}x{height}")]
    EmptyBounds { width: f32, height: f32 },
}

/// Fault detected inside one simulation pass
#[derive(Debug, Error)]
pub enum SimError {
    #[error("entity {id} has non-finite position or velocity after tick {tick}")]
    NonFinite { id: EntityId, tick: u64 },
}

/// Bad command-line arguments for the runner
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown argument {0}")]
    UnknownArg(String),

    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: String, value: String },
}
