//! Crate-level error type.

use thiserror::Error;

use crate::{config::ConfigError, project::ProjectError, voxels::block::registry::RegistryError};

/// Any error the sculpting core can report.
#[derive(Debug, Error)]
pub enum SculptError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
