//! Error Types for the Portfolio Domain

use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),

    #[error("A {0} request is already in flight")]
    BusyAction(&'static str),
}
