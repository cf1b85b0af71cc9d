//! Geolocation collaborator seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// One-shot "where am I" capability.
///
/// A failure means "not sharing"; callers never surface it as a crash.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    async fn current_position(&self) -> Result<Position>;
}
