//! Geolocation collaborator backed by configuration.
//!
//! A terminal has no positioning hardware; the position is whatever the
//! `[location]` config section says, and absent config means unavailable.

use async_trait::async_trait;

use gratia_core::config::LocationSettings;
use gratia_core::error::{GratiaError, Result};
use gratia_core::location::{GeoLocator, Position};

#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    position: Option<Position>,
}

impl FixedLocator {
    pub fn new(position: Option<Position>) -> Self {
        Self { position }
    }

    pub fn from_settings(settings: Option<&LocationSettings>) -> Self {
        Self::new(settings.map(|s| Position {
            latitude: s.latitude,
            longitude: s.longitude,
        }))
    }
}

#[async_trait]
impl GeoLocator for FixedLocator {
    async fn current_position(&self) -> Result<Position> {
        self.position
            .ok_or_else(|| GratiaError::remote("geolocation", "no position configured"))
    }
}
