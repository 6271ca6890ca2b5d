use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering style of the map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapType {
    #[default]
    Standard,
    Hybrid,
    HybridFlyover,
    MutedStandard,
    Satellite,
    SatelliteFlyover,
}

impl MapType {
    /// All map types in cycle order
    pub const CYCLE: [MapType; 6] = [
        MapType::Standard,
        MapType::Hybrid,
        MapType::HybridFlyover,
        MapType::MutedStandard,
        MapType::Satellite,
        MapType::SatelliteFlyover,
    ];

    /// The type a single tap switches to
    pub fn next(self) -> MapType {
        let index = MapType::CYCLE
            .iter()
            .position(|t| *t == self)
            .unwrap_or_default();
        MapType::CYCLE[(index + 1) % MapType::CYCLE.len()]
    }

    /// Human readable name shown in the status label
    pub fn label(self) -> &'static str {
        match self {
            MapType::Standard => "Standard",
            MapType::Hybrid => "Hybrid",
            MapType::HybridFlyover => "Hybrid Flyover",
            MapType::MutedStandard => "Muted Standard",
            MapType::Satellite => "Satellite",
            MapType::SatelliteFlyover => "Satellite Flyover",
        }
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
