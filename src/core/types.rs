//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for every participant in the world
///
/// Humans and agents share the same id space so that group rosters,
/// controllers and command issuers can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id, mostly useful for tests and reproducible simulations
    pub fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "{}", &simple[..8])
    }
}

/// Milliseconds on the host's monotonic clock
pub type Millis = u64;

/// Map identifier (continent, dungeon, battleground...)
pub type MapId = u32;

/// Zone identifier within a map
pub type ZoneId = u32;

/// 2D position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// A location in the persistent world
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub map: MapId,
    pub zone: ZoneId,
    pub point: Vec2,
}

impl WorldPosition {
    pub fn new(map: MapId, zone: ZoneId, point: Vec2) -> Self {
        Self { map, zone, point }
    }

    /// Planar distance, or `None` when the two positions are on different maps
    pub fn distance(&self, other: &Self) -> Option<f32> {
        (self.map == other.map).then(|| self.point.distance(&other.point))
    }

    pub fn within(&self, other: &Self, range: f32) -> bool {
        self.map == other.map && self.point.distance_squared(&other.point) < range * range
    }
}

impl fmt::Display for WorldPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {:.1} {} {}", self.point.x, self.point.y, self.map, self.zone)
    }
}
