//! Island registry: positions, tour order and destination lookups.
//!
//! Tour order is the registry order. Everything that needs "the next
//! island" or "island number 3" reads it from here instead of keeping its
//! own list.

use std::fmt;

use glam::{Vec2, Vec3};

use crate::error::ConfigError;

/// Island identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IslandId(pub &'static str);

impl IslandId {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for IslandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A destination at sea level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IslandRecord {
    pub id: IslandId,
    /// World position (meters, y = 0)
    pub position: Vec3,
}

impl IslandRecord {
    pub const fn new(id: &'static str, x: f32, z: f32) -> Self {
        Self {
            id: IslandId(id),
            position: Vec3::new(x, 0.0, z),
        }
    }

    pub fn position_xz(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }
}

/// The archipelago, in tour order
const DEFAULT_ISLANDS: [IslandRecord; 5] = [
    IslandRecord::new("about", 20.0, 0.0),
    IslandRecord::new("skills", 40.0, -18.0),
    IslandRecord::new("projects", 55.0, 8.0),
    IslandRecord::new("experience", 40.0, 30.0),
    IslandRecord::new("contact", 18.0, 25.0),
];

/// Ordered, non-empty island list with unique ids
#[derive(Debug, Clone)]
pub struct IslandRegistry {
    islands: Vec<IslandRecord>,
}

impl Default for IslandRegistry {
    fn default() -> Self {
        Self {
            islands: DEFAULT_ISLANDS.to_vec(),
        }
    }
}

impl IslandRegistry {
    pub fn new(islands: Vec<IslandRecord>) -> Result<Self, ConfigError> {
        if islands.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        for (i, island) in islands.iter().enumerate() {
            if islands[..i].iter().any(|other| other.id == island.id) {
                return Err(ConfigError::DuplicateIsland(island.id.to_string()));
            }
        }
        Ok(Self { islands })
    }

    pub fn len(&self) -> usize {
        self.islands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IslandRecord> {
        self.islands.iter()
    }

    pub fn get(&self, id: IslandId) -> Option<&IslandRecord> {
        self.islands.iter().find(|island| island.id == id)
    }

    pub fn contains(&self, id: IslandId) -> bool {
        self.get(id).is_some()
    }

    /// Look an island up by its string id (CLI and UI input)
    pub fn find(&self, name: &str) -> Option<IslandId> {
        self.islands
            .iter()
            .find(|island| island.id.as_str() == name)
            .map(|island| island.id)
    }

    /// Island at position `index` of the tour
    pub fn tour_stop(&self, index: usize) -> Option<IslandId> {
        self.islands.get(index).map(|island| island.id)
    }

    /// Quick-nav hotkey lookup: `1` is the first tour stop
    pub fn by_hotkey(&self, number: u32) -> Option<IslandId> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.tour_stop(index)
    }

    /// Islands whose XZ distance to `position` is below `radius_m`, for
    /// proximity markers
    pub fn within(&self, position: Vec3, radius_m: f32) -> impl Iterator<Item = IslandId> + '_ {
        let here = Vec2::new(position.x, position.z);
        self.islands
            .iter()
            .filter(move |island| island.position_xz().distance(here) < radius_m)
            .map(|island| island.id)
    }
}

/// World-to-minimap mapping for the overview map
#[derive(Debug, Clone)]
pub struct MinimapProjection {
    /// Map edge length (pixels, square)
    pub size_px: f32,
    /// World X range shown (meters)
    pub world_x: (f32, f32),
    /// World Z range shown (meters)
    pub world_z: (f32, f32),
    /// Click radius around an island marker (pixels)
    pub pick_radius_px: f32,
}

impl Default for MinimapProjection {
    fn default() -> Self {
        Self {
            size_px: 160.0,
            world_x: (-10.0, 70.0),
            world_z: (-30.0, 40.0),
            pick_radius_px: 15.0,
        }
    }
}

impl MinimapProjection {
    /// Map pixel coordinates of a world XZ position
    pub fn world_to_map(&self, x: f32, z: f32) -> Vec2 {
        let (x_min, x_max) = self.world_x;
        let (z_min, z_max) = self.world_z;
        Vec2::new(
            (x - x_min) / (x_max - x_min) * self.size_px,
            (z - z_min) / (z_max - z_min) * self.size_px,
        )
    }

    /// Closest island marker within the pick radius of a click
    pub fn pick(&self, registry: &IslandRegistry, click: Vec2) -> Option<IslandId> {
        registry
            .iter()
            .map(|island| {
                let marker = self.world_to_map(island.position.x, island.position.z);
                (island.id, marker.distance(click))
            })
            .filter(|&(_, d)| d < self.pick_radius_px)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}
