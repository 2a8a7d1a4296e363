//! Procedural world layout
//!
//! Platforms with optional ladders, plus low ground cover. Generated once per
//! session and never modified afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::error::SimError;

pub const PLATFORM_COUNT: usize = 6;
pub const PLATFORM_THICKNESS: f32 = 12.0;
pub const LADDER_WIDTH: f32 = 16.0;
pub const LADDER_CHANCE: f64 = 0.8;
pub const GROUND_OBSTACLE_COUNT: usize = 14;

/// Platforms start this far into the world and end this far before its end
const PLATFORM_MARGIN: f32 = 400.0;
/// Ground cover keeps clear of the spawn zone
const COVER_START_X: f32 = 500.0;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Platform,
    Crate,
    Shield,
    Barricade,
}

/// A solid rectangle bodies stand on and bullets stop at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub rect: Rect,
}

/// A climbable rectangle from a platform down to the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    pub rect: Rect,
}

/// Session world dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Horizontal extent of the playable world
    pub world_width: f32,
    /// Y of the ground line
    pub ground_y: f32,
    /// Width of the camera window (spawn distance and pruning scale with it)
    pub view_width: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            ground_y: DEFAULT_GROUND_Y,
            view_width: DEFAULT_VIEW_WIDTH,
        }
    }
}

impl WorldConfig {
    pub fn new(world_width: f32, ground_y: f32) -> Self {
        Self {
            world_width,
            ground_y,
            ..Default::default()
        }
    }

    /// Bottom of the visible area
    #[inline]
    pub fn view_height(&self) -> f32 {
        self.ground_y + GROUND_STRIP
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let checks = [
            ("world_width", self.world_width, MIN_WORLD_WIDTH),
            ("ground_y", self.ground_y, MIN_GROUND_Y),
            ("view_width", self.view_width, 1.0),
        ];
        for (field, value, min) in checks {
            if !value.is_finite() || value < min {
                return Err(SimError::InvalidWorld { field, value });
            }
        }
        Ok(())
    }
}

/// Generated static geometry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub obstacles: Vec<Obstacle>,
    pub ladders: Vec<Ladder>,
}

/// Lay out a fresh world
pub fn generate_world<R: Rng>(rng: &mut R, config: &WorldConfig) -> World {
    let mut world = World::default();
    let ground_y = config.ground_y;

    let section_width = (config.world_width - 2.0 * PLATFORM_MARGIN) / PLATFORM_COUNT as f32;
    for i in 0..PLATFORM_COUNT {
        let base_x = PLATFORM_MARGIN + i as f32 * section_width;
        let x = base_x + rng.random::<f32>() * section_width * 0.5;
        let width = 100.0 + rng.random::<f32>() * 120.0;
        let y = ground_y - (100.0 + rng.random::<f32>() * 60.0);
        world.obstacles.push(Obstacle {
            kind: ObstacleKind::Platform,
            rect: Rect::new(x, y, width, PLATFORM_THICKNESS),
        });

        if rng.random_bool(LADDER_CHANCE) {
            let ladder_x = x + width / 2.0 - LADDER_WIDTH / 2.0;
            world.ladders.push(Ladder {
                rect: Rect::new(ladder_x, y, LADDER_WIDTH, ground_y - y),
            });
        }
    }

    const COVER: [ObstacleKind; 3] = [ObstacleKind::Crate, ObstacleKind::Shield, ObstacleKind::Barricade];
    for _ in 0..GROUND_OBSTACLE_COUNT {
        let width = 32.0 + rng.random::<f32>() * 32.0;
        // Low enough to jump over
        let height = 20.0 + rng.random::<f32>() * 8.0;
        let x = COVER_START_X + rng.random::<f32>() * (config.world_width - 600.0);
        let kind = COVER[rng.random_range(0..COVER.len())];
        world.obstacles.push(Obstacle {
            kind,
            rect: Rect::new(x, ground_y - height, width, height),
        });
    }

    log::debug!(
        "World generated: {} obstacles, {} ladders",
        world.obstacles.len(),
        world.ladders.len()
    );
    world
}
