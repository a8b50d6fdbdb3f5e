use std::collections::{HashMap, HashSet};

use engine::{circle_tile_cover, InputAction, InputSnapshot, TileCoord, Timer, Vec2};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

const PLAYER_RADIUS: f32 = 0.4;
const PLAYER_RUN_SPEED_TILES_PER_SECOND: f32 = 4.0;
const SLIME_RADIUS: f32 = 0.4;
const SLIME_RUN_SPEED_TILES_PER_SECOND: f32 = 2.0;
const BROWNIAN_PERIOD_SECONDS: f32 = 1.2;
const SPAWNED_KEY_ID: &str = "testkey";
pub(crate) const START_LEVEL: &str = "testLevel1";
pub(crate) const START_ENTRANCE: &str = "spawn";

include!("world.rs");
include!("level.rs");
include!("levels.rs");
include!("controller.rs");
include!("session.rs");
include!("movement.rs");
include!("render.rs");
