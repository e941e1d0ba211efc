//! Game tuning
//!
//! `Config` is the raw, serialisable form (JSON on disk). `Tuning` is the
//! validated form the simulation runs on; it can only be built through
//! [`Config::validate`], so every `Tuning` describes a playable field.

use std::ops::Range;
use std::path::Path;
use std::time::Duration;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable constants of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Playfield ===
    pub playfield_width: i32,
    pub playfield_height: i32,
    /// Height of the ground strip at the bottom of the playfield
    pub ground_height: i32,

    // === Obstacles ===
    pub obstacle_width: i32,
    /// Vertical size of the passable gap
    pub gap_size: i32,
    /// Horizontal space between obstacles at spawn
    pub obstacle_spacing: i32,
    pub obstacle_count: usize,
    /// Pixels scrolled per tick
    pub scroll_speed: i32,

    // === Avatar ===
    pub avatar_size: i32,
    pub gravity: i32,
    pub jump_impulse: i32,

    // === Timing ===
    /// Milliseconds per tick
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            obstacle_width: OBSTACLE_WIDTH,
            gap_size: GAP_SIZE,
            obstacle_spacing: OBSTACLE_SPACING,
            obstacle_count: OBSTACLE_COUNT,
            scroll_speed: SCROLL_SPEED,

            avatar_size: AVATAR_SIZE,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            tick_ms: TICK_MS,
        }
    }
}

impl Config {
    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check every constraint and produce the tuning a simulation can run on
    pub fn validate(&self) -> Result<Tuning, ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("scroll_speed", self.scroll_speed),
            ("avatar_size", self.avatar_size),
            ("gravity", self.gravity),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "tick_ms",
                value: 0,
            });
        }
        if self.ground_height < 0 {
            return Err(ConfigError::NegativeGround(self.ground_height));
        }
        if self.obstacle_spacing < 0 {
            return Err(ConfigError::NegativeSpacing(self.obstacle_spacing));
        }
        if self.jump_impulse >= 0 {
            return Err(ConfigError::InvalidJumpImpulse(self.jump_impulse));
        }
        if self.obstacle_count == 0 {
            return Err(ConfigError::NoObstacles);
        }

        // Lengths and rates are bounded so positions and velocities never overflow
        let bounded = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("ground_height", self.ground_height),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("obstacle_spacing", self.obstacle_spacing),
            ("scroll_speed", self.scroll_speed),
            ("avatar_size", self.avatar_size),
            ("gravity", self.gravity),
        ];
        for (field, value) in bounded {
            if value > MAX_DIMENSION {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value.into(),
                    limit: MAX_DIMENSION.into(),
                });
            }
        }
        if self.jump_impulse < -MAX_DIMENSION {
            return Err(ConfigError::OutOfRange {
                field: "jump_impulse",
                value: self.jump_impulse.into(),
                limit: (-MAX_DIMENSION).into(),
            });
        }
        if self.obstacle_count > MAX_OBSTACLES {
            return Err(ConfigError::OutOfRange {
                field: "obstacle_count",
                value: i64::try_from(self.obstacle_count).unwrap_or(i64::MAX),
                limit: MAX_OBSTACLES as i64,
            });
        }

        // Right edge of the last obstacle in a fresh row
        let row_end = i32::try_from(self.obstacle_count - 1)
            .ok()
            .and_then(|n| n.checked_mul(self.obstacle_width + self.obstacle_spacing))
            .and_then(|offset| offset.checked_add(self.playfield_width))
            .and_then(|x| x.checked_add(self.obstacle_width));
        if row_end.is_none() {
            return Err(ConfigError::OutOfRange {
                field: "obstacle_spacing",
                value: self.obstacle_spacing.into(),
                limit: MAX_DIMENSION.into(),
            });
        }

        let gap_top_max = self
            .playfield_height
            .checked_sub(self.gap_size)
            .and_then(|h| h.checked_sub(self.ground_height));
        if !matches!(gap_top_max, Some(max) if max > 0) {
            return Err(ConfigError::EmptyGapRange {
                gap_size: self.gap_size,
                playfield_height: self.playfield_height,
                ground_height: self.ground_height,
            });
        }

        let tuning = Tuning {
            config: self.clone(),
        };
        let spawn = tuning.avatar_spawn();
        let spawn_bottom = spawn.y.checked_add(self.avatar_size);
        if spawn.y < 0 || spawn_bottom.is_none_or(|bottom| bottom >= tuning.ground_y()) {
            return Err(ConfigError::SpawnOutsidePlayfield {
                y: spawn.y,
                size: self.avatar_size,
                ground_y: tuning.ground_y(),
            });
        }

        Ok(tuning)
    }
}

/// A validated [`Config`] plus the quantities derived from it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tuning {
    config: Config,
}

impl Tuning {
    #[inline]
    pub fn playfield_width(&self) -> i32 {
        self.config.playfield_width
    }

    #[inline]
    pub fn playfield_height(&self) -> i32 {
        self.config.playfield_height
    }

    #[inline]
    pub fn ground_height(&self) -> i32 {
        self.config.ground_height
    }

    /// Y coordinate of the ground surface
    #[inline]
    pub fn ground_y(&self) -> i32 {
        self.config.playfield_height - self.config.ground_height
    }

    #[inline]
    pub fn obstacle_width(&self) -> i32 {
        self.config.obstacle_width
    }

    #[inline]
    pub fn gap_size(&self) -> i32 {
        self.config.gap_size
    }

    #[inline]
    pub fn obstacle_count(&self) -> usize {
        self.config.obstacle_count
    }

    #[inline]
    pub fn scroll_speed(&self) -> i32 {
        self.config.scroll_speed
    }

    /// Distance between the left edges of neighbouring obstacles at spawn
    #[inline]
    pub fn obstacle_pitch(&self) -> i32 {
        self.config.obstacle_width + self.config.obstacle_spacing
    }

    /// Half-open range every gap top is drawn from. Never empty.
    pub fn gap_top_range(&self) -> Range<i32> {
        0..self.ground_y() - self.config.gap_size
    }

    #[inline]
    pub fn avatar_size(&self) -> i32 {
        self.config.avatar_size
    }

    #[inline]
    pub fn gravity(&self) -> i32 {
        self.config.gravity
    }

    #[inline]
    pub fn jump_impulse(&self) -> i32 {
        self.config.jump_impulse
    }

    /// Where the avatar appears at the start of a run
    pub fn avatar_spawn(&self) -> IVec2 {
        IVec2::new(
            self.config.playfield_width / 4,
            self.config.playfield_height / 2,
        )
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms)
    }
}
