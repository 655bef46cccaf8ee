use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::physics::{BALL_RADIUS, Bounds, DAMPING, HOLE_RADIUS, LAUNCH_FACTOR, REST_THRESHOLD};

/// Default canvas width in pixels.
pub const GREEN_WIDTH: f32 = 600.0;
/// Default canvas height in pixels.
pub const GREEN_HEIGHT: f32 = 300.0;
/// Distance of the tee from the left edge and of the hole from the right edge.
const TEE_INSET: f32 = 100.0;

/// Convert a `0xRRGGBB` literal into linear `[r, g, b]` in `0.0..=1.0`.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Colors used when drawing the green.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreenTheme {
    pub background: [f32; 3],
    pub hole: [f32; 3],
    pub ball: [f32; 3],
    pub aim_line: [f32; 3],
}

impl Default for GreenTheme {
    fn default() -> Self {
        Self {
            background: rgb(0x90ee90),
            hole: rgb(0x000000),
            ball: rgb(0xffffff),
            aim_line: rgb(0x0000ff),
        }
    }
}

/// Data-driven configuration for the putting green.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreenConfig {
    pub width: f32,
    pub height: f32,
    pub ball_radius: f32,
    pub hole_radius: f32,
    /// Tee position. Defaults to 100px from the left edge, vertically centered.
    pub start: Option<[f32; 2]>,
    /// Hole position. Defaults to 100px from the right edge, vertically centered.
    pub hole: Option<[f32; 2]>,
    pub damping: f32,
    pub rest_threshold: f32,
    pub launch_factor: f32,
    /// Shown to the player when the ball drops.
    pub capture_message: String,
    pub theme: GreenTheme,
}

impl Default for GreenConfig {
    fn default() -> Self {
        Self {
            width: GREEN_WIDTH,
            height: GREEN_HEIGHT,
            ball_radius: BALL_RADIUS,
            hole_radius: HOLE_RADIUS,
            start: None,
            hole: None,
            damping: DAMPING,
            rest_threshold: REST_THRESHOLD,
            launch_factor: LAUNCH_FACTOR,
            capture_message: "Congratulations! You sank the putt!".to_string(),
            theme: GreenTheme::default(),
        }
    }
}

impl GreenConfig {
    /// Load config from `FAIRWAY_GREEN_CONFIG` or `config/green.toml`.
    /// Falls back to defaults if the file is missing, unparseable or invalid.
    pub fn load() -> Self {
        let path = std::env::var("FAIRWAY_GREEN_CONFIG")
            .unwrap_or_else(|_| "config/green.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::from_toml(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("Failed to load {}: {e}, using defaults", path.display());
                Self::default()
            },
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    pub fn start_point(&self) -> Vec2 {
        self.start
            .map(Vec2::from)
            .unwrap_or_else(|| Vec2::new(TEE_INSET, self.height / 2.0))
    }

    pub fn hole_point(&self) -> Vec2 {
        self.hole
            .map(Vec2::from)
            .unwrap_or_else(|| Vec2::new(self.width - TEE_INSET, self.height / 2.0))
    }

    /// Reject greens the ball cannot be played on. The tee must keep the whole
    /// ball on the green; the hole center only has to be on it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("ball_radius", self.ball_radius),
            ("hole_radius", self.hole_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let min_side = self.ball_radius * 2.0;
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width < min_side
            || self.height < min_side
        {
            return Err(ConfigError::Dimensions {
                width: self.width,
                height: self.height,
            });
        }

        // Both are needed for a rolling ball to reach exactly zero velocity.
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if !(self.rest_threshold.is_finite() && self.rest_threshold > 0.0) {
            return Err(ConfigError::NonPositive {
                field: "rest_threshold",
                value: self.rest_threshold,
            });
        }
        if !(self.launch_factor.is_finite() && self.launch_factor >= 0.0) {
            return Err(ConfigError::Negative {
                field: "launch_factor",
                value: self.launch_factor,
            });
        }

        let start = self.start_point();
        if !self.bounds().holds(start, self.ball_radius) {
            return Err(ConfigError::OffGreen {
                field: "start",
                point: start.to_array(),
            });
        }
        let hole = self.hole_point();
        if !self.bounds().holds(hole, 0.0) {
            return Err(ConfigError::OffGreen {
                field: "hole",
                point: hole.to_array(),
            });
        }
        if start.distance(hole) < self.hole_radius {
            return Err(ConfigError::TeeInCup {
                start: start.to_array(),
                hole: hole.to_array(),
            });
        }

        Ok(())
    }
}

/// Reasons a [`GreenConfig`] cannot be played.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Dimensions { width: f32, height: f32 },
    NonPositive { field: &'static str, value: f32 },
    Negative { field: &'static str, value: f32 },
    Damping(f32),
    OffGreen { field: &'static str, point: [f32; 2] },
    /// The tee sits inside the cup, so every frame would capture.
    TeeInCup { start: [f32; 2], hole: [f32; 2] },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "invalid green config: {m}"),
            Self::Dimensions { width, height } => {
                write!(f, "green {width}x{height} is too small for the ball")
            },
            Self::NonPositive { field, value } => write!(f, "{field} must be > 0, got {value}"),
            Self::Negative { field, value } => write!(f, "{field} must be >= 0, got {value}"),
            Self::Damping(d) => write!(f, "damping must be in (0, 1), got {d}"),
            Self::OffGreen { field, point } => {
                write!(f, "{field} ({}, {}) is off the green", point[0], point[1])
            },
            Self::TeeInCup { start, hole } => write!(
                f,
                "tee ({}, {}) is inside the cup at ({}, {})",
                start[0], start[1], hole[0], hole[1]
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
