//! Configuration and shared types for the VibeRacing crates
//!
//! Every tuning constant of the game lives here with a `Default` that
//! reproduces the stock prototype. A TOML file may override any subset:
//!
//! ```toml
//! log_level = "debug"
//!
//! [physics]
//! friction = 0.93
//!
//! [race]
//! countdown_seconds = 3.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Simulation tuning
// ---------------------------------------------------------------------------

/// Vehicle handling and contact response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Speed gained (or lost, when braking) per second of held input, px/s²
    pub accel_rate: f64,
    /// Heading change per second of held steering, rad/s
    pub turn_rate: f64,
    /// Per-frame speed multiplier, applied unconditionally
    pub friction: f64,
    /// Extra per-frame multiplier while the car is off the drivable corridor
    pub off_track_friction: f64,
    /// Speed is multiplied by `-collision_damping` on contact
    pub collision_damping: f64,
    pub car_length: f64,
    pub car_width: f64,
    /// Minimum center distance between cars as a fraction of `car_length`
    pub min_separation_factor: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            accel_rate: 340.0,
            turn_rate: 2.6,
            friction: 0.95,
            off_track_friction: 0.72,
            collision_damping: 0.85,
            car_length: 28.0,
            car_width: 14.0,
            min_separation_factor: 0.75,
        }
    }
}

impl PhysicsConfig {
    /// Center-to-center distance below which two cars are in contact
    pub fn min_separation(&self) -> f64 {
        self.car_length * self.min_separation_factor
    }
}

/// Start sequence and lap bookkeeping timings (seconds unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceTiming {
    pub countdown_seconds: f64,
    pub flag_seconds: f64,
    /// Lockout after a counted lap
    pub lap_cooldown_seconds: f64,
    /// Laps shorter than this are treated as line jitter
    pub min_lap_seconds: f64,
    /// Debounce distance around the finish line x, in px
    pub crossing_margin: f64,
}

impl Default for RaceTiming {
    fn default() -> Self {
        Self {
            countdown_seconds: 5.0,
            flag_seconds: 1.6,
            lap_cooldown_seconds: 1.2,
            min_lap_seconds: 0.6,
            crossing_margin: 8.0,
        }
    }
}

/// Course dimensions. The shape is always the same lemniscate; these values
/// only size and place it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Play area (and framebuffer) size in px
    pub area_width: f64,
    pub area_height: f64,
    pub loop_radius: f64,
    pub loop_offset: f64,
    /// Full width of the drivable corridor
    pub track_width: f64,
    /// Parameter steps used for the distance-to-centerline estimate
    pub distance_samples: usize,
    /// Cars keep their branch while within this many track widths of the crossing
    pub path_lock_factor: f64,
    /// Underpass cars are hidden within this many track widths of the crossing
    pub hide_factor: f64,
    /// Distance of the starting grid behind the finish line
    pub grid_back_offset: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            area_width: 900.0,
            area_height: 600.0,
            loop_radius: 170.0,
            loop_offset: 160.0,
            track_width: 90.0,
            distance_samples: 64,
            path_lock_factor: 1.5,
            hide_factor: 1.0,
            grid_back_offset: 50.0,
        }
    }
}

/// Everything the simulation core needs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub physics: PhysicsConfig,
    pub race: RaceTiming,
    pub track: TrackConfig,
}

impl SimConfig {
    /// Reject values that would make the simulation non-physical
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        unit_interval("physics.friction", p.friction)?;
        unit_interval("physics.off_track_friction", p.off_track_friction)?;
        if !(0.0..=1.0).contains(&p.collision_damping) {
            return Err(invalid("physics.collision_damping", p.collision_damping, "must be within [0, 1]"));
        }
        non_negative("physics.accel_rate", p.accel_rate)?;
        non_negative("physics.turn_rate", p.turn_rate)?;
        positive("physics.car_length", p.car_length)?;
        positive("physics.car_width", p.car_width)?;
        positive("physics.min_separation_factor", p.min_separation_factor)?;

        let r = &self.race;
        non_negative("race.countdown_seconds", r.countdown_seconds)?;
        non_negative("race.flag_seconds", r.flag_seconds)?;
        non_negative("race.lap_cooldown_seconds", r.lap_cooldown_seconds)?;
        non_negative("race.min_lap_seconds", r.min_lap_seconds)?;
        non_negative("race.crossing_margin", r.crossing_margin)?;

        let t = &self.track;
        positive("track.area_width", t.area_width)?;
        positive("track.area_height", t.area_height)?;
        positive("track.loop_radius", t.loop_radius)?;
        non_negative("track.loop_offset", t.loop_offset)?;
        positive("track.track_width", t.track_width)?;
        positive("track.path_lock_factor", t.path_lock_factor)?;
        positive("track.hide_factor", t.hide_factor)?;
        non_negative("track.grid_back_offset", t.grid_back_offset)?;
        if t.distance_samples == 0 {
            return Err(ConfigError::Invalid("track.distance_samples must be at least 1".into()));
        }
        if t.area_width <= 2.0 * p.car_width || t.area_height <= 2.0 * p.car_width {
            return Err(ConfigError::Invalid(
                "track area must be larger than twice the car width".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Desktop window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub target_fps: u32,
    /// Integer window scale (1, 2 or 4)
    pub scale: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vibe Racing".to_string(),
            target_fps: 60,
            scale: 1,
        }
    }
}

/// Application-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub physics: PhysicsConfig,
    pub race: RaceTiming,
    pub track: TrackConfig,
    pub window: WindowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            physics: PhysicsConfig::default(),
            race: RaceTiming::default(),
            track: TrackConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text. Missing sections fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.sim_config().validate()?;
        if self.window.target_fps == 0 {
            return Err(ConfigError::Invalid("window.target_fps must be at least 1".into()));
        }
        if !matches!(self.window.scale, 1 | 2 | 4) {
            return Err(ConfigError::Invalid(format!(
                "window.scale must be 1, 2 or 4, got {}",
                self.window.scale
            )));
        }
        Ok(())
    }

    /// The simulation-facing subset
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            physics: self.physics.clone(),
            race: self.race.clone(),
            track: self.track.clone(),
        }
    }
}

fn invalid(name: &str, value: f64, rule: &str) -> ConfigError {
    ConfigError::Invalid(format!("{} {} (got {})", name, rule, value))
}

fn unit_interval(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be within (0, 1]"))
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, value, "must be positive"))
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, value, "must not be negative"))
    }
}
