//! Tunable parameters for the snowfall effect.

use std::time::Duration;

use flurry_core::Rgb;
use serde::{Deserialize, Serialize};

/// Upper bound on the expected number of flakes spawned in one frame.
pub const MAX_FLAKES_PER_FRAME: f32 = 256.0;

/// Parameters for the whole simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowfallSettings {
    /// Flakes per 100 pixels of width, per second.
    pub frequency: f32,
    /// Target frame rate. Speeds and spawn rate are expressed per frame.
    pub fps: f32,
    /// How far past the left, right and bottom edges a flake may travel
    /// before it is removed.
    pub removal_padding: f32,
    /// Enable pointer-driven force perturbation.
    pub pointer_interaction: bool,
    pub flake: FlakeSettings,
    pub cast: CastSettings,
}

impl Default for SnowfallSettings {
    fn default() -> Self {
        Self {
            frequency: 7.0,
            fps: 60.0,
            removal_padding: 50.0,
            pointer_interaction: true,
            flake: FlakeSettings::default(),
            cast: CastSettings::default(),
        }
    }
}

impl SnowfallSettings {
    /// Expected number of new flakes per frame on a surface `width` pixels wide,
    /// capped at [`MAX_FLAKES_PER_FRAME`].
    pub fn flakes_per_frame(&self, width: u32) -> f32 {
        if self.fps.is_nan() || self.fps <= 0.0 {
            return 0.0;
        }
        let rate = (width as f32 / 100.0) * self.frequency / self.fps;
        if rate.is_nan() {
            return 0.0;
        }
        rate.min(MAX_FLAKES_PER_FRAME)
    }

    /// Frame interval for the configured frame rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.fps.max(1.0))
    }
}

/// Per-flake physical and visual parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlakeSettings {
    /// Fall speed of the farthest flake, pixels per second.
    pub min_speed: f32,
    /// Fall speed of the nearest flake, pixels per second.
    pub max_speed: f32,
    /// Radius of the farthest flake before noise.
    pub min_size: f32,
    /// Radius of the nearest flake before noise.
    pub max_size: f32,
    /// Relative size noise, applied as `size * (1 + noise * u)` with `u` in [-1, 1].
    pub size_noise: f32,
    pub friction: f32,
    /// Horizontal jitter amplitude at full depth, pixels per frame.
    pub noise_x: f32,
    /// Vertical jitter amplitude at full depth, pixels per frame.
    pub noise_y: f32,
    pub color: Rgb,
}

impl Default for FlakeSettings {
    fn default() -> Self {
        Self {
            min_speed: 30.0,
            max_speed: 180.0,
            min_size: 0.4,
            max_size: 1.6,
            size_noise: 0.5,
            friction: 0.035,
            noise_x: 0.07,
            noise_y: 0.02,
            color: Rgb::WHITE,
        }
    }
}

/// Pointer-interaction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastSettings {
    /// Influence radius as a fraction of the smaller surface dimension.
    pub radius_ratio: f32,
    /// Force scale at the pointer position, falling off linearly to zero at the radius.
    pub force: f32,
    /// Minimum interval between processed pointer samples, milliseconds.
    pub throttle_ms: u64,
}

impl Default for CastSettings {
    fn default() -> Self {
        Self {
            radius_ratio: 0.4,
            force: 0.05,
            throttle_ms: 50,
        }
    }
}

impl CastSettings {
    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Influence radius for a surface of the given size.
    pub fn radius_for(&self, width: u32, height: u32) -> f32 {
        self.radius_ratio * width.min(height) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flakes_per_frame() {
        let settings = SnowfallSettings::default();
        // (1200 / 100) * 7 / 60
        assert!((settings.flakes_per_frame(1200) - 1.4).abs() < 1e-5);
        assert_eq!(settings.flakes_per_frame(0), 0.0);
    }

    #[test]
    fn test_flakes_per_frame_with_zero_fps() {
        let settings = SnowfallSettings {
            fps: 0.0,
            ..Default::default()
        };
        assert_eq!(settings.flakes_per_frame(1000), 0.0);
    }

    #[test]
    fn test_flakes_per_frame_is_capped() {
        let huge = SnowfallSettings {
            frequency: 1e12,
            ..Default::default()
        };
        assert_eq!(huge.flakes_per_frame(1000), MAX_FLAKES_PER_FRAME);

        let crawling = SnowfallSettings {
            fps: 1e-9,
            ..Default::default()
        };
        assert_eq!(crawling.flakes_per_frame(1000), MAX_FLAKES_PER_FRAME);

        let infinite = SnowfallSettings {
            frequency: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(infinite.flakes_per_frame(1000), MAX_FLAKES_PER_FRAME);
    }

    #[test]
    fn test_cast_radius() {
        let cast = CastSettings::default();
        assert!((cast.radius_for(1000, 800) - 320.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_interval() {
        let settings = SnowfallSettings::default();
        let interval = settings.frame_interval();
        assert!(interval > Duration::from_millis(16) && interval < Duration::from_millis(17));
    }
}
