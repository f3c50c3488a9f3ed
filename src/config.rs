//! Canvas configuration, stored as JSON
//!
//! Every field has a default so a config file only needs the values it
//! changes. Command-line flags in the binary override whatever is loaded here.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::OPAQUE;
use crate::effects::convolution::{Flame, FlameClock, SamplePattern};
use crate::effects::contrast::ContrastStretch;
use crate::error::Result;

pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Pixels per buffer row; `None` means the same as `width`
    pub stride: Option<u32>,
    /// Window pixels per buffer pixel
    pub pixel_scale: u32,
    pub frame_rate: u32,
    /// Alpha used for opaque drawing colors
    pub opaque: u8,
    /// Worker threads for fills and per-pixel effects; 0 picks the machine's parallelism
    pub cores: usize,
    pub flame: FlameConfig,
    pub contrast: ContrastConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlameConfig {
    pub pattern: SamplePattern,
    pub divisor_base: f32,
    pub zero_border: bool,
    /// The effect time sweeps between these bounds, one step per pass
    pub time_low: f32,
    pub time_high: f32,
    pub time_step: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    pub discard_ratio: f32,
    pub scale_alpha: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            title: "multiraster".to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            stride: None,
            pixel_scale: 4,
            frame_rate: 60,
            opaque: OPAQUE,
            cores: 0,
            flame: FlameConfig::default(),
            contrast: ContrastConfig::default(),
        }
    }
}

impl Default for FlameConfig {
    fn default() -> Self {
        Self {
            pattern: SamplePattern::Highway,
            divisor_base: Flame::TRIPPY_DIVISOR,
            zero_border: false,
            time_low: 0.75,
            time_high: 0.81,
            time_step: 0.0001,
        }
    }
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            discard_ratio: 0.9,
            scale_alpha: false,
        }
    }
}

impl CanvasConfig {
    /// Row stride, never smaller than the width
    pub fn stride(&self) -> u32 {
        self.stride.unwrap_or(self.width).max(self.width)
    }

    /// Worker count with 0 resolved to the available parallelism
    pub fn cores(&self) -> usize {
        if self.cores > 0 {
            return self.cores;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    /// Window size in screen pixels
    pub fn window_size(&self) -> (u32, u32) {
        let scale = self.pixel_scale.max(1);
        (self.width * scale, self.height * scale)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        debug!("wrote canvas config to {}", path.display());
        Ok(())
    }

    /// Load config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        debug!(
            "loaded canvas config from {}: {}x{}",
            path.display(),
            config.width,
            config.height
        );
        Ok(config)
    }
}

impl FlameConfig {
    pub fn flame(&self) -> Flame {
        Flame {
            pattern: self.pattern,
            divisor_base: self.divisor_base,
            zero_border: self.zero_border,
        }
    }

    pub fn clock(&self) -> FlameClock {
        FlameClock::new(self.time_low, self.time_high, self.time_step)
    }
}

impl ContrastConfig {
    pub fn stretch(&self) -> ContrastStretch {
        ContrastStretch {
            discard_ratio: self.discard_ratio,
            scale_alpha: self.scale_alpha,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.stride(), 320);
        assert_eq!(config.pixel_scale, 4);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.opaque, 255);
        assert!(config.cores() >= 1);
        assert_eq!(config.window_size(), (1280, 800));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            CanvasConfig::from_json(r#"{ "width": 64, "cores": 3, "flame": { "pattern": "castle" } }"#)
                .unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.cores(), 3);
        assert_eq!(config.flame.pattern, SamplePattern::Castle);
        assert_eq!(config.flame.divisor_base, Flame::TRIPPY_DIVISOR);
        assert_eq!(config.contrast, ContrastConfig::default());
    }

    #[test]
    fn test_stride_never_below_width() {
        let config = CanvasConfig {
            stride: Some(10),
            ..CanvasConfig::default()
        };
        assert_eq!(config.stride(), config.width);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("multiraster-config-{}.json", std::process::id()));
        let config = CanvasConfig {
            title: "saved".into(),
            width: 100,
            stride: Some(128),
            ..CanvasConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = CanvasConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = CanvasConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::error::RenderError::Config(_)));
    }
}
