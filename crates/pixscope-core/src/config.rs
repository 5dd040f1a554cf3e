use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    KEY_MOVE_STEP, KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS, LENS_INFO_HEIGHT, LENS_OFFSET,
    LENS_SIZE, LENS_ZOOM, MAX_FILE_SIZE_BYTES, MAX_IMAGE_DIMENSION,
};
use crate::error::{PixscopeError, Result};
use crate::media::MediaType;

/// All inspector settings. Read once at startup and fixed for the session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    pub upload: UploadConfig,
    pub lens: LensConfig,
    pub keyboard: KeyboardConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub supported_types: Vec<MediaType>,
    pub max_file_size_bytes: u64,
    /// Longest displayed side; larger images are downscaled to it.
    pub max_image_dimension: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            supported_types: MediaType::ALL.to_vec(),
            max_file_size_bytes: MAX_FILE_SIZE_BYTES,
            max_image_dimension: MAX_IMAGE_DIMENSION,
        }
    }
}

impl UploadConfig {
    pub fn supports(&self, media_type: MediaType) -> bool {
        self.supported_types.contains(&media_type)
    }

    /// Extensions accepted by the file picker.
    pub fn extensions(&self) -> Vec<&'static str> {
        self.supported_types
            .iter()
            .flat_map(|t| t.extensions().iter().copied())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// Edge length of the square lens canvas.
    pub size: u32,
    pub zoom: f32,
    /// Gap between cursor and lens.
    pub offset: f32,
    /// Height of the readout panel drawn under the lens.
    pub info_height: f32,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            size: LENS_SIZE,
            zoom: LENS_ZOOM,
            offset: LENS_OFFSET,
            info_height: LENS_INFO_HEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub step: u32,
    pub repeat_delay_ms: u64,
    pub repeat_interval_ms: u64,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            step: KEY_MOVE_STEP,
            repeat_delay_ms: KEY_REPEAT_DELAY_MS,
            repeat_interval_ms: KEY_REPEAT_INTERVAL_MS,
        }
    }
}

impl KeyboardConfig {
    pub fn repeat_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_delay_ms)
    }

    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }
}

impl InspectorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| PixscopeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PixscopeError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.upload.supported_types.is_empty() {
            return Err(PixscopeError::Config(
                "upload.supported_types must list at least one type".into(),
            ));
        }
        if self.upload.max_file_size_bytes == 0 {
            return Err(PixscopeError::Config(
                "upload.max_file_size_bytes must be > 0".into(),
            ));
        }
        if self.upload.max_image_dimension == 0 {
            return Err(PixscopeError::Config(
                "upload.max_image_dimension must be > 0".into(),
            ));
        }
        if self.lens.size == 0 {
            return Err(PixscopeError::Config("lens.size must be > 0".into()));
        }
        if !(self.lens.zoom > 0.0 && self.lens.zoom.is_finite()) {
            return Err(PixscopeError::Config(format!(
                "lens.zoom must be a positive number, got {}",
                self.lens.zoom
            )));
        }
        if self.lens.offset < 0.0 || self.lens.info_height < 0.0 {
            return Err(PixscopeError::Config(
                "lens.offset and lens.info_height must not be negative".into(),
            ));
        }
        if self.keyboard.step == 0 || self.keyboard.repeat_interval_ms == 0 {
            return Err(PixscopeError::Config(
                "keyboard.step and keyboard.repeat_interval_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
