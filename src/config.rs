//! Construction-time options for the mask engine and the demo window.
//!
//! Everything has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! resolution = 1024
//! erase_radius = 50
//! brush = "assets/brush.png"
//! blend = "subtract"   # or "cut"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::types::BlendMode;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Mask grid side length in texels.
    pub resolution: u32,
    /// Brush radius in mask texels.
    pub erase_radius: u32,
    /// Brush image; a soft round brush is generated when absent.
    pub brush: Option<PathBuf>,
    /// Image shown on top until scratched away.
    pub cover: Option<PathBuf>,
    /// Image underneath the cover.
    pub reveal: Option<PathBuf>,
    pub blend: BlendMode,
    pub window_width: usize,
    pub window_height: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: 1024,
            erase_radius: 50,
            brush: None,
            cover: None,
            reveal: None,
            blend: BlendMode::Subtract,
            window_width: 640,
            window_height: 480,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: format!("failed to read: {e}"),
        })?;
        Self::parse(&content, path)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, Error> {
        let config: Config = toml::from_str(content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.resolution == 0 {
            return Err(Error::InvalidResolution(self.resolution));
        }
        if self.erase_radius == 0 {
            return Err(Error::InvalidRadius(self.erase_radius));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn fields_override_defaults() {
        let c = Config::from_toml_str(
            r#"
            resolution = 256
            erase_radius = 16
            brush = "brush.png"
            blend = "cut"
            "#,
        )
        .unwrap();
        assert_eq!(c.resolution, 256);
        assert_eq!(c.erase_radius, 16);
        assert_eq!(c.brush.as_deref(), Some(Path::new("brush.png")));
        assert_eq!(c.blend, BlendMode::Cut);
        assert_eq!(c.window_width, 640);
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(matches!(Config::from_toml_str("resolution = 0"), Err(Error::InvalidResolution(0))));
        assert!(matches!(Config::from_toml_str("erase_radius = 0"), Err(Error::InvalidRadius(0))));
    }

    #[test]
    fn unknown_keys_and_bad_types_fail() {
        assert!(matches!(Config::from_toml_str("radius = 3"), Err(Error::Config { .. })));
        assert!(matches!(Config::from_toml_str("resolution = \"big\""), Err(Error::Config { .. })));
        assert!(matches!(Config::from_toml_str("blend = \"paint\""), Err(Error::Config { .. })));
    }

    #[test]
    fn load_reads_from_disk() {
        let path = std::env::temp_dir().join(format!("scratch-mask-config-{}.toml", std::process::id()));
        fs::write(&path, "resolution = 512\n").unwrap();
        let c = Config::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(c.resolution, 512);
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = Config::load("/no/such/scratch.toml").unwrap_err();
        assert!(err.to_string().contains("/no/such/scratch.toml"));
    }
}
