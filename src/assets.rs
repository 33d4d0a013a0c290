//! Texture and colour lookup by string key.
//!
//! The renderer owns the actual atlas; this registry only knows each
//! region's size and each colour's value, which is all entity assembly
//! needs. A lookup miss means the content references an asset the build
//! does not ship, and is reported as a [`ConfigError`].

use std::path::Path;

use bevy::prelude::*;
use hashbrown::HashMap;
use serde::Deserialize;

use crate::components::Tint;
use crate::error::ConfigError;

/// Size of one atlas region.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    pub width: f32,
    pub height: f32,
}

#[derive(Deserialize, Debug, Default)]
struct Manifest {
    #[serde(default)]
    textures: HashMap<String, TextureRegion>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

/// Registry of every texture region and colour the content may reference.
#[derive(Resource, Debug, Default, Clone)]
pub struct AssetRegistry {
    textures: HashMap<String, TextureRegion>,
    colors: HashMap<String, Tint>,
}

impl AssetRegistry {
    /// Parses a manifest of the form
    /// `{"textures": {"key": {"width": 8, "height": 8}}, "colors": {"key": "#rrggbb"}}`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] for malformed JSON and
    /// [`ConfigError::MalformedColor`] for colours that are not hex.
    pub fn from_json(origin: &str, text: &str) -> Result<Self, ConfigError> {
        let manifest: Manifest = serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: origin.to_owned(),
            source,
        })?;
        let mut registry = Self {
            textures: manifest.textures,
            colors: HashMap::with_capacity(manifest.colors.len()),
        };
        for (key, value) in manifest.colors {
            let tint = parse_hex_color(&value)?;
            registry.colors.insert(key, tint);
        }
        log::debug!(
            "asset manifest {origin}: {} textures, {} colours",
            registry.textures.len(),
            registry.colors.len()
        );
        Ok(registry)
    }

    /// Reads and parses a manifest file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Self::from_json`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: origin.clone(),
            source,
        })?;
        Self::from_json(&origin, &text)
    }

    pub fn insert_texture(&mut self, key: impl Into<String>, width: f32, height: f32) {
        self.textures
            .insert(key.into(), TextureRegion { width, height });
    }

    pub fn insert_color(&mut self, key: impl Into<String>, tint: Tint) {
        self.colors.insert(key.into(), tint);
    }

    /// Looks up a texture region.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingTexture`] when `key` is unknown.
    pub fn texture(&self, key: &str) -> Result<TextureRegion, ConfigError> {
        self.textures
            .get(key)
            .copied()
            .ok_or_else(|| ConfigError::MissingTexture(key.to_owned()))
    }

    /// Looks up a colour.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingColor`] when `key` is unknown.
    pub fn color(&self, key: &str) -> Result<Tint, ConfigError> {
        self.colors
            .get(key)
            .copied()
            .ok_or_else(|| ConfigError::MissingColor(key.to_owned()))
    }

    #[must_use]
    pub fn has_texture(&self, key: &str) -> bool {
        self.textures.contains_key(key)
    }
}

/// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
///
/// # Errors
/// Returns [`ConfigError::MalformedColor`] for anything else.
pub fn parse_hex_color(value: &str) -> Result<Tint, ConfigError> {
    let malformed = || ConfigError::MalformedColor(value.to_owned());
    let digits = value.strip_prefix('#').unwrap_or(value);
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
        return Err(malformed());
    }
    let mut channels = [1.0_f32; 4];
    for (channel, pair) in channels.iter_mut().zip(digits.as_bytes().chunks(2)) {
        let text = std::str::from_utf8(pair).map_err(|_| malformed())?;
        let byte = u8::from_str_radix(text, 16).map_err(|_| malformed())?;
        *channel = f32::from(byte) / 255.0;
    }
    Ok(Tint(channels))
}
