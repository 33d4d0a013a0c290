//! Error taxonomy for content loading and entity assembly.
//!
//! Configuration errors signal a mismatch between authored content and the
//! asset registry; they abort the load that hit them. Build errors signal a
//! recipe that forgot a required component group.

use thiserror::Error;

/// Authored content or asset data does not line up.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A texture key was requested that the registry does not know.
    #[error("missing texture `{0}`")]
    MissingTexture(String),
    /// A colour key was requested that the registry does not know.
    #[error("missing colour `{0}`")]
    MissingColor(String),
    /// A map object lacks a property its recipe cannot default.
    #[error("map object is missing required property `{0}`")]
    MissingProperty(String),
    /// A map property exists but holds the wrong kind of value.
    #[error("map property `{key}` should be {expected}")]
    PropertyType {
        /// Property name.
        key: String,
        /// Human-readable kind the recipe expected.
        expected: &'static str,
    },
    /// A map object names an archetype this build does not recognise.
    #[error("unknown {layer} type `{name}`")]
    UnknownArchetype {
        /// Map layer the object was read from.
        layer: &'static str,
        /// Type string found in the object's properties.
        name: String,
    },
    /// A colour string could not be parsed as `#rrggbb[aa]`.
    #[error("malformed colour `{0}`")]
    MalformedColor(String),
    /// No [`crate::assets::AssetRegistry`] resource was installed.
    #[error("asset registry is not installed")]
    MissingRegistry,
    /// The level declares no player spawn rectangle.
    #[error("level has no player spawn")]
    MissingPlayerSpawn,
    /// A manifest or level file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed to open.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A manifest or level file is not valid JSON for its schema.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// File that failed to parse.
        path: String,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

/// A builder was finalised without a consistent set of components.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// A component implies another one that was never attached.
    #[error("{component} requires {requires}")]
    MissingComponent {
        /// Component that carries the requirement.
        component: &'static str,
        /// Component group that must accompany it.
        requires: &'static str,
    },
    /// A numeric parameter is out of its valid domain.
    #[error("invalid {component} parameter: {detail}")]
    InvalidParameter {
        /// Component being configured.
        component: &'static str,
        /// What was wrong with the value.
        detail: String,
    },
}

/// Failure surfaced by the factory and level loader.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Content or asset mismatch.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Recipe produced an incomplete entity.
    #[error(transparent)]
    Build(#[from] BuildError),
}
