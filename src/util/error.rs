//! Error types for scene scrubbing.

use thiserror::Error;

/// Main error type for scene operations.
///
/// None of these are recovered from inside the scrubber: the first failure
/// aborts the batch and leaves the scene in whatever state it reached.
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced camera, object or material does not exist
    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    /// Rename would give a material a name another material already holds
    #[error("Cannot rename material '{from}' to '{to}': name already in use")]
    NamingConflict { from: String, to: String },

    /// Slot index out of bounds for the object
    #[error("Slot index {index} out of bounds on '{object}' (count: {count})")]
    InvalidIndex {
        object: String,
        index: usize,
        count: usize,
    },

    /// Scene document is structurally invalid
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Kind of scene entity a lookup was made for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Camera,
    Object,
    Material,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Camera => "Camera",
            Self::Object => "Object",
            Self::Material => "Material",
        })
    }
}

impl Error {
    /// Create a "not found" error for a camera.
    pub fn camera_not_found(name: impl Into<String>) -> Self {
        Self::NotFound { kind: EntityKind::Camera, name: name.into() }
    }

    /// Create a "not found" error for a scene object.
    pub fn object_not_found(name: impl Into<String>) -> Self {
        Self::NotFound { kind: EntityKind::Object, name: name.into() }
    }

    /// Create a "not found" error for a material.
    pub fn material_not_found(name: impl Into<String>) -> Self {
        Self::NotFound { kind: EntityKind::Material, name: name.into() }
    }

    /// Create an invalid scene error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidScene(msg.into())
    }

    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// True for the lookup failures the host reports for absent identifiers.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for scene operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::material_not_found("mirror-material");
        assert_eq!(e.to_string(), "Material not found: mirror-material");
        assert!(e.is_not_found());

        let e = Error::InvalidIndex { object: "tub".into(), index: 5, count: 3 };
        assert!(e.to_string().contains("5"));
        assert!(e.to_string().contains("3"));
        assert!(!e.is_not_found());
    }

    #[test]
    fn test_naming_conflict_display() {
        let e = Error::NamingConflict { from: "Material".into(), to: "material".into() };
        assert!(e.to_string().contains("'Material'"));
        assert!(e.to_string().contains("'material'"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
