//! Crate-level error types.
//!
//! Fatal failures surface as [`SceneError`]. Per-primitive defects that a
//! build tolerates are reported as [`InvalidPrimitive`] diagnostics instead.

use std::fmt;

/// What is wrong with a required top-level key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaProblem {
    /// The key is absent.
    Missing,
    /// The key is present but its collection has no entries.
    Empty,
    /// The key is present but does not hold an array.
    WrongType,
}

/// A required top-level structure is missing or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaError {
    /// Name of the offending top-level key (`vertices`, `faces`, `atoms`).
    pub key: &'static str,
    /// What is wrong with it.
    pub problem: SchemaProblem,
}

impl SchemaError {
    /// The key is absent.
    #[must_use]
    pub const fn missing(key: &'static str) -> Self {
        Self {
            key,
            problem: SchemaProblem::Missing,
        }
    }

    /// The key holds an empty collection.
    #[must_use]
    pub const fn empty(key: &'static str) -> Self {
        Self {
            key,
            problem: SchemaProblem::Empty,
        }
    }

    /// The key holds something other than an array.
    #[must_use]
    pub const fn wrong_type(key: &'static str) -> Self {
        Self {
            key,
            problem: SchemaProblem::WrongType,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            SchemaProblem::Missing => {
                write!(f, "required key `{}` is missing", self.key)
            }
            SchemaProblem::Empty => {
                write!(f, "required key `{}` is empty", self.key)
            }
            SchemaProblem::WrongType => {
                write!(f, "required key `{}` must be an array", self.key)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Errors produced by the pickscene crate.
#[derive(Debug)]
pub enum SceneError {
    /// Required top-level structure missing or empty; no scene is produced.
    Schema(SchemaError),
    /// The build produced zero usable primitives.
    EmptyModel,
    /// A JSON document (description, reference or record) failed to parse.
    Json(serde_json::Error),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(e) => write!(f, "schema error: {e}"),
            Self::EmptyModel => {
                write!(f, "model produced no usable primitives")
            }
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schema(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SchemaError> for SceneError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Locates a single primitive inside a structured description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveRef {
    /// Triangle `triangle` of face group `face`.
    Triangle {
        /// Face group index.
        face: usize,
        /// Triangle index within the face group.
        triangle: usize,
    },
    /// Dimension label by index.
    Label(usize),
    /// Atom by index.
    Atom(usize),
    /// Bond by index.
    Bond(usize),
    /// Bond-angle entry `angle` of atom `atom`.
    BondAngle {
        /// Owning atom index.
        atom: usize,
        /// Entry index within the atom's bond angles.
        angle: usize,
    },
}

impl fmt::Display for PrimitiveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangle { face, triangle } => {
                write!(f, "triangle {triangle} of face {face}")
            }
            Self::Label(i) => write!(f, "label {i}"),
            Self::Atom(i) => write!(f, "atom {i}"),
            Self::Bond(i) => write!(f, "bond {i}"),
            Self::BondAngle { atom, angle } => {
                write!(f, "bond angle {angle} of atom {atom}")
            }
        }
    }
}

/// A single primitive was skipped or normalized; the build continued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPrimitive {
    /// Which primitive.
    pub primitive: PrimitiveRef,
    /// Human-readable reason.
    pub reason: String,
}

impl InvalidPrimitive {
    /// Log the defect and append it to `sink`.
    pub(crate) fn report(
        sink: &mut Vec<Self>,
        primitive: PrimitiveRef,
        reason: String,
    ) {
        log::warn!("invalid {primitive}: {reason}");
        sink.push(Self { primitive, reason });
    }
}

impl fmt::Display for InvalidPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.primitive, self.reason)
    }
}
