//! Structural validation and defensive normalization of untyped payloads.
//!
//! Only two things are fatal: a missing (or non-array) required top-level
//! key, and an empty primary collection. Every other defect is confined to
//! the one primitive it affects: the primitive is skipped or normalized,
//! an [`InvalidPrimitive`] is recorded, and validation continues.

use glam::Vec3;
use serde::Deserialize;
use serde_json::Value;

use super::{
    Atom, Bond, BondAngle, BondOrder, DimensionLabel, FaceDetails, FaceGroup,
    ModelKind, MoleculeAnalysis, MoleculeDescription, SolidAnalysis,
    SolidDescription, StructuredDescription, Triangle,
};
use crate::error::{
    InvalidPrimitive, PrimitiveRef, SceneError, SchemaError,
};

/// Element symbol substituted when an atom has none.
pub const UNKNOWN_ELEMENT: &str = "?";

/// A normalized description plus the per-primitive defects found on the
/// way.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    /// The normalized description.
    pub description: StructuredDescription,
    /// Skipped or normalized primitives.
    pub diagnostics: Vec<InvalidPrimitive>,
}

/// Parse and validate a JSON document.
pub fn validate_str(json: &str) -> Result<Validated, SceneError> {
    let value: Value = serde_json::from_str(json)?;
    Ok(validate(&value)?)
}

/// Validate a payload, detecting its variant: the presence of `atoms`
/// selects a molecule, anything else is treated as a solid.
pub fn validate(value: &Value) -> Result<Validated, SchemaError> {
    let kind = if value.get("atoms").is_some() {
        ModelKind::Molecule
    } else {
        ModelKind::Solid
    };
    validate_as(kind, value)
}

/// Validate a payload as a specific variant.
pub fn validate_as(
    kind: ModelKind,
    value: &Value,
) -> Result<Validated, SchemaError> {
    let mut diagnostics = Vec::new();
    let description = match kind {
        ModelKind::Solid => StructuredDescription::Solid(normalize_solid(
            value,
            &mut diagnostics,
        )?),
        ModelKind::Molecule => StructuredDescription::Molecule(
            normalize_molecule(value, &mut diagnostics)?,
        ),
    };
    log::debug!(
        "validated {kind:?} description with {} diagnostic(s)",
        diagnostics.len()
    );
    Ok(Validated {
        description,
        diagnostics,
    })
}

fn required_array<'a>(
    value: &'a Value,
    key: &'static str,
) -> Result<&'a Vec<Value>, SchemaError> {
    let entry = value.get(key).ok_or(SchemaError::missing(key))?;
    let array = entry.as_array().ok_or(SchemaError::wrong_type(key))?;
    if array.is_empty() {
        return Err(SchemaError::empty(key));
    }
    Ok(array)
}

fn optional_array<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Read a point given as `[x, y, z]` or `{x, y, z}`. Coordinates must be
/// finite after narrowing to `f32`.
fn read_point(value: &Value) -> Option<Vec3> {
    let coords = match value {
        Value::Array(items) if items.len() == 3 => {
            [items[0].as_f64()?, items[1].as_f64()?, items[2].as_f64()?]
        }
        Value::Object(_) => [
            value.get("x")?.as_f64()?,
            value.get("y")?.as_f64()?,
            value.get("z")?.as_f64()?,
        ],
        _ => return None,
    };
    let point = Vec3::new(coords[0] as f32, coords[1] as f32, coords[2] as f32);
    point.is_finite().then_some(point)
}

fn read_index(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|i| usize::try_from(i).ok())
}

/// Read exactly three non-negative integer indices from either
/// `{"indices": [..]}` or a bare `[..]`.
fn read_triangle_indices(value: &Value) -> Result<[usize; 3], String> {
    let raw = value
        .get("indices")
        .or_else(|| value.is_array().then_some(value))
        .ok_or_else(|| "missing `indices`".to_owned())?;
    let items = raw
        .as_array()
        .ok_or_else(|| "`indices` is not an array".to_owned())?;
    if items.len() != 3 {
        return Err(format!("expected 3 indices, found {}", items.len()));
    }
    let mut indices = [0usize; 3];
    for (slot, item) in indices.iter_mut().zip(items) {
        *slot = read_index(item)
            .ok_or_else(|| format!("index {item} is not a non-negative integer"))?;
    }
    Ok(indices)
}

/// Check that every index resolves to a vertex with finite coordinates.
fn check_triangle(
    indices: [usize; 3],
    vertices: &[Option<Vec3>],
) -> Result<(), String> {
    for index in indices {
        match vertices.get(index) {
            None => {
                return Err(format!(
                    "vertex index {index} out of range ({} vertices)",
                    vertices.len()
                ))
            }
            Some(None) => {
                return Err(format!(
                    "vertex {index} does not have 3 finite coordinates"
                ))
            }
            Some(Some(_)) => {}
        }
    }
    Ok(())
}

fn normalize_solid(
    value: &Value,
    diagnostics: &mut Vec<InvalidPrimitive>,
) -> Result<SolidDescription, SchemaError> {
    let raw_vertices = required_array(value, "vertices")?;
    let raw_faces = required_array(value, "faces")?;

    let vertices: Vec<Option<Vec3>> =
        raw_vertices.iter().map(read_point).collect();

    let mut faces = Vec::with_capacity(raw_faces.len());
    for (face, raw_face) in raw_faces.iter().enumerate() {
        let details = raw_face
            .get("details")
            .and_then(|d| FaceDetails::deserialize(d).ok())
            .unwrap_or_default();
        let mut triangles = Vec::new();
        for (triangle, raw_tri) in
            optional_array(raw_face, "triangles").iter().enumerate()
        {
            let checked = read_triangle_indices(raw_tri).and_then(|indices| {
                check_triangle(indices, &vertices).map(|()| indices)
            });
            match checked {
                Ok(indices) => triangles.push(Triangle { indices }),
                Err(reason) => InvalidPrimitive::report(
                    diagnostics,
                    PrimitiveRef::Triangle { face, triangle },
                    reason,
                ),
            }
        }
        faces.push(FaceGroup { details, triangles });
    }

    let mut labels = Vec::new();
    for (index, raw) in optional_array(value, "labels").iter().enumerate() {
        let text = raw.get("text").and_then(|t| match t {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let position = raw.get("position").and_then(read_point);
        match (text, position) {
            (Some(text), Some(position)) => {
                labels.push(DimensionLabel { text, position });
            }
            _ => InvalidPrimitive::report(
                diagnostics,
                PrimitiveRef::Label(index),
                "label needs `text` and a finite `position`".to_owned(),
            ),
        }
    }

    let analysis = value
        .get("analysis")
        .and_then(|a| SolidAnalysis::deserialize(a).ok())
        .unwrap_or_default();

    // Every triangle touching a defective vertex is gone, so the
    // placeholder is never referenced.
    let vertices = vertices.into_iter().map(|v| v.unwrap_or(Vec3::ZERO)).collect();

    Ok(SolidDescription {
        vertices,
        faces,
        labels,
        analysis,
    })
}

fn normalize_molecule(
    value: &Value,
    diagnostics: &mut Vec<InvalidPrimitive>,
) -> Result<MoleculeDescription, SchemaError> {
    let raw_atoms = required_array(value, "atoms")?;

    let atoms: Vec<Atom> = raw_atoms
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_atom(index, raw, diagnostics))
        .collect();

    let mut bonds = Vec::new();
    for (index, raw) in optional_array(value, "bonds").iter().enumerate() {
        match normalize_bond(index, raw, atoms.len(), diagnostics) {
            Ok(bond) => bonds.push(bond),
            Err(reason) => InvalidPrimitive::report(
                diagnostics,
                PrimitiveRef::Bond(index),
                reason,
            ),
        }
    }

    let analysis = value
        .get("analysis")
        .and_then(|a| MoleculeAnalysis::deserialize(a).ok())
        .unwrap_or_default();

    Ok(MoleculeDescription {
        atoms,
        bonds,
        analysis,
    })
}

fn normalize_atom(
    index: usize,
    raw: &Value,
    diagnostics: &mut Vec<InvalidPrimitive>,
) -> Atom {
    if !raw.is_object() {
        InvalidPrimitive::report(
            diagnostics,
            PrimitiveRef::Atom(index),
            "atom is not an object; using defaults".to_owned(),
        );
    }

    let element = raw
        .get("element")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_ELEMENT)
        .to_owned();

    let position = match raw.get("position") {
        None => Vec3::ZERO,
        Some(p) => read_point(p).unwrap_or_else(|| {
            InvalidPrimitive::report(
                diagnostics,
                PrimitiveRef::Atom(index),
                "position is not 3 finite numbers; using origin".to_owned(),
            );
            Vec3::ZERO
        }),
    };

    let vsepr_shape = raw
        .get("vseprShape")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    let mut bond_angles = Vec::new();
    for (angle, entry) in optional_array(raw, "bondAngles").iter().enumerate()
    {
        match BondAngle::deserialize(entry) {
            Ok(parsed) if parsed.angle.is_finite() => bond_angles.push(parsed),
            Ok(_) => InvalidPrimitive::report(
                diagnostics,
                PrimitiveRef::BondAngle { atom: index, angle },
                "angle is not finite".to_owned(),
            ),
            Err(e) => InvalidPrimitive::report(
                diagnostics,
                PrimitiveRef::BondAngle { atom: index, angle },
                e.to_string(),
            ),
        }
    }

    Atom {
        element,
        position,
        vsepr_shape,
        bond_angles,
    }
}

fn normalize_bond(
    index: usize,
    raw: &Value,
    atom_count: usize,
    diagnostics: &mut Vec<InvalidPrimitive>,
) -> Result<Bond, String> {
    let endpoint = |key: &str| -> Result<usize, String> {
        let i = raw
            .get(key)
            .and_then(read_index)
            .ok_or_else(|| format!("`{key}` is not a non-negative integer"))?;
        if i >= atom_count {
            return Err(format!(
                "`{key}` atom index {i} out of range ({atom_count} atoms)"
            ));
        }
        Ok(i)
    };
    let start = endpoint("start")?;
    let end = endpoint("end")?;

    let order = match raw.get("type") {
        None | Some(Value::Null) => Some(BondOrder::Single),
        Some(Value::String(name)) => BondOrder::parse(name),
        Some(Value::Number(n)) => {
            n.as_u64().and_then(BondOrder::from_multiplicity)
        }
        Some(_) => None,
    }
    .unwrap_or_else(|| {
        InvalidPrimitive::report(
            diagnostics,
            PrimitiveRef::Bond(index),
            "unknown bond type; treating as single".to_owned(),
        );
        BondOrder::Single
    });

    let energy = raw
        .get("energy")
        .and_then(Value::as_f64)
        .filter(|e| e.is_finite());

    Ok(Bond {
        start,
        end,
        order,
        energy,
    })
}
