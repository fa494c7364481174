//! Faceted-solid builder: one pickable triangle per description triangle,
//! tagged with its face group, plus dimension-label markers.

use glam::Vec3;

use super::BuildOutput;
use crate::description::{ModelKind, SolidDescription};
use crate::error::{InvalidPrimitive, PrimitiveRef, SceneError, SchemaError};
use crate::options::Options;
use crate::scene::{EntityTag, FaceTag, LabelShape, Node, Scene, Shape};

/// Resolve three indices to finite vertex positions.
fn resolve_triangle(
    vertices: &[Vec3],
    indices: [usize; 3],
) -> Result<[Vec3; 3], String> {
    let mut corners = [Vec3::ZERO; 3];
    for (corner, index) in corners.iter_mut().zip(indices) {
        let point = vertices.get(index).ok_or_else(|| {
            format!(
                "vertex index {index} out of range ({} vertices)",
                vertices.len()
            )
        })?;
        if !point.is_finite() {
            return Err(format!("vertex {index} has non-finite coordinates"));
        }
        *corner = *point;
    }
    Ok(corners)
}

/// Build the scene for a faceted solid.
///
/// Fails with a schema error on `vertices` or `faces` when either is
/// empty, and with [`SceneError::EmptyModel`] when no triangle survives.
pub fn build_solid(
    description: &SolidDescription,
    options: &Options,
) -> Result<BuildOutput, SceneError> {
    if description.vertices.is_empty() {
        return Err(SchemaError::empty("vertices").into());
    }
    if description.faces.is_empty() {
        return Err(SchemaError::empty("faces").into());
    }

    let mut scene = Scene::new(ModelKind::Solid);
    let mut diagnostics = Vec::new();
    let root = scene.root();
    let mut triangle_count = 0usize;

    for (face_id, face) in description.faces.iter().enumerate() {
        for (triangle, tri) in face.triangles.iter().enumerate() {
            match resolve_triangle(&description.vertices, tri.indices) {
                Ok(corners) => {
                    let tag = EntityTag::Face(FaceTag {
                        face_id,
                        details: face.details.clone(),
                    });
                    let _ = scene.add_node(
                        root,
                        Node::new(Shape::triangle(corners))
                            .with_color(options.colors.face)
                            .pickable()
                            .tagged(tag),
                    );
                    triangle_count += 1;
                }
                Err(reason) => InvalidPrimitive::report(
                    &mut diagnostics,
                    PrimitiveRef::Triangle {
                        face: face_id,
                        triangle,
                    },
                    reason,
                ),
            }
        }
    }

    if triangle_count == 0 {
        log::error!(
            "solid with {} face group(s) produced no valid triangles",
            description.faces.len()
        );
        return Err(SceneError::EmptyModel);
    }

    for (index, label) in description.labels.iter().enumerate() {
        if !label.position.is_finite() {
            InvalidPrimitive::report(
                &mut diagnostics,
                PrimitiveRef::Label(index),
                "label position is not finite".to_owned(),
            );
            continue;
        }
        let shape = LabelShape::new(
            label.text.clone(),
            label.position,
            options.labels.solid_label_height,
            options.labels.glyph_aspect,
        );
        let _ = scene.add_node(
            root,
            Node::new(Shape::Label(shape)).with_color(options.colors.label),
        );
    }

    let factor = scene.scale_labels(options.labels.solid_label_divisor);
    log::debug!(
        "built solid: {triangle_count} triangles in {} faces, {} labels \
         (label scale {factor:.3}), {} skipped",
        description.faces.len(),
        description.labels.len(),
        diagnostics.len()
    );

    Ok(BuildOutput { scene, diagnostics })
}
