//! Ball-and-stick molecule builder.
//!
//! Atoms become pickable spheres sized and colored from the element table,
//! each owning an element label. Bonds become a tagged group owning one,
//! two or three parallel cylinders; the cylinders themselves are pickable
//! but untagged, so a hit resolves through the group.

use std::f32::consts::TAU;

use glam::Vec3;
use rustc_hash::FxHashSet;

use super::elements::element_style;
use super::BuildOutput;
use crate::description::{Bond, ModelKind, MoleculeDescription};
use crate::error::{InvalidPrimitive, PrimitiveRef, SceneError, SchemaError};
use crate::options::Options;
use crate::scene::{
    AtomTag, BondTag, EntityTag, LabelShape, Node, NodeId, Scene, Shape,
};

/// Squared length below which a bond axis is treated as parallel to the
/// reference axis.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Unit vector perpendicular to `axis`: `axis × Y`, or `axis × X` when the
/// axis is (anti)parallel to Y.
#[must_use]
pub fn bond_perpendicular(axis: Vec3) -> Vec3 {
    let axis = axis.normalize_or_zero();
    let perp = axis.cross(Vec3::Y);
    if perp.length_squared() < PARALLEL_EPSILON {
        axis.cross(Vec3::X).normalize_or_zero()
    } else {
        perp.normalize()
    }
}

/// Lateral offsets for `count` parallel cylinders along `axis`.
///
/// A single cylinder sits on the axis. Multiple cylinders are spread
/// evenly around it, each `spacing` away, so the set is symmetric and
/// every offset has the same non-zero length.
#[must_use]
pub fn cylinder_offsets(axis: Vec3, count: usize, spacing: f32) -> Vec<Vec3> {
    if count <= 1 {
        return vec![Vec3::ZERO];
    }
    let dir = axis.normalize_or_zero();
    let perp = bond_perpendicular(dir);
    let perp2 = dir.cross(perp);
    (0..count)
        .map(|k| {
            let theta = TAU * k as f32 / count as f32;
            (perp * theta.cos() + perp2 * theta.sin()) * spacing
        })
        .collect()
}

/// Build the scene for a molecule.
///
/// Fails with a schema error on `atoms` when there are none.
pub fn build_molecule(
    description: &MoleculeDescription,
    options: &Options,
) -> Result<BuildOutput, SceneError> {
    if description.atoms.is_empty() {
        return Err(SchemaError::empty("atoms").into());
    }

    let geometry = &options.geometry;
    let mut scene = Scene::new(ModelKind::Molecule);
    let mut diagnostics = Vec::new();
    let root = scene.root();

    let positions: Vec<Vec3> = description
        .atoms
        .iter()
        .map(|atom| atom.position * geometry.molecule_scale)
        .collect();

    for (atom_index, (atom, &center)) in
        description.atoms.iter().zip(&positions).enumerate()
    {
        let style = element_style(&atom.element);
        let radius = style.radius * geometry.atom_radius_scale;
        let color = options
            .colors
            .element_color(&atom.element)
            .unwrap_or(style.color);
        let tag = EntityTag::Atom(AtomTag {
            atom_index,
            element: atom.element.clone(),
            vsepr_shape: atom.vsepr_shape.clone(),
            bond_angles: atom.bond_angles.clone(),
        });
        let sphere = scene.add_node(
            root,
            Node::new(Shape::Sphere { center, radius })
                .with_color(color)
                .pickable()
                .tagged(tag),
        );

        let label = LabelShape::new(
            atom.element.trim(),
            center + Vec3::Y * radius * geometry.label_lift,
            radius * geometry.atom_label_size,
            options.labels.glyph_aspect,
        );
        let _ = scene.add_node(
            sphere,
            Node::new(Shape::Label(label)).with_color(options.colors.label),
        );
    }

    // A bond id is its ordered atom pair, so later repeats are dropped
    let mut bonded = FxHashSet::default();
    let mut bond_count = 0usize;
    for (index, bond) in description.bonds.iter().enumerate() {
        let added = if bonded.contains(&(bond.start, bond.end)) {
            Err(format!(
                "duplicate bond from atom {} to atom {}",
                bond.start, bond.end
            ))
        } else {
            add_bond(&mut scene, &positions, bond, options)
        };
        match added {
            Ok(_) => {
                let _ = bonded.insert((bond.start, bond.end));
                bond_count += 1;
            }
            Err(reason) => InvalidPrimitive::report(
                &mut diagnostics,
                PrimitiveRef::Bond(index),
                reason,
            ),
        }
    }

    scene.set_atom_positions(positions);
    let factor =
        scene.scale_labels(options.labels.molecule_label_divisor);
    log::debug!(
        "built molecule: {} atoms, {bond_count} bonds (label scale \
         {factor:.3}), {} skipped",
        description.atoms.len(),
        diagnostics.len()
    );

    Ok(BuildOutput { scene, diagnostics })
}

/// Add one bond group with its cylinders. Returns the group node.
fn add_bond(
    scene: &mut Scene,
    positions: &[Vec3],
    bond: &Bond,
    options: &Options,
) -> Result<NodeId, String> {
    let endpoint = |index: usize, which: &str| {
        positions.get(index).copied().ok_or_else(|| {
            format!(
                "{which} atom index {index} out of range ({} atoms)",
                positions.len()
            )
        })
    };
    let start = endpoint(bond.start, "start")?;
    let end = endpoint(bond.end, "end")?;
    if bond.start == bond.end {
        return Err(format!("bond joins atom {} to itself", bond.start));
    }
    let axis = end - start;
    if axis.length_squared() < PARALLEL_EPSILON {
        return Err(format!(
            "atoms {} and {} coincide",
            bond.start, bond.end
        ));
    }

    let geometry = &options.geometry;
    let count = bond.order.cylinder_count();
    let radius = if count > 1 {
        geometry.bond_radius * geometry.multi_bond_radius_factor
    } else {
        geometry.bond_radius
    };

    let root = scene.root();
    let group = scene.add_node(
        root,
        Node::group().tagged(EntityTag::Bond(BondTag {
            start_atom_index: bond.start,
            end_atom_index: bond.end,
            bond_order: bond.order,
            energy: bond.energy,
        })),
    );
    for offset in cylinder_offsets(axis, count, geometry.bond_spacing) {
        let _ = scene.add_node(
            group,
            Node::new(Shape::Cylinder {
                start: start + offset,
                end: end + offset,
                radius,
            })
            .with_color(options.colors.bond)
            .pickable(),
        );
    }
    Ok(group)
}
