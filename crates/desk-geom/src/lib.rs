//! Parametric mesh generation for the desk scene.
//!
//! Solids are built once at startup from closed-form parameters and never
//! mutated afterwards. Generation is deterministic: the same parameters
//! always produce byte-identical vertex and index buffers.

use desk_core::{SolidSpec, TransformRecipe};
use glam::{Mat4, Vec3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeomError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Parameters for a solid of revolution around the Y axis.
///
/// Equal radii give a cylinder, unequal radii a frustum. The solid spans
/// `y ∈ [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatheParams {
    pub base_radius: f32,
    pub top_radius: f32,
    pub height: f32,
    /// Angular subdivisions, at least 3.
    pub segments: u32,
    /// Subdivisions along the axis, at least 1.
    pub stacks: u32,
    /// Close the bottom and top with triangle fans.
    pub caps: bool,
}

/// A generated triangle mesh: positions, texture coordinates, and a
/// triangle-list index buffer. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    pub positions: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl Solid {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Generates a tessellated solid of revolution.
    ///
    /// Vertex layout: `(stacks + 1)` rings of `segments` vertices, bottom
    /// ring first, then (if capped) the bottom and top center vertices.
    /// Side quads are split into two counter-clockwise-outward triangles;
    /// the wrap-around seam reuses ring vertices via index modulo
    /// `segments`.
    ///
    /// Invalid parameters are rejected, never clamped.
    pub fn lathe(params: LatheParams) -> Result<Self, GeomError> {
        let LatheParams {
            base_radius,
            top_radius,
            height,
            segments,
            stacks,
            caps,
        } = params;

        if segments < 3 {
            return Err(GeomError::InvalidParameter("segments must be at least 3"));
        }
        if stacks < 1 {
            return Err(GeomError::InvalidParameter("stacks must be at least 1"));
        }
        if !(height > 0.0) {
            return Err(GeomError::InvalidParameter("height must be positive"));
        }
        if base_radius < 0.0 || top_radius < 0.0 {
            return Err(GeomError::InvalidParameter("radius must be non-negative"));
        }
        if base_radius == 0.0 && top_radius == 0.0 {
            return Err(GeomError::InvalidParameter(
                "base and top radius must not both be zero",
            ));
        }

        let ring_count = stacks + 1;
        let mut solid = Solid {
            positions: Vec::with_capacity((ring_count * segments) as usize + 2),
            texcoords: Vec::with_capacity((ring_count * segments) as usize + 2),
            indices: Vec::new(),
        };

        for i in 0..ring_count {
            let t = i as f32 / stacks as f32;
            let radius = base_radius + (top_radius - base_radius) * t;
            let y = height * t;
            for j in 0..segments {
                let theta = j as f32 / segments as f32 * std::f32::consts::TAU;
                solid
                    .positions
                    .push([radius * theta.cos(), y, radius * theta.sin()]);
                solid
                    .texcoords
                    .push([j as f32 / segments as f32, t]);
            }
        }

        for i in 0..stacks {
            for j in 0..segments {
                let a = i * segments + j;
                let b = i * segments + (j + 1) % segments;
                let c = (i + 1) * segments + j;
                let d = (i + 1) * segments + (j + 1) % segments;
                solid.indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        if caps {
            let bottom_center = solid.positions.len() as u32;
            solid.positions.push([0.0, 0.0, 0.0]);
            solid.texcoords.push([0.5, 0.5]);
            let top_center = solid.positions.len() as u32;
            solid.positions.push([0.0, height, 0.0]);
            solid.texcoords.push([0.5, 0.5]);

            let top_ring = stacks * segments;
            for j in 0..segments {
                let next = (j + 1) % segments;
                // Bottom fan faces -Y, top fan faces +Y.
                solid.indices.extend_from_slice(&[bottom_center, j, next]);
                solid
                    .indices
                    .extend_from_slice(&[top_center, top_ring + next, top_ring + j]);
            }
        }

        Ok(solid)
    }

    /// The 8-vertex rectangular slab the laptop and table panels are
    /// built from, spanning `x, y ∈ [-0.5, 0.5]`, `z ∈ [-1, 0]`. The
    /// hand-written layout shares corner vertices across faces, which
    /// fixes where the texture seams fall.
    pub fn unit_slab() -> Self {
        let positions = vec![
            [0.5, 0.5, 0.0],
            [0.5, -0.5, 0.0],
            [-0.5, -0.5, 0.0],
            [-0.5, 0.5, 0.0],
            [0.5, -0.5, -1.0],
            [0.5, 0.5, -1.0],
            [-0.5, 0.5, -1.0],
            [-0.5, -0.5, -1.0],
        ];
        let texcoords = vec![
            [1.0, 1.0],
            [1.0, 0.0],
            [0.0, 0.0],
            [0.0, 1.0],
            [1.0, 1.0],
            [1.0, 0.0],
            [0.0, 0.0],
            [0.0, 1.0],
        ];
        let indices = vec![
            0, 1, 3, //
            1, 2, 3, //
            0, 1, 4, //
            0, 4, 5, //
            0, 5, 6, //
            0, 3, 6, //
            4, 5, 6, //
            4, 6, 7, //
            2, 3, 6, //
            2, 6, 7, //
            1, 4, 7, //
            1, 2, 7,
        ];
        Solid {
            positions,
            texcoords,
            indices,
        }
    }
}

/// Builds the mesh for one scene table row.
pub fn build_solid(spec: &SolidSpec) -> Result<Solid, GeomError> {
    match *spec {
        SolidSpec::Slab => Ok(Solid::unit_slab()),
        SolidSpec::Lathe {
            base_radius,
            top_radius,
            height,
            segments,
            stacks,
            caps,
        } => Solid::lathe(LatheParams {
            base_radius,
            top_radius,
            height,
            segments,
            stacks,
            caps,
        }),
    }
}

/// Composes a row's model matrix as translate ∘ rotate ∘ scale.
///
/// A missing or degenerate rotation axis yields no rotation.
pub fn model_matrix(recipe: &TransformRecipe) -> Mat4 {
    let rotation = match recipe.rotation {
        Some(rot) => {
            let axis = Vec3::from_array(rot.axis);
            if axis.length_squared() > 1.0e-12 {
                Mat4::from_axis_angle(axis.normalize(), rot.angle_deg.to_radians())
            } else {
                Mat4::IDENTITY
            }
        }
        None => Mat4::IDENTITY,
    };
    Mat4::from_translation(Vec3::from_array(recipe.translation))
        * rotation
        * Mat4::from_scale(Vec3::from_array(recipe.scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pencil() -> LatheParams {
        LatheParams {
            base_radius: 0.1,
            top_radius: 0.1,
            height: 3.0,
            segments: 6,
            stacks: 8,
            caps: false,
        }
    }

    #[test]
    fn pencil_counts() {
        let solid = Solid::lathe(pencil()).unwrap();
        assert_eq!(solid.vertex_count(), 9 * 6);
        assert_eq!(solid.index_count(), 8 * 6 * 2 * 3);
    }

    #[test]
    fn capped_counts() {
        let solid = Solid::lathe(LatheParams {
            base_radius: 1.0,
            top_radius: 1.0,
            height: 2.0,
            segments: 8,
            stacks: 3,
            caps: true,
        })
        .unwrap();
        assert_eq!(solid.vertex_count(), 4 * 8 + 2);
        assert_eq!(solid.index_count(), 3 * 8 * 6 + 2 * 8 * 3);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = Solid::lathe(pencil()).unwrap();
        let b = Solid::lathe(pencil()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn indices_stay_in_range() {
        for caps in [false, true] {
            let solid = Solid::lathe(LatheParams {
                base_radius: 0.5,
                top_radius: 0.2,
                height: 1.0,
                segments: 5,
                stacks: 4,
                caps,
            })
            .unwrap();
            let count = solid.vertex_count() as u32;
            assert!(solid.indices.iter().all(|&i| i < count));
            assert_eq!(solid.index_count() % 3, 0);
        }
    }

    #[test]
    fn frustum_interpolates_radius_and_height() {
        let solid = Solid::lathe(LatheParams {
            base_radius: 1.0,
            top_radius: 0.5,
            height: 2.0,
            segments: 4,
            stacks: 2,
            caps: false,
        })
        .unwrap();
        // First vertex of the middle ring sits at theta = 0.
        let mid = solid.positions[4];
        assert!((mid[0] - 0.75).abs() < 1.0e-6);
        assert!((mid[1] - 1.0).abs() < 1.0e-6);
        assert!(mid[2].abs() < 1.0e-6);
    }

    #[test]
    fn texcoords_are_normalized() {
        let solid = Solid::lathe(pencil()).unwrap();
        assert_eq!(solid.texcoords.len(), solid.positions.len());
        for uv in &solid.texcoords {
            assert!((0.0..=1.0).contains(&uv[0]));
            assert!((0.0..=1.0).contains(&uv[1]));
        }
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        let base = pencil();
        let cases = [
            LatheParams { segments: 2, ..base },
            LatheParams { stacks: 0, ..base },
            LatheParams { height: 0.0, ..base },
            LatheParams { height: -1.0, ..base },
            LatheParams { base_radius: -0.1, ..base },
            LatheParams {
                base_radius: 0.0,
                top_radius: 0.0,
                ..base
            },
        ];
        for params in cases {
            assert!(
                matches!(Solid::lathe(params), Err(GeomError::InvalidParameter(_))),
                "{params:?} should be rejected"
            );
        }
    }

    #[test]
    fn slab_layout() {
        let slab = Solid::unit_slab();
        assert_eq!(slab.vertex_count(), 8);
        assert_eq!(slab.index_count(), 36);
        assert!(slab.indices.iter().all(|&i| i < 8));
    }

    #[test]
    fn scene_table_rows_all_build() {
        for obj in desk_core::desk_scene() {
            let solid = build_solid(&obj.solid)
                .unwrap_or_else(|e| panic!("{} failed to build: {e}", obj.name));
            assert!(solid.vertex_count() > 0);
            let count = solid.vertex_count() as u32;
            assert!(solid.indices.iter().all(|&i| i < count));
        }
    }

    #[test]
    fn model_matrix_composes_translate_rotate_scale() {
        let recipe = TransformRecipe::scaled([2.0, 2.0, 2.0], [1.0, 0.0, 0.0])
            .rotated([0.0, 0.0, 1.0], 90.0);
        let m = model_matrix(&recipe);
        let p = m.transform_point3(Vec3::X);
        // Scale to (2,0,0), rotate about Z to (0,2,0), translate to (1,2,0).
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1.0e-5), "{p:?}");
    }

    #[test]
    fn zero_axis_rotation_is_identity() {
        let recipe =
            TransformRecipe::positioned([0.0, 0.0, 0.0]).rotated([0.0, 0.0, 0.0], 45.0);
        assert_eq!(model_matrix(&recipe), Mat4::IDENTITY);
    }
}
