//! Static scene data shared by the generator and the renderer.
//!
//! Everything here is plain data: the fixed desk scene is one table of
//! [`SceneObjectDesc`] rows, and the renderer walks it in order. There is
//! deliberately no scene graph and no asset manager behind it.

use serde::{Deserialize, Serialize};

/// Geometry source for one scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SolidSpec {
    /// The unit rectangular slab the laptop/table panels are built from.
    Slab,
    /// A solid of revolution (cylinder or frustum).
    Lathe {
        base_radius: f32,
        top_radius: f32,
        height: f32,
        segments: u32,
        stacks: u32,
        caps: bool,
    },
}

/// Axis-angle rotation; the axis is normalized before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub axis: [f32; 3],
    pub angle_deg: f32,
}

/// Model transform, applied as translate ∘ rotate ∘ scale.
///
/// The composition order is fixed; every object in the scene uses the
/// same order so the table rows stay comparable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformRecipe {
    pub scale: [f32; 3],
    pub rotation: Option<Rotation>,
    pub translation: [f32; 3],
}

impl TransformRecipe {
    pub fn positioned(translation: [f32; 3]) -> Self {
        Self {
            scale: [1.0, 1.0, 1.0],
            rotation: None,
            translation,
        }
    }

    pub fn scaled(scale: [f32; 3], translation: [f32; 3]) -> Self {
        Self {
            scale,
            rotation: None,
            translation,
        }
    }

    pub fn rotated(mut self, axis: [f32; 3], angle_deg: f32) -> Self {
        self.rotation = Some(Rotation { axis, angle_deg });
        self
    }
}

/// One renderable entity: a solid, a transform, and texture references.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObjectDesc {
    pub name: &'static str,
    pub solid: SolidSpec,
    pub transform: TransformRecipe,
    /// Primary texture, sampled on unit 0.
    pub texture: &'static str,
    /// Optional secondary texture, sampled on unit 1 and blended over the
    /// primary one (the laptop screen uses this).
    pub extra_texture: Option<&'static str>,
    /// Multiplier on the mesh texture coordinates (tiling).
    pub uv_scale: f32,
}

impl SceneObjectDesc {
    fn new(
        name: &'static str,
        solid: SolidSpec,
        transform: TransformRecipe,
        texture: &'static str,
    ) -> Self {
        Self {
            name,
            solid,
            transform,
            texture,
            extra_texture: None,
            uv_scale: 1.0,
        }
    }
}

const PENCIL: SolidSpec = SolidSpec::Lathe {
    base_radius: 0.1,
    top_radius: 0.1,
    height: 3.0,
    segments: 6,
    stacks: 8,
    caps: false,
};

const LIGHT_MARKER: SolidSpec = SolidSpec::Slab;

/// The fixed desk scene, in draw order.
pub fn desk_scene() -> Vec<SceneObjectDesc> {
    let mut objects = vec![
        SceneObjectDesc {
            uv_scale: 4.0,
            ..SceneObjectDesc::new(
                "table",
                SolidSpec::Slab,
                TransformRecipe::scaled([16.0, 0.16, 10.0], [-2.0, -0.15, 2.0]),
                "assets/textures/marble.jpg",
            )
        },
        SceneObjectDesc::new(
            "laptop-base",
            SolidSpec::Slab,
            TransformRecipe::scaled([3.9, 0.12, 2.3], [0.0, 0.0, -2.0]),
            "assets/textures/base.png",
        ),
        SceneObjectDesc::new(
            "laptop-lid",
            SolidSpec::Slab,
            TransformRecipe::scaled([3.9, 0.08, 2.0], [0.0, 2.0, -4.5])
                .rotated([1.0, 0.0, 0.0], -96.0),
            "assets/textures/lid.png",
        ),
        SceneObjectDesc {
            extra_texture: Some("assets/textures/screen.png"),
            ..SceneObjectDesc::new(
                "laptop-screen",
                SolidSpec::Slab,
                TransformRecipe::scaled([3.89, 0.08, 2.0], [0.0, 2.0, -4.49])
                    .rotated([1.0, 0.0, 0.0], -96.0),
                "assets/textures/desktop.png",
            )
        },
        SceneObjectDesc::new(
            "pencil",
            PENCIL,
            TransformRecipe::positioned([2.0, 0.1, 1.0]).rotated([0.0, 0.0, 1.0], -90.0),
            "assets/textures/wood.png",
        ),
        SceneObjectDesc::new(
            "soda-can",
            SolidSpec::Lathe {
                base_radius: 0.5,
                top_radius: 0.5,
                height: 1.5,
                segments: 24,
                stacks: 2,
                caps: true,
            },
            TransformRecipe::positioned([-3.5, 0.0, 0.5]),
            "assets/textures/can.png",
        ),
        SceneObjectDesc::new(
            "cup",
            SolidSpec::Lathe {
                base_radius: 0.35,
                top_radius: 0.5,
                height: 1.2,
                segments: 18,
                stacks: 3,
                caps: true,
            },
            TransformRecipe::positioned([3.0, 0.0, -1.0]),
            "assets/textures/ceramic.png",
        ),
        SceneObjectDesc::new(
            "lamp-base",
            SolidSpec::Lathe {
                base_radius: 0.8,
                top_radius: 0.55,
                height: 0.3,
                segments: 20,
                stacks: 1,
                caps: true,
            },
            TransformRecipe::positioned([-5.0, 0.0, -3.0]),
            "assets/textures/metal.png",
        ),
        SceneObjectDesc::new(
            "lamp-pole",
            SolidSpec::Lathe {
                base_radius: 0.08,
                top_radius: 0.08,
                height: 2.4,
                segments: 12,
                stacks: 1,
                caps: true,
            },
            TransformRecipe::positioned([-5.0, 0.2, -3.0]),
            "assets/textures/metal.png",
        ),
        SceneObjectDesc::new(
            "lamp-shade",
            SolidSpec::Lathe {
                base_radius: 0.9,
                top_radius: 0.45,
                height: 0.8,
                segments: 20,
                stacks: 2,
                caps: false,
            },
            TransformRecipe::positioned([-5.0, 2.4, -3.0]),
            "assets/textures/metal.png",
        ),
    ];

    // One marker shape reused at three fixed positions.
    for (i, position) in [
        [-5.0, 3.4, -3.0],
        [0.0, 4.0, -4.5],
        [4.0, 3.5, 0.0],
    ]
    .into_iter()
    .enumerate()
    {
        let names = ["light-marker-0", "light-marker-1", "light-marker-2"];
        objects.push(SceneObjectDesc::new(
            names[i],
            LIGHT_MARKER,
            TransformRecipe::scaled([0.2, 0.2, 0.2], position),
            "assets/textures/glow.png",
        ));
    }

    objects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_spec_roundtrip() {
        let spec = PENCIL;
        let json = serde_json::to_string(&spec).unwrap();
        let back: SolidSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }

    #[test]
    fn transform_roundtrip() {
        let recipe =
            TransformRecipe::scaled([3.9, 0.08, 2.0], [0.0, 2.0, -4.5]).rotated([1.0, 0.0, 0.0], -96.0);
        let json = serde_json::to_string(&recipe).unwrap();
        let back: TransformRecipe = serde_json::from_str(&json).unwrap();
        assert_eq!(recipe, back);
    }

    #[test]
    fn scene_table_is_well_formed() {
        let scene = desk_scene();
        assert!(!scene.is_empty());

        // Names are unique and every row names a texture file.
        for (i, obj) in scene.iter().enumerate() {
            assert!(!obj.texture.is_empty(), "{} has no texture", obj.name);
            assert!(obj.uv_scale > 0.0);
            for other in &scene[i + 1..] {
                assert_ne!(obj.name, other.name);
            }
        }

        // The screen is the one blended multi-texture object.
        let blended: Vec<_> = scene.iter().filter(|o| o.extra_texture.is_some()).collect();
        assert_eq!(blended.len(), 1);
        assert_eq!(blended[0].name, "laptop-screen");

        // The three light markers share a single solid shape.
        let markers: Vec<_> = scene
            .iter()
            .filter(|o| o.name.starts_with("light-marker"))
            .collect();
        assert_eq!(markers.len(), 3);
        assert!(markers.iter().all(|m| m.solid == markers[0].solid));
    }
}
