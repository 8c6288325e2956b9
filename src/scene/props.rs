//! Parametric prop descriptors.
//!
//! A [`Prop`] records the parameters a farm object was built from and can
//! break itself into [`Part`]s: a primitive shape plus where its centre (or
//! anchor) sits in world space. Mesh construction is left to whatever
//! consumes the parts.

use glam::DVec3;

/// Height of a garden light's stalk.
const LIGHT_STALK_HEIGHT: f64 = 0.1;
/// Radius of a garden light's stalk.
const LIGHT_STALK_RADIUS: f64 = 0.025;
/// How far above its base a garden light shines from.
const LIGHT_SOURCE_HEIGHT: f64 = 0.5;
/// The ground is lowered slightly so prop bottoms never poke through.
const GROUND_SINK: f64 = 0.02;

// ---------------------------------------------------------------------------
// Parts
// ---------------------------------------------------------------------------

/// A primitive shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Flat rectangle laid in the XZ plane (rotated -90° about X).
    Plane {
        /// Extent along X.
        width: f64,
        /// Extent along Z.
        depth: f64,
    },
    /// Axis-aligned box.
    Box {
        /// Extent along X.
        width: f64,
        /// Extent along Y.
        height: f64,
        /// Extent along Z.
        depth: f64,
    },
    /// Upright cylinder.
    Cylinder {
        /// Radius of both caps.
        radius: f64,
        /// Extent along Y.
        height: f64,
    },
    /// Upright cone.
    Cone {
        /// Base radius.
        radius: f64,
        /// Extent along Y.
        height: f64,
    },
    /// Triangle extruded along +Z, anchored at its left-front-bottom corner.
    Prism {
        /// Base of the triangle along X.
        width: f64,
        /// Apex height.
        height: f64,
        /// Extrusion length along Z.
        depth: f64,
    },
    /// Sphere.
    Sphere {
        /// Radius.
        radius: f64,
    },
    /// Omnidirectional light with linear falloff.
    PointLight {
        /// Distance at which the light reaches zero.
        distance: f64,
    },
    /// Parallel light aimed at a target point.
    DirectionalLight {
        /// Point the light shines toward.
        target: DVec3,
    },
    /// Cloud of points scattered in a box around the origin.
    Points {
        /// Number of candidate points scattered.
        count: u32,
        /// Edge length of the scatter volume.
        extent: f64,
        /// Half-width of the clear region around the scene.
        clearance: f64,
    },
}

/// A placed primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    /// Role of the part within its prop, e.g. `"trunk"`.
    pub name: &'static str,
    /// Primitive and its dimensions.
    pub shape: Shape,
    /// World-space position of the shape's centre (anchor for prisms).
    pub position: DVec3,
}

impl Part {
    fn new(name: &'static str, shape: Shape, position: DVec3) -> Self {
        Self {
            name,
            shape,
            position,
        }
    }
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

/// A farm object described by its construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prop {
    /// The grass ground plane.
    Ground {
        /// Extent along X.
        width: f64,
        /// Extent along Z.
        depth: f64,
    },
    /// Cylindrical water tank resting on `base`.
    WaterTower {
        /// Tank radius.
        radius: f64,
        /// Tank height.
        height: f64,
        /// Centre of the tank's bottom.
        base: DVec3,
    },
    /// Box building with a prism roof.
    Barn {
        /// Wall extent along X.
        width: f64,
        /// Total height, walls plus roof.
        height: f64,
        /// Wall extent along Z.
        depth: f64,
        /// Roof overhang on every side.
        overhang: f64,
        /// Centre of the building's floor.
        base: DVec3,
    },
    /// Cylinder trunk under a cone crown.
    Tree {
        /// Crown base radius. The trunk is a quarter of it.
        width: f64,
        /// Total height.
        height: f64,
        /// Fraction of the height taken by the trunk.
        trunk_ratio: f64,
        /// Centre of the trunk's foot.
        base: DVec3,
        /// Index into the shared trunk texture set.
        trunk_texture: usize,
        /// Index into the shared leaves texture set.
        leaves_texture: usize,
    },
    /// Short stalk with a point light above it.
    GardenLight {
        /// Foot of the stalk.
        base: DVec3,
        /// Falloff distance of the light.
        distance: f64,
    },
    /// Directional sunlight.
    Sun {
        /// Light position.
        position: DVec3,
        /// Point the light is aimed at.
        target: DVec3,
    },
    /// Textured sphere in the night sky.
    Moon {
        /// Sphere radius.
        radius: f64,
        /// Sphere centre.
        position: DVec3,
    },
    /// Star field surrounding the scene.
    Stars {
        /// Number of candidate points.
        count: u32,
        /// Edge length of the scatter volume.
        extent: f64,
        /// Half-width of the clear region around the scene.
        clearance: f64,
    },
}

impl Prop {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ground { .. } => "ground",
            Self::WaterTower { .. } => "water tower",
            Self::Barn { .. } => "barn",
            Self::Tree { .. } => "tree",
            Self::GardenLight { .. } => "garden light",
            Self::Sun { .. } => "sun",
            Self::Moon { .. } => "moon",
            Self::Stars { .. } => "stars",
        }
    }

    /// Texture files this prop owns outright. Trees reference the shared
    /// sets instead and report none.
    #[must_use]
    pub fn textures(&self) -> &'static [&'static str] {
        match self {
            Self::Ground { .. } => &["grass_bump03.jpg"],
            Self::WaterTower { .. } => &["water01.jpg", "water_tank_wall.jpg"],
            Self::Barn { .. } => &["barn01.jpg", "roof01.jpg"],
            Self::Moon { .. } => &["moon02.jpg", "moon03.jpg"],
            Self::Tree { .. }
            | Self::GardenLight { .. }
            | Self::Sun { .. }
            | Self::Stars { .. } => &[],
        }
    }

    /// Break the prop into placed primitives.
    #[must_use]
    pub fn parts(&self) -> Vec<Part> {
        match *self {
            Self::Ground { width, depth } => vec![Part::new(
                "ground",
                Shape::Plane { width, depth },
                DVec3::new(0.0, -GROUND_SINK, 0.0),
            )],
            Self::WaterTower {
                radius,
                height,
                base,
            } => vec![Part::new(
                "tank",
                Shape::Cylinder { radius, height },
                base + DVec3::new(0.0, height / 2.0, 0.0),
            )],
            Self::Barn {
                width,
                height,
                depth,
                overhang,
                base,
            } => {
                let wall_height = height * 0.5;
                let roof_height = height - wall_height;
                let roof_width = width + overhang * 2.0;
                let roof_depth = depth + overhang * 2.0;
                vec![
                    Part::new(
                        "walls",
                        Shape::Box {
                            width,
                            height: wall_height,
                            depth,
                        },
                        base + DVec3::new(0.0, wall_height / 2.0, 0.0),
                    ),
                    Part::new(
                        "roof",
                        Shape::Prism {
                            width: roof_width,
                            height: roof_height,
                            depth: roof_depth,
                        },
                        base + DVec3::new(
                            -roof_width / 2.0,
                            wall_height,
                            -roof_depth / 2.0,
                        ),
                    ),
                ]
            }
            Self::Tree {
                width,
                height,
                trunk_ratio,
                base,
                ..
            } => {
                let trunk_height = height * trunk_ratio;
                let crown_height = height * (1.0 - trunk_ratio);
                vec![
                    Part::new(
                        "trunk",
                        Shape::Cylinder {
                            radius: width / 4.0,
                            height: trunk_height,
                        },
                        base + DVec3::new(0.0, trunk_height / 2.0, 0.0),
                    ),
                    Part::new(
                        "crown",
                        Shape::Cone {
                            radius: width,
                            height: crown_height,
                        },
                        base + DVec3::new(
                            0.0,
                            crown_height / 2.0 + trunk_height,
                            0.0,
                        ),
                    ),
                ]
            }
            Self::GardenLight { base, distance } => vec![
                Part::new(
                    "stalk",
                    Shape::Cylinder {
                        radius: LIGHT_STALK_RADIUS,
                        height: LIGHT_STALK_HEIGHT,
                    },
                    base + DVec3::new(0.0, LIGHT_STALK_HEIGHT / 2.0, 0.0),
                ),
                Part::new(
                    "lamp",
                    Shape::PointLight { distance },
                    base + DVec3::new(0.0, LIGHT_SOURCE_HEIGHT, 0.0),
                ),
            ],
            Self::Sun { position, target } => vec![Part::new(
                "sun",
                Shape::DirectionalLight { target },
                position,
            )],
            Self::Moon { radius, position } => {
                vec![Part::new("moon", Shape::Sphere { radius }, position)]
            }
            Self::Stars {
                count,
                extent,
                clearance,
            } => vec![Part::new(
                "stars",
                Shape::Points {
                    count,
                    extent,
                    clearance,
                },
                DVec3::ZERO,
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part<'a>(parts: &'a [Part], name: &str) -> &'a Part {
        parts.iter().find(|p| p.name == name).unwrap()
    }

    fn assert_vec_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-12, "{a:?} != {b:?}");
    }

    #[test]
    fn tree_stacks_crown_on_trunk() {
        let tree = Prop::Tree {
            width: 2.0,
            height: 12.0,
            trunk_ratio: 0.2,
            base: DVec3::new(-4.0, 0.0, -20.0),
            trunk_texture: 0,
            leaves_texture: 0,
        };
        let parts = tree.parts();

        let trunk = part(&parts, "trunk");
        assert!(matches!(
            trunk.shape,
            Shape::Cylinder { radius, height }
                if radius == 0.5 && (height - 2.4).abs() < 1e-12
        ));
        assert_vec_close(trunk.position, DVec3::new(-4.0, 1.2, -20.0));

        // crown base sits on top of the trunk
        let crown = part(&parts, "crown");
        assert!(matches!(
            crown.shape,
            Shape::Cone { radius, height }
                if radius == 2.0 && (height - 9.6).abs() < 1e-12
        ));
        assert_vec_close(crown.position, DVec3::new(-4.0, 4.8 + 2.4, -20.0));
    }

    #[test]
    fn barn_roof_overhangs_walls() {
        let barn = Prop::Barn {
            width: 10.0,
            height: 3.0,
            depth: 5.0,
            overhang: 0.3,
            base: DVec3::ZERO,
        };
        let parts = barn.parts();

        let walls = part(&parts, "walls");
        assert_eq!(walls.position, DVec3::new(0.0, 0.75, 0.0));

        let roof = part(&parts, "roof");
        assert!(matches!(
            roof.shape,
            Shape::Prism { width, height, depth }
                if (width - 10.6).abs() < 1e-12
                    && height == 1.5
                    && (depth - 5.6).abs() < 1e-12
        ));
        assert_vec_close(roof.position, DVec3::new(-5.3, 1.5, -2.8));
    }

    #[test]
    fn garden_light_shines_above_stalk() {
        let light = Prop::GardenLight {
            base: DVec3::new(4.0, 0.0, -14.0),
            distance: 35.0,
        };
        let parts = light.parts();
        assert_eq!(part(&parts, "stalk").position.y, 0.05);
        let lamp = part(&parts, "lamp");
        assert_eq!(lamp.position, DVec3::new(4.0, 0.5, -14.0));
        assert_eq!(lamp.shape, Shape::PointLight { distance: 35.0 });
    }

    #[test]
    fn water_tower_rests_on_base() {
        let tower = Prop::WaterTower {
            radius: 3.0,
            height: 1.0,
            base: DVec3::new(-4.0, 0.0, -10.0),
        };
        let parts = tower.parts();
        assert_eq!(parts[0].position, DVec3::new(-4.0, 0.5, -10.0));
        assert_eq!(tower.textures().len(), 2);
    }

    #[test]
    fn ground_is_sunk_below_zero() {
        let parts = Prop::Ground {
            width: 500.0,
            depth: 500.0,
        }
        .parts();
        assert!(parts[0].position.y < 0.0);
    }
}
