//! The farm scene: props, their registered resources, and which of them are
//! currently attached.
//!
//! Every prop lives in a flat node list for the whole session. Nodes are
//! attached or detached rather than created and destroyed, so the moon and
//! the star field exist from the start and are only attached at night.
//! Resources are tracked in a [`ResourceArena`] and released together by
//! [`Scene::dispose`].

pub mod arena;
mod daylight;
pub mod props;

pub use arena::{Resource, ResourceArena, ResourceId, ResourceKind};
pub use daylight::TimeOfDay;
use glam::DVec3;
pub use props::{Part, Prop, Shape};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::options::{LightingOptions, SceneOptions};

/// Trunk textures shared by every tree.
const TRUNK_TEXTURES: [&str; 3] = ["trunk01.jpg", "trunk02.jpg", "trunk03.jpg"];
/// Leaves textures shared by every tree.
const LEAVES_TEXTURES: [&str; 3] =
    ["leaves01.jpg", "leaves02.jpg", "leaves03.jpg"];

/// Trees as (width, height, trunk ratio, base).
const TREES: [(f64, f64, f64, [f64; 3]); 4] = [
    (2.0, 12.0, 0.2, [-4.0, 0.0, -20.0]),
    (1.0, 4.0, 0.3, [7.0, 0.0, 5.0]),
    (1.5, 5.0, 0.14, [14.0, 0.0, 12.0]),
    (1.0, 3.0, 0.5, [21.0, 0.0, -9.0]),
];

/// Garden light bases.
const GARDEN_LIGHTS: [[f64; 3]; 4] = [
    [4.0, 0.0, -14.0],
    [-7.0, 0.0, -12.0],
    [9.0, 0.0, 13.0],
    [-2.0, 0.0, 17.0],
];

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Handle to a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Colour and strength of a light-emitting node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Linear RGB colour.
    pub color: [f32; 3],
    /// Current intensity.
    pub intensity: f32,
}

/// One prop placed in the scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Construction parameters.
    pub prop: Prop,
    /// Light state, for nodes that emit light.
    pub light: Option<Light>,
    /// Whether the node is currently part of the rendered scene.
    pub attached: bool,
    /// Resources registered for this node, shared textures included.
    pub resources: Vec<ResourceId>,
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The farm scene.
#[derive(Debug)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    arena: ResourceArena,
    lighting: LightingOptions,
    background: [f32; 3],
    time_of_day: TimeOfDay,
    sun: NodeId,
    moon: NodeId,
    stars: NodeId,
    garden_lights: Vec<NodeId>,
}

impl Scene {
    /// Build the default farm layout.
    ///
    /// The sun, ground, water tower, barn, trees and garden lights start
    /// attached with the garden lights off; the moon and star field are
    /// built but left detached until night.
    #[must_use]
    pub fn farm(scene: &SceneOptions, lighting: &LightingOptions) -> Self {
        let mut arena = ResourceArena::new();
        let trunk_textures = TRUNK_TEXTURES
            .map(|path| arena.register(ResourceKind::Texture, path));
        let leaves_textures = LEAVES_TEXTURES
            .map(|path| arena.register(ResourceKind::Texture, path));

        let mut this = Self {
            nodes: Vec::new(),
            arena,
            lighting: lighting.clone(),
            background: lighting.day_background,
            time_of_day: TimeOfDay::Day,
            sun: NodeId(0),
            moon: NodeId(0),
            stars: NodeId(0),
            garden_lights: Vec::with_capacity(GARDEN_LIGHTS.len()),
        };

        this.sun = this.spawn(
            Prop::Sun {
                position: DVec3::new(-50.0, 25.0, 25.0),
                target: DVec3::new(5.0, 2.0, 5.0),
            },
            Some(Light {
                color: WHITE,
                intensity: lighting.sun_intensity,
            }),
            true,
        );
        let _ = this.spawn(
            Prop::Ground {
                width: 500.0,
                depth: 500.0,
            },
            None,
            true,
        );
        let _ = this.spawn(
            Prop::WaterTower {
                radius: 3.0,
                height: 1.0,
                base: DVec3::new(-4.0, 0.0, -10.0),
            },
            None,
            true,
        );
        let _ = this.spawn(
            Prop::Barn {
                width: 10.0,
                height: 3.0,
                depth: 5.0,
                overhang: 0.3,
                base: DVec3::ZERO,
            },
            None,
            true,
        );

        let mut rng = StdRng::seed_from_u64(scene.texture_seed);
        for (width, height, trunk_ratio, base) in TREES {
            let trunk_texture = rng.random_range(0..TRUNK_TEXTURES.len());
            let leaves_texture = rng.random_range(0..LEAVES_TEXTURES.len());
            let id = this.spawn(
                Prop::Tree {
                    width,
                    height,
                    trunk_ratio,
                    base: DVec3::from_array(base),
                    trunk_texture,
                    leaves_texture,
                },
                None,
                true,
            );
            this.nodes[id.0].resources.extend([
                trunk_textures[trunk_texture],
                leaves_textures[leaves_texture],
            ]);
        }

        for base in GARDEN_LIGHTS {
            let id = this.spawn(
                Prop::GardenLight {
                    base: DVec3::from_array(base),
                    distance: f64::from(lighting.garden_light_distance),
                },
                Some(Light {
                    color: YELLOW,
                    intensity: 0.0,
                }),
                true,
            );
            this.garden_lights.push(id);
        }

        this.stars = this.spawn(
            Prop::Stars {
                count: 100_000,
                extent: 1000.0,
                clearance: 400.0,
            },
            None,
            false,
        );
        this.moon = this.spawn(
            Prop::Moon {
                radius: 15.0,
                position: DVec3::new(-150.0, 75.0, -375.0),
            },
            None,
            false,
        );

        log::debug!(
            "farm scene built: {} nodes, {} resources",
            this.nodes.len(),
            this.arena.len()
        );
        this
    }

    /// Add a node and register its resources: one geometry, material and
    /// mesh per solid part, one light per light part, and the prop's own
    /// textures.
    fn spawn(
        &mut self,
        prop: Prop,
        light: Option<Light>,
        attached: bool,
    ) -> NodeId {
        let mut resources = Vec::new();
        for part in prop.parts() {
            match part.shape {
                Shape::PointLight { .. } | Shape::DirectionalLight { .. } => {
                    resources
                        .push(self.arena.register(ResourceKind::Light, part.name));
                }
                _ => {
                    for kind in [
                        ResourceKind::Geometry,
                        ResourceKind::Material,
                        ResourceKind::Mesh,
                    ] {
                        resources.push(self.arena.register(kind, part.name));
                    }
                }
            }
        }
        for path in prop.textures() {
            resources.push(self.arena.register(ResourceKind::Texture, *path));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            prop,
            light,
            attached,
            resources,
        });
        id
    }

    // -- Attachment --

    /// Attach a node. Returns `false` if it was already attached or the id
    /// is unknown.
    pub fn attach(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) if !node.attached => {
                node.attached = true;
                true
            }
            _ => false,
        }
    }

    /// Detach a node. Returns `false` if it was already detached or the id
    /// is unknown.
    pub fn detach(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) if node.attached => {
                node.attached = false;
                true
            }
            _ => false,
        }
    }

    // -- Queries --

    /// A node by handle.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    /// Every node, attached or not, in creation order.
    #[must_use]
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Nodes currently part of the rendered scene.
    pub fn attached(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|n| n.attached)
    }

    /// Whether a node is attached.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).is_some_and(|n| n.attached)
    }

    /// Clear colour (linear RGB).
    #[must_use]
    pub fn background(&self) -> [f32; 3] {
        self.background
    }

    /// The directional sun.
    #[must_use]
    pub fn sun(&self) -> NodeId {
        self.sun
    }

    /// The moon (attached at night).
    #[must_use]
    pub fn moon(&self) -> NodeId {
        self.moon
    }

    /// The star field (attached at night).
    #[must_use]
    pub fn stars(&self) -> NodeId {
        self.stars
    }

    /// Garden lights, in creation order.
    #[must_use]
    pub fn garden_lights(&self) -> &[NodeId] {
        &self.garden_lights
    }

    /// Intensity of a light-emitting node.
    #[must_use]
    pub fn light_intensity(&self, id: NodeId) -> Option<f32> {
        self.node(id)?.light.map(|l| l.intensity)
    }

    /// Registered resources.
    #[must_use]
    pub fn arena(&self) -> &ResourceArena {
        &self.arena
    }

    fn set_light_intensity(&mut self, id: NodeId, intensity: f32) {
        if let Some(light) =
            self.nodes.get_mut(id.0).and_then(|n| n.light.as_mut())
        {
            light.intensity = intensity;
        }
    }

    fn set_garden_light_intensity(&mut self, intensity: f32) {
        for id in &self.garden_lights {
            if let Some(light) =
                self.nodes.get_mut(id.0).and_then(|n| n.light.as_mut())
            {
                light.intensity = intensity;
            }
        }
    }

    // -- Teardown --

    /// Release every registered resource and detach every node. Returns
    /// how many resources were released.
    pub fn dispose(&mut self) -> usize {
        for node in &mut self.nodes {
            node.attached = false;
        }
        self.arena.dispose()
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.arena.is_disposed()
    }
}
