//! Explicit registry of every resource the scene creates.
//!
//! Props register their geometries, materials, meshes, textures and lights
//! here as they are assembled. [`ResourceArena::dispose`] releases all of
//! them in one pass; resources shared between props (tree textures) are
//! registered once and therefore released once.

use std::fmt;

/// What a registered resource is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Vertex data for a shape.
    Geometry,
    /// Surface description (colour, maps).
    Material,
    /// A geometry paired with a material.
    Mesh,
    /// An image map.
    Texture,
    /// A light source.
    Light,
}

/// Handle to a registered resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One registered resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    kind: ResourceKind,
    label: String,
    released: bool,
}

impl Resource {
    /// Resource kind.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Human-readable label, e.g. a texture path.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether [`ResourceArena::dispose`] has released it.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.released
    }
}

/// Flat list of resources in registration order.
#[derive(Debug, Default)]
pub struct ResourceArena {
    resources: Vec<Resource>,
    disposed: bool,
}

impl ResourceArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new resource and return its handle.
    pub fn register(
        &mut self,
        kind: ResourceKind,
        label: impl Into<String>,
    ) -> ResourceId {
        if self.disposed {
            log::warn!("registering a resource in a disposed arena");
        }
        let id = ResourceId(self.resources.len() as u32);
        self.resources.push(Resource {
            kind,
            label: label.into(),
            released: false,
        });
        id
    }

    /// Look up a resource by handle.
    #[must_use]
    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.0 as usize)
    }

    /// Number of registered resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of registered resources of one kind.
    #[must_use]
    pub fn count(&self, kind: ResourceKind) -> usize {
        self.resources.iter().filter(|r| r.kind == kind).count()
    }

    /// Number of resources not yet released.
    #[must_use]
    pub fn live(&self) -> usize {
        self.resources.iter().filter(|r| !r.released).count()
    }

    /// Release every live resource exactly once. Returns how many were
    /// released; a second call releases nothing.
    pub fn dispose(&mut self) -> usize {
        if self.disposed {
            log::warn!("resource arena already disposed");
            return 0;
        }
        let mut released = 0;
        for resource in self.resources.iter_mut().filter(|r| !r.released) {
            resource.released = true;
            released += 1;
        }
        self.disposed = true;
        log::debug!("released {released} scene resources");
        released
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
