use std::collections::HashSet;

use bevy::prelude::*;

/// Heavy model roots currently attached to the scene.
#[derive(Resource, Debug, Default)]
pub struct SceneResidency {
    resident: HashSet<Entity>,
}

impl SceneResidency {
    pub fn count(&self) -> usize {
        self.resident.len()
    }

    pub fn has_capacity(&self, limit: u32) -> bool {
        self.resident.len() < limit as usize
    }

    pub fn contains(&self, root: Entity) -> bool {
        self.resident.contains(&root)
    }

    pub fn attach(&mut self, root: Entity) -> bool {
        self.resident.insert(root)
    }

    /// Returns false when `root` was not resident.
    pub fn release(&mut self, root: Entity) -> bool {
        self.resident.remove(&root)
    }
}
