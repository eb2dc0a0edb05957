// Collision layers and event collection

use std::sync::{Arc, Mutex};

use rapier2d::prelude::{
    ColliderSet, ContactPair, EventHandler, Group, InteractionGroups, Real, RigidBodySet,
};

use crate::engine::world::EntityId;

/// Which kind of hitbox a collider stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionLayer {
    /// Solid level geometry; the only thing character movement is blocked by
    Platform = 0b0001,

    /// Player, enemies and anything else that reports overlaps without blocking
    Actor = 0b0010,
}

impl CollisionLayer {
    pub fn interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::from_bits_truncate(self as u32), Group::ALL)
    }

    /// Query groups that only see level geometry
    pub fn platforms_only() -> InteractionGroups {
        InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(CollisionLayer::Platform as u32),
        )
    }
}

/// Change in overlap between two entities' hitboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two hitboxes started touching
    Started { entity1: EntityId, entity2: EntityId },

    /// Two hitboxes stopped touching
    Stopped { entity1: EntityId, entity2: EntityId },
}

impl CollisionEvent {
    pub fn entities(&self) -> (EntityId, EntityId) {
        match *self {
            Self::Started { entity1, entity2 } | Self::Stopped { entity1, entity2 } => {
                (entity1, entity2)
            }
        }
    }

    /// If `id` is part of this event, the other participant
    pub fn other(&self, id: EntityId) -> Option<EntityId> {
        let (a, b) = self.entities();
        if a == id {
            Some(b)
        } else if b == id {
            Some(a)
        } else {
            None
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Collects rapier's collision events while the pipeline steps
#[derive(Debug, Default)]
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<rapier2d::prelude::CollisionEvent>>>,
}

impl CollisionEventQueue {
    /// Hand over everything collected since the last call
    pub fn drain(&self) -> Vec<rapier2d::prelude::CollisionEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    fn push(&self, event: rapier2d::prelude::CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_other() {
        let event = CollisionEvent::Started {
            entity1: 3,
            entity2: 7,
        };
        assert_eq!(event.other(3), Some(7));
        assert_eq!(event.other(7), Some(3));
        assert_eq!(event.other(1), None);
        assert!(event.is_started());
    }

    #[test]
    fn test_platform_query_skips_actors() {
        let query = CollisionLayer::platforms_only();
        assert!(query.test(CollisionLayer::Platform.interaction_groups()));
        assert!(!query.test(CollisionLayer::Actor.interaction_groups()));
    }

    #[test]
    fn test_actors_overlap_everything() {
        let actor = CollisionLayer::Actor.interaction_groups();
        assert!(actor.test(CollisionLayer::Platform.interaction_groups()));
        assert!(actor.test(CollisionLayer::Actor.interaction_groups()));
    }
}
