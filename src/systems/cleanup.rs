//! End-of-tick despawning.

use bevy::prelude::*;
use hashbrown::HashSet;

use crate::components::{recycle_components, Orbit, Remove};

/// Entities flagged for removal plus the satellites of any flagged parent.
fn doomed(world: &mut World) -> Vec<Entity> {
    let mut flagged: HashSet<Entity> = world
        .query::<(Entity, &Remove)>()
        .iter(world)
        .filter(|(_, marker)| marker.should_remove)
        .map(|(entity, _)| entity)
        .collect();
    let satellites: Vec<Entity> = world
        .query::<(Entity, &Orbit)>()
        .iter(world)
        .filter(|(_, orbit)| flagged.contains(&orbit.parent))
        .map(|(entity, _)| entity)
        .collect();
    flagged.extend(satellites);
    let mut ordered: Vec<Entity> = flagged.into_iter().collect();
    ordered.sort_unstable();
    ordered
}

/// Releases the pooled components of every doomed entity and despawns it.
pub fn cleanup_removed(world: &mut World) {
    let victims = doomed(world);
    if victims.is_empty() {
        return;
    }
    for entity in &victims {
        recycle_components(world, *entity);
        world.despawn(*entity);
    }
    log::debug!("despawned {} entities", victims.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{init_pools, Position};
    use crate::pool::ComponentPool;
    use rstest::rstest;

    #[rstest]
    fn removal_cascades_to_satellites() {
        let mut world = World::new();
        init_pools(&mut world);
        let parent = world
            .spawn((Position::new(1.0, 2.0), Remove { should_remove: true }))
            .id();
        let satellite = world
            .spawn((
                Position::default(),
                Orbit {
                    parent,
                    ..Orbit::default()
                },
                Remove::default(),
            ))
            .id();
        let bystander = world.spawn((Position::default(), Remove::default())).id();

        cleanup_removed(&mut world);

        assert!(world.get_entity(parent).is_err());
        assert!(world.get_entity(satellite).is_err());
        assert!(world.get_entity(bystander).is_ok());
        let idle = world.resource::<ComponentPool<Position>>().idle();
        assert_eq!(idle, 2);
    }
}
