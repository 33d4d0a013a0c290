//! Macros for reducing boilerplate around pooled component kinds.
//!
//! `pooled_components!` takes the list of every poolable component and
//! expands to the two functions that must stay in sync with it: one that
//! registers a [`crate::pool::ComponentPool`] for each kind and one that
//! strips each kind off a dying entity into its pool.
//!
//! ```ignore
//! pooled_components! {
//!     Position,
//!     Velocity,
//! }
//! ```
macro_rules! pooled_components {
    ($($kind:ty),* $(,)?) => {
        /// Inserts an empty pool resource for every pooled component kind.
        pub fn init_pools(world: &mut ::bevy::prelude::World) {
            $(world.init_resource::<$crate::pool::ComponentPool<$kind>>();)*
        }

        /// Moves every pooled component of `entity` into its pool.
        pub fn recycle_components(
            world: &mut ::bevy::prelude::World,
            entity: ::bevy::prelude::Entity,
        ) {
            $($crate::pool::recycle::<$kind>(world, entity);)*
        }
    };
}
