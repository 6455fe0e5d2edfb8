//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Warehouses, users and material types are entities: two of them are the same
/// thing only if their ids match, whatever their other fields say.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// True when both values denote the same entity.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
