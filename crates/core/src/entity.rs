//! Entity trait: identity + continuity across state changes.

use std::collections::HashMap;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if the record carries one.
    ///
    /// Reference data arrives untrusted, so a record without an identifier is
    /// representable and simply cannot be indexed.
    fn id(&self) -> Option<&Self::Id>;
}

/// Build an identifier -> entity lookup in a single pass.
///
/// The first occurrence of an identifier wins; later duplicates and records
/// without an identifier are left out. Returns the index together with the
/// number of duplicates that were ignored.
pub fn index_first_wins<E: Entity>(entities: &[E]) -> (HashMap<E::Id, &E>, usize) {
    let mut index = HashMap::with_capacity(entities.len());
    let mut duplicates = 0;

    for entity in entities {
        let Some(id) = entity.id() else {
            continue;
        };
        if index.contains_key(id) {
            duplicates += 1;
            continue;
        }
        index.insert(id.clone(), entity);
    }

    (index, duplicates)
}
