//! Breadth-first generation collector

use std::collections::HashSet;

use tracing::instrument;

use crate::domain::{DomainResult, Person, PersonId};
use crate::registry::FamilyTree;
use crate::traversal::{Direction, TraversalStrategy};

/// Expands level k from every person in level k-1, in their iteration order.
///
/// Stable with respect to the insertion order of parent/child sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl TraversalStrategy for BreadthFirst {
    #[instrument(level = "debug", skip(registry))]
    fn levels<'a>(
        &self,
        registry: &'a FamilyTree,
        start: &PersonId,
        direction: Direction,
        generations: usize,
    ) -> DomainResult<Vec<Vec<&'a Person>>> {
        let start_person = registry.get_person(start)?;

        let mut visited: HashSet<&PersonId> = HashSet::new();
        visited.insert(start_person.id());

        let mut levels = Vec::with_capacity(generations + 1);
        let mut frontier = vec![start_person];
        levels.push(frontier.clone());

        for _ in 1..=generations {
            let mut next = Vec::new();
            for person in frontier.iter().copied() {
                for relative_id in direction.edges(person) {
                    if visited.insert(relative_id) {
                        next.push(registry.get_person(relative_id)?);
                    }
                }
            }
            levels.push(next.clone());
            frontier = next;
        }
        Ok(levels)
    }
}
