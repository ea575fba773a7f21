//! Depth-first generation collector

use std::collections::HashSet;

use tracing::instrument;

use crate::domain::{DomainResult, Person, PersonId};
use crate::registry::FamilyTree;
use crate::traversal::{Direction, TraversalStrategy};

/// Recurses depth-first but still groups output by generation level.
///
/// Each visited person lands in the pre-sized bucket for its recursion depth;
/// the visited set is shared across the whole recursion, so a person found
/// deep via one path is not revisited via another. Within a level, ordering
/// reflects depth-first discovery order, which can differ observably from the
/// breadth-first variant on re-convergent graphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl TraversalStrategy for DepthFirst {
    #[instrument(level = "debug", skip(registry))]
    fn levels<'a>(
        &self,
        registry: &'a FamilyTree,
        start: &PersonId,
        direction: Direction,
        generations: usize,
    ) -> DomainResult<Vec<Vec<&'a Person>>> {
        registry.get_person(start)?;

        let mut levels = vec![Vec::new(); generations + 1];
        let mut visited: HashSet<PersonId> = HashSet::new();
        collect(
            registry,
            start,
            direction,
            0,
            generations,
            &mut visited,
            &mut levels,
        )?;
        Ok(levels)
    }
}

fn collect<'a>(
    registry: &'a FamilyTree,
    id: &PersonId,
    direction: Direction,
    depth: usize,
    max_depth: usize,
    visited: &mut HashSet<PersonId>,
    levels: &mut [Vec<&'a Person>],
) -> DomainResult<()> {
    if depth > max_depth {
        return Ok(());
    }
    if !visited.insert(id.clone()) {
        return Ok(());
    }
    let person = registry.get_person(id)?;
    levels[depth].push(person);
    for relative_id in direction.edges(person) {
        collect(
            registry,
            relative_id,
            direction,
            depth + 1,
            max_depth,
            visited,
            levels,
        )?;
    }
    Ok(())
}
