//! Generation-wise graph traversal strategies
//!
//! Both variants produce the same output shape: `generations + 1` levels,
//! level 0 holding exactly the start person, level k the relatives first
//! discovered at depth k. A global visited set keeps re-convergent lineages
//! (e.g., cousin marriages) from duplicating people or looping.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainResult, Person, PersonId};
use crate::registry::FamilyTree;

mod breadth;
mod depth;

pub use breadth::BreadthFirst;
pub use depth::DepthFirst;

/// Which edge set a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow parent edges.
    Ancestors,
    /// Follow child edges.
    Descendants,
}

impl Direction {
    pub(crate) fn edges<'a>(&self, person: &'a Person) -> &'a [PersonId] {
        match self {
            Direction::Ancestors => person.parent_ids(),
            Direction::Descendants => person.child_ids(),
        }
    }
}

/// Level-order traversal over the registry's graph.
pub trait TraversalStrategy: fmt::Debug {
    /// Produce `generations + 1` levels starting at `start`.
    fn levels<'a>(
        &self,
        registry: &'a FamilyTree,
        start: &PersonId,
        direction: Direction,
        generations: usize,
    ) -> DomainResult<Vec<Vec<&'a Person>>>;
}

/// Strategy selector, named in configuration and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalKind {
    BreadthFirst,
    DepthFirst,
}

impl TraversalKind {
    pub fn strategy(self) -> Box<dyn TraversalStrategy> {
        match self {
            TraversalKind::BreadthFirst => Box::new(BreadthFirst),
            TraversalKind::DepthFirst => Box::new(DepthFirst),
        }
    }
}
