//! kintree: an in-memory genealogy registry
//!
//! People, parent/child links, and marriages, with generation-wise
//! ancestor/descendant queries over the resulting graph. The registry owns
//! all entity state and enforces the relationship invariants; traversal
//! strategies and renderers work on read-only views of it.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod factory;
pub mod registry;
pub mod render;
pub mod traversal;
pub mod util;

pub use config::Settings;
pub use domain::{
    ConstraintViolation, DomainError, DomainResult, Gender, Marriage, NotFoundError, Person,
    PersonId, ValidationError,
};
pub use factory::PersonFactory;
pub use registry::FamilyTree;
pub use render::{CompactLines, IndentedTree, Renderer, RendererKind};
pub use traversal::{BreadthFirst, DepthFirst, Direction, TraversalKind, TraversalStrategy};
