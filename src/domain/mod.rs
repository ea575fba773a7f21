//! Domain layer: entities and the failure taxonomy
//!
//! Independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod marriage;
pub mod person;

pub use error::{
    ConstraintViolation, DomainError, DomainResult, NotFoundError, ValidationError,
};
pub use marriage::Marriage;
pub use person::{Gender, MarriageEligibility, Person, PersonId, MAX_PARENTS};
