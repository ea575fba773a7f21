//! Domain-level errors: the failure taxonomy for all registry operations

use thiserror::Error;

use crate::domain::person::PersonId;

/// Malformed or out-of-range input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("full name cannot be blank")]
    BlankName,

    #[error("birth year {0} outside plausible range 1000..=3000")]
    ImplausibleBirthYear(i32),

    #[error("death year {death} precedes birth year {birth}")]
    DeathBeforeBirth { birth: i32, death: i32 },

    #[error("year {year} precedes birth year {birth}")]
    YearBeforeBirth { birth: i32, year: i32 },

    #[error("unknown gender: {0}")]
    UnknownGender(String),

    #[error("{0} cannot be their own parent")]
    SelfParent(PersonId),

    #[error("{0} cannot marry themselves")]
    SelfMarriage(PersonId),

    #[error("divorce year {divorce} precedes marriage year {marriage}")]
    DivorceBeforeMarriage { marriage: i32, divorce: i32 },

    #[error("{0} is not a spouse in this marriage")]
    ForeignSpouse(PersonId),
}

/// Lookups that came up empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("unknown person id: {0}")]
    UnknownPerson(PersonId),

    #[error("no active marriage between {0} and {1}")]
    NoActiveMarriage(PersonId, PersonId),

    #[error("no parent-child link between {parent} and {child}")]
    NoParentLink { parent: PersonId, child: PersonId },
}

/// Mutations that would break a registry invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    #[error("duplicate person id: {0}")]
    DuplicateId(PersonId),

    #[error("{0} already has two parents")]
    ParentLimitExceeded(PersonId),

    #[error("linking {parent} as parent of {child} would create a cycle")]
    CycleDetected { parent: PersonId, child: PersonId },

    #[error("{0} already has an active marriage")]
    AlreadyMarried(PersonId),

    #[error("{0} is not allowed to marry")]
    NotMarriageable(PersonId),
}

/// Umbrella over the three failure classes.
///
/// Every rejected mutation leaves the registry exactly as it was before the
/// call; failures signal contract violations, never control flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
