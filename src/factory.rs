//! Person classification: deterministic id generation and the adult/minor rule

use tracing::debug;

use crate::domain::{Gender, MarriageEligibility, Person, PersonId, ValidationError};

/// Fixed reference year for the classification rule.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;

/// Age (at the reference year) from which marriage is unrestricted.
pub const DEFAULT_ADULT_AGE: i32 = 18;

/// Creates persons with deterministic ids (`P001`, `P002`, ...) and picks the
/// marriage-eligibility variant by age relative to a fixed reference year.
///
/// The counter is explicit state owned by the factory, not process-wide.
#[derive(Debug, Clone)]
pub struct PersonFactory {
    counter: u32,
    reference_year: i32,
    adult_age: i32,
}

impl Default for PersonFactory {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_YEAR, DEFAULT_ADULT_AGE)
    }
}

impl PersonFactory {
    pub fn new(reference_year: i32, adult_age: i32) -> Self {
        Self {
            counter: 0,
            reference_year,
            adult_age,
        }
    }

    fn next_id(&mut self) -> PersonId {
        self.counter += 1;
        PersonId::new(format!("P{:03}", self.counter))
    }

    /// Construct a classified person with a freshly generated id.
    pub fn create(
        &mut self,
        full_name: &str,
        gender: Gender,
        birth_year: i32,
        death_year: Option<i32>,
    ) -> Result<Person, ValidationError> {
        let id = self.next_id();
        let age = self.reference_year - birth_year;
        let eligibility = if age >= self.adult_age {
            MarriageEligibility::Unrestricted
        } else {
            MarriageEligibility::Minor
        };
        debug!(%id, birth_year, age, ?eligibility, "classified person");
        Person::new(id, full_name, gender, birth_year, death_year, eligibility)
    }
}
