//! Person entity: identity, attributes, and relationship edges

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ValidationError;
use crate::domain::marriage::Marriage;

/// Plausibility bounds for birth years.
pub const MIN_BIRTH_YEAR: i32 = 1000;
pub const MAX_BIRTH_YEAR: i32 = 3000;

/// A person never has more than two recorded parents.
pub const MAX_PARENTS: usize = 2;

/// Unique, immutable person identifier (e.g., "P001").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Closed gender enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        };
        f.write_str(s)
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" | "o" => Ok(Gender::Other),
            _ => Err(ValidationError::UnknownGender(s.to_string())),
        }
    }
}

/// Marriage eligibility rule attached to a person at classification time.
///
/// A one-bit behavioral difference, so an enum field instead of dynamic
/// dispatch: the default rule always permits marriage, a legal minor never
/// may, regardless of other attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarriageEligibility {
    Unrestricted,
    Minor,
}

/// A registered person.
///
/// Fields are private: attribute setters validate, relationship edges are
/// mutated only through `pub(crate)` primitives called by the registry.
#[derive(Debug, Clone)]
pub struct Person {
    id: PersonId,
    full_name: String,
    gender: Gender,
    birth_year: i32,
    death_year: Option<i32>,
    eligibility: MarriageEligibility,
    parent_ids: Vec<PersonId>,
    child_ids: Vec<PersonId>,
    marriages: Vec<Marriage>,
}

impl Person {
    /// Construct a validated person. Only the factory creates persons.
    pub(crate) fn new(
        id: PersonId,
        full_name: &str,
        gender: Gender,
        birth_year: i32,
        death_year: Option<i32>,
        eligibility: MarriageEligibility,
    ) -> Result<Self, ValidationError> {
        let mut person = Self {
            id,
            full_name: String::new(),
            gender,
            birth_year: MIN_BIRTH_YEAR,
            death_year: None,
            eligibility,
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
            marriages: Vec::new(),
        };
        person.set_full_name(full_name)?;
        person.set_birth_year(birth_year)?;
        person.set_death_year(death_year)?;
        Ok(person)
    }

    pub fn id(&self) -> &PersonId {
        &self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn birth_year(&self) -> i32 {
        self.birth_year
    }

    pub fn death_year(&self) -> Option<i32> {
        self.death_year
    }

    pub fn eligibility(&self) -> MarriageEligibility {
        self.eligibility
    }

    /// Parent ids in link order, at most [`MAX_PARENTS`].
    pub fn parent_ids(&self) -> &[PersonId] {
        &self.parent_ids
    }

    /// Child ids in link order.
    pub fn child_ids(&self) -> &[PersonId] {
        &self.child_ids
    }

    /// Marriages in insertion order.
    pub fn marriages(&self) -> &[Marriage] {
        &self.marriages
    }

    pub fn set_full_name(&mut self, full_name: &str) -> Result<(), ValidationError> {
        let trimmed = full_name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::BlankName);
        }
        self.full_name = trimmed.to_string();
        Ok(())
    }

    pub fn set_birth_year(&mut self, birth_year: i32) -> Result<(), ValidationError> {
        if !(MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&birth_year) {
            return Err(ValidationError::ImplausibleBirthYear(birth_year));
        }
        self.birth_year = birth_year;
        Ok(())
    }

    pub fn set_death_year(&mut self, death_year: Option<i32>) -> Result<(), ValidationError> {
        if let Some(death) = death_year {
            if death < self.birth_year {
                return Err(ValidationError::DeathBeforeBirth {
                    birth: self.birth_year,
                    death,
                });
            }
        }
        self.death_year = death_year;
        Ok(())
    }

    pub fn is_alive(&self) -> bool {
        self.death_year.is_none()
    }

    /// Age in the given year, capped at the death year.
    pub fn age_in(&self, year: i32) -> Result<i32, ValidationError> {
        if year < self.birth_year {
            return Err(ValidationError::YearBeforeBirth {
                birth: self.birth_year,
                year,
            });
        }
        let until = match self.death_year {
            Some(death) if death <= year => death,
            _ => year,
        };
        Ok(until - self.birth_year)
    }

    pub fn can_marry(&self) -> bool {
        match self.eligibility {
            MarriageEligibility::Unrestricted => true,
            MarriageEligibility::Minor => false,
        }
    }

    /// First inserted marriage with no divorce year.
    pub fn active_marriage(&self) -> Option<&Marriage> {
        self.marriages.iter().find(|m| m.is_active())
    }

    pub fn active_spouse_id(&self) -> Option<&PersonId> {
        self.active_marriage()
            .and_then(|m| m.other_spouse_id(&self.id).ok())
    }

    // Relationship primitives: callable only by the registry, which performs
    // the cross-person validation (parent limit, cycles) before committing.

    pub(crate) fn add_parent_id(&mut self, parent_id: PersonId) {
        if !self.parent_ids.contains(&parent_id) {
            self.parent_ids.push(parent_id);
        }
    }

    pub(crate) fn remove_parent_id(&mut self, parent_id: &PersonId) {
        self.parent_ids.retain(|id| id != parent_id);
    }

    pub(crate) fn add_child_id(&mut self, child_id: PersonId) {
        if !self.child_ids.contains(&child_id) {
            self.child_ids.push(child_id);
        }
    }

    pub(crate) fn remove_child_id(&mut self, child_id: &PersonId) {
        self.child_ids.retain(|id| id != child_id);
    }

    pub(crate) fn add_marriage(&mut self, marriage: Marriage) {
        self.marriages.push(marriage);
    }

    /// Set the divorce year on the first active marriage involving `other`.
    pub(crate) fn record_divorce(
        &mut self,
        other: &PersonId,
        year: i32,
    ) -> Result<(), ValidationError> {
        if let Some(marriage) = self
            .marriages
            .iter_mut()
            .find(|m| m.is_active() && m.involves(other))
        {
            marriage.set_divorce_year(year)?;
        }
        Ok(())
    }
}

impl fmt::Display for Person {
    /// One-line summary: `P001 | Ada Lovelace | female | b.1815 d.1852 | spouse=none | children=1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let death = self
            .death_year
            .map(|d| format!(" d.{d}"))
            .unwrap_or_default();
        let spouse = self
            .active_spouse_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string());
        write!(
            f,
            "{} | {} | {} | b.{}{} | spouse={} | children={}",
            self.id,
            self.full_name,
            self.gender,
            self.birth_year,
            death,
            spouse,
            self.child_ids.len()
        )
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

#[cfg(test)]
mod tests {
    use super::*;

    fn adult(name: &str, birth: i32) -> Person {
        Person::new(
            PersonId::from("P001"),
            name,
            Gender::Female,
            birth,
            None,
            MarriageEligibility::Unrestricted,
        )
        .unwrap()
    }

    #[test]
    fn blank_name_is_rejected() {
        let result = Person::new(
            PersonId::from("P001"),
            "   ",
            Gender::Other,
            1970,
            None,
            MarriageEligibility::Unrestricted,
        );
        assert_eq!(result.unwrap_err(), ValidationError::BlankName);
    }

    #[test]
    fn name_is_trimmed() {
        let person = adult("  Ada Lovelace  ", 1815);
        assert_eq!(person.full_name(), "Ada Lovelace");
    }

    #[test]
    fn implausible_birth_year_is_rejected() {
        let result = Person::new(
            PersonId::from("P001"),
            "Methuselah",
            Gender::Male,
            969,
            None,
            MarriageEligibility::Unrestricted,
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::ImplausibleBirthYear(969)
        );
    }

    #[test]
    fn death_before_birth_is_rejected() {
        let mut person = adult("Ada", 1815);
        let result = person.set_death_year(Some(1800));
        assert_eq!(
            result.unwrap_err(),
            ValidationError::DeathBeforeBirth {
                birth: 1815,
                death: 1800
            }
        );
    }

    #[test]
    fn age_is_capped_at_death_year() {
        let mut person = adult("Ada", 1970);
        person.set_death_year(Some(2010)).unwrap();
        assert_eq!(person.age_in(2020).unwrap(), 40);
        assert_eq!(person.age_in(2000).unwrap(), 30);
    }

    #[test]
    fn age_before_birth_is_rejected() {
        let person = adult("Ada", 1970);
        assert_eq!(
            person.age_in(1960).unwrap_err(),
            ValidationError::YearBeforeBirth {
                birth: 1970,
                year: 1960
            }
        );
    }

    #[test]
    fn minor_never_marries() {
        let minor = Person::new(
            PersonId::from("P002"),
            "Kid",
            Gender::Other,
            2015,
            None,
            MarriageEligibility::Minor,
        )
        .unwrap();
        assert!(!minor.can_marry());
        assert!(adult("Ada", 1970).can_marry());
    }

    #[test]
    fn parent_ids_are_deduplicated_in_order() {
        let mut person = adult("Ada", 1970);
        person.add_parent_id(PersonId::from("P010"));
        person.add_parent_id(PersonId::from("P011"));
        person.add_parent_id(PersonId::from("P010"));
        assert_eq!(
            person.parent_ids(),
            &[PersonId::from("P010"), PersonId::from("P011")]
        );
    }

    #[test]
    fn alive_iff_no_death_year() {
        let mut person = adult("Ada", 1970);
        assert!(person.is_alive());
        person.set_death_year(Some(2010)).unwrap();
        assert!(!person.is_alive());
    }

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("m".parse::<Gender>().unwrap(), Gender::Male);
        assert!(matches!(
            "dragon".parse::<Gender>(),
            Err(ValidationError::UnknownGender(_))
        ));
    }
}
