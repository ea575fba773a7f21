//! The family tree registry: owns all entities and enforces the invariants

use std::collections::{HashMap, HashSet, VecDeque};

use itertools::Itertools;
use tracing::instrument;

use crate::domain::{
    ConstraintViolation, DomainResult, Gender, Marriage, NotFoundError, Person, PersonId,
    ValidationError, MAX_PARENTS,
};
use crate::factory::PersonFactory;
use crate::traversal::{Direction, TraversalStrategy};

/// In-memory registry of people and marriages.
///
/// Exclusive owner of all `Person`/`Marriage` state: queries hand out borrows,
/// mutation goes through the validated operations below. Every rejected
/// mutation leaves the registry exactly as it was before the call.
#[derive(Debug)]
pub struct FamilyTree {
    people: HashMap<PersonId, Person>,
    /// Insertion order for listing.
    order: Vec<PersonId>,
    factory: PersonFactory,
    strategy: Box<dyn TraversalStrategy>,
}

impl Default for FamilyTree {
    fn default() -> Self {
        Self::new(
            PersonFactory::default(),
            crate::traversal::TraversalKind::BreadthFirst.strategy(),
        )
    }
}

impl FamilyTree {
    /// Strategy and factory are fixed at construction; see `Settings`.
    pub fn new(factory: PersonFactory, strategy: Box<dyn TraversalStrategy>) -> Self {
        Self {
            people: HashMap::new(),
            order: Vec::new(),
            factory,
            strategy,
        }
    }

    /// Create, classify and register a new person.
    #[instrument(level = "debug", skip(self))]
    pub fn add_person(
        &mut self,
        full_name: &str,
        gender: Gender,
        birth_year: i32,
        death_year: Option<i32>,
    ) -> DomainResult<&Person> {
        let person = self
            .factory
            .create(full_name, gender, birth_year, death_year)?;
        Ok(self.insert_person(person)?)
    }

    /// Insert a fully constructed person, rejecting duplicate ids.
    ///
    /// Generated ids are always fresh, but the check stays: external id
    /// assignment would funnel through here as well.
    fn insert_person(&mut self, person: Person) -> Result<&Person, ConstraintViolation> {
        let id = person.id().clone();
        if self.people.contains_key(&id) {
            return Err(ConstraintViolation::DuplicateId(id));
        }
        self.order.push(id.clone());
        Ok(self.people.entry(id).or_insert(person))
    }

    pub fn get_person(&self, id: &PersonId) -> DomainResult<&Person> {
        self.people
            .get(id)
            .ok_or_else(|| NotFoundError::UnknownPerson(id.clone()).into())
    }

    /// All registered people in insertion order.
    pub fn all_people(&self) -> impl Iterator<Item = &Person> + '_ {
        self.order.iter().filter_map(|id| self.people.get(id))
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Record a parent-child link.
    ///
    /// Both edge directions commit together: validation is complete before
    /// the first mutation, so a partial link is never observable.
    #[instrument(level = "debug", skip(self))]
    pub fn link_parent_child(
        &mut self,
        parent_id: &PersonId,
        child_id: &PersonId,
    ) -> DomainResult<()> {
        if parent_id == child_id {
            return Err(ValidationError::SelfParent(parent_id.clone()).into());
        }
        self.get_person(parent_id)?;
        let child = self.get_person(child_id)?;
        if child.parent_ids().len() >= MAX_PARENTS && !child.parent_ids().contains(parent_id) {
            return Err(ConstraintViolation::ParentLimitExceeded(child_id.clone()).into());
        }
        // The parent must not already be below the child.
        if self.is_descendant(parent_id, child_id)? {
            return Err(ConstraintViolation::CycleDetected {
                parent: parent_id.clone(),
                child: child_id.clone(),
            }
            .into());
        }

        if let Some(child) = self.people.get_mut(child_id) {
            child.add_parent_id(parent_id.clone());
        }
        if let Some(parent) = self.people.get_mut(parent_id) {
            parent.add_child_id(child_id.clone());
        }
        Ok(())
    }

    /// Undo a recorded parent-child link. Mirrors `link_parent_child`: both
    /// edge directions are removed together.
    #[instrument(level = "debug", skip(self))]
    pub fn unlink_parent_child(
        &mut self,
        parent_id: &PersonId,
        child_id: &PersonId,
    ) -> DomainResult<()> {
        self.get_person(parent_id)?;
        let child = self.get_person(child_id)?;
        if !child.parent_ids().contains(parent_id) {
            return Err(NotFoundError::NoParentLink {
                parent: parent_id.clone(),
                child: child_id.clone(),
            }
            .into());
        }

        if let Some(child) = self.people.get_mut(child_id) {
            child.remove_parent_id(parent_id);
        }
        if let Some(parent) = self.people.get_mut(parent_id) {
            parent.remove_child_id(child_id);
        }
        Ok(())
    }

    /// Marry two registered people.
    #[instrument(level = "debug", skip(self))]
    pub fn marry(&mut self, a_id: &PersonId, b_id: &PersonId, year: i32) -> DomainResult<()> {
        if a_id == b_id {
            return Err(ValidationError::SelfMarriage(a_id.clone()).into());
        }
        let a = self.get_person(a_id)?;
        let b = self.get_person(b_id)?;
        if !a.can_marry() {
            return Err(ConstraintViolation::NotMarriageable(a_id.clone()).into());
        }
        if !b.can_marry() {
            return Err(ConstraintViolation::NotMarriageable(b_id.clone()).into());
        }
        if a.active_marriage().is_some() {
            return Err(ConstraintViolation::AlreadyMarried(a_id.clone()).into());
        }
        if b.active_marriage().is_some() {
            return Err(ConstraintViolation::AlreadyMarried(b_id.clone()).into());
        }

        let marriage = Marriage::new(a_id.clone(), b_id.clone(), year)?;
        if let Some(a) = self.people.get_mut(a_id) {
            a.add_marriage(marriage.clone());
        }
        if let Some(b) = self.people.get_mut(b_id) {
            b.add_marriage(marriage);
        }
        Ok(())
    }

    /// End the active marriage between the two.
    #[instrument(level = "debug", skip(self))]
    pub fn divorce(&mut self, a_id: &PersonId, b_id: &PersonId, year: i32) -> DomainResult<()> {
        self.get_person(b_id)?;
        let a = self.get_person(a_id)?;
        let marriage = a
            .marriages()
            .iter()
            .find(|m| m.is_active() && m.involves(b_id))
            .ok_or_else(|| NotFoundError::NoActiveMarriage(a_id.clone(), b_id.clone()))?;
        if year < marriage.marriage_year() {
            return Err(ValidationError::DivorceBeforeMarriage {
                marriage: marriage.marriage_year(),
                divorce: year,
            }
            .into());
        }

        // The record lives in both spouse lists; update both in one commit.
        if let Some(a) = self.people.get_mut(a_id) {
            a.record_divorce(b_id, year)?;
        }
        if let Some(b) = self.people.get_mut(b_id) {
            b.record_divorce(a_id, year)?;
        }
        Ok(())
    }

    /// Breadth-first reachability over child edges starting at `ancestor_id`.
    ///
    /// The visited set keeps the walk finite even if a cycle ever slipped in.
    pub fn is_descendant(
        &self,
        candidate_id: &PersonId,
        ancestor_id: &PersonId,
    ) -> DomainResult<bool> {
        let ancestor = self.get_person(ancestor_id)?;
        let mut queue: VecDeque<&PersonId> = ancestor.child_ids().iter().collect();
        let mut visited: HashSet<&PersonId> = queue.iter().copied().collect();

        while let Some(current) = queue.pop_front() {
            if current == candidate_id {
                return Ok(true);
            }
            if let Some(person) = self.people.get(current) {
                for child_id in person.child_ids() {
                    if visited.insert(child_id) {
                        queue.push_back(child_id);
                    }
                }
            }
        }
        Ok(false)
    }

    pub fn children_of(&self, id: &PersonId) -> DomainResult<Vec<&Person>> {
        let person = self.get_person(id)?;
        person
            .child_ids()
            .iter()
            .map(|child_id| self.get_person(child_id))
            .collect()
    }

    /// The active spouse, if any.
    pub fn spouse_of(&self, id: &PersonId) -> DomainResult<Option<&Person>> {
        let person = self.get_person(id)?;
        match person.active_spouse_id() {
            Some(spouse_id) => Ok(Some(self.get_person(spouse_id)?)),
            None => Ok(None),
        }
    }

    /// All children of all of `id`'s parents, in first-seen order, without
    /// `id` itself. A half-sibling reachable via both parents appears once.
    pub fn siblings_of(&self, id: &PersonId) -> DomainResult<Vec<&Person>> {
        let person = self.get_person(id)?;
        person
            .parent_ids()
            .iter()
            .filter_map(|parent_id| self.people.get(parent_id))
            .flat_map(|parent| parent.child_ids())
            .filter(|child_id| *child_id != id)
            .unique()
            .map(|child_id| self.get_person(child_id))
            .collect()
    }

    /// Ancestor levels: index 0 = the person, index k = generation k back.
    #[instrument(level = "debug", skip(self))]
    pub fn ancestors_of(
        &self,
        id: &PersonId,
        generations: usize,
    ) -> DomainResult<Vec<Vec<&Person>>> {
        self.strategy
            .levels(self, id, Direction::Ancestors, generations)
    }

    /// Descendant levels: index 0 = the person, index k = generation k down.
    #[instrument(level = "debug", skip(self))]
    pub fn descendants_of(
        &self,
        id: &PersonId,
        generations: usize,
    ) -> DomainResult<Vec<Vec<&Person>>> {
        self.strategy
            .levels(self, id, Direction::Descendants, generations)
    }
}
