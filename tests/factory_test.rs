//! Tests for person classification and id generation

use kintree::domain::MarriageEligibility;
use kintree::{Gender, PersonFactory};

#[test]
fn given_fresh_factory_when_creating_then_ids_are_sequential() {
    // Arrange
    let mut factory = PersonFactory::default();

    // Act
    let first = factory.create("Ada", Gender::Female, 1970, None).unwrap();
    let second = factory.create("Bob", Gender::Male, 1972, None).unwrap();

    // Assert
    assert_eq!(first.id().as_str(), "P001");
    assert_eq!(second.id().as_str(), "P002");
}

#[test]
fn given_default_rule_when_classifying_then_threshold_is_age_18_in_2025() {
    let mut factory = PersonFactory::default();

    let adult = factory.create("Adult", Gender::Other, 2007, None).unwrap();
    let minor = factory.create("Minor", Gender::Other, 2008, None).unwrap();

    assert_eq!(adult.eligibility(), MarriageEligibility::Unrestricted);
    assert!(adult.can_marry());
    assert_eq!(minor.eligibility(), MarriageEligibility::Minor);
    assert!(!minor.can_marry());
}

#[test]
fn given_custom_rule_when_classifying_then_settings_are_honored() {
    // Reference year 2000, adulthood from 21
    let mut factory = PersonFactory::new(2000, 21);

    let adult = factory.create("Adult", Gender::Other, 1979, None).unwrap();
    let minor = factory.create("Minor", Gender::Other, 1980, None).unwrap();

    assert!(adult.can_marry());
    assert!(!minor.can_marry());
}

#[test]
fn given_invalid_attributes_when_creating_then_validation_error() {
    let mut factory = PersonFactory::default();

    assert!(factory.create("  ", Gender::Other, 1970, None).is_err());
    assert!(factory.create("Ada", Gender::Other, 3001, None).is_err());
    assert!(factory
        .create("Ada", Gender::Other, 1970, Some(1960))
        .is_err());
}
