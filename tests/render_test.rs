//! Tests for the level renderers and the lineage tree display

use kintree::render::{lineage_tree, CompactLines, IndentedTree, Renderer};
use kintree::{FamilyTree, Gender, PersonId};

fn add(registry: &mut FamilyTree, name: &str, birth: i32) -> PersonId {
    registry
        .add_person(name, Gender::Other, birth, None)
        .unwrap()
        .id()
        .clone()
}

fn sample() -> (FamilyTree, PersonId) {
    let mut registry = FamilyTree::default();
    let p1 = add(&mut registry, "Parent One", 1970);
    let p2 = add(&mut registry, "Parent Two", 1972);
    let child = add(&mut registry, "Child", 2000);
    registry.link_parent_child(&p1, &child).unwrap();
    registry.link_parent_child(&p2, &child).unwrap();
    (registry, child)
}

#[test]
fn given_two_levels_when_rendering_indented_then_depth_matches_indentation() {
    // Arrange
    let (registry, child) = sample();
    let levels = registry.ancestors_of(&child, 1).unwrap();

    // Act
    let text = IndentedTree.render(&levels);

    // Assert
    assert_eq!(
        text,
        "- P003 Child (b.2000)\n  - P001 Parent One (b.1970)\n  - P002 Parent Two (b.1972)\n"
    );
}

#[test]
fn given_empty_level_when_rendering_indented_then_none_marker_is_explicit() {
    let (registry, child) = sample();
    let levels = registry.ancestors_of(&child, 2).unwrap();

    let text = IndentedTree.render(&levels);

    assert!(text.ends_with("    - (none)\n"));
}

#[test]
fn given_two_levels_when_rendering_compact_then_one_line_per_generation() {
    let (registry, child) = sample();
    let levels = registry.ancestors_of(&child, 1).unwrap();

    let text = CompactLines.render(&levels);

    assert_eq!(
        text,
        "Gen 0: P003:Child\nGen 1: P001:Parent One, P002:Parent Two\n"
    );
}

#[test]
fn given_empty_level_when_rendering_compact_then_none_marker_is_explicit() {
    let (registry, child) = sample();
    let levels = registry.ancestors_of(&child, 2).unwrap();

    let text = CompactLines.render(&levels);

    assert!(text.ends_with("Gen 2: (none)\n"));
}

#[test]
fn given_descendants_when_building_lineage_tree_then_branches_follow_child_edges() {
    // Arrange
    let mut registry = FamilyTree::default();
    let root = add(&mut registry, "Root", 1940);
    let kid = add(&mut registry, "Kid", 1970);
    let grandkid = add(&mut registry, "Grandkid", 2000);
    registry.link_parent_child(&root, &kid).unwrap();
    registry.link_parent_child(&kid, &grandkid).unwrap();

    // Act
    let tree = lineage_tree(&registry, &root, 2).unwrap().to_string();

    // Assert
    assert!(tree.starts_with("P001 Root (b.1940)"));
    assert!(tree.contains("P002 Kid (b.1970)"));
    assert!(tree.contains("P003 Grandkid (b.2000)"));
}

#[test]
fn given_generation_cap_when_building_lineage_tree_then_deeper_levels_are_cut() {
    let mut registry = FamilyTree::default();
    let root = add(&mut registry, "Root", 1940);
    let kid = add(&mut registry, "Kid", 1970);
    let grandkid = add(&mut registry, "Grandkid", 2000);
    registry.link_parent_child(&root, &kid).unwrap();
    registry.link_parent_child(&kid, &grandkid).unwrap();

    let tree = lineage_tree(&registry, &root, 1).unwrap().to_string();

    assert!(tree.contains("Kid"));
    assert!(!tree.contains("Grandkid"));
}

#[test]
fn given_unknown_person_when_building_lineage_tree_then_errors() {
    let registry = FamilyTree::default();

    assert!(lineage_tree(&registry, &PersonId::from("P404"), 1).is_err());
}
