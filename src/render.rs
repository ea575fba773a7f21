//! Text rendering of generation levels

use std::collections::HashSet;

use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use termtree::Tree;

use crate::domain::{DomainResult, Person, PersonId};
use crate::registry::FamilyTree;

/// Renders a level sequence (level 0 = start person) as text.
///
/// An empty level is rendered with an explicit `(none)` marker so it cannot
/// be mistaken for truncated output.
pub trait Renderer {
    fn render(&self, levels: &[Vec<&Person>]) -> String;
}

fn node_line(person: &Person) -> String {
    format!(
        "{} {} (b.{})",
        person.id(),
        person.full_name(),
        person.birth_year()
    )
}

/// Indented tree: level 0 unindented, level k indented by k units.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentedTree;

impl Renderer for IndentedTree {
    fn render(&self, levels: &[Vec<&Person>]) -> String {
        let mut out = String::new();
        for (depth, level) in levels.iter().enumerate() {
            let indent = "  ".repeat(depth);
            if level.is_empty() {
                out.push_str(&format!("{indent}- (none)\n"));
                continue;
            }
            for person in level {
                out.push_str(&format!("{indent}- {}\n", node_line(person)));
            }
        }
        out
    }
}

/// Compact listing: one `Gen k: ...` line per level.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactLines;

impl Renderer for CompactLines {
    fn render(&self, levels: &[Vec<&Person>]) -> String {
        let mut out = String::new();
        for (generation, level) in levels.iter().enumerate() {
            let people = if level.is_empty() {
                "(none)".to_string()
            } else {
                level
                    .iter()
                    .map(|p| format!("{}:{}", p.id(), p.full_name()))
                    .join(", ")
            };
            out.push_str(&format!("Gen {generation}: {people}\n"));
        }
        out
    }
}

/// Renderer selector, named in configuration and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RendererKind {
    Indented,
    Compact,
}

impl RendererKind {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            RendererKind::Indented => Box::new(IndentedTree),
            RendererKind::Compact => Box::new(CompactLines),
        }
    }
}

/// Build a branch-structured descendant tree for display.
///
/// Follows child edges up to `generations` levels below the start person;
/// the visited set caps re-convergent lineages to their first appearance.
pub fn lineage_tree(
    registry: &FamilyTree,
    start: &PersonId,
    generations: usize,
) -> DomainResult<Tree<String>> {
    let person = registry.get_person(start)?;
    let mut visited: HashSet<PersonId> = HashSet::new();
    visited.insert(person.id().clone());
    Ok(subtree(registry, person, generations, &mut visited))
}

fn subtree(
    registry: &FamilyTree,
    person: &Person,
    remaining: usize,
    visited: &mut HashSet<PersonId>,
) -> Tree<String> {
    let mut tree = Tree::new(node_line(person));
    if remaining == 0 {
        return tree;
    }
    for child_id in person.child_ids() {
        if !visited.insert(child_id.clone()) {
            continue;
        }
        if let Ok(child) = registry.get_person(child_id) {
            tree.leaves.push(subtree(registry, child, remaining - 1, visited));
        }
    }
    tree
}
