//! Interactive session: command interpreter over one in-memory registry
//!
//! State lives for the session only; every line is tokenized, dispatched, and
//! answered immediately. Errors are reported per command and the loop
//! continues.

use std::io::{BufRead, Write};

use tracing::{debug, instrument};

use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{DomainError, Gender, Person, PersonId};
use crate::factory::PersonFactory;
use crate::registry::FamilyTree;
use crate::render::{lineage_tree, Renderer};

const GREETING: &str = "kintree session — type HELP for commands, QUIT to exit.";

const HELP: &str = "Commands:
  ADD_PERSON \"<Full Name>\" <gender> <birth year> [death year]
  ADD_PARENT_CHILD <parent id> <child id>
  REMOVE_PARENT_CHILD <parent id> <child id>
  MARRY <person a> <person b> <year>
  DIVORCE <person a> <person b> <year>
  ANCESTORS <person id> <generations>
  DESCENDANTS <person id> <generations>
  SIBLINGS <person id>
  SPOUSE <person id>
  SHOW <person id>
  TREE <person id> <generations>
  LIST
  HELP
  QUIT";

/// What a single evaluated line asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Output to print.
    Text(String),
    /// Nothing to print.
    Empty,
    /// Terminate the session.
    Quit,
}

/// One interpreter session holding the registry and the chosen renderer.
pub struct Session {
    registry: FamilyTree,
    renderer: Box<dyn Renderer>,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        let factory = PersonFactory::new(settings.reference_year, settings.adult_age);
        Self {
            registry: FamilyTree::new(factory, settings.traversal.strategy()),
            renderer: settings.renderer.renderer(),
        }
    }

    pub fn registry(&self) -> &FamilyTree {
        &self.registry
    }

    /// Drive the session over a line source until quit or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
        interactive: bool,
    ) -> CliResult<()> {
        if interactive {
            writeln!(output, "{GREETING}")?;
        }
        let mut lines = input.lines();
        loop {
            if interactive {
                write!(output, "> ")?;
                output.flush()?;
            }
            let Some(line) = lines.next() else { break };
            match self.eval(&line?) {
                Ok(Reply::Quit) => {
                    if interactive {
                        writeln!(output, "Bye.")?;
                    }
                    break;
                }
                Ok(Reply::Text(text)) => writeln!(output, "{text}")?,
                Ok(Reply::Empty) => {}
                Err(err) => writeln!(output, "ERROR: {err}")?,
            }
        }
        Ok(())
    }

    /// Evaluate a single command line.
    #[instrument(level = "debug", skip(self))]
    pub fn eval(&mut self, line: &str) -> CliResult<Reply> {
        let tokens = split_quoted(line);
        let Some(command) = tokens.first() else {
            return Ok(Reply::Empty);
        };
        debug!(%command, argc = tokens.len(), "dispatch");
        match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" => Ok(Reply::Quit),
            "help" => Ok(Reply::Text(HELP.to_string())),
            "add_person" => self.add_person(&tokens),
            "add_parent_child" => self.add_parent_child(&tokens),
            "remove_parent_child" => self.remove_parent_child(&tokens),
            "marry" => self.marry(&tokens),
            "divorce" => self.divorce(&tokens),
            "ancestors" => self.ancestors(&tokens),
            "descendants" => self.descendants(&tokens),
            "siblings" => self.siblings(&tokens),
            "spouse" => self.spouse(&tokens),
            "show" => self.show(&tokens),
            "tree" => self.tree(&tokens),
            "list" => Ok(self.list()),
            _ => Ok(Reply::Text("Unknown command. Type HELP.".to_string())),
        }
    }

    fn add_person(&mut self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() < 4 {
            return usage("ADD_PERSON \"<Full Name>\" <gender> <birth year> [death year]");
        }
        let gender: Gender = tokens[2].parse().map_err(DomainError::from)?;
        let birth_year = parse_year(&tokens[3])?;
        let death_year = tokens.get(4).map(|t| parse_year(t)).transpose()?;
        let person = self
            .registry
            .add_person(&tokens[1], gender, birth_year, death_year)?;
        Ok(Reply::Text(format!("-> {}", person.id())))
    }

    fn add_parent_child(&mut self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 3 {
            return usage("ADD_PARENT_CHILD <parent id> <child id>");
        }
        self.registry
            .link_parent_child(&id(&tokens[1]), &id(&tokens[2]))?;
        Ok(Reply::Text("OK".to_string()))
    }

    fn remove_parent_child(&mut self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 3 {
            return usage("REMOVE_PARENT_CHILD <parent id> <child id>");
        }
        self.registry
            .unlink_parent_child(&id(&tokens[1]), &id(&tokens[2]))?;
        Ok(Reply::Text("OK".to_string()))
    }

    fn marry(&mut self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 4 {
            return usage("MARRY <person a> <person b> <year>");
        }
        self.registry
            .marry(&id(&tokens[1]), &id(&tokens[2]), parse_year(&tokens[3])?)?;
        Ok(Reply::Text("OK".to_string()))
    }

    fn divorce(&mut self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 4 {
            return usage("DIVORCE <person a> <person b> <year>");
        }
        self.registry
            .divorce(&id(&tokens[1]), &id(&tokens[2]), parse_year(&tokens[3])?)?;
        Ok(Reply::Text("OK".to_string()))
    }

    fn ancestors(&self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 3 {
            return usage("ANCESTORS <person id> <generations>");
        }
        let levels = self
            .registry
            .ancestors_of(&id(&tokens[1]), parse_generations(&tokens[2])?)?;
        Ok(Reply::Text(self.renderer.render(&levels).trim_end().to_string()))
    }

    fn descendants(&self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 3 {
            return usage("DESCENDANTS <person id> <generations>");
        }
        let levels = self
            .registry
            .descendants_of(&id(&tokens[1]), parse_generations(&tokens[2])?)?;
        Ok(Reply::Text(self.renderer.render(&levels).trim_end().to_string()))
    }

    fn siblings(&self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 2 {
            return usage("SIBLINGS <person id>");
        }
        let siblings = self.registry.siblings_of(&id(&tokens[1]))?;
        if siblings.is_empty() {
            return Ok(Reply::Text("<none>".to_string()));
        }
        let line = siblings
            .iter()
            .map(|p| format!("{} {}", p.id(), p.full_name()))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(Reply::Text(line))
    }

    fn spouse(&self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 2 {
            return usage("SPOUSE <person id>");
        }
        let reply = match self.registry.spouse_of(&id(&tokens[1]))? {
            Some(spouse) => format!("{} {}", spouse.id(), spouse.full_name()),
            None => "<none>".to_string(),
        };
        Ok(Reply::Text(reply))
    }

    fn show(&self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 2 {
            return usage("SHOW <person id>");
        }
        let person = self.registry.get_person(&id(&tokens[1]))?;
        Ok(Reply::Text(person_details(person)))
    }

    fn tree(&self, tokens: &[String]) -> CliResult<Reply> {
        if tokens.len() != 3 {
            return usage("TREE <person id> <generations>");
        }
        let tree = lineage_tree(
            &self.registry,
            &id(&tokens[1]),
            parse_generations(&tokens[2])?,
        )?;
        Ok(Reply::Text(tree.to_string().trim_end().to_string()))
    }

    fn list(&self) -> Reply {
        let mut out = String::from("All people:");
        for person in self.registry.all_people() {
            out.push_str(&format!("\n  {person}"));
        }
        Reply::Text(out)
    }
}

fn person_details(person: &Person) -> String {
    let mut out = format!("{person}");
    out.push_str(&format!(
        "\nParents: {}",
        join_ids(person.parent_ids())
    ));
    out.push_str(&format!(
        "\nChildren: {}",
        join_ids(person.child_ids())
    ));
    out.push_str("\nMarriages:");
    for marriage in person.marriages() {
        let divorce = marriage
            .divorce_year()
            .map(|d| format!(" divorced {d}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "\n  {} - {} (married {}{})",
            marriage.spouse_a(),
            marriage.spouse_b(),
            marriage.marriage_year(),
            divorce
        ));
    }
    out
}

fn join_ids(ids: &[PersonId]) -> String {
    ids.iter()
        .map(PersonId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn id(token: &str) -> PersonId {
    PersonId::from(token)
}

fn usage(text: &str) -> CliResult<Reply> {
    Err(CliError::Usage(format!("Usage: {text}")))
}

fn parse_year(token: &str) -> CliResult<i32> {
    token
        .parse()
        .map_err(|_| CliError::InvalidArgs(format!("not a year: {token}")))
}

fn parse_generations(token: &str) -> CliResult<usize> {
    token
        .parse()
        .map_err(|_| CliError::InvalidArgs(format!("not a generation count: {token}")))
}

/// Whitespace tokenizer that keeps double-quoted phrases together.
pub fn split_quoted(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        if c == '"' {
            in_quotes = !in_quotes;
            if !in_quotes {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        if in_quotes {
            current.push(c);
        } else if c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
