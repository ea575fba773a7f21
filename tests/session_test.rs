//! Tests for the interactive session interpreter

use std::io::Cursor;

use kintree::cli::session::{split_quoted, Reply, Session};
use kintree::config::Settings;

fn session() -> Session {
    Session::new(&Settings::default())
}

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(text) => text,
        other => panic!("expected text reply, got {other:?}"),
    }
}

#[test]
fn given_add_person_command_when_evaluating_then_replies_with_fresh_id() {
    let mut session = session();

    let reply = session
        .eval(r#"ADD_PERSON "Ada Lovelace" female 1815 1852"#)
        .unwrap();

    assert_eq!(reply, Reply::Text("-> P001".to_string()));
}

#[test]
fn given_family_when_querying_ancestors_then_renders_levels() {
    // Arrange
    let mut session = session();
    session.eval(r#"add_person "Parent One" male 1970"#).unwrap();
    session.eval(r#"add_person "Parent Two" female 1972"#).unwrap();
    session.eval(r#"add_person "Child" other 2000"#).unwrap();
    session.eval("add_parent_child P001 P003").unwrap();
    session.eval("add_parent_child P002 P003").unwrap();

    // Act
    let reply = text(session.eval("ancestors P003 1").unwrap());

    // Assert
    assert_eq!(
        reply,
        "- P003 Child (b.2000)\n  - P001 Parent One (b.1970)\n  - P002 Parent Two (b.1972)"
    );
}

#[test]
fn given_marriage_lifecycle_when_driving_through_session_then_spouse_follows() {
    let mut session = session();
    session.eval(r#"add_person "A" male 1970"#).unwrap();
    session.eval(r#"add_person "B" female 1972"#).unwrap();
    session.eval(r#"add_person "C" female 1974"#).unwrap();

    assert_eq!(text(session.eval("marry P001 P002 1995").unwrap()), "OK");
    assert_eq!(text(session.eval("spouse P001").unwrap()), "P002 B");
    assert_eq!(text(session.eval("divorce P001 P002 2005").unwrap()), "OK");
    assert_eq!(text(session.eval("spouse P001").unwrap()), "<none>");
    assert_eq!(text(session.eval("marry P001 P003 2006").unwrap()), "OK");
}

#[test]
fn given_siblings_command_when_none_exist_then_explicit_marker() {
    let mut session = session();
    session.eval(r#"add_person "Loner" other 1970"#).unwrap();

    assert_eq!(text(session.eval("siblings P001").unwrap()), "<none>");
}

#[test]
fn given_show_command_when_evaluating_then_details_are_listed() {
    let mut session = session();
    session.eval(r#"add_person "Ada" female 1970"#).unwrap();
    session.eval(r#"add_person "Bob" male 1972"#).unwrap();
    session.eval("marry P001 P002 1995").unwrap();

    let reply = text(session.eval("show P001").unwrap());

    assert!(reply.starts_with("P001 | Ada | female | b.1970 | spouse=P002 | children=0"));
    assert!(reply.contains("Parents: "));
    assert!(reply.contains("Marriages:\n  P001 - P002 (married 1995)"));
}

#[test]
fn given_list_command_when_evaluating_then_people_in_insertion_order() {
    let mut session = session();
    session.eval(r#"add_person "Ada" female 1970"#).unwrap();
    session.eval(r#"add_person "Bob" male 1972"#).unwrap();

    let reply = text(session.eval("list").unwrap());

    let lines: Vec<_> = reply.lines().collect();
    assert_eq!(lines[0], "All people:");
    assert!(lines[1].starts_with("  P001 | Ada"));
    assert!(lines[2].starts_with("  P002 | Bob"));
}

#[test]
fn given_tree_command_when_evaluating_then_descendant_tree_is_rendered() {
    let mut session = session();
    session.eval(r#"add_person "Root" other 1940"#).unwrap();
    session.eval(r#"add_person "Kid" other 1970"#).unwrap();
    session.eval("add_parent_child P001 P002").unwrap();

    let reply = text(session.eval("tree P001 2").unwrap());

    assert!(reply.starts_with("P001 Root (b.1940)"));
    assert!(reply.contains("P002 Kid (b.1970)"));
}

#[test]
fn given_bad_arguments_when_evaluating_then_usage_error() {
    let mut session = session();

    assert!(session.eval("add_person").is_err());
    assert!(session.eval("ancestors P001").is_err());
    assert!(session.eval("ancestors P001 -1").is_err());
    assert!(session.eval("marry P001 P002 soon").is_err());
}

#[test]
fn given_unknown_command_when_evaluating_then_hint_reply() {
    let mut session = session();

    let reply = text(session.eval("frobnicate").unwrap());

    assert_eq!(reply, "Unknown command. Type HELP.");
}

#[test]
fn given_blank_line_when_evaluating_then_no_output() {
    let mut session = session();

    assert_eq!(session.eval("   ").unwrap(), Reply::Empty);
}

#[test]
fn given_script_when_running_then_errors_are_reported_and_loop_continues() {
    // Arrange
    let script = "add_person \"Ada\" female 1970\nmarry P001 P001 1995\nlist\n";
    let mut session = session();
    let mut output = Vec::new();

    // Act
    session
        .run(Cursor::new(script), &mut output, false)
        .unwrap();

    // Assert
    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("-> P001"));
    assert!(output.contains("ERROR: P001 cannot marry themselves"));
    assert!(output.contains("All people:"));
}

#[test]
fn given_quit_when_running_then_later_lines_are_ignored() {
    let script = "add_person \"Ada\" female 1970\nquit\nadd_person \"Bob\" male 1972\n";
    let mut session = session();
    let mut output = Vec::new();

    session
        .run(Cursor::new(script), &mut output, false)
        .unwrap();

    assert_eq!(session.registry().len(), 1);
}

#[test]
fn given_help_when_evaluating_then_commands_are_listed() {
    let mut session = session();

    let reply = text(session.eval("HELP").unwrap());

    assert!(reply.contains("ADD_PERSON"));
    assert!(reply.contains("DESCENDANTS"));
    assert!(reply.contains("QUIT"));
}

#[test]
fn given_quoted_phrase_when_tokenizing_then_kept_together() {
    assert_eq!(
        split_quoted(r#"show "P001""#),
        vec!["show".to_string(), "P001".to_string()]
    );
}
