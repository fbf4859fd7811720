use pretty_assertions::assert_eq;

use textnav::menu::{ActionResponse, MenuAction};
use textnav::model::Script;
use textnav::paragraph::NodeGroupItem;
use textnav::session::sim_session;
use textnav::word_utils::next_word_start;

const SCRIPT: &str = r#"{
  "version": 1,
  "fields": [
    { "text": "first field" },
    { "text": "go home now", "caret": 2 }
  ],
  "focus": 1,
  "actions": [
    "start_text_selection",
    "move_forward_one_word_of_text",
    "end_text_selection",
    "copy"
  ]
}"#;

#[test]
fn script_defaults_and_action_names() {
    let script: Script = serde_json::from_str(SCRIPT).expect("script should parse");

    assert!(script.config.improved_text_input);
    assert_eq!(script.fields[0].caret, None);
    assert_eq!(script.fields[1].caret, Some(2));
    assert_eq!(
        script.actions,
        vec![
            MenuAction::StartTextSelection,
            MenuAction::MoveForwardOneWordOfText,
            MenuAction::EndTextSelection,
            MenuAction::Copy,
        ]
    );
}

#[test]
fn replaying_a_script_selects_and_copies() {
    let script: Script = serde_json::from_str(SCRIPT).expect("script should parse");

    let mut session = sim_session(script.config.clone());
    let nodes: Vec<_> = script
        .fields
        .iter()
        .map(|field| session.host_mut().add_field(&field.text, field.caret))
        .collect();
    assert!(session.host_mut().focus(nodes[script.focus]));

    let mut responses = Vec::new();
    for &action in &script.actions {
        responses.push(session.perform(action));
        session.pump();
    }

    assert_eq!(
        responses,
        vec![
            ActionResponse::OpenSubmenu,
            ActionResponse::RemainOpen,
            ActionResponse::ReloadMenu,
            ActionResponse::RemainOpen,
        ]
    );
    assert_eq!(session.host().clipboard(), Some(" home"));

    let summaries = session.host().summaries();
    assert_eq!(summaries[0].anchor, 11);
    assert_eq!(summaries[1].id, "field-1");
    assert_eq!(summaries[1].selected_text, " home");
}

#[test]
fn hint_groups_load_from_json() {
    let json = r#"{
      "start_char": 0,
      "has_inline_text": true,
      "node": {
        "name": "kitty cat is cute",
        "children": [
          { "name": "kitty cat ", "word_starts": [0, 6], "index_in_parent": 0 },
          { "name": "is cute", "word_starts": [0, 3], "index_in_parent": 1 }
        ]
      }
    }"#;
    let group: NodeGroupItem = serde_json::from_str(json).expect("hints should parse");

    assert_eq!(next_word_start("kitty cat is cute", 7, Some(&group)), 10);
    assert_eq!(next_word_start("kitty cat is cute", 11, Some(&group)), 13);
}
