/*!
Keymap: key event -> chord string -> action label -> `Action`.

Bindings live in the config (`keybindings.<context>.<chord> = "<Label>"`).
Lookup tries the focused context first and falls back to `global`.

Public API:
- map_label_to_action(&str) -> Option<Action>
- chord_from_key(KeyEvent) -> Option<String>
- action_from_key(&KeyBindings, &str, KeyEvent) -> Option<Action>
- mappable_entries_for_context(&KeyBindings, &str) -> Vec<(String, Vec<String>)>
*/

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::KeyBindings;

pub const GLOBAL_CONTEXT: &str = "global";

/// Map a config action label to the `Action` it triggers.
///
/// Only parameterless actions can be bound; field-specific edits go through
/// the focused panel.
pub fn map_label_to_action(label: &str) -> Option<Action> {
    let action = match label {
        "Quit" => Action::Quit,
        "Suspend" => Action::Suspend,
        "Help" => Action::Help,
        "FocusNext" => Action::FocusNext,
        "FocusPrev" => Action::FocusPrev,
        "ClosePopup" => Action::ClosePopup,
        "AddField" => Action::AddField,
        "SubmitForm" => Action::SubmitForm,
        "SaveConfig" => Action::SaveConfig,
        "LoadConfig" => Action::LoadConfig,
        "ExportConfig" => Action::ExportConfig,
        "ImportConfig" => Action::ImportConfig,
        _ => return None,
    };
    Some(action)
}

/// Convert a crossterm `KeyEvent` into a chord string compatible with the keymap format.
///
/// Examples:
/// - Ctrl+S      => "ctrl+s"
/// - Shift+Tab   => "shift+tab"
/// - Space       => "space"
/// - Char 'A'    => "shift+a"
/// - F1          => "f1"
pub fn chord_from_key(key: KeyEvent) -> Option<String> {
    let mut m = key.modifiers;
    let key_str = match key.code {
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => {
            m |= KeyModifiers::SHIFT;
            "tab".to_string()
        }
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(ch) => {
            if ch.is_ascii_uppercase() {
                m |= KeyModifiers::SHIFT;
            }
            ch.to_ascii_lowercase().to_string()
        }
        _ => return None,
    };

    let mut mods: Vec<&str> = Vec::new();
    if m.contains(KeyModifiers::CONTROL) {
        mods.push("ctrl");
    }
    if m.contains(KeyModifiers::SHIFT) {
        mods.push("shift");
    }
    if m.contains(KeyModifiers::ALT) {
        mods.push("alt");
    }
    if m.contains(KeyModifiers::SUPER) {
        mods.push("meta");
    }

    Some(if mods.is_empty() {
        key_str
    } else {
        format!("{}+{}", mods.join("+"), key_str)
    })
}

/// Resolve the `Action` for a key in `context`, falling back to the global bindings.
pub fn action_from_key(bindings: &KeyBindings, context: &str, key: KeyEvent) -> Option<Action> {
    let chord = chord_from_key(key)?;
    [context, GLOBAL_CONTEXT]
        .iter()
        .find_map(|ctx| bindings.label_for(ctx, &chord))
        .and_then(map_label_to_action)
}

/// Bindings of `context` whose label maps to a concrete `Action`.
pub fn mappable_entries_for_context(
    bindings: &KeyBindings,
    context: &str,
) -> Vec<(String, Vec<String>)> {
    bindings
        .entries(context)
        .into_iter()
        .filter(|(label, _)| map_label_to_action(label).is_some())
        .collect()
}
