use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::keymap::{KeyBinding, KeyPattern, Keymap};
use super::{InputEvent, KeyCode};

/// Raw JSON structure for the keybindings file
#[derive(Deserialize)]
struct KeybindingConfig {
    #[allow(dead_code)]
    version: u32,
    #[serde(default)]
    global: Vec<RawBinding>,
    #[serde(default)]
    panes: HashMap<String, Vec<RawBinding>>,
}

/// A single binding entry from JSON
#[derive(Deserialize)]
struct RawBinding {
    key: String,
    action: String,
    description: String,
    #[serde(default)]
    always_active: bool,
}

/// Bindings checked by main.rs before the active pane sees the event
pub struct GlobalBindings {
    bindings: Vec<GlobalBinding>,
}

struct GlobalBinding {
    pattern: KeyPattern,
    action: &'static str,
    always_active: bool,
}

impl GlobalBindings {
    /// Look up a global action.
    /// With `exclusive_mode` set only bindings marked `always_active` match.
    pub fn lookup(&self, event: &InputEvent, exclusive_mode: bool) -> Option<&'static str> {
        self.bindings
            .iter()
            .find(|b| b.pattern.matches(event) && (!exclusive_mode || b.always_active))
            .map(|b| b.action)
    }
}

/// Intern a String into a &'static str. Bindings are loaded once at startup.
fn intern(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

/// Parse key notation: `"q"`, `"Space"`, `"Up"`, `"F1"`, `"Ctrl+q"`, `"Alt+x"`,
/// `"Ctrl+Left"`, `"Shift+Right"`.
fn parse_key(s: &str) -> Option<KeyPattern> {
    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeyPattern::Ctrl(c)),
            _ => parse_named_key(rest).map(KeyPattern::CtrlKey),
        }
    } else if let Some(rest) = s.strip_prefix("Alt+") {
        rest.chars().next().map(KeyPattern::Alt)
    } else if let Some(rest) = s.strip_prefix("Shift+") {
        parse_named_key(rest).map(KeyPattern::ShiftKey)
    } else if s == "Space" {
        Some(KeyPattern::Char(' '))
    } else {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeyPattern::Char(c)),
            _ => parse_named_key(s).map(KeyPattern::Key),
        }
    }
}

fn parse_named_key(s: &str) -> Option<KeyCode> {
    let code = match s {
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Backspace" => KeyCode::Backspace,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Delete" => KeyCode::Delete,
        _ => return s.strip_prefix('F')?.parse::<u8>().ok().map(KeyCode::F),
    };
    Some(code)
}

const DEFAULT_KEYBINDINGS: &str = include_str!("../../keybindings.json");

/// Load the embedded keybindings, then apply the user override file if present.
/// Returns (global bindings, keymap per pane id).
pub fn load_keybindings() -> (GlobalBindings, HashMap<String, Keymap>) {
    load_keybindings_from(user_keybindings_path().as_deref())
}

pub fn load_keybindings_from(user_path: Option<&Path>) -> (GlobalBindings, HashMap<String, Keymap>) {
    let mut config: KeybindingConfig = match serde_json::from_str(DEFAULT_KEYBINDINGS) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Embedded keybindings.json is invalid: {}", e);
            KeybindingConfig {
                version: 1,
                global: Vec::new(),
                panes: HashMap::new(),
            }
        }
    };

    if let Some(path) = user_path.filter(|p| p.exists()) {
        match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|s| serde_json::from_str::<KeybindingConfig>(&s).map_err(|e| e.to_string()))
        {
            Ok(user) => {
                log::info!("Loaded user keybindings from {}", path.display());
                merge_config(&mut config, user);
            }
            Err(e) => log::warn!("Ignoring keybindings {}: {}", path.display(), e),
        }
    }

    (build_global_bindings(&config.global), build_pane_keymaps(&config.panes))
}

fn user_keybindings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tuiplot").join("keybindings.json"))
}

/// User pane entries replace the default pane entries. User globals replace default globals.
fn merge_config(base: &mut KeybindingConfig, user: KeybindingConfig) {
    if !user.global.is_empty() {
        base.global = user.global;
    }
    for (pane_id, bindings) in user.panes {
        base.panes.insert(pane_id, bindings);
    }
}

fn parse_binding(b: &RawBinding) -> Option<KeyPattern> {
    let pattern = parse_key(&b.key);
    if pattern.is_none() {
        log::warn!("Skipping binding with unknown key '{}' for '{}'", b.key, b.action);
    }
    pattern
}

fn build_global_bindings(raw: &[RawBinding]) -> GlobalBindings {
    let bindings = raw
        .iter()
        .filter_map(|b| {
            parse_binding(b).map(|pattern| GlobalBinding {
                pattern,
                action: intern(b.action.clone()),
                always_active: b.always_active,
            })
        })
        .collect();
    GlobalBindings { bindings }
}

fn build_pane_keymaps(panes: &HashMap<String, Vec<RawBinding>>) -> HashMap<String, Keymap> {
    panes
        .iter()
        .map(|(pane_id, bindings)| {
            let key_bindings = bindings
                .iter()
                .filter_map(|b| {
                    parse_binding(b).map(|pattern| KeyBinding {
                        pattern,
                        action: intern(b.action.clone()),
                        description: intern(b.description.clone()),
                    })
                })
                .collect();
            (pane_id.clone(), Keymap::from_bindings(key_bindings))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Modifiers;
    use std::io::Write;

    #[test]
    fn test_parse_key_char() {
        assert_eq!(parse_key("q"), Some(KeyPattern::Char('q')));
        assert_eq!(parse_key("?"), Some(KeyPattern::Char('?')));
        assert_eq!(parse_key("Space"), Some(KeyPattern::Char(' ')));
    }

    #[test]
    fn test_parse_key_named() {
        assert_eq!(parse_key("Up"), Some(KeyPattern::Key(KeyCode::Up)));
        assert_eq!(parse_key("PageDown"), Some(KeyPattern::Key(KeyCode::PageDown)));
        assert_eq!(parse_key("F12"), Some(KeyPattern::Key(KeyCode::F(12))));
        assert_eq!(parse_key("Nope"), None);
        assert_eq!(parse_key("Fx"), None);
    }

    #[test]
    fn test_parse_key_modifiers() {
        assert_eq!(parse_key("Ctrl+q"), Some(KeyPattern::Ctrl('q')));
        assert_eq!(parse_key("Alt+x"), Some(KeyPattern::Alt('x')));
        assert_eq!(parse_key("Ctrl+Left"), Some(KeyPattern::CtrlKey(KeyCode::Left)));
        assert_eq!(parse_key("Shift+Right"), Some(KeyPattern::ShiftKey(KeyCode::Right)));
    }

    #[test]
    fn test_load_embedded_keybindings() {
        let (global, panes) = load_keybindings_from(None);
        let ctrl_q = InputEvent::new(KeyCode::Char('q'), Modifiers::ctrl());
        assert_eq!(global.lookup(&ctrl_q, true), Some("quit"));
        assert_eq!(global.lookup(&InputEvent::key(KeyCode::Char('?')), true), None);
        assert_eq!(global.lookup(&InputEvent::key(KeyCode::Char('?')), false), Some("help"));

        let plot = &panes["plot"];
        assert_eq!(plot.lookup(&InputEvent::key(KeyCode::Left)), Some("decrease"));
        assert_eq!(
            plot.lookup(&InputEvent::new(KeyCode::Left, Modifiers::shift())),
            Some("decrease_big")
        );
        assert_eq!(plot.lookup(&InputEvent::key(KeyCode::Char(' '))), Some("activate"));
        assert_eq!(plot.lookup(&InputEvent::key(KeyCode::Char('r'))), Some("reset"));
        assert!(panes.contains_key("help"));
    }

    #[test]
    fn test_user_keybindings_replace_pane() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": 1, "panes": {{"plot": [{{"key": "x", "action": "reset", "description": "Reset"}}]}}}}"#
        )
        .unwrap();
        let (global, panes) = load_keybindings_from(Some(file.path()));
        let plot = &panes["plot"];
        assert_eq!(plot.lookup(&InputEvent::key(KeyCode::Char('x'))), Some("reset"));
        assert_eq!(plot.lookup(&InputEvent::key(KeyCode::Char('r'))), None);
        // Globals untouched when the user file has none
        let ctrl_q = InputEvent::new(KeyCode::Char('q'), Modifiers::ctrl());
        assert_eq!(global.lookup(&ctrl_q, false), Some("quit"));
    }
}
