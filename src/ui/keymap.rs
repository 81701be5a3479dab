use super::{InputEvent, KeyCode};

/// Pattern for matching key inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPattern {
    /// Character key, shift allowed (so '?' and 'R' match)
    Char(char),
    /// Special key with no modifiers
    Key(KeyCode),
    /// Ctrl + character
    Ctrl(char),
    /// Alt + character
    Alt(char),
    /// Ctrl + special key
    CtrlKey(KeyCode),
    /// Shift + special key
    ShiftKey(KeyCode),
}

impl KeyPattern {
    /// Check if this pattern matches an input event
    pub fn matches(&self, event: &InputEvent) -> bool {
        let m = event.modifiers;
        match self {
            KeyPattern::Char(ch) => {
                matches!(event.key, KeyCode::Char(c) if c == *ch) && !m.ctrl && !m.alt
            }
            KeyPattern::Key(code) => event.key == *code && !m.ctrl && !m.alt && !m.shift,
            KeyPattern::Ctrl(ch) => {
                matches!(event.key, KeyCode::Char(c) if c.eq_ignore_ascii_case(ch)) && m.ctrl
            }
            KeyPattern::Alt(ch) => matches!(event.key, KeyCode::Char(c) if c == *ch) && m.alt,
            KeyPattern::CtrlKey(code) => event.key == *code && m.ctrl,
            KeyPattern::ShiftKey(code) => event.key == *code && m.shift && !m.ctrl,
        }
    }

    /// Display string for help screens
    pub fn display(&self) -> String {
        match self {
            KeyPattern::Char(' ') => "Space".to_string(),
            KeyPattern::Char(ch) => ch.to_string(),
            KeyPattern::Key(code) => key_name(code),
            KeyPattern::Ctrl(ch) => format!("Ctrl+{}", ch),
            KeyPattern::Alt(ch) => format!("Alt+{}", ch),
            KeyPattern::CtrlKey(code) => format!("Ctrl+{}", key_name(code)),
            KeyPattern::ShiftKey(code) => format!("Shift+{}", key_name(code)),
        }
    }
}

fn key_name(code: &KeyCode) -> String {
    match code {
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{:?}", other),
    }
}

/// A single key binding
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub pattern: KeyPattern,
    pub action: &'static str,
    pub description: &'static str,
}

/// Key bindings for one pane, matched in order
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn from_bindings(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    /// Add a character key binding
    #[allow(dead_code)]
    pub fn bind(mut self, ch: char, action: &'static str, description: &'static str) -> Self {
        self.bindings.push(KeyBinding {
            pattern: KeyPattern::Char(ch),
            action,
            description,
        });
        self
    }

    /// Add a special key binding
    #[allow(dead_code)]
    pub fn bind_key(mut self, key: KeyCode, action: &'static str, description: &'static str) -> Self {
        self.bindings.push(KeyBinding {
            pattern: KeyPattern::Key(key),
            action,
            description,
        });
        self
    }

    /// Look up the action for an input event. The first matching binding wins.
    pub fn lookup(&self, event: &InputEvent) -> Option<&'static str> {
        self.bindings
            .iter()
            .find(|b| b.pattern.matches(event))
            .map(|b| b.action)
    }

    /// All bindings, for the help pane
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Modifiers;

    #[test]
    fn test_char_pattern_matches() {
        let pattern = KeyPattern::Char('r');
        assert!(pattern.matches(&InputEvent::new(KeyCode::Char('r'), Modifiers::none())));
        assert!(!pattern.matches(&InputEvent::new(KeyCode::Char('r'), Modifiers::ctrl())));

        let question = KeyPattern::Char('?');
        assert!(question.matches(&InputEvent::new(KeyCode::Char('?'), Modifiers::shift())));
    }

    #[test]
    fn test_key_pattern_rejects_shift() {
        let pattern = KeyPattern::Key(KeyCode::Left);
        assert!(pattern.matches(&InputEvent::key(KeyCode::Left)));
        assert!(!pattern.matches(&InputEvent::new(KeyCode::Left, Modifiers::shift())));

        let shifted = KeyPattern::ShiftKey(KeyCode::Left);
        assert!(shifted.matches(&InputEvent::new(KeyCode::Left, Modifiers::shift())));
        assert!(!shifted.matches(&InputEvent::key(KeyCode::Left)));
    }

    #[test]
    fn test_ctrl_pattern_matches() {
        let pattern = KeyPattern::Ctrl('q');
        assert!(pattern.matches(&InputEvent::new(KeyCode::Char('q'), Modifiers::ctrl())));
        assert!(!pattern.matches(&InputEvent::key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_keymap_lookup_first_match_wins() {
        let keymap = Keymap::new()
            .bind('r', "reset", "Reset")
            .bind_key(KeyCode::Right, "increase", "Increase")
            .bind('r', "other", "Shadowed");

        assert_eq!(keymap.lookup(&InputEvent::key(KeyCode::Char('r'))), Some("reset"));
        assert_eq!(keymap.lookup(&InputEvent::key(KeyCode::Right)), Some("increase"));
        assert_eq!(keymap.lookup(&InputEvent::key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyPattern::Char(' ').display(), "Space");
        assert_eq!(KeyPattern::Key(KeyCode::F(1)).display(), "F1");
        assert_eq!(KeyPattern::ShiftKey(KeyCode::Left).display(), "Shift+Left");
        assert_eq!(KeyPattern::Ctrl('q').display(), "Ctrl+q");
    }
}
