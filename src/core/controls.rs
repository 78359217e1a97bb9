//! # Control Bindings
//!
//! Every key the user can press in a view is a `ControlBinding`. A view asks
//! for its own bindings; the process-wide defaults (search, home, quit) are
//! merged on top and always win a trigger collision, so a view can never
//! disable quitting by accident.
//!
//! ```text
//! view bindings ──┐
//!                 ├─► ControlMapping::build() ─► chars: char → binding
//! defaults ───────┘                            keys:  NamedKey → binding
//!                                              listing (sorted by priority)
//! ```
//!
//! The mapping is rebuilt from scratch whenever the current view changes.
//! `build` never mutates its inputs.

use std::collections::HashMap;
use std::fmt;

/// Non-printable keys that can carry a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Up,
    Down,
    PageUp,
    PageDown,
    Enter,
    Esc,
    Backspace,
    Tab,
    CtrlC,
}

impl NamedKey {
    pub fn label(self) -> &'static str {
        match self {
            NamedKey::Up => "Up",
            NamedKey::Down => "Down",
            NamedKey::PageUp => "PgUp",
            NamedKey::PageDown => "PgDn",
            NamedKey::Enter => "Enter",
            NamedKey::Esc => "Esc",
            NamedKey::Backspace => "Backspace",
            NamedKey::Tab => "Tab",
            NamedKey::CtrlC => "Ctrl+C",
        }
    }
}

/// Key identity used to look up a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Char(char),
    Key(NamedKey),
}

impl Trigger {
    pub fn label(&self) -> String {
        match self {
            Trigger::Char(c) => c.to_string(),
            Trigger::Key(key) => key.label().to_string(),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Everything a binding can ask the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ActivateSearch,
    Home,
    Quit,
    Refresh,
    Back,
    SelectPrevious,
    SelectNext,
    PagePrevious,
    PageNext,
    OpenSelectedTransaction,
    OpenContainingBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBinding {
    pub trigger: Trigger,
    /// Human-readable key name shown in the controls panel.
    pub label: String,
    pub description: String,
    /// Display order, ascending. Ties keep insertion order.
    pub priority: u16,
    /// `None` means the key is advertised but nothing is wired to it.
    pub action: Option<Command>,
}

impl ControlBinding {
    pub fn new(trigger: Trigger, description: &str, priority: u16, action: Command) -> Self {
        Self {
            trigger,
            label: trigger.label(),
            description: description.to_string(),
            priority,
            action: Some(action),
        }
    }

    pub fn char(c: char, description: &str, priority: u16, action: Command) -> Self {
        Self::new(Trigger::Char(c), description, priority, action)
    }

    pub fn key(key: NamedKey, description: &str, priority: u16, action: Command) -> Self {
        Self::new(Trigger::Key(key), description, priority, action)
    }
}

/// Bindings available in every view.
pub fn default_bindings() -> Vec<ControlBinding> {
    vec![
        ControlBinding::char('/', "Search", 0, Command::ActivateSearch),
        ControlBinding::char('h', "Home", 1, Command::Home),
        ControlBinding::key(NamedKey::CtrlC, "Quit", 2, Command::Quit),
    ]
}

/// One row of the controls panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEntry {
    pub label: String,
    pub description: String,
}

/// What a key press resolves to in the current mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not bound: the surface may apply its own key behaviour.
    Unhandled,
    /// Bound, but with no action. Carries the binding's label.
    NoHandler(String),
    Run(Command),
}

/// How the input loop should treat a key after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    PassThrough,
    Consumed,
    Quit,
}

/// Dispatch tables for the current view, defaults included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlMapping {
    chars: HashMap<char, ControlBinding>,
    keys: HashMap<NamedKey, ControlBinding>,
    listing: Vec<ControlEntry>,
}

impl ControlMapping {
    /// Merge view bindings with defaults. Defaults replace any view binding
    /// on the same trigger.
    pub fn build(view_bindings: &[ControlBinding], defaults: &[ControlBinding]) -> Self {
        let mut merged: Vec<ControlBinding> = Vec::with_capacity(view_bindings.len() + defaults.len());

        for binding in view_bindings.iter().chain(defaults) {
            match merged.iter().position(|b| b.trigger == binding.trigger) {
                Some(index) => merged[index] = binding.clone(),
                None => merged.push(binding.clone()),
            }
        }

        // Stable: equal priorities keep insertion order.
        merged.sort_by_key(|b| b.priority);

        let listing = merged
            .iter()
            .map(|b| ControlEntry {
                label: b.label.clone(),
                description: b.description.clone(),
            })
            .collect();

        let mut chars = HashMap::new();
        let mut keys = HashMap::new();
        for binding in merged {
            match binding.trigger {
                Trigger::Char(c) => {
                    chars.insert(c, binding);
                }
                Trigger::Key(key) => {
                    keys.insert(key, binding);
                }
            }
        }

        Self { chars, keys, listing }
    }

    pub fn get(&self, trigger: &Trigger) -> Option<&ControlBinding> {
        match trigger {
            Trigger::Char(c) => self.chars.get(c),
            Trigger::Key(key) => self.keys.get(key),
        }
    }

    pub fn resolve(&self, trigger: &Trigger) -> Resolution {
        match self.get(trigger) {
            None => Resolution::Unhandled,
            Some(binding) => match binding.action {
                None => Resolution::NoHandler(binding.label.clone()),
                Some(command) => Resolution::Run(command),
            },
        }
    }

    /// Controls in display order.
    pub fn listing(&self) -> &[ControlEntry] {
        &self.listing
    }

    pub fn len(&self) -> usize {
        self.chars.len() + self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refresh() -> ControlBinding {
        ControlBinding::char('r', "Refresh", 10, Command::Refresh)
    }

    #[test]
    fn test_defaults_present_without_view_bindings() {
        let mapping = ControlMapping::build(&[], &default_bindings());
        assert_eq!(mapping.len(), 3);
        assert_eq!(
            mapping.resolve(&Trigger::Char('/')),
            Resolution::Run(Command::ActivateSearch)
        );
        assert_eq!(
            mapping.resolve(&Trigger::Key(NamedKey::CtrlC)),
            Resolution::Run(Command::Quit)
        );
    }

    #[test]
    fn test_default_wins_trigger_collision() {
        let hijack = ControlBinding::key(NamedKey::CtrlC, "Refresh", 10, Command::Refresh);
        let mapping = ControlMapping::build(&[hijack, refresh()], &default_bindings());

        assert_eq!(
            mapping.resolve(&Trigger::Key(NamedKey::CtrlC)),
            Resolution::Run(Command::Quit)
        );
        let binding = mapping.get(&Trigger::Key(NamedKey::CtrlC)).unwrap();
        assert_eq!(binding.description, "Quit");
        assert_eq!(mapping.len(), 4);
    }

    #[test]
    fn test_listing_sorted_by_priority() {
        let view = vec![
            ControlBinding::key(NamedKey::Enter, "Show transaction", 12, Command::OpenSelectedTransaction),
            refresh(),
        ];
        let mapping = ControlMapping::build(&view, &default_bindings());
        let labels: Vec<&str> = mapping.listing().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["/", "h", "Ctrl+C", "r", "Enter"]);
    }

    #[test]
    fn test_equal_priorities_keep_insertion_order() {
        let view = vec![
            ControlBinding::char('x', "First", 5, Command::Refresh),
            ControlBinding::char('y', "Second", 5, Command::Back),
            ControlBinding::char('z', "Third", 5, Command::Home),
        ];
        let mapping = ControlMapping::build(&view, &[]);
        let descriptions: Vec<&str> = mapping
            .listing()
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let view = vec![refresh(), ControlBinding::key(NamedKey::Up, "Scroll up", 11, Command::SelectPrevious)];
        let defaults = default_bindings();
        assert_eq!(
            ControlMapping::build(&view, &defaults),
            ControlMapping::build(&view, &defaults)
        );
    }

    #[test]
    fn test_build_leaves_inputs_untouched() {
        let view = vec![ControlBinding::char('/', "Hijack", 10, Command::Refresh)];
        let defaults = default_bindings();
        let _ = ControlMapping::build(&view, &defaults);
        assert_eq!(view[0].description, "Hijack");
        assert_eq!(defaults.len(), 3);
    }

    #[test]
    fn test_unbound_trigger_is_unhandled() {
        let mapping = ControlMapping::build(&[refresh()], &default_bindings());
        assert_eq!(mapping.resolve(&Trigger::Char('q')), Resolution::Unhandled);
        assert_eq!(mapping.resolve(&Trigger::Key(NamedKey::Tab)), Resolution::Unhandled);
    }

    #[test]
    fn test_empty_action_reports_label() {
        let mut dead = refresh();
        dead.action = None;
        let mapping = ControlMapping::build(&[dead], &[]);
        assert_eq!(
            mapping.resolve(&Trigger::Char('r')),
            Resolution::NoHandler("r".to_string())
        );
    }

    #[test]
    fn test_later_view_duplicate_replaces_earlier() {
        let first = ControlBinding::char('r', "Old", 10, Command::Refresh);
        let second = ControlBinding::char('r', "New", 10, Command::Back);
        let mapping = ControlMapping::build(&[first, second], &[]);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.resolve(&Trigger::Char('r')), Resolution::Run(Command::Back));
    }
}
