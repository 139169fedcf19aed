//! Keyboard keys and their bindings to actions.
use serde::{Deserialize, Serialize};

/// A key reported by a [`Renderer`](crate::Renderer).
///
/// Backends translate their own key codes into this type and drop the keys it
/// does not cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// A digit key, `0` to `9`.
    Digit(u8),

    /// A printable character, lower case for letters.
    Char(char),

    /// Arrow up.
    Up,

    /// Arrow down.
    Down,

    /// Arrow left.
    Left,

    /// Arrow right.
    Right,

    /// Space bar.
    Space,

    /// Enter.
    Enter,

    /// Escape.
    Escape,
}

impl Key {
    /// Returns the digit of a digit key.
    pub fn digit(&self) -> Option<u8> {
        match self {
            Key::Digit(d) if *d <= 9 => Some(*d),
            _ => None,
        }
    }

    /// Returns the action index of the default convention, where the key for
    /// digit `N` selects action `N - 1`.
    ///
    /// The digit `0` has no action under this convention.
    pub fn default_action_index(&self) -> Option<usize> {
        self.digit().and_then(|d| (d as usize).checked_sub(1))
    }
}

/// A set of keys selecting one action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Any of these keys selects the action.
    pub keys: Vec<Key>,

    /// Normalized action index.
    pub action: usize,
}

/// An ordered table from key sets to normalized action indices.
///
/// When the table is empty, [`EnvWrapper::get_action_from_user`] falls back to the
/// digit convention of [`Key::default_action_index`].
///
/// [`EnvWrapper::get_action_from_user`]: crate::EnvWrapper::get_action_from_user
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(Vec<KeyBinding>);

impl KeyBindings {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a binding. Entries are matched in insertion order.
    pub fn bind(mut self, keys: impl IntoIterator<Item = Key>, action: usize) -> Self {
        self.0.push(KeyBinding {
            keys: keys.into_iter().collect(),
            action,
        });
        self
    }

    /// Returns `true` if no binding is registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of bindings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the bindings in matching order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyBinding> {
        self.0.iter()
    }

    /// Resolves pressed keys to an action index.
    ///
    /// Pressed keys are scanned in the order given, and for each key the table is
    /// scanned in insertion order. The first match wins.
    pub fn resolve(&self, pressed: &[Key]) -> Option<usize> {
        pressed.iter().find_map(|key| {
            self.0
                .iter()
                .find(|binding| binding.keys.contains(key))
                .map(|binding| binding.action)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, KeyBindings};

    #[test]
    fn test_default_action_index() {
        assert_eq!(Key::Digit(1).default_action_index(), Some(0));
        assert_eq!(Key::Digit(2).default_action_index(), Some(1));
        assert_eq!(Key::Digit(9).default_action_index(), Some(8));
        assert_eq!(Key::Digit(0).default_action_index(), None);
        assert_eq!(Key::Char('a').default_action_index(), None);
        assert_eq!(Key::Up.default_action_index(), None);
    }

    #[test]
    fn test_resolve_first_pressed_key_wins() {
        let bindings = KeyBindings::new()
            .bind(vec![Key::Up, Key::Char('w')], 3)
            .bind(vec![Key::Down, Key::Char('s')], 4);

        assert_eq!(bindings.resolve(&[Key::Down]), Some(4));
        assert_eq!(bindings.resolve(&[Key::Char('w')]), Some(3));
        assert_eq!(bindings.resolve(&[Key::Left]), None);
        assert_eq!(bindings.resolve(&[]), None);

        // Pressed keys are the outer loop.
        assert_eq!(bindings.resolve(&[Key::Down, Key::Up]), Some(4));
        assert_eq!(bindings.resolve(&[Key::Left, Key::Up, Key::Down]), Some(3));
    }

    #[test]
    fn test_resolve_first_table_entry_wins() {
        let bindings = KeyBindings::new()
            .bind(vec![Key::Space], 1)
            .bind(vec![Key::Space, Key::Enter], 2);

        assert_eq!(bindings.resolve(&[Key::Space]), Some(1));
        assert_eq!(bindings.resolve(&[Key::Enter]), Some(2));
    }

    #[test]
    fn test_yaml_keys() {
        let keys: Vec<Key> = serde_yaml::from_str("[up, escape, {digit: 3}, {char: w}]").unwrap();
        assert_eq!(keys, vec![Key::Up, Key::Escape, Key::Digit(3), Key::Char('w')]);
        assert!(serde_yaml::from_str::<Key>("{other: 5}").is_err());
        assert!(serde_yaml::from_str::<Key>("f1").is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let bindings = KeyBindings::new()
            .bind(vec![Key::Up], 3)
            .bind(vec![Key::Down, Key::Char('s')], 4);
        let yaml = serde_yaml::to_string(&bindings).unwrap();
        let loaded: KeyBindings = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(bindings, loaded);
        assert_eq!(loaded.len(), 2);
    }
}
