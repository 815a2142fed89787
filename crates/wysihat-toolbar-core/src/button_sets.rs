//! Named groups of button definitions.
//!
//! The registry is a plain value owned by the host application. Nothing is
//! global: a host that wants extra sets registers them on its own registry
//! and hands it to [`Toolbar::add_named_button_set`](crate::Toolbar::add_named_button_set).

use std::collections::BTreeMap;

use crate::controls::ButtonDef;

/// Name of the default set.
pub const BASIC: &str = "Basic";

/// Bold, underline and italic, each running and querying the command of the
/// same (lower-cased) name.
pub fn basic<E>() -> Vec<ButtonDef<E>> {
    ["Bold", "Underline", "Italic"]
        .into_iter()
        .map(ButtonDef::labeled)
        .collect()
}

/// Mapping from set name to an ordered list of button definitions.
///
/// Names are neither validated nor deduplicated; registering an existing name
/// replaces the set.
pub struct ButtonSetRegistry<E> {
    sets: BTreeMap<String, Vec<ButtonDef<E>>>,
}

impl<E> ButtonSetRegistry<E> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    /// A registry holding the [`BASIC`] set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(BASIC, basic());
        registry
    }

    /// Store `set` under `name`, returning the set it replaced, if any.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        set: impl IntoIterator<Item = ButtonDef<E>>,
    ) -> Option<Vec<ButtonDef<E>>> {
        self.sets.insert(name.into(), set.into_iter().collect())
    }

    pub fn get(&self, name: &str) -> Option<&[ButtonDef<E>]> {
        self.sets.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl<E> Default for ButtonSetRegistry<E> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<E> Clone for ButtonSetRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            sets: self.sets.clone(),
        }
    }
}

impl<E> std::fmt::Debug for ButtonSetRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.sets.iter().map(|(name, set)| (name, set.len())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Registry = ButtonSetRegistry<()>;

    #[test]
    fn test_basic_set() {
        let registry = Registry::with_defaults();
        let set = registry.get(BASIC).unwrap();

        let names: Vec<_> = set.iter().map(|def| def.spec().unwrap().name).collect();
        assert_eq!(names, ["bold", "underline", "italic"]);
        // Everything comes from default synthesis.
        assert!(set.iter().all(|def| def.handler.is_none() && def.query.is_none()));
    }

    #[test]
    fn test_new_is_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.get(BASIC).is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = Registry::with_defaults();
        let previous = registry.register(BASIC, [ButtonDef::labeled("Bold")]);

        assert_eq!(previous.map(|set| set.len()), Some(3));
        assert_eq!(registry.get(BASIC).unwrap().len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_custom_sets_are_listed() {
        let mut registry = Registry::with_defaults();
        registry.register(
            "Lists",
            [
                ButtonDef::labeled("Bullets").name("insertunorderedlist"),
                ButtonDef::labeled("Numbers").name("insertorderedlist"),
            ],
        );

        assert!(registry.contains("Lists"));
        assert_eq!(registry.names().collect::<Vec<_>>(), ["Basic", "Lists"]);
    }
}
