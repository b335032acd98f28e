// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel, menu, action-mode and shortcut payloads.

use alloc::string::String;
use alloc::vec::Vec;

use crate::event::Modifiers;

/// Opaque handle to a view created by the embedder for a panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u64);

/// One entry of a [`Menu`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    /// Embedder-chosen identifier.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Whether the item can be selected.
    pub enabled: bool,
}

/// Menu shown in a panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Creates an empty menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an enabled item and returns it.
    pub fn add(&mut self, id: u32, title: impl Into<String>) -> &mut MenuItem {
        self.items.push(MenuItem {
            id,
            title: title.into(),
            enabled: true,
        });
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn find(&self, id: u32) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns the items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Returns `true` if the menu has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Presentation of an action mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActionModeKind {
    /// Contextual bar in place of the action bar.
    #[default]
    Primary,
    /// Floating toolbar near the content it acts on.
    Floating,
}

/// A contextual action mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionMode {
    /// Embedder-chosen identifier.
    pub id: u32,
    /// Presentation.
    pub kind: ActionModeKind,
    /// Title shown while the mode is active.
    pub title: String,
}

/// One keyboard shortcut.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardShortcutInfo {
    /// Human-readable description.
    pub label: String,
    /// Key code that triggers the shortcut.
    pub key_code: u32,
    /// Required modifiers.
    pub modifiers: Modifiers,
}

/// A titled group of keyboard shortcuts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardShortcutGroup {
    /// Group title.
    pub label: String,
    /// Shortcuts in the group.
    pub items: Vec<KeyboardShortcutInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_find_items() {
        let mut menu = Menu::new();
        assert!(menu.is_empty());
        menu.add(1, "Open");
        menu.add(2, "Close").enabled = false;

        assert_eq!(menu.items().len(), 2);
        assert_eq!(menu.find(1).map(|i| i.title.as_str()), Some("Open"));
        assert_eq!(menu.find(2).map(|i| i.enabled), Some(false));
        assert!(menu.find(3).is_none());

        menu.clear();
        assert!(menu.is_empty());
    }
}
