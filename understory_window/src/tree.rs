// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window hierarchy: an arena of windows linked by non-owning ids.
//!
//! The tree owns every [`Window`]. Container and active-child links are
//! [`WindowId`]s, so a link never keeps a window alive and never dangles: a
//! removed window's id turns stale and fails lookups instead of aliasing the
//! next window stored in the same slot.
//!
//! The tree does not order destruction. Removing a container leaves its
//! children in place with a stale container id.

use alloc::vec::Vec;

use crate::attributes::AttributeRecord;
use crate::derivation::adjust_for_sub_window;
use crate::error::WindowError;
use crate::feature::Feature;
use crate::id::WindowId;
use crate::types::WindowClass;
use crate::window::Window;

#[derive(Debug)]
struct Slot {
    generation: u32,
    window: Option<Window>,
}

/// Arena of windows and their hierarchy links.
///
/// ```rust
/// use std::sync::Arc;
/// use understory_window::{Feature, StaticContext, Window, WindowTree};
///
/// let cx = Arc::new(StaticContext::default());
/// let mut tree = WindowTree::new();
/// let host = tree.insert(Window::new(cx.clone()));
/// let embedded = tree.insert(Window::new(cx));
///
/// tree.set_container(embedded, Some(host)).unwrap();
/// assert!(tree.get(host).unwrap().has_children());
/// assert!(tree.get(embedded).unwrap().has_feature(Feature::NoTitle));
/// ```
#[derive(Debug, Default)]
pub struct WindowTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl WindowTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no windows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `window` and returns its id.
    pub fn insert(&mut self, window: Window) -> WindowId {
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.window = Some(window);
            return WindowId::new(idx, slot.generation);
        }
        #[expect(clippy::cast_possible_truncation, reason = "slot count stays far below u32::MAX")]
        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            window: Some(window),
        });
        WindowId::new(idx, 1)
    }

    /// Removes a window and returns it.
    ///
    /// If it was its container's active child, the container forgets it.
    pub fn remove(&mut self, id: WindowId) -> Option<Window> {
        let window = self.slot_mut(id)?.window.take()?;
        self.free.push(id.0);
        self.len -= 1;
        if let Some(container) = window.container.and_then(|c| self.get_mut(c))
            && container.active_child == Some(id)
        {
            container.active_child = None;
        }
        Some(window)
    }

    /// Returns `true` if `id` refers to a live window.
    #[must_use]
    pub fn is_alive(&self, id: WindowId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the window for `id`, if it is live.
    #[must_use]
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.window.as_ref()
    }

    /// Returns the window for `id` mutably, if it is live.
    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.slot_mut(id)?.window.as_mut()
    }

    fn slot_mut(&mut self, id: WindowId) -> Option<&mut Slot> {
        let slot = self.slots.get_mut(id.idx())?;
        (slot.generation == id.generation()).then_some(slot)
    }

    fn live_mut(&mut self, id: WindowId) -> Result<&mut Window, WindowError> {
        self.get_mut(id).ok_or(WindowError::UnknownWindow(id))
    }

    /// Sets or clears the container of `child`.
    ///
    /// With `Some(container)`, the child's no-title feature is forced on and
    /// pinned, and the container is marked as having children. Clearing the
    /// container releases the pin but keeps the feature. Re-parenting is
    /// allowed; the last call wins.
    pub fn set_container(
        &mut self,
        child: WindowId,
        container: Option<WindowId>,
    ) -> Result<(), WindowError> {
        let window = self.get(child).ok_or(WindowError::UnknownWindow(child))?;
        if window.is_destroyed() {
            return Err(WindowError::Destroyed);
        }
        let previous = window.container;
        if let Some(container) = container {
            if container == child {
                return Err(WindowError::SelfContainment);
            }
            let host = self
                .get(container)
                .ok_or(WindowError::UnknownWindow(container))?;
            if host.is_destroyed() {
                return Err(WindowError::Destroyed);
            }
        }

        if previous != container
            && let Some(old) = previous.and_then(|p| self.get_mut(p))
            && old.active_child == Some(child)
        {
            old.active_child = None;
        }

        let window = self.live_mut(child)?;
        window.container = container;
        match container {
            Some(container) => {
                window.features_mut().force_local(Feature::NoTitle);
                if previous != Some(container) {
                    window.is_active = false;
                }
                self.live_mut(container)?.has_children = true;
                log::debug!("{child:?} contained by {container:?}");
            }
            None => {
                window.features_mut().unpin(Feature::NoTitle);
                window.is_active = false;
                log::debug!("{child:?} is now top level");
            }
        }
        Ok(())
    }

    /// Makes `id` the active window.
    ///
    /// The window becomes its container's active child, and the previous
    /// active child of that container is deactivated. A destroyed window
    /// cannot be activated.
    pub fn make_active(&mut self, id: WindowId) -> Result<(), WindowError> {
        let window = self.live_mut(id)?;
        if window.is_destroyed() {
            return Err(WindowError::Destroyed);
        }
        let container = window.container;
        let previous = container
            .and_then(|c| self.get_mut(c))
            .and_then(|c| c.active_child.replace(id));
        if let Some(previous) = previous.filter(|p| *p != id)
            && let Some(window) = self.get_mut(previous)
        {
            window.is_active = false;
            log::debug!("deactivated {previous:?}");
        }
        self.live_mut(id)?.is_active = true;
        log::debug!("activated {id:?}");
        Ok(())
    }

    /// Destroys the window for `id`; see [`Window::destroy`].
    pub fn destroy(&mut self, id: WindowId) -> Result<bool, WindowError> {
        Ok(self.live_mut(id)?.destroy())
    }

    /// Fills in the missing token and title of `attrs` on behalf of `owner`.
    ///
    /// A container id that went stale counts as no container.
    pub fn adjust_attributes(
        &self,
        owner: WindowId,
        attrs: &mut AttributeRecord,
    ) -> Result<WindowClass, WindowError> {
        let window = self.get(owner).ok_or(WindowError::UnknownWindow(owner))?;
        let container = window.container.and_then(|c| self.get(c));
        if window.container.is_some() && container.is_none() {
            log::debug!("{owner:?} has a stale container; deriving as top level");
        }
        let cx = window.derivation_context(container);
        Ok(adjust_for_sub_window(&cx, attrs))
    }

    /// Derives `attrs` for `owner` and adds it through the owner's window
    /// manager.
    ///
    /// Returns the record as it was handed to the manager.
    pub fn add_window(
        &mut self,
        owner: WindowId,
        mut attrs: AttributeRecord,
    ) -> Result<AttributeRecord, WindowError> {
        self.adjust_attributes(owner, &mut attrs)?;
        let window = self.live_mut(owner)?;
        if window.is_destroyed() {
            return Err(WindowError::Destroyed);
        }
        let manager = window
            .window_manager_mut()
            .ok_or(WindowError::NoWindowManager)?;
        manager.add_window(&attrs);
        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StaticContext;
    use crate::types::Token;
    use alloc::sync::Arc;

    fn window() -> Window {
        Window::new(Arc::new(StaticContext::default()))
    }

    #[test]
    fn removed_ids_go_stale_and_slots_are_reused() {
        let mut tree = WindowTree::new();
        let a = tree.insert(window());
        assert_eq!(tree.len(), 1);
        assert!(tree.remove(a).is_some());
        assert!(!tree.is_alive(a));
        assert!(tree.remove(a).is_none());
        assert!(tree.is_empty());

        let b = tree.insert(window());
        assert_eq!(a.idx(), b.idx());
        assert_ne!(a, b, "reused slot gets a new generation");
        assert!(tree.get(a).is_none());
        assert!(tree.get(b).is_some());
    }

    #[test]
    fn container_links_are_validated() {
        let mut tree = WindowTree::new();
        let a = tree.insert(window());
        let b = tree.insert(window());
        assert_eq!(tree.set_container(a, Some(a)), Err(WindowError::SelfContainment));

        tree.remove(b);
        assert_eq!(tree.set_container(a, Some(b)), Err(WindowError::UnknownWindow(b)));
        assert_eq!(tree.set_container(b, None), Err(WindowError::UnknownWindow(b)));
        assert!(!tree.get(a).unwrap().has_feature(Feature::NoTitle));
    }

    #[test]
    fn clearing_the_container_releases_the_pin() {
        let mut tree = WindowTree::new();
        let host = tree.insert(window());
        let child = tree.insert(window());
        tree.set_container(child, Some(host)).unwrap();

        let w = tree.get_mut(child).unwrap();
        assert_eq!(w.request_feature(Feature::ActionBar), Ok(false));

        tree.set_container(child, None).unwrap();
        let w = tree.get_mut(child).unwrap();
        assert_eq!(w.container(), None);
        assert!(w.has_feature(Feature::NoTitle));
        assert_eq!(w.request_feature(Feature::ActionBar), Ok(true));
        assert!(!w.has_feature(Feature::NoTitle));
    }

    #[test]
    fn re_parenting_drops_the_old_active_link() {
        let mut tree = WindowTree::new();
        let first = tree.insert(window());
        let second = tree.insert(window());
        let child = tree.insert(window());
        tree.set_container(child, Some(first)).unwrap();
        tree.make_active(child).unwrap();
        assert_eq!(tree.get(first).unwrap().active_child(), Some(child));

        tree.set_container(child, Some(second)).unwrap();
        assert_eq!(tree.get(first).unwrap().active_child(), None);
        assert!(!tree.get(child).unwrap().is_active());
        assert!(tree.get(second).unwrap().has_children());
    }

    #[test]
    fn removing_the_active_child_clears_the_link() {
        let mut tree = WindowTree::new();
        let host = tree.insert(window());
        let child = tree.insert(window());
        tree.set_container(child, Some(host)).unwrap();
        tree.make_active(child).unwrap();
        tree.remove(child);
        assert_eq!(tree.get(host).unwrap().active_child(), None);
    }

    #[test]
    fn destroyed_windows_cannot_be_activated_or_contain() {
        let mut tree = WindowTree::new();
        let host = tree.insert(window());
        let child = tree.insert(window());
        tree.set_container(child, Some(host)).unwrap();
        tree.destroy(child).unwrap();
        assert_eq!(tree.make_active(child), Err(WindowError::Destroyed));
        assert!(!tree.get(child).unwrap().is_active());
        assert_eq!(tree.get(host).unwrap().active_child(), None);

        let other = tree.insert(window());
        tree.destroy(host).unwrap();
        assert_eq!(tree.set_container(other, Some(host)), Err(WindowError::Destroyed));
        assert_eq!(tree.get(other).unwrap().container(), None);
    }

    #[test]
    fn top_level_windows_can_be_activated() {
        let mut tree = WindowTree::new();
        let a = tree.insert(window());
        tree.make_active(a).unwrap();
        assert!(tree.get(a).unwrap().is_active());
    }

    #[test]
    fn stale_container_derives_as_top_level() {
        let mut tree = WindowTree::new();
        let host = tree.insert(window());
        let child = tree.insert(window());
        tree.get_mut(host)
            .unwrap()
            .set_window_manager(None, Some(Token::new(1)), "", false)
            .unwrap();
        tree.get_mut(child)
            .unwrap()
            .set_window_manager(None, Some(Token::new(2)), "", false)
            .unwrap();
        tree.set_container(child, Some(host)).unwrap();
        tree.remove(host);

        let mut attrs = AttributeRecord::default();
        tree.adjust_attributes(child, &mut attrs).unwrap();
        assert_eq!(attrs.token, Some(Token::new(2)));
    }

    #[test]
    fn add_window_needs_a_manager() {
        let mut tree = WindowTree::new();
        let a = tree.insert(window());
        assert_eq!(
            tree.add_window(a, AttributeRecord::default()),
            Err(WindowError::NoWindowManager)
        );
        tree.destroy(a).unwrap();
        assert_eq!(
            tree.add_window(a, AttributeRecord::default()),
            Err(WindowError::Destroyed)
        );
    }
}
