// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: forward window events to the registered callback.
//!
//! [`CallbackDispatcher`] holds at most one [`WindowCallback`] and applies
//! simple forwarding rules:
//!
//! - Each event is forwarded synchronously, exactly once, to the callback.
//! - Every dispatch returns `None` when no callback is registered; nothing is
//!   dispatched and the substrate is expected to run its own default path.
//! - Input dispatches return `Some(consumed)`. The callback decides whether to
//!   invoke the [`BaseDispatch`] it is handed; the dispatcher never falls back
//!   to it on its own.
//!
//! ## Minimal example
//!
//! ```
//! use understory_window::{
//!     ActionModeCallback, BaseDispatch, CallbackDispatcher, InputCallback, KeyAction, KeyEvent,
//!     NoBaseDispatch, PanelCallback, WindowStateCallback,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Counter(u32);
//!
//! impl InputCallback for Counter {
//!     fn dispatch_key_event(&mut self, event: &KeyEvent, base: &mut dyn BaseDispatch) -> bool {
//!         self.0 += 1;
//!         base.dispatch_key_event(event)
//!     }
//! }
//! impl PanelCallback for Counter {}
//! impl ActionModeCallback for Counter {}
//! impl WindowStateCallback for Counter {}
//!
//! let mut dispatcher = CallbackDispatcher::new();
//! let key = KeyEvent::new(29, KeyAction::Down);
//!
//! // Nothing registered: nothing dispatched.
//! assert_eq!(dispatcher.dispatch_key_event(&key, &mut NoBaseDispatch), None);
//!
//! dispatcher.set(Some(Box::new(Counter::default())));
//! assert_eq!(dispatcher.dispatch_key_event(&key, &mut NoBaseDispatch), Some(false));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::attributes::AttributeRecord;
use crate::callback::{BaseDispatch, WindowCallback};
use crate::event::{AccessibilityEvent, KeyEvent, MotionEvent, SearchEvent};
use crate::feature::Feature;
use crate::menu::{ActionMode, ActionModeKind, KeyboardShortcutGroup, Menu, MenuItem, ViewHandle};

/// Single-slot holder and forwarder for a [`WindowCallback`].
#[derive(Debug, Default)]
pub struct CallbackDispatcher {
    callback: Option<Box<dyn WindowCallback>>,
}

impl CallbackDispatcher {
    /// Creates a dispatcher with no callback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the callback and returns the previous one.
    pub fn set(
        &mut self,
        callback: Option<Box<dyn WindowCallback>>,
    ) -> Option<Box<dyn WindowCallback>> {
        core::mem::replace(&mut self.callback, callback)
    }

    /// Returns the registered callback.
    #[must_use]
    pub fn get(&self) -> Option<&dyn WindowCallback> {
        self.callback.as_deref()
    }

    /// Returns the registered callback mutably.
    pub fn get_mut(&mut self) -> Option<&mut (dyn WindowCallback + 'static)> {
        self.callback.as_deref_mut()
    }

    /// Returns `true` if a callback is registered.
    #[must_use]
    #[inline]
    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Forwards a key event.
    pub fn dispatch_key_event(
        &mut self,
        event: &KeyEvent,
        base: &mut dyn BaseDispatch,
    ) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.dispatch_key_event(event, base))
    }

    /// Forwards a key shortcut event.
    pub fn dispatch_key_shortcut_event(
        &mut self,
        event: &KeyEvent,
        base: &mut dyn BaseDispatch,
    ) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.dispatch_key_shortcut_event(event, base))
    }

    /// Forwards a touch event.
    pub fn dispatch_touch_event(
        &mut self,
        event: &MotionEvent,
        base: &mut dyn BaseDispatch,
    ) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.dispatch_touch_event(event, base))
    }

    /// Forwards a trackball event.
    pub fn dispatch_trackball_event(
        &mut self,
        event: &MotionEvent,
        base: &mut dyn BaseDispatch,
    ) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.dispatch_trackball_event(event, base))
    }

    /// Forwards a generic motion event.
    pub fn dispatch_generic_motion_event(
        &mut self,
        event: &MotionEvent,
        base: &mut dyn BaseDispatch,
    ) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.dispatch_generic_motion_event(event, base))
    }

    /// Forwards accessibility population.
    pub fn dispatch_populate_accessibility_event(
        &mut self,
        event: &mut AccessibilityEvent,
        base: &mut dyn BaseDispatch,
    ) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.dispatch_populate_accessibility_event(event, base))
    }

    // =========================================================================
    // Panels
    // =========================================================================

    /// Asks for a panel view. `Some(None)` means the callback declined.
    pub fn create_panel_view(&mut self, panel: Feature) -> Option<Option<ViewHandle>> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.on_create_panel_view(panel))
    }

    /// Asks the callback to fill a panel menu.
    pub fn create_panel_menu(&mut self, panel: Feature, menu: &mut Menu) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.on_create_panel_menu(panel, menu))
    }

    /// Asks the callback to prepare a panel.
    pub fn prepare_panel(
        &mut self,
        panel: Feature,
        view: Option<ViewHandle>,
        menu: &mut Menu,
    ) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.on_prepare_panel(panel, view, menu))
    }

    /// Reports an opened menu.
    pub fn menu_opened(&mut self, panel: Feature, menu: &Menu) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.on_menu_opened(panel, menu))
    }

    /// Reports a selected menu item.
    pub fn menu_item_selected(&mut self, panel: Feature, item: &MenuItem) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.on_menu_item_selected(panel, item))
    }

    /// Reports a closing panel.
    pub fn panel_closed(&mut self, panel: Feature, menu: &Menu) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_panel_closed(panel, menu);
        Some(())
    }

    // =========================================================================
    // Action modes
    // =========================================================================

    /// Offers an action mode request to the callback.
    pub fn window_starting_action_mode(
        &mut self,
        kind: ActionModeKind,
    ) -> Option<Option<ActionMode>> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.on_window_starting_action_mode(kind))
    }

    /// Reports a started action mode.
    pub fn action_mode_started(&mut self, mode: &ActionMode) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_action_mode_started(mode);
        Some(())
    }

    /// Reports a finished action mode.
    pub fn action_mode_finished(&mut self, mode: &ActionMode) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_action_mode_finished(mode);
        Some(())
    }

    // =========================================================================
    // Window state
    // =========================================================================

    /// Reports changed attributes.
    pub fn window_attributes_changed(&mut self, attrs: &AttributeRecord) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_window_attributes_changed(attrs);
        Some(())
    }

    /// Reports changed content.
    pub fn content_changed(&mut self) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_content_changed();
        Some(())
    }

    /// Reports a focus change.
    pub fn window_focus_changed(&mut self, has_focus: bool) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_window_focus_changed(has_focus);
        Some(())
    }

    /// Reports attachment to the window manager.
    pub fn attached_to_window(&mut self) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_attached_to_window();
        Some(())
    }

    /// Reports detachment from the window manager.
    pub fn detached_from_window(&mut self) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_detached_from_window();
        Some(())
    }

    /// Forwards a search request.
    pub fn search_requested(&mut self, event: Option<&SearchEvent>) -> Option<bool> {
        let cb = self.callback.as_deref_mut()?;
        Some(cb.on_search_requested(event))
    }

    /// Collects keyboard shortcuts into `data`.
    pub fn provide_keyboard_shortcuts(
        &mut self,
        data: &mut Vec<KeyboardShortcutGroup>,
        menu: Option<&Menu>,
        device_id: i32,
    ) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_provide_keyboard_shortcuts(data, menu, device_id);
        Some(())
    }

    /// Reports a pointer capture change.
    pub fn pointer_capture_changed(&mut self, has_capture: bool) -> Option<()> {
        let cb = self.callback.as_deref_mut()?;
        cb.on_pointer_capture_changed(has_capture);
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::{
        ActionModeCallback, InputCallback, NoBaseDispatch, PanelCallback, WindowStateCallback,
    };
    use crate::event::{KeyAction, MotionAction};
    use crate::menu::KeyboardShortcutInfo;
    use alloc::string::ToString;
    use alloc::vec;
    use kurbo::Point;

    /// Base that records what reached it and consumes touches only.
    #[derive(Debug, Default)]
    struct RecordingBase {
        keys: Vec<u32>,
        touches: usize,
    }

    impl BaseDispatch for RecordingBase {
        fn dispatch_key_event(&mut self, event: &KeyEvent) -> bool {
            self.keys.push(event.key_code);
            false
        }

        fn dispatch_key_shortcut_event(&mut self, _: &KeyEvent) -> bool {
            false
        }

        fn dispatch_touch_event(&mut self, _: &MotionEvent) -> bool {
            self.touches += 1;
            true
        }

        fn dispatch_trackball_event(&mut self, _: &MotionEvent) -> bool {
            false
        }

        fn dispatch_generic_motion_event(&mut self, _: &MotionEvent) -> bool {
            false
        }
    }

    /// Consumes key 1, forwards other keys and touches to the base.
    #[derive(Debug, Default)]
    struct Chain;

    impl InputCallback for Chain {
        fn dispatch_key_event(&mut self, event: &KeyEvent, base: &mut dyn BaseDispatch) -> bool {
            event.key_code == 1 || base.dispatch_key_event(event)
        }

        fn dispatch_touch_event(
            &mut self,
            event: &MotionEvent,
            base: &mut dyn BaseDispatch,
        ) -> bool {
            base.dispatch_touch_event(event)
        }
    }

    impl PanelCallback for Chain {
        fn on_create_panel_menu(&mut self, _: Feature, menu: &mut Menu) -> bool {
            menu.add(7, "Settings");
            true
        }
    }

    impl ActionModeCallback for Chain {
        fn on_window_starting_action_mode(&mut self, kind: ActionModeKind) -> Option<ActionMode> {
            (kind == ActionModeKind::Floating).then(|| ActionMode {
                id: 1,
                kind,
                title: "Select".to_string(),
            })
        }
    }

    impl WindowStateCallback for Chain {
        fn on_provide_keyboard_shortcuts(
            &mut self,
            data: &mut Vec<KeyboardShortcutGroup>,
            _: Option<&Menu>,
            _: i32,
        ) {
            data.push(KeyboardShortcutGroup {
                label: "General".to_string(),
                items: vec![KeyboardShortcutInfo {
                    label: "Save".to_string(),
                    key_code: 47,
                    modifiers: crate::event::Modifiers::CTRL,
                }],
            });
        }
    }

    #[test]
    fn empty_dispatcher_dispatches_nothing() {
        let mut d = CallbackDispatcher::new();
        let mut base = RecordingBase::default();
        let key = KeyEvent::new(3, KeyAction::Down);
        assert_eq!(d.dispatch_key_event(&key, &mut base), None);
        assert_eq!(d.content_changed(), None);
        assert_eq!(d.search_requested(None), None);
        assert!(base.keys.is_empty(), "base must not run without a callback");
    }

    #[test]
    fn callback_chooses_whether_base_runs() {
        let mut d = CallbackDispatcher::new();
        d.set(Some(Box::new(Chain)));
        let mut base = RecordingBase::default();

        assert_eq!(
            d.dispatch_key_event(&KeyEvent::new(1, KeyAction::Down), &mut base),
            Some(true)
        );
        assert!(base.keys.is_empty());

        assert_eq!(
            d.dispatch_key_event(&KeyEvent::new(2, KeyAction::Down), &mut base),
            Some(false)
        );
        assert_eq!(base.keys, vec![2]);

        let touch = MotionEvent::touch(MotionAction::Down, Point::new(1.0, 1.0));
        assert_eq!(d.dispatch_touch_event(&touch, &mut base), Some(true));
        assert_eq!(base.touches, 1);
    }

    #[test]
    fn default_methods_do_not_fall_back_to_base() {
        let mut d = CallbackDispatcher::new();
        d.set(Some(Box::new(Chain)));
        let mut base = RecordingBase::default();
        let key = KeyEvent::new(2, KeyAction::Down);
        // `Chain` does not override shortcut handling.
        assert_eq!(d.dispatch_key_shortcut_event(&key, &mut base), Some(false));
        assert!(base.keys.is_empty());
    }

    #[test]
    fn panels_action_modes_and_shortcuts_reach_the_callback() {
        let mut d = CallbackDispatcher::new();
        d.set(Some(Box::new(Chain)));

        let mut menu = Menu::new();
        assert_eq!(d.create_panel_menu(Feature::OptionsPanel, &mut menu), Some(true));
        assert!(menu.find(7).is_some());
        assert_eq!(d.prepare_panel(Feature::OptionsPanel, None, &mut menu), Some(true));
        assert_eq!(d.create_panel_view(Feature::OptionsPanel), Some(None));

        assert_eq!(d.window_starting_action_mode(ActionModeKind::Primary), Some(None));
        let floating = d.window_starting_action_mode(ActionModeKind::Floating);
        assert_eq!(floating.flatten().map(|m| m.id), Some(1));

        let mut groups = Vec::new();
        assert_eq!(d.provide_keyboard_shortcuts(&mut groups, None, 0), Some(()));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items[0].key_code, 47);
    }

    #[test]
    fn set_returns_previous_callback() {
        let mut d = CallbackDispatcher::new();
        assert!(d.set(Some(Box::new(Chain))).is_none());
        assert!(d.is_set());
        assert!(d.set(None).is_some());
        assert!(!d.is_set());
        assert_eq!(
            d.dispatch_touch_event(
                &MotionEvent::touch(MotionAction::Up, Point::ZERO),
                &mut NoBaseDispatch
            ),
            None
        );
    }
}
