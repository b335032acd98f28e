// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window callback: how an owning component intercepts window events.
//!
//! The surface is split into narrow capability traits:
//!
//! - [`InputCallback`]: key, shortcut, touch, trackball, generic motion, and
//!   accessibility population.
//! - [`PanelCallback`]: panel views and menus.
//! - [`ActionModeCallback`]: action mode lifecycle.
//! - [`WindowStateCallback`]: attribute, content, focus, attachment, search,
//!   shortcut enumeration, and pointer capture notifications.
//!
//! [`WindowCallback`] is implemented for every type that implements all four,
//! so a component opts in by implementing the four traits (usually relying on
//! the default methods for most of them).
//!
//! ## Default handling is explicit
//!
//! Input methods receive the window's [`BaseDispatch`]. The default method
//! bodies do **not** call it: they report the event as not consumed. A callback
//! that wants standard handling must forward to the base itself, typically
//! after looking at the event:
//!
//! ```rust
//! use understory_window::{
//!     ActionModeCallback, BaseDispatch, InputCallback, KeyEvent, PanelCallback,
//!     WindowStateCallback,
//! };
//!
//! #[derive(Debug)]
//! struct BackInterceptor;
//!
//! const KEY_BACK: u32 = 4;
//!
//! impl InputCallback for BackInterceptor {
//!     fn dispatch_key_event(&mut self, event: &KeyEvent, base: &mut dyn BaseDispatch) -> bool {
//!         if event.key_code == KEY_BACK {
//!             return true;
//!         }
//!         base.dispatch_key_event(event)
//!     }
//! }
//! impl PanelCallback for BackInterceptor {}
//! impl ActionModeCallback for BackInterceptor {}
//! impl WindowStateCallback for BackInterceptor {}
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::attributes::AttributeRecord;
use crate::event::{AccessibilityEvent, KeyEvent, MotionEvent, SearchEvent};
use crate::feature::Feature;
use crate::menu::{ActionMode, ActionModeKind, KeyboardShortcutGroup, Menu, MenuItem, ViewHandle};

/// The window's own handling of input, invoked by callbacks on demand.
///
/// Each method returns `true` if the event was consumed.
pub trait BaseDispatch {
    /// Standard key handling.
    fn dispatch_key_event(&mut self, event: &KeyEvent) -> bool;

    /// Standard key shortcut handling.
    fn dispatch_key_shortcut_event(&mut self, event: &KeyEvent) -> bool;

    /// Standard touch handling.
    fn dispatch_touch_event(&mut self, event: &MotionEvent) -> bool;

    /// Standard trackball handling.
    fn dispatch_trackball_event(&mut self, event: &MotionEvent) -> bool;

    /// Standard generic motion handling.
    fn dispatch_generic_motion_event(&mut self, event: &MotionEvent) -> bool;

    /// Standard accessibility population.
    fn dispatch_populate_accessibility_event(&mut self, event: &mut AccessibilityEvent) -> bool {
        let _ = event;
        false
    }
}

/// A base that consumes nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoBaseDispatch;

impl BaseDispatch for NoBaseDispatch {
    fn dispatch_key_event(&mut self, _: &KeyEvent) -> bool {
        false
    }

    fn dispatch_key_shortcut_event(&mut self, _: &KeyEvent) -> bool {
        false
    }

    fn dispatch_touch_event(&mut self, _: &MotionEvent) -> bool {
        false
    }

    fn dispatch_trackball_event(&mut self, _: &MotionEvent) -> bool {
        false
    }

    fn dispatch_generic_motion_event(&mut self, _: &MotionEvent) -> bool {
        false
    }
}

/// Input interception.
///
/// Every method returns `true` if the event was consumed. The defaults consume
/// nothing and do not call `base`.
pub trait InputCallback {
    /// A key event.
    fn dispatch_key_event(&mut self, event: &KeyEvent, base: &mut dyn BaseDispatch) -> bool {
        let _ = (event, base);
        false
    }

    /// A key shortcut event.
    fn dispatch_key_shortcut_event(
        &mut self,
        event: &KeyEvent,
        base: &mut dyn BaseDispatch,
    ) -> bool {
        let _ = (event, base);
        false
    }

    /// A touch event.
    fn dispatch_touch_event(&mut self, event: &MotionEvent, base: &mut dyn BaseDispatch) -> bool {
        let _ = (event, base);
        false
    }

    /// A trackball event.
    fn dispatch_trackball_event(
        &mut self,
        event: &MotionEvent,
        base: &mut dyn BaseDispatch,
    ) -> bool {
        let _ = (event, base);
        false
    }

    /// A generic motion event (joystick, hover, scroll).
    fn dispatch_generic_motion_event(
        &mut self,
        event: &MotionEvent,
        base: &mut dyn BaseDispatch,
    ) -> bool {
        let _ = (event, base);
        false
    }

    /// Populates `event` with the window's text.
    ///
    /// Returns `true` once population is complete.
    fn dispatch_populate_accessibility_event(
        &mut self,
        event: &mut AccessibilityEvent,
        base: &mut dyn BaseDispatch,
    ) -> bool {
        let _ = (event, base);
        false
    }
}

/// Panel and menu lifecycle.
///
/// Panels are identified by the feature that provides them, for example
/// [`Feature::OptionsPanel`] or [`Feature::ContextMenu`].
pub trait PanelCallback {
    /// Creates the view shown in `panel`.
    ///
    /// `None` lets the substrate build default content (usually a menu).
    fn on_create_panel_view(&mut self, panel: Feature) -> Option<ViewHandle> {
        let _ = panel;
        None
    }

    /// Fills `menu` the first time `panel` is shown.
    ///
    /// Return `true` to show the panel.
    fn on_create_panel_menu(&mut self, panel: Feature, menu: &mut Menu) -> bool {
        let _ = (panel, menu);
        false
    }

    /// Prepares `panel` before each showing.
    ///
    /// Return `true` to show the panel.
    fn on_prepare_panel(
        &mut self,
        panel: Feature,
        view: Option<ViewHandle>,
        menu: &mut Menu,
    ) -> bool {
        let _ = (panel, view, menu);
        true
    }

    /// The user opened the menu of `panel`.
    ///
    /// Return `false` to keep it closed.
    fn on_menu_opened(&mut self, panel: Feature, menu: &Menu) -> bool {
        let _ = (panel, menu);
        true
    }

    /// The user selected `item`.
    ///
    /// Return `true` to finish handling here, `false` for normal menu handling.
    fn on_menu_item_selected(&mut self, panel: Feature, item: &MenuItem) -> bool {
        let _ = (panel, item);
        false
    }

    /// `panel` is closing.
    fn on_panel_closed(&mut self, panel: Feature, menu: &Menu) {
        let _ = (panel, menu);
    }
}

/// Action mode lifecycle.
pub trait ActionModeCallback {
    /// An action mode is being requested.
    ///
    /// Return the mode to present it yourself, or `None` to let the substrate
    /// decide how (or whether) to present it.
    fn on_window_starting_action_mode(&mut self, kind: ActionModeKind) -> Option<ActionMode> {
        let _ = kind;
        None
    }

    /// `mode` has started.
    fn on_action_mode_started(&mut self, mode: &ActionMode) {
        let _ = mode;
    }

    /// `mode` has finished.
    fn on_action_mode_finished(&mut self, mode: &ActionMode) {
        let _ = mode;
    }
}

/// Window state notifications.
pub trait WindowStateCallback {
    /// The window's attributes changed.
    fn on_window_attributes_changed(&mut self, attrs: &AttributeRecord) {
        let _ = attrs;
    }

    /// The content view changed.
    fn on_content_changed(&mut self) {}

    /// The window gained or lost focus.
    fn on_window_focus_changed(&mut self, has_focus: bool) {
        let _ = has_focus;
    }

    /// The window was attached to the window manager.
    fn on_attached_to_window(&mut self) {}

    /// The window was detached from the window manager.
    fn on_detached_from_window(&mut self) {}

    /// The user asked to search.
    ///
    /// Return `true` if a search was started, `false` to block it.
    fn on_search_requested(&mut self, event: Option<&SearchEvent>) -> bool {
        let _ = event;
        false
    }

    /// Appends the window's keyboard shortcuts to `data`.
    fn on_provide_keyboard_shortcuts(
        &mut self,
        data: &mut Vec<KeyboardShortcutGroup>,
        menu: Option<&Menu>,
        device_id: i32,
    ) {
        let _ = (data, menu, device_id);
    }

    /// Pointer capture was enabled or disabled.
    fn on_pointer_capture_changed(&mut self, has_capture: bool) {
        let _ = has_capture;
    }
}

/// The full callback surface a window forwards to.
///
/// Implemented automatically for any type that implements all four capability
/// traits.
pub trait WindowCallback:
    InputCallback + PanelCallback + ActionModeCallback + WindowStateCallback + fmt::Debug
{
}

impl<T> WindowCallback for T where
    T: InputCallback + PanelCallback + ActionModeCallback + WindowStateCallback + fmt::Debug
{
}
