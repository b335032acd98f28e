// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input event payloads forwarded through the window callback.
//!
//! Payloads carry only what routing and inspection need. Decoding and delivery
//! belong to the substrate.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

bitflags::bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Super.
        const META  = 0b0000_1000;
    }
}

/// Phase of a key event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// The key went down.
    Down,
    /// The key went up.
    Up,
}

/// A key event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Substrate key code.
    pub key_code: u32,
    /// Down or up.
    pub action: KeyAction,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// Auto-repeat count; `0` for the initial press.
    pub repeat_count: u32,
    /// Originating input device.
    pub device_id: i32,
}

impl KeyEvent {
    /// Creates an unmodified, non-repeating event.
    #[must_use]
    pub fn new(key_code: u32, action: KeyAction) -> Self {
        Self {
            key_code,
            action,
            modifiers: Modifiers::empty(),
            repeat_count: 0,
            device_id: 0,
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Phase of a motion event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// A pointer went down.
    Down,
    /// A pointer moved while down.
    Move,
    /// A pointer went up.
    Up,
    /// The gesture was aborted.
    Cancel,
    /// A touch happened outside the window.
    Outside,
    /// A pointer moved while not down.
    HoverMove,
    /// A scroll wheel or similar moved.
    Scroll,
}

/// Device class a motion event came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Direct touch.
    Touchscreen,
    /// Mouse or other indirect pointer.
    Mouse,
    /// Trackball.
    Trackball,
    /// Touchpad.
    Touchpad,
    /// Joystick or gamepad axes.
    Joystick,
}

/// A touch, trackball, or generic motion event.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    /// Phase of the gesture.
    pub action: MotionAction,
    /// Position in window coordinates.
    pub position: Point,
    /// Originating device class.
    pub source: InputSource,
    /// Pointer identifier within the gesture.
    pub pointer_id: u32,
}

impl MotionEvent {
    /// Creates a touchscreen event for pointer `0`.
    #[must_use]
    pub fn touch(action: MotionAction, position: Point) -> Self {
        Self {
            action,
            position,
            source: InputSource::Touchscreen,
            pointer_id: 0,
        }
    }
}

/// An accessibility event being populated with window text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessibilityEvent {
    /// Substrate event type.
    pub event_type: u32,
    /// Text collected so far.
    pub text: Vec<String>,
}

/// Signal that started a search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchEvent {
    /// Device the search was started from.
    pub device_id: i32,
}
