// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window attribute records and the state that tracks how they were set.
//!
//! [`AttributeRecord`] is the plain description handed to the windowing
//! substrate. [`AttributeState`] wraps one record and remembers which fields
//! the client set explicitly, so a theme default applied later does not
//! silently replace them. This mirrors the local-value versus default layering
//! of a property store: an explicit value always beats a theme value.
//!
//! Forced flags sit above both. They are OR'd into the flags whenever the
//! record is [materialized](AttributeState::materialize), regardless of what
//! the client requested.
//!
//! ```rust
//! use understory_window::{AttributeState, PixelFormat, WindowFlags, WindowStyleBuilder};
//!
//! let mut state = AttributeState::new();
//! state.set_dim_amount(0.25);
//! state.force_flags(WindowFlags::HARDWARE_ACCELERATED);
//!
//! let theme = WindowStyleBuilder::new()
//!     .dim_amount(0.6)
//!     .window_format(PixelFormat::Translucent)
//!     .build();
//! state.apply_style_defaults(&theme);
//!
//! // The explicit dim amount survives; the format came from the theme.
//! assert_eq!(state.attributes().dim_amount, 0.25);
//! assert_eq!(state.attributes().format, PixelFormat::Translucent);
//! assert!(state.materialize().flags.contains(WindowFlags::HARDWARE_ACCELERATED));
//! ```

use alloc::string::String;

use crate::style::WindowStyle;
use crate::types::{Token, WindowType};

bitflags::bitflags! {
    /// Layout and behavior flags of a window.
    ///
    /// Bits this crate does not name are preserved as-is.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WindowFlags: u32 {
        /// Everything behind this window is dimmed by the dim amount.
        const DIM_BEHIND = 0x0000_0002;
        /// The window never receives key input focus.
        const NOT_FOCUSABLE = 0x0000_0008;
        /// The window never receives touch events.
        const NOT_TOUCHABLE = 0x0000_0010;
        /// Pointer events outside the window go to windows behind it.
        const NOT_TOUCH_MODAL = 0x0000_0020;
        /// Keep the screen on while the window is visible.
        const KEEP_SCREEN_ON = 0x0000_0080;
        /// Place the window within the entire screen.
        const LAYOUT_IN_SCREEN = 0x0000_0100;
        /// Allow the window to extend outside the screen.
        const LAYOUT_NO_LIMITS = 0x0000_0200;
        /// Hide screen decorations while the window is shown.
        const FULLSCREEN = 0x0000_0400;
        /// Treat content as secure; keep it out of screenshots.
        const SECURE = 0x0000_2000;
        /// Invert focusability with respect to the input method.
        const ALT_FOCUSABLE_IM = 0x0002_0000;
        /// Receive an outside event for touches outside the window.
        const WATCH_OUTSIDE_TOUCH = 0x0004_0000;
        /// Show the window above the lock screen.
        const SHOW_WHEN_LOCKED = 0x0008_0000;
        /// Render the window with hardware acceleration.
        const HARDWARE_ACCELERATED = 0x0100_0000;
        /// Request a translucent status bar.
        const TRANSLUCENT_STATUS = 0x0400_0000;
        /// The window draws the system bar backgrounds itself.
        const DRAWS_SYSTEM_BAR_BACKGROUNDS = 0x8000_0000;

        const _ = !0;
    }
}

/// Pixel format of the window surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelFormat {
    /// No explicit format; resolves to the window's default format.
    #[default]
    Unknown,
    /// Opaque surface.
    Opaque,
    /// Surface supporting binary transparency.
    Transparent,
    /// Surface supporting full per-pixel alpha.
    Translucent,
    /// 8 bits per channel with alpha.
    Rgba8888,
    /// 8 bits per channel, alpha ignored.
    Rgbx8888,
    /// 8 bits per channel, no alpha.
    Rgb888,
    /// 16-bit packed RGB.
    Rgb565,
}

/// Visibility request for the soft input area when the window gains focus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoftInputState {
    /// No preference.
    #[default]
    Unspecified,
    /// Keep whatever state the soft input area is in.
    Unchanged,
    /// Hide when the user navigates forward to the window.
    Hidden,
    /// Always hide when the window gains focus.
    AlwaysHidden,
    /// Show when the user navigates forward to the window.
    Visible,
    /// Always show when the window gains focus.
    AlwaysVisible,
}

/// How the window adjusts when the soft input area is shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoftInputAdjust {
    /// Let the substrate pick.
    #[default]
    Unspecified,
    /// Resize the window to make room.
    Resize,
    /// Pan the window so the focused area stays visible.
    Pan,
    /// Do nothing.
    Nothing,
}

/// Soft input behavior of a window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoftInputMode {
    /// Visibility request.
    pub state: SoftInputState,
    /// Adjustment policy.
    pub adjust: SoftInputAdjust,
}

impl SoftInputMode {
    /// No preference for either visibility or adjustment.
    pub const UNSPECIFIED: Self = Self {
        state: SoftInputState::Unspecified,
        adjust: SoftInputAdjust::Unspecified,
    };

    /// Creates a mode from its two halves.
    #[must_use]
    pub const fn new(state: SoftInputState, adjust: SoftInputAdjust) -> Self {
        Self { state, adjust }
    }

    /// Returns `true` if neither half expresses a preference.
    #[must_use]
    pub fn is_unspecified(self) -> bool {
        self == Self::UNSPECIFIED
    }
}

/// Requested width or height of a window.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutSize {
    /// As large as the parent allows.
    #[default]
    MatchParent,
    /// Just large enough for the content.
    WrapContent,
    /// An exact size in pixels.
    Exact(u32),
}

/// Layout and attribute description of a window.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeRecord {
    /// Type classification; see [`WindowType::class`].
    pub window_type: WindowType,
    /// Identity token, filled in by derivation when absent.
    pub token: Option<Token>,
    /// Title; empty means absent.
    pub title: String,
    /// Layout and behavior flags.
    pub flags: WindowFlags,
    /// Surface pixel format.
    pub format: PixelFormat,
    /// Dim applied behind the window when [`WindowFlags::DIM_BEHIND`] is set,
    /// from `0.0` (none) to `1.0` (fully dimmed).
    pub dim_amount: f32,
    /// Soft input behavior.
    pub soft_input_mode: SoftInputMode,
    /// Requested width.
    pub width: LayoutSize,
    /// Requested height.
    pub height: LayoutSize,
}

impl AttributeRecord {
    /// Creates a record of the given type with every other field defaulted.
    #[must_use]
    pub fn with_type(window_type: WindowType) -> Self {
        Self {
            window_type,
            ..Self::default()
        }
    }

    /// Returns `true` if the title is non-empty.
    #[must_use]
    #[inline]
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

impl Default for AttributeRecord {
    fn default() -> Self {
        Self {
            window_type: WindowType::APPLICATION,
            token: None,
            title: String::new(),
            flags: WindowFlags::empty(),
            format: PixelFormat::Opaque,
            dim_amount: 1.0,
            soft_input_mode: SoftInputMode::UNSPECIFIED,
            width: LayoutSize::MatchParent,
            height: LayoutSize::MatchParent,
        }
    }
}

/// An [`AttributeRecord`] plus what the client set explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeState {
    attrs: AttributeRecord,
    have_window_format: bool,
    have_dim_amount: bool,
    has_soft_input_mode: bool,
    default_window_format: PixelFormat,
    forced_flags: WindowFlags,
    close_on_touch_outside: bool,
    set_close_on_touch_outside: bool,
}

impl AttributeState {
    /// Creates a state around a default record.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attrs: AttributeRecord::default(),
            have_window_format: false,
            have_dim_amount: false,
            has_soft_input_mode: false,
            default_window_format: PixelFormat::Opaque,
            forced_flags: WindowFlags::empty(),
            close_on_touch_outside: false,
            set_close_on_touch_outside: false,
        }
    }

    /// Returns the record as the client configured it, without forced flags.
    #[must_use]
    #[inline]
    pub fn attributes(&self) -> &AttributeRecord {
        &self.attrs
    }

    /// Returns a copy of the record with the forced flags applied.
    ///
    /// This is the record to hand to the windowing substrate.
    #[must_use]
    pub fn materialize(&self) -> AttributeRecord {
        let mut attrs = self.attrs.clone();
        attrs.flags |= self.forced_flags;
        attrs
    }

    /// Replaces the whole record.
    ///
    /// This is a bulk copy: the explicitly-set markers are left as they are.
    pub fn replace(&mut self, attrs: AttributeRecord) {
        self.attrs = attrs;
    }

    /// Sets the window type.
    pub fn set_type(&mut self, window_type: WindowType) {
        self.attrs.window_type = window_type;
    }

    /// Sets the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.attrs.title = title.into();
    }

    /// Sets the requested size.
    pub fn set_layout(&mut self, width: LayoutSize, height: LayoutSize) {
        self.attrs.width = width;
        self.attrs.height = height;
    }

    /// Replaces the flags selected by `mask` with the matching bits of `flags`.
    pub fn set_flags(&mut self, flags: WindowFlags, mask: WindowFlags) {
        self.attrs.flags = (self.attrs.flags - mask) | (flags & mask);
    }

    /// Sets `flags`.
    pub fn add_flags(&mut self, flags: WindowFlags) {
        self.set_flags(flags, flags);
    }

    /// Clears `flags`.
    ///
    /// Forced flags still reappear in [`materialize`](Self::materialize).
    pub fn clear_flags(&mut self, flags: WindowFlags) {
        self.set_flags(WindowFlags::empty(), flags);
    }

    /// Adds flags that are OR'd into every materialized record.
    pub fn force_flags(&mut self, flags: WindowFlags) {
        self.forced_flags |= flags;
    }

    /// Returns the forced flags.
    #[must_use]
    #[inline]
    pub fn forced_flags(&self) -> WindowFlags {
        self.forced_flags
    }

    /// Sets the surface format.
    ///
    /// [`PixelFormat::Unknown`] restores the default window format and allows
    /// theme defaults to apply again.
    pub fn set_format(&mut self, format: PixelFormat) {
        if format == PixelFormat::Unknown {
            self.attrs.format = self.default_window_format;
            self.have_window_format = false;
        } else {
            self.attrs.format = format;
            self.have_window_format = true;
        }
    }

    /// Sets the format used when none was set explicitly.
    pub fn set_default_window_format(&mut self, format: PixelFormat) {
        self.default_window_format = format;
        if !self.have_window_format {
            self.attrs.format = format;
        }
    }

    /// Returns the default window format.
    #[must_use]
    #[inline]
    pub fn default_window_format(&self) -> PixelFormat {
        self.default_window_format
    }

    /// Sets the dim amount, clamped to `0.0..=1.0`.
    pub fn set_dim_amount(&mut self, amount: f32) {
        self.attrs.dim_amount = amount.clamp(0.0, 1.0);
        self.have_dim_amount = true;
    }

    /// Sets the soft input mode.
    ///
    /// [`SoftInputMode::UNSPECIFIED`] allows theme defaults to apply again.
    pub fn set_soft_input_mode(&mut self, mode: SoftInputMode) {
        self.attrs.soft_input_mode = mode;
        self.has_soft_input_mode = !mode.is_unspecified();
    }

    /// Returns `true` if the format was set explicitly.
    #[must_use]
    #[inline]
    pub fn have_window_format(&self) -> bool {
        self.have_window_format
    }

    /// Returns `true` if the dim amount was set explicitly.
    #[must_use]
    #[inline]
    pub fn have_dim_amount(&self) -> bool {
        self.have_dim_amount
    }

    /// Returns `true` if the soft input mode was set explicitly.
    #[must_use]
    #[inline]
    pub fn has_soft_input_mode(&self) -> bool {
        self.has_soft_input_mode
    }

    /// Sets whether touching outside the window closes it.
    pub fn set_close_on_touch_outside(&mut self, close: bool) {
        self.close_on_touch_outside = close;
        self.set_close_on_touch_outside = true;
    }

    /// Like [`set_close_on_touch_outside`](Self::set_close_on_touch_outside),
    /// but only if it was never set explicitly.
    pub fn set_close_on_touch_outside_if_not_set(&mut self, close: bool) {
        if !self.set_close_on_touch_outside {
            self.close_on_touch_outside = close;
            self.set_close_on_touch_outside = true;
        }
    }

    /// Returns whether touching outside the window closes it.
    #[must_use]
    #[inline]
    pub fn close_on_touch_outside(&self) -> bool {
        self.close_on_touch_outside
    }

    /// Applies theme values to every field the client has not set explicitly.
    pub fn apply_style_defaults(&mut self, style: &WindowStyle) {
        if !self.have_window_format {
            self.default_window_format = style.window_format;
            self.attrs.format = style.window_format;
        }
        if !self.have_dim_amount {
            self.attrs.dim_amount = style.dim_amount;
        }
        if !self.has_soft_input_mode {
            self.attrs.soft_input_mode = style.soft_input_mode;
        }
        if !self.set_close_on_touch_outside {
            self.close_on_touch_outside = style.close_on_touch_outside;
        }
    }
}

impl Default for AttributeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::WindowStyleBuilder;

    fn theme() -> WindowStyle {
        WindowStyleBuilder::new()
            .window_format(PixelFormat::Translucent)
            .dim_amount(0.5)
            .soft_input_mode(SoftInputMode::new(
                SoftInputState::AlwaysHidden,
                SoftInputAdjust::Pan,
            ))
            .close_on_touch_outside(true)
            .build()
    }

    #[test]
    fn setters_are_visible_immediately_and_mark_fields() {
        let mut state = AttributeState::new();
        assert!(!state.have_dim_amount());
        state.set_dim_amount(0.3);
        assert_eq!(state.attributes().dim_amount, 0.3);
        assert!(state.have_dim_amount());

        state.set_format(PixelFormat::Rgb565);
        assert_eq!(state.attributes().format, PixelFormat::Rgb565);
        assert!(state.have_window_format());

        let mode = SoftInputMode::new(SoftInputState::Visible, SoftInputAdjust::Resize);
        state.set_soft_input_mode(mode);
        assert_eq!(state.attributes().soft_input_mode, mode);
        assert!(state.has_soft_input_mode());
    }

    #[test]
    fn theme_defaults_fill_only_unset_fields() {
        let mut state = AttributeState::new();
        state.set_dim_amount(0.1);
        state.apply_style_defaults(&theme());

        assert_eq!(state.attributes().dim_amount, 0.1);
        assert_eq!(state.attributes().format, PixelFormat::Translucent);
        assert_eq!(
            state.attributes().soft_input_mode.state,
            SoftInputState::AlwaysHidden
        );
        assert!(state.close_on_touch_outside());
    }

    #[test]
    fn unknown_format_and_unspecified_mode_reopen_theme_defaults() {
        let mut state = AttributeState::new();
        state.set_format(PixelFormat::Rgb888);
        state.set_format(PixelFormat::Unknown);
        assert!(!state.have_window_format());
        assert_eq!(state.attributes().format, PixelFormat::Opaque);

        state.set_soft_input_mode(SoftInputMode::UNSPECIFIED);
        assert!(!state.has_soft_input_mode());

        state.apply_style_defaults(&theme());
        assert_eq!(state.attributes().format, PixelFormat::Translucent);
        assert_eq!(state.attributes().soft_input_mode.adjust, SoftInputAdjust::Pan);
    }

    #[test]
    fn default_format_applies_only_without_explicit_format() {
        let mut state = AttributeState::new();
        state.set_default_window_format(PixelFormat::Transparent);
        assert_eq!(state.attributes().format, PixelFormat::Transparent);

        state.set_format(PixelFormat::Rgba8888);
        state.set_default_window_format(PixelFormat::Opaque);
        assert_eq!(state.attributes().format, PixelFormat::Rgba8888);
        assert_eq!(state.default_window_format(), PixelFormat::Opaque);
    }

    #[test]
    fn forced_flags_survive_client_clears() {
        let mut state = AttributeState::new();
        state.force_flags(WindowFlags::HARDWARE_ACCELERATED);
        state.add_flags(WindowFlags::HARDWARE_ACCELERATED | WindowFlags::SECURE);
        state.clear_flags(WindowFlags::HARDWARE_ACCELERATED);

        assert!(!state.attributes().flags.contains(WindowFlags::HARDWARE_ACCELERATED));
        let materialized = state.materialize();
        assert!(materialized.flags.contains(WindowFlags::HARDWARE_ACCELERATED));
        assert!(materialized.flags.contains(WindowFlags::SECURE));
    }

    #[test]
    fn set_flags_touches_only_the_mask() {
        let mut state = AttributeState::new();
        state.add_flags(WindowFlags::KEEP_SCREEN_ON | WindowFlags::FULLSCREEN);
        state.set_flags(WindowFlags::DIM_BEHIND, WindowFlags::DIM_BEHIND | WindowFlags::FULLSCREEN);
        assert_eq!(
            state.attributes().flags,
            WindowFlags::KEEP_SCREEN_ON | WindowFlags::DIM_BEHIND
        );
    }

    #[test]
    fn unnamed_flag_bits_are_preserved() {
        let mut state = AttributeState::new();
        state.add_flags(WindowFlags::from_bits_retain(0x0000_0001));
        assert_eq!(state.attributes().flags.bits(), 1);
    }

    #[test]
    fn close_on_touch_if_not_set_respects_explicit_choice() {
        let mut state = AttributeState::new();
        state.set_close_on_touch_outside(false);
        state.set_close_on_touch_outside_if_not_set(true);
        assert!(!state.close_on_touch_outside());

        state.apply_style_defaults(&theme());
        assert!(!state.close_on_touch_outside());
    }

    #[test]
    fn replace_keeps_explicit_markers() {
        let mut state = AttributeState::new();
        state.set_dim_amount(0.2);
        state.replace(AttributeRecord::with_type(WindowType::APPLICATION_PANEL));
        assert!(state.have_dim_amount());
        assert_eq!(state.attributes().dim_amount, 1.0);
        assert_eq!(state.attributes().window_type, WindowType::APPLICATION_PANEL);
    }
}
