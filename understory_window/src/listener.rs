// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Auxiliary listeners a window notifies besides its main callback.
//!
//! Single-method listeners are implemented for matching closures, so most
//! registrations are one-liners:
//!
//! ```rust
//! use understory_window::OnWindowDismissed;
//!
//! let mut finished = None;
//! let mut listener = |finish_task: bool, _suppress: bool| finished = Some(finish_task);
//! listener.on_window_dismissed(true, false);
//! assert_eq!(finished, Some(true));
//! ```

use core::fmt;

use kurbo::Rect;

bitflags::bitflags! {
    /// Appearance of the system bars requested by the window.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SystemBarAppearance: u32 {
        /// Opaque status bar background.
        const OPAQUE_STATUS_BARS = 1 << 0;
        /// Opaque navigation bar background.
        const OPAQUE_NAVIGATION_BARS = 1 << 1;
        /// Dim the bars' foreground items.
        const LOW_PROFILE_BARS = 1 << 2;
        /// Dark status bar foreground for light backgrounds.
        const LIGHT_STATUS_BARS = 1 << 3;
        /// Dark navigation bar foreground for light backgrounds.
        const LIGHT_NAVIGATION_BARS = 1 << 4;
        /// Semi-transparent status bar background.
        const SEMI_TRANSPARENT_STATUS_BARS = 1 << 5;
        /// Semi-transparent navigation bar background.
        const SEMI_TRANSPARENT_NAVIGATION_BARS = 1 << 6;
    }
}

/// Color scheme of the decor caption controls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecorCaptionShade {
    /// Follow the window's theme.
    #[default]
    Auto,
    /// Light caption controls.
    Light,
    /// Dark caption controls.
    Dark,
}

/// Notified when the window is dismissed.
pub trait OnWindowDismissed {
    /// The window was dismissed.
    ///
    /// `finish_task` asks to finish the whole task rather than just this
    /// window; `suppress_window_transition` skips the exit transition.
    fn on_window_dismissed(&mut self, finish_task: bool, suppress_window_transition: bool);
}

impl<F: FnMut(bool, bool)> OnWindowDismissed for F {
    fn on_window_dismissed(&mut self, finish_task: bool, suppress_window_transition: bool) {
        self(finish_task, suppress_window_transition);
    }
}

/// Notified when the window is dismissed by a swipe.
pub trait OnWindowSwipeDismissed {
    /// The swipe gesture completed.
    fn on_window_swipe_dismissed(&mut self);
}

impl<F: FnMut()> OnWindowSwipeDismissed for F {
    fn on_window_swipe_dismissed(&mut self) {
        self();
    }
}

/// Requests from the window to the component that controls its task.
pub trait WindowControllerCallback {
    /// Toggles between freeform and fullscreen windowing modes.
    fn toggle_freeform_windowing_mode(&mut self);

    /// Enters picture-in-picture if the component supports it.
    fn enter_picture_in_picture_mode_if_possible(&mut self);

    /// Returns `true` if the window's component is the root of its task.
    fn is_task_root(&self) -> bool;

    /// Pushes a new status bar color (ARGB).
    fn update_status_bar_color(&mut self, color: u32);

    /// Pushes a new navigation bar color (ARGB).
    fn update_navigation_bar_color(&mut self, color: u32);

    /// Pushes a new system bar appearance.
    fn update_system_bars_appearance(&mut self, appearance: SystemBarAppearance);
}

/// The decor surface's side of system bar drawing.
pub trait DecorCallback {
    /// The requested system bar appearance changed.
    fn on_system_bar_appearance_changed(&mut self, appearance: SystemBarAppearance);

    /// Negotiates who draws the legacy navigation bar background.
    ///
    /// Returns `true` if the callback draws it; `false` leaves it to the decor.
    fn on_draw_legacy_navigation_bar_background_changed(&mut self, draw: bool) -> bool;
}

/// Notified when the area available for caption content changes.
pub trait OnRestrictedCaptionAreaChanged {
    /// `area` is relative to the top-level view.
    fn on_restricted_caption_area_changed(&mut self, area: Rect);
}

impl<F: FnMut(Rect)> OnRestrictedCaptionAreaChanged for F {
    fn on_restricted_caption_area_changed(&mut self, area: Rect) {
        self(area);
    }
}

/// Timing of one rendered frame, in nanoseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameMetrics {
    /// Time spent handling input.
    pub input_handling: u64,
    /// Time spent running animations.
    pub animation: u64,
    /// Time spent in layout and measure.
    pub layout_measure: u64,
    /// Time spent recording draw commands.
    pub draw: u64,
    /// Time spent syncing to the render thread.
    pub sync: u64,
    /// Time spent issuing draw commands to the GPU.
    pub command_issue: u64,
    /// Time spent swapping buffers.
    pub swap_buffers: u64,
    /// Total duration of the frame.
    pub total: u64,
    /// Whether this is the first frame drawn after the window appeared.
    pub first_draw_frame: bool,
}

/// Notified for each rendered frame.
pub trait OnFrameMetricsAvailable {
    /// `metrics` is lent for the duration of the call and reused for the next
    /// frame; copy it to keep it. `dropped_reports` counts the reports lost
    /// since the previous call.
    fn on_frame_metrics_available(&mut self, metrics: &FrameMetrics, dropped_reports: u32);
}

impl<F: FnMut(&FrameMetrics, u32)> OnFrameMetricsAvailable for F {
    fn on_frame_metrics_available(&mut self, metrics: &FrameMetrics, dropped_reports: u32) {
        self(metrics, dropped_reports);
    }
}

/// Handle to a registered [`OnFrameMetricsAvailable`] listener.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FrameMetricsListenerId(pub(crate) u32);

impl fmt::Debug for FrameMetricsListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameMetricsListenerId({})", self.0)
    }
}
