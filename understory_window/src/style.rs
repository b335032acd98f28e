// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme-derived window defaults.
//!
//! This crate does not resolve themes. A [`WindowContext`] supplies the
//! default feature set and, on first request, a resolved [`WindowStyle`].
//! Windows only consume those values; see
//! [`AttributeState::apply_style_defaults`](crate::AttributeState::apply_style_defaults)
//! for how they interact with explicit client settings.

use alloc::boxed::Box;
use core::fmt;

use crate::attributes::{PixelFormat, SoftInputMode};
use crate::feature::FeatureSet;
use crate::host::WindowManager;

/// Resolved theme attributes that affect window defaults.
///
/// Use [`WindowStyleBuilder`] to construct one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowStyle {
    /// Default surface format.
    pub window_format: PixelFormat,
    /// Default dim amount behind the window.
    pub dim_amount: f32,
    /// Default soft input behavior.
    pub soft_input_mode: SoftInputMode,
    /// Whether touching outside closes the window by default.
    pub close_on_touch_outside: bool,
    /// Whether the theme describes a floating (dialog-like) window.
    pub is_floating: bool,
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self {
            window_format: PixelFormat::Opaque,
            dim_amount: 0.6,
            soft_input_mode: SoftInputMode::UNSPECIFIED,
            close_on_touch_outside: false,
            is_floating: false,
        }
    }
}

/// Builder for [`WindowStyle`].
///
/// # Example
///
/// ```rust
/// use understory_window::{PixelFormat, WindowStyleBuilder};
///
/// let dialog = WindowStyleBuilder::new()
///     .floating(true)
///     .close_on_touch_outside(true)
///     .window_format(PixelFormat::Translucent)
///     .build();
///
/// assert!(dialog.is_floating);
/// assert_eq!(dialog.window_format, PixelFormat::Translucent);
/// ```
#[derive(Clone, Debug, Default)]
pub struct WindowStyleBuilder {
    style: WindowStyle,
}

impl WindowStyleBuilder {
    /// Starts from [`WindowStyle::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default surface format.
    #[must_use]
    pub fn window_format(mut self, format: PixelFormat) -> Self {
        self.style.window_format = format;
        self
    }

    /// Sets the default dim amount.
    #[must_use]
    pub fn dim_amount(mut self, amount: f32) -> Self {
        self.style.dim_amount = amount;
        self
    }

    /// Sets the default soft input behavior.
    #[must_use]
    pub fn soft_input_mode(mut self, mode: SoftInputMode) -> Self {
        self.style.soft_input_mode = mode;
        self
    }

    /// Sets whether touching outside closes the window.
    #[must_use]
    pub fn close_on_touch_outside(mut self, close: bool) -> Self {
        self.style.close_on_touch_outside = close;
        self
    }

    /// Marks the style as floating.
    #[must_use]
    pub fn floating(mut self, floating: bool) -> Self {
        self.style.is_floating = floating;
        self
    }

    /// Finishes the style.
    #[must_use]
    pub fn build(self) -> WindowStyle {
        self.style
    }
}

/// The environment a window is created in.
///
/// A context is shared by every window created from it and must be safe to
/// query from any thread.
pub trait WindowContext: fmt::Debug + Send + Sync {
    /// Features enabled on a fresh window.
    fn default_features(&self) -> FeatureSet {
        FeatureSet::DEFAULT
    }

    /// Resolves the theme attributes for windows of this context.
    ///
    /// Called at most once per window.
    fn resolve_window_style(&self) -> WindowStyle;

    /// Returns the context's window manager service, used when a window is
    /// bound without an explicit manager.
    fn window_manager(&self) -> Option<Box<dyn WindowManager>> {
        None
    }
}

/// A context with fixed defaults.
///
/// Useful for tests and for embedders that resolve themes up front.
#[derive(Clone, Debug, Default)]
pub struct StaticContext {
    features: FeatureSet,
    style: WindowStyle,
}

impl StaticContext {
    /// Creates a context with the given defaults.
    #[must_use]
    pub fn new(features: FeatureSet, style: WindowStyle) -> Self {
        Self { features, style }
    }
}

impl WindowContext for StaticContext {
    fn default_features(&self) -> FeatureSet {
        self.features
    }

    fn resolve_window_style(&self) -> WindowStyle {
        self.style.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_only_what_it_touches() {
        let style = WindowStyleBuilder::new().dim_amount(0.2).build();
        assert_eq!(style.dim_amount, 0.2);
        assert_eq!(style.window_format, WindowStyle::default().window_format);
        assert!(!style.is_floating);
    }

    #[test]
    fn static_context_reports_its_defaults() {
        let style = WindowStyleBuilder::new().floating(true).build();
        let cx = StaticContext::new(FeatureSet::NO_TITLE, style.clone());
        assert_eq!(cx.default_features(), FeatureSet::NO_TITLE);
        assert_eq!(cx.resolve_window_style(), style);
        assert!(cx.window_manager().is_none());
    }
}
