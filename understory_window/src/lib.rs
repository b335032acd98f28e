// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_window --heading-base-level=0

//! Understory Window: window policy and attribute negotiation.
//!
//! ## Overview
//!
//! This crate sits between the window configuration an application asks for
//! and the windowing substrate that owns on-screen surfaces. It does not draw,
//! lay out views, or run an event loop. It keeps the policy state of each
//! window and the rules that tie it together:
//!
//! - [`FeatureRegistry`]: optional chrome and behavior ([`Feature`]), with
//!   conflict resolution between title-area features.
//! - [`AttributeState`]: the [`AttributeRecord`] handed to the substrate, plus
//!   which fields were set explicitly so theme defaults never override them.
//! - [`WindowTree`]: container and active-child links between windows, using
//!   generational [`WindowId`]s.
//! - [`adjust_for_sub_window`]: fills in the token and title of dependent
//!   windows before they are created.
//! - [`CallbackDispatcher`]: forwards input and lifecycle events to a single
//!   [`WindowCallback`].
//!
//! [`Window`] aggregates all of the above for one window, together with its
//! auxiliary listeners (dismissal, controller, decor, caption area, frame
//! metrics).
//!
//! ## Collaborators
//!
//! The substrate plugs in through traits:
//!
//! - [`WindowContext`] supplies default features and the theme
//!   [`WindowStyle`]; it may also provide a [`WindowManager`].
//! - [`WindowManager`] receives dependent windows from [`WindowTree::add_window`].
//! - [`DecorSurface`] is the window's root surface; its token identifies
//!   sub-windows.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use understory_window::{
//!     AttributeRecord, Feature, StaticContext, Token, Window, WindowTree, WindowType,
//! };
//!
//! let cx = Arc::new(StaticContext::default());
//! let mut tree = WindowTree::new();
//!
//! let host = tree.insert(Window::new(cx.clone()));
//! let embedded = tree.insert(Window::new(cx));
//!
//! tree.get_mut(embedded)
//!     .unwrap()
//!     .set_window_manager(None, Some(Token::new(42)), "demo", false)
//!     .unwrap();
//! tree.set_container(embedded, Some(host)).unwrap();
//!
//! // Contained windows never show a title.
//! assert!(tree.get(embedded).unwrap().has_feature(Feature::NoTitle));
//!
//! // A panel owned by the embedded window gets a synthesized title.
//! let mut panel = AttributeRecord::with_type(WindowType::APPLICATION_SUB_PANEL);
//! tree.adjust_attributes(embedded, &mut panel).unwrap();
//! assert_eq!(panel.title, "SubPanel:demo");
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//! - `serde`: `Serialize`/`Deserialize` for styles, attribute records and
//!   flag sets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attributes;
mod callback;
mod derivation;
mod dispatch;
mod error;
mod event;
mod feature;
mod host;
mod id;
pub mod legacy;
mod listener;
mod menu;
mod style;
mod tree;
mod types;
mod window;

pub use attributes::{
    AttributeRecord, AttributeState, LayoutSize, PixelFormat, SoftInputAdjust, SoftInputMode,
    SoftInputState, WindowFlags,
};
pub use callback::{
    ActionModeCallback, BaseDispatch, InputCallback, NoBaseDispatch, PanelCallback,
    WindowCallback, WindowStateCallback,
};
pub use derivation::{ContainerIdentity, DerivationContext, adjust_for_sub_window};
pub use dispatch::CallbackDispatcher;
pub use error::WindowError;
pub use event::{
    AccessibilityEvent, InputSource, KeyAction, KeyEvent, Modifiers, MotionAction, MotionEvent,
    SearchEvent,
};
pub use feature::{FEATURE_MAX, Feature, FeatureRegistry, FeatureSet};
pub use host::{DecorSurface, WindowManager};
pub use id::WindowId;
pub use listener::{
    DecorCallback, DecorCaptionShade, FrameMetrics, FrameMetricsListenerId, OnFrameMetricsAvailable,
    OnRestrictedCaptionAreaChanged, OnWindowDismissed, OnWindowSwipeDismissed, SystemBarAppearance,
    WindowControllerCallback,
};
pub use menu::{
    ActionMode, ActionModeKind, KeyboardShortcutGroup, KeyboardShortcutInfo, Menu, MenuItem,
    ViewHandle,
};
pub use style::{StaticContext, WindowContext, WindowStyle, WindowStyleBuilder};
pub use tree::WindowTree;
pub use types::{Token, WindowClass, WindowType};
pub use window::Window;
