// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators owned by the windowing substrate.

use core::fmt;

use crate::attributes::AttributeRecord;
use crate::types::Token;

/// The service that owns on-screen surfaces.
///
/// Binding a manager to a window does not make the window visible; the
/// window only uses it to add dependent windows such as panels.
pub trait WindowManager: fmt::Debug {
    /// Adds a window described by `attrs`.
    ///
    /// `attrs` has already been through sub-window derivation.
    fn add_window(&mut self, attrs: &AttributeRecord);
}

/// The root surface a window materializes.
pub trait DecorSurface: fmt::Debug {
    /// Identity token of the surface, once it is attached to the substrate.
    fn window_token(&self) -> Option<Token>;
}
