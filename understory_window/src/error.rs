// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by windows and the window tree.

use crate::id::WindowId;

/// Error returned by [`Window`](crate::Window) and
/// [`WindowTree`](crate::WindowTree) operations.
///
/// Rejected feature requests are not errors; they are reported as `false`
/// from the request itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// The window was destroyed and no longer accepts changes.
    #[error("window has been destroyed")]
    Destroyed,
    /// The id is stale or belongs to another tree.
    #[error("unknown window {0:?}")]
    UnknownWindow(WindowId),
    /// A window cannot be its own container.
    #[error("a window cannot contain itself")]
    SelfContainment,
    /// The window has no window manager bound.
    #[error("no window manager is bound")]
    NoWindowManager,
    /// The operation needs an attached decor surface.
    #[error("no decor surface is attached")]
    NoDecorSurface,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_condition() {
        assert_eq!(WindowError::Destroyed.to_string(), "window has been destroyed");
        assert_eq!(
            WindowError::UnknownWindow(WindowId::new(3, 2)).to_string(),
            "unknown window WindowId(3, 2)"
        );
        assert_eq!(
            WindowError::NoDecorSurface.to_string(),
            "no decor surface is attached"
        );
    }
}
