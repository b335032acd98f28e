// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity tokens and window type classification.

use core::fmt;

/// Opaque identity the windowing substrate uses to group and scope a
/// window's surface.
///
/// Tokens are compared by value only; this crate never interprets them.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token(u64);

impl Token {
    /// Wraps a raw identity value.
    #[must_use]
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identity value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.0).finish()
    }
}

/// Which of the three type ranges a [`WindowType`] falls into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WindowClass {
    /// Attached to and positioned relative to another window's decor surface.
    SubWindow,
    /// Independent of any owning application's lifecycle.
    SystemWindow,
    /// A regular application window, or anything outside the other ranges.
    Application,
}

/// Integer window type classification.
///
/// Values in [`FIRST_SUB_WINDOW`](Self::FIRST_SUB_WINDOW)`..=`[`LAST_SUB_WINDOW`](Self::LAST_SUB_WINDOW)
/// are sub-windows, values in
/// [`FIRST_SYSTEM_WINDOW`](Self::FIRST_SYSTEM_WINDOW)`..=`[`LAST_SYSTEM_WINDOW`](Self::LAST_SYSTEM_WINDOW)
/// are system windows, and everything else is treated as an application
/// window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowType(pub i32);

impl WindowType {
    /// Start of the application window range.
    pub const FIRST_APPLICATION_WINDOW: Self = Self(1);
    /// Base window of an application; all other application windows sit on top.
    pub const BASE_APPLICATION: Self = Self(1);
    /// A normal application window.
    pub const APPLICATION: Self = Self(2);
    /// Placeholder shown while an application is starting.
    pub const APPLICATION_STARTING: Self = Self(3);
    /// Like [`APPLICATION`](Self::APPLICATION), but waits for the app to draw first.
    pub const DRAWN_APPLICATION: Self = Self(4);
    /// End of the application window range.
    pub const LAST_APPLICATION_WINDOW: Self = Self(99);

    /// Start of the sub-window range.
    pub const FIRST_SUB_WINDOW: Self = Self(1000);
    /// A panel on top of an application window.
    pub const APPLICATION_PANEL: Self = Self::FIRST_SUB_WINDOW;
    /// Media (video) displayed behind its attached window.
    pub const APPLICATION_MEDIA: Self = Self(1001);
    /// A sub-panel on top of an application panel.
    pub const APPLICATION_SUB_PANEL: Self = Self(1002);
    /// A dialog laid out like a top-level window but attached to its owner.
    pub const APPLICATION_ATTACHED_DIALOG: Self = Self(1003);
    /// An overlay drawn over media windows.
    pub const APPLICATION_MEDIA_OVERLAY: Self = Self(1004);
    /// Above sub-panels.
    pub const APPLICATION_ABOVE_SUB_PANEL: Self = Self(1005);
    /// End of the sub-window range.
    pub const LAST_SUB_WINDOW: Self = Self(1999);

    /// Start of the system window range.
    pub const FIRST_SYSTEM_WINDOW: Self = Self(2000);
    /// Transient notification.
    pub const TOAST: Self = Self(2005);
    /// Application overlay above all activity windows.
    pub const APPLICATION_OVERLAY: Self = Self(2038);
    /// End of the system window range.
    pub const LAST_SYSTEM_WINDOW: Self = Self(2999);

    /// Returns the raw type value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Classifies this type into exactly one range.
    #[must_use]
    pub const fn class(self) -> WindowClass {
        if self.0 >= Self::FIRST_SUB_WINDOW.0 && self.0 <= Self::LAST_SUB_WINDOW.0 {
            WindowClass::SubWindow
        } else if self.0 >= Self::FIRST_SYSTEM_WINDOW.0 && self.0 <= Self::LAST_SYSTEM_WINDOW.0 {
            WindowClass::SystemWindow
        } else {
            WindowClass::Application
        }
    }

    /// Short title prefix for well-known sub-window types.
    #[must_use]
    pub const fn sub_window_mnemonic(self) -> Option<&'static str> {
        match self {
            Self::APPLICATION_MEDIA => Some("Media"),
            Self::APPLICATION_MEDIA_OVERLAY => Some("MediaOvr"),
            Self::APPLICATION_PANEL => Some("Panel"),
            Self::APPLICATION_SUB_PANEL => Some("SubPanel"),
            Self::APPLICATION_ABOVE_SUB_PANEL => Some("AboveSubPanel"),
            Self::APPLICATION_ATTACHED_DIALOG => Some("AtchDlg"),
            _ => None,
        }
    }
}

impl Default for WindowType {
    fn default() -> Self {
        Self::APPLICATION
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_boundaries_classify_exactly_once() {
        assert_eq!(WindowType(999).class(), WindowClass::Application);
        assert_eq!(WindowType(1000).class(), WindowClass::SubWindow);
        assert_eq!(WindowType(1999).class(), WindowClass::SubWindow);
        assert_eq!(WindowType(2000).class(), WindowClass::SystemWindow);
        assert_eq!(WindowType(2999).class(), WindowClass::SystemWindow);
        assert_eq!(WindowType(3000).class(), WindowClass::Application);
        assert_eq!(WindowType(-7).class(), WindowClass::Application);
        assert_eq!(WindowType::default().class(), WindowClass::Application);
    }

    #[test]
    fn mnemonics_cover_the_closed_table_only() {
        assert_eq!(WindowType::APPLICATION_PANEL.sub_window_mnemonic(), Some("Panel"));
        assert_eq!(
            WindowType::APPLICATION_ATTACHED_DIALOG.sub_window_mnemonic(),
            Some("AtchDlg")
        );
        assert_eq!(WindowType(1500).sub_window_mnemonic(), None);
        assert_eq!(WindowType::TOAST.sub_window_mnemonic(), None);
    }
}
