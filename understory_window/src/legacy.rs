// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legacy constants kept for substrates that still exchange them.
//!
//! The progress values belong to the title-bar progress indicator, which no
//! longer exists. They are kept so numeric values can still be recognized.

/// Show the progress indicator.
#[deprecated(note = "title-bar progress indicators are no longer drawn")]
pub const PROGRESS_VISIBILITY_ON: i32 = -1;

/// Hide the progress indicator.
#[deprecated(note = "title-bar progress indicators are no longer drawn")]
pub const PROGRESS_VISIBILITY_OFF: i32 = -2;

/// Turn indeterminate mode on.
#[deprecated(note = "title-bar progress indicators are no longer drawn")]
pub const PROGRESS_INDETERMINATE_ON: i32 = -3;

/// Turn indeterminate mode off.
#[deprecated(note = "title-bar progress indicators are no longer drawn")]
pub const PROGRESS_INDETERMINATE_OFF: i32 = -4;

/// Lowest primary progress value.
#[deprecated(note = "title-bar progress indicators are no longer drawn")]
pub const PROGRESS_START: i32 = 0;

/// Highest primary progress value.
#[deprecated(note = "title-bar progress indicators are no longer drawn")]
pub const PROGRESS_END: i32 = 10000;

/// Lowest secondary progress value.
#[deprecated(note = "title-bar progress indicators are no longer drawn")]
pub const PROGRESS_SECONDARY_START: i32 = 20000;

/// Highest secondary progress value.
#[deprecated(note = "title-bar progress indicators are no longer drawn")]
pub const PROGRESS_SECONDARY_END: i32 = 30000;

/// Transition name of the status bar background view.
pub const STATUS_BAR_BACKGROUND_TRANSITION_NAME: &str = "android:status:background";

/// Transition name of the navigation bar background view.
pub const NAVIGATION_BAR_BACKGROUND_TRANSITION_NAME: &str = "android:navigation:background";
