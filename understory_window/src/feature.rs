// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window features: optional chrome and behavior a window can opt into.
//!
//! A [`Feature`] is identified by a small numeric id in `0..=FEATURE_MAX`.
//! [`FeatureSet`] is the matching bitmask, and [`FeatureRegistry`] holds the
//! requested set for one window together with the subset this layer enforces
//! itself (the "local" features).
//!
//! ## Conflicts
//!
//! Some features cannot be shown together. A custom title replaces the whole
//! title area, so it is incompatible with every other title-area feature, and
//! "no title" is incompatible with the action bar. When a request conflicts
//! with features already set, the most recent request wins and the
//! conflicting bits are cleared. The boolean returned by
//! [`FeatureRegistry::request`] only says whether the requested feature ended
//! up set; re-read [`FeatureRegistry::features`] to see which bits survived.
//!
//! Features pinned by the layer itself (see [`FeatureRegistry::force_local`])
//! are never cleared by a conflicting request; such a request is rejected.
//!
//! ```rust
//! use understory_window::{Feature, FeatureRegistry, FeatureSet};
//!
//! let mut features = FeatureRegistry::new(FeatureSet::DEFAULT);
//! assert!(features.request_feature(Feature::ActionBar));
//!
//! // "No title" evicts the action bar.
//! assert!(features.request_feature(Feature::NoTitle));
//! assert!(!features.has(Feature::ActionBar));
//!
//! // Ids outside the valid range are rejected.
//! assert!(!features.request(42));
//! ```

use core::fmt;

/// Highest valid feature id.
pub const FEATURE_MAX: i32 = Feature::ActivityTransitions as i32;

/// A window feature.
///
/// The discriminants are the stable numeric feature ids shared with the
/// windowing substrate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Feature {
    /// The options panel. Enabled by default.
    OptionsPanel = 0,
    /// Turn off the title at the top of the window.
    NoTitle = 1,
    /// Progress indicator in the title area.
    ///
    /// Deprecated: the bit is still tracked but no chrome honors it.
    Progress = 2,
    /// Icon on the left side of the title bar.
    LeftIcon = 3,
    /// Icon on the right side of the title bar.
    RightIcon = 4,
    /// Indeterminate progress indicator in the title area.
    ///
    /// Deprecated: the bit is still tracked but no chrome honors it.
    IndeterminateProgress = 5,
    /// Context menus. Enabled by default.
    ContextMenu = 6,
    /// A custom title. Cannot be combined with other title features.
    CustomTitle = 7,
    /// An action bar in place of the title bar.
    ActionBar = 8,
    /// An action bar drawn over the window content instead of above it.
    ActionBarOverlay = 9,
    /// Let action modes overlay window content when there is no action bar.
    ActionModeOverlay = 10,
    /// An undecorated window dismissed by swiping from the left.
    ///
    /// Deprecated: swipe-to-dismiss no longer has any effect.
    SwipeToDismiss = 11,
    /// Animate content changes with transitions.
    ContentTransitions = 12,
    /// Run transitions between activities.
    ActivityTransitions = 13,
}

impl Feature {
    /// Every feature, in id order.
    pub const ALL: [Self; 14] = [
        Self::OptionsPanel,
        Self::NoTitle,
        Self::Progress,
        Self::LeftIcon,
        Self::RightIcon,
        Self::IndeterminateProgress,
        Self::ContextMenu,
        Self::CustomTitle,
        Self::ActionBar,
        Self::ActionBarOverlay,
        Self::ActionModeOverlay,
        Self::SwipeToDismiss,
        Self::ContentTransitions,
        Self::ActivityTransitions,
    ];

    /// Looks up a feature by numeric id.
    ///
    /// Returns `None` for ids outside `0..=FEATURE_MAX`.
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    /// Returns the numeric id of this feature.
    #[must_use]
    #[inline]
    pub const fn id(self) -> i32 {
        self as i32
    }

    /// Returns the single-bit set for this feature.
    #[must_use]
    #[inline]
    pub const fn bit(self) -> FeatureSet {
        FeatureSet::from_bits_retain(1 << self as u32)
    }

    /// Returns `true` for features that are still tracked but no longer
    /// have any effect.
    #[must_use]
    pub const fn is_deprecated(self) -> bool {
        matches!(
            self,
            Self::Progress | Self::IndeterminateProgress | Self::SwipeToDismiss
        )
    }

    /// Returns the features that cannot be enabled together with this one.
    #[must_use]
    pub const fn conflicts(self) -> FeatureSet {
        match self {
            Self::CustomTitle => FeatureSet::TITLE_AREA,
            Self::NoTitle => FeatureSet::CUSTOM_TITLE.union(FeatureSet::ACTION_BAR),
            Self::ActionBar => FeatureSet::CUSTOM_TITLE.union(FeatureSet::NO_TITLE),
            Self::Progress
            | Self::LeftIcon
            | Self::RightIcon
            | Self::IndeterminateProgress
            | Self::ActionBarOverlay
            | Self::SwipeToDismiss => FeatureSet::CUSTOM_TITLE,
            Self::OptionsPanel
            | Self::ContextMenu
            | Self::ActionModeOverlay
            | Self::ContentTransitions
            | Self::ActivityTransitions => FeatureSet::empty(),
        }
    }
}

impl From<Feature> for i32 {
    fn from(feature: Feature) -> Self {
        feature.id()
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}({})", self.id())
    }
}

bitflags::bitflags! {
    /// A set of [`Feature`]s, one bit per feature id.
    ///
    /// Only bits `0..=FEATURE_MAX` are defined; constructors that take raw
    /// bits should go through [`FeatureSet::from_bits_truncate`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize))]
    pub struct FeatureSet: u32 {
        /// See [`Feature::OptionsPanel`].
        const OPTIONS_PANEL = 1 << 0;
        /// See [`Feature::NoTitle`].
        const NO_TITLE = 1 << 1;
        /// See [`Feature::Progress`].
        const PROGRESS = 1 << 2;
        /// See [`Feature::LeftIcon`].
        const LEFT_ICON = 1 << 3;
        /// See [`Feature::RightIcon`].
        const RIGHT_ICON = 1 << 4;
        /// See [`Feature::IndeterminateProgress`].
        const INDETERMINATE_PROGRESS = 1 << 5;
        /// See [`Feature::ContextMenu`].
        const CONTEXT_MENU = 1 << 6;
        /// See [`Feature::CustomTitle`].
        const CUSTOM_TITLE = 1 << 7;
        /// See [`Feature::ActionBar`].
        const ACTION_BAR = 1 << 8;
        /// See [`Feature::ActionBarOverlay`].
        const ACTION_BAR_OVERLAY = 1 << 9;
        /// See [`Feature::ActionModeOverlay`].
        const ACTION_MODE_OVERLAY = 1 << 10;
        /// See [`Feature::SwipeToDismiss`].
        const SWIPE_TO_DISMISS = 1 << 11;
        /// See [`Feature::ContentTransitions`].
        const CONTENT_TRANSITIONS = 1 << 12;
        /// See [`Feature::ActivityTransitions`].
        const ACTIVITY_TRANSITIONS = 1 << 13;
    }
}

impl FeatureSet {
    /// Features enabled when the context does not provide its own defaults.
    pub const DEFAULT: Self = Self::OPTIONS_PANEL.union(Self::CONTEXT_MENU);

    /// Title-area features that a custom title replaces.
    pub const TITLE_AREA: Self = Self::NO_TITLE
        .union(Self::PROGRESS)
        .union(Self::LEFT_ICON)
        .union(Self::RIGHT_ICON)
        .union(Self::INDETERMINATE_PROGRESS)
        .union(Self::ACTION_BAR)
        .union(Self::ACTION_BAR_OVERLAY)
        .union(Self::SWIPE_TO_DISMISS);

    /// Returns `true` if `feature` is in the set.
    #[must_use]
    #[inline]
    pub const fn has(self, feature: Feature) -> bool {
        self.contains(feature.bit())
    }

    /// Iterates the features in the set, in id order.
    pub fn features(self) -> impl Iterator<Item = Feature> {
        Feature::ALL.into_iter().filter(move |f| self.has(*f))
    }
}

/// Undefined bits, from hex or raw input, are dropped.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FeatureSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed: Self = bitflags::serde::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(parsed.bits()))
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Feature> for FeatureSet {
    fn from(feature: Feature) -> Self {
        feature.bit()
    }
}

/// Requested and locally enforced features of one window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureRegistry {
    features: FeatureSet,
    local: FeatureSet,
    /// Local features the layer forced; conflicting requests cannot clear them.
    pinned: FeatureSet,
}

impl FeatureRegistry {
    /// Creates a registry seeded with `defaults` in both the requested and
    /// the local sets.
    ///
    /// Undefined bits are dropped. Conflicting defaults are resolved as if
    /// each feature were requested in id order, so the higher id wins.
    #[must_use]
    pub fn new(defaults: FeatureSet) -> Self {
        let mut seeded = FeatureSet::empty();
        for feature in defaults.features() {
            seeded = (seeded - feature.conflicts()) | feature.bit();
        }
        if seeded != defaults {
            log::debug!("default features {defaults:?} seeded as {seeded:?}");
        }
        Self {
            features: seeded,
            local: seeded,
            pinned: FeatureSet::empty(),
        }
    }

    /// Returns the requested features.
    #[must_use]
    #[inline]
    pub fn features(&self) -> FeatureSet {
        self.features
    }

    /// Returns the features enforced by this layer.
    #[must_use]
    #[inline]
    pub fn local_features(&self) -> FeatureSet {
        self.local
    }

    /// Returns the features pinned by [`force_local`](Self::force_local).
    #[must_use]
    #[inline]
    pub fn pinned(&self) -> FeatureSet {
        self.pinned
    }

    /// Returns `true` if `feature` is requested.
    #[must_use]
    #[inline]
    pub fn has(&self, feature: Feature) -> bool {
        self.features.has(feature)
    }

    /// Requests a feature by numeric id.
    ///
    /// Returns `false` and leaves the registry untouched when `id` is outside
    /// `0..=FEATURE_MAX`. Otherwise behaves like
    /// [`request_feature`](Self::request_feature).
    pub fn request(&mut self, id: i32) -> bool {
        match Feature::from_id(id) {
            Some(feature) => self.request_feature(feature),
            None => {
                log::warn!("rejected request for unknown feature id {id}");
                false
            }
        }
    }

    /// Requests a feature.
    ///
    /// Conflicting features are cleared from both sets. If a conflicting
    /// feature is pinned, the request is rejected instead and nothing changes.
    /// Returns `true` if `feature` is set afterwards.
    pub fn request_feature(&mut self, feature: Feature) -> bool {
        let conflicts = feature.conflicts();
        let blocked = conflicts & self.pinned;
        if !blocked.is_empty() {
            log::warn!("{feature} conflicts with pinned features {blocked:?}; request rejected");
            return false;
        }
        if feature.is_deprecated() {
            log::warn!("{feature} is deprecated and has no effect");
        }
        let cleared = conflicts & self.features;
        if !cleared.is_empty() {
            log::debug!("{feature} clears conflicting features {cleared:?}");
        }
        self.features = (self.features - conflicts) | feature.bit();
        self.local = (self.local - conflicts) | feature.bit();
        true
    }

    /// Sets `feature` in both sets and pins it against conflicting requests.
    ///
    /// Features it conflicts with are cleared.
    pub fn force_local(&mut self, feature: Feature) {
        let conflicts = feature.conflicts();
        self.features = (self.features - conflicts) | feature.bit();
        self.local = (self.local - conflicts) | feature.bit();
        self.pinned |= feature.bit();
    }

    /// Releases a pin without clearing the feature itself.
    pub fn unpin(&mut self, feature: Feature) {
        self.pinned.remove(feature.bit());
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::new(FeatureSet::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_lookup() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_id(feature.id()), Some(feature));
        }
        assert_eq!(Feature::from_id(-1), None);
        assert_eq!(Feature::from_id(FEATURE_MAX + 1), None);
    }

    #[test]
    fn every_valid_id_can_be_requested_on_an_empty_registry() {
        for id in 0..=FEATURE_MAX {
            let mut reg = FeatureRegistry::new(FeatureSet::empty());
            assert!(reg.request(id), "request for {id} should succeed");
            assert_eq!(reg.features().bits(), 1 << id);
            assert_eq!(reg.local_features().bits(), 1 << id);
        }
    }

    #[test]
    fn out_of_range_ids_leave_state_unchanged() {
        let mut reg = FeatureRegistry::default();
        let before = reg.clone();
        for id in [-5, -1, FEATURE_MAX + 1, 31, 32, i32::MAX, i32::MIN] {
            assert!(!reg.request(id));
        }
        assert_eq!(reg, before);
    }

    #[test]
    fn conflict_table_is_symmetric() {
        for a in Feature::ALL {
            for b in a.conflicts().features() {
                assert!(
                    b.conflicts().has(a),
                    "{a} conflicts with {b} but not the other way around"
                );
            }
        }
    }

    #[test]
    fn latest_request_wins_between_no_title_and_action_bar() {
        let mut reg = FeatureRegistry::default();
        assert!(reg.request_feature(Feature::NoTitle));
        assert!(reg.request_feature(Feature::ActionBar));
        assert!(reg.has(Feature::ActionBar));
        assert!(!reg.has(Feature::NoTitle));
        assert!(!reg.local_features().has(Feature::NoTitle));
    }

    #[test]
    fn custom_title_clears_other_title_features() {
        let mut reg = FeatureRegistry::default();
        reg.request_feature(Feature::LeftIcon);
        reg.request_feature(Feature::RightIcon);
        reg.request_feature(Feature::ActionModeOverlay);
        assert!(reg.request_feature(Feature::CustomTitle));
        assert_eq!(
            reg.features(),
            FeatureSet::DEFAULT | FeatureSet::ACTION_MODE_OVERLAY | FeatureSet::CUSTOM_TITLE
        );

        // And a later title feature evicts the custom title.
        assert!(reg.request_feature(Feature::LeftIcon));
        assert!(!reg.has(Feature::CustomTitle));
    }

    #[test]
    fn pinned_feature_blocks_conflicting_request() {
        let mut reg = FeatureRegistry::default();
        reg.request_feature(Feature::ActionBar);
        reg.force_local(Feature::NoTitle);
        assert!(!reg.has(Feature::ActionBar), "forcing clears conflicts");

        let before = reg.clone();
        assert!(!reg.request_feature(Feature::ActionBar));
        assert!(!reg.request_feature(Feature::CustomTitle));
        assert_eq!(reg, before);

        // Compatible requests are still honored.
        assert!(reg.request_feature(Feature::ContentTransitions));
        assert!(reg.has(Feature::NoTitle));
    }

    #[test]
    fn unpin_allows_the_conflict_to_resolve_normally() {
        let mut reg = FeatureRegistry::default();
        reg.force_local(Feature::NoTitle);
        reg.unpin(Feature::NoTitle);
        assert!(reg.has(Feature::NoTitle));
        assert!(reg.request_feature(Feature::ActionBar));
        assert!(!reg.has(Feature::NoTitle));
    }

    #[test]
    fn deprecated_features_are_still_tracked() {
        let mut reg = FeatureRegistry::new(FeatureSet::empty());
        assert!(Feature::SwipeToDismiss.is_deprecated());
        assert!(reg.request_feature(Feature::SwipeToDismiss));
        assert!(reg.has(Feature::SwipeToDismiss));
        assert!(!Feature::ActionBar.is_deprecated());
    }

    #[test]
    fn seeding_drops_undefined_bits() {
        let defaults =
            FeatureSet::from_bits_retain((1 << 20) | (1 << 31)) | FeatureSet::OPTIONS_PANEL;
        let reg = FeatureRegistry::new(defaults);
        assert_eq!(reg.features(), FeatureSet::OPTIONS_PANEL);
        assert_eq!(reg.local_features(), FeatureSet::OPTIONS_PANEL);
        assert_eq!(reg.features().bits() & !FeatureSet::all().bits(), 0);
    }

    #[test]
    fn seeding_resolves_conflicting_defaults() {
        let reg = FeatureRegistry::new(FeatureSet::NO_TITLE | FeatureSet::ACTION_BAR);
        assert_eq!(reg.features(), FeatureSet::ACTION_BAR);

        let reg = FeatureRegistry::new(
            FeatureSet::LEFT_ICON | FeatureSet::CUSTOM_TITLE | FeatureSet::CONTEXT_MENU,
        );
        assert_eq!(reg.features(), FeatureSet::CUSTOM_TITLE | FeatureSet::CONTEXT_MENU);
        assert_eq!(reg.local_features(), reg.features());
    }

    #[test]
    fn truncation_drops_undefined_bits() {
        let set = FeatureSet::from_bits_truncate(u32::MAX);
        assert_eq!(set, FeatureSet::all());
        assert_eq!(set.bits() >> (FEATURE_MAX + 1), 0);
    }
}
