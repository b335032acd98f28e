// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Window identifiers.

/// Identifier for a window in a [`WindowTree`](crate::WindowTree).
///
/// This is a small, copyable handle used for the non-owning container and
/// active-child links. It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `WindowId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `WindowId`.
///
/// Stale ids never alias a different live window because the generation must
/// match. Use [`WindowTree::is_alive`](crate::WindowTree::is_alive) to check
/// liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WindowId(pub(crate) u32, pub(crate) u32);

impl WindowId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}
