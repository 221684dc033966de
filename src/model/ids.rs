// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;

/// A stable numeric identifier used across the model and store surfaces.
///
/// Ids are issued by the owning `State`'s monotone counters and are never
/// reused after deletion, so a stale id can only miss a lookup; it can
/// never alias a different entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn new(value: u32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn value(self) -> u32 {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkIdTag {}
pub type LinkId = Id<LinkIdTag>;

/// The auto-spawned conversation root. It is permanent for the lifetime of
/// the document; `ops::remove_node` rejects it.
pub const ROOT_NODE_ID: NodeId = NodeId::new(0);

#[cfg(test)]
mod tests {
    use super::{NodeId, ROOT_NODE_ID};

    #[test]
    fn ids_order_by_value() {
        assert!(NodeId::new(1) < NodeId::new(2));
        assert_eq!(NodeId::new(7).value(), 7);
    }

    #[test]
    fn root_is_id_zero() {
        assert_eq!(ROOT_NODE_ID, NodeId::new(0));
        assert_eq!(ROOT_NODE_ID.to_string(), "0");
    }
}
