// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fabula — branching dialogue graph core (model + ops + JSON store).
//!
//! The interactive canvas front-end lives elsewhere; this crate owns the
//! document: the graph of speech/response nodes, the operations that mutate
//! it, and its snapshot/export serialization.

pub mod model;
pub mod ops;
pub mod query;
pub mod store;
pub mod ui;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
