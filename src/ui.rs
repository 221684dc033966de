// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fabula-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fabula and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Notification requests handed to the presentation adapter.
//!
//! The library never draws anything itself; it describes what the adapter
//! should tell the user after a store operation settles.

use smol_str::SmolStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    title: SmolStr,
    description: String,
}

impl Notice {
    pub fn new(title: impl Into<SmolStr>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Shown after a successful runtime export.
    pub fn dialogue_exported() -> Self {
        Self::new("Success", "Your dialogue was successfully exported!")
    }

    /// Shown after a snapshot save settles on disk.
    pub fn state_saved() -> Self {
        Self::new("Saved", "Your dialogue was successfully saved!")
    }

    /// Shown when a chosen file fails to parse as a snapshot.
    pub fn invalid_file() -> Self {
        Self::new(
            "Invalid JSON",
            "Could not parse the data from the file. \nMaybe you chose the wrong file or it's corrupted.",
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
