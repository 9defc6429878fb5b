// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules, one per table.

pub mod keys;
pub mod registrations;
pub mod roles;
pub mod settings;
