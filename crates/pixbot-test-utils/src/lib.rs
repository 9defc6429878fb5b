// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for pixbot integration tests.
//!
//! # Components
//!
//! - [`MockChannel`] - Mock messaging channel with message injection and capture
//! - [`MessageBuilder`] - Inbound messages shaped like the Discord adapter's
//! - [`TestHarness`] - Dispatcher and bot loop over a temp database

pub mod harness;
pub mod message;
pub mod mock_channel;

pub use harness::TestHarness;
pub use message::MessageBuilder;
pub use mock_channel::MockChannel;
