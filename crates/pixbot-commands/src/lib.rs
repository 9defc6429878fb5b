// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command handling for the pixbot Discord bot.
//!
//! - [`command`] parses `!pix*` messages
//! - [`permissions`] applies the administrator and role allow-list rules
//! - [`registration`] runs the interactive key registration dialogue
//! - [`dispatcher`] turns a message into replies and log-channel lines
//! - [`bot_loop`] drives a [`ChannelAdapter`](pixbot_core::ChannelAdapter) until shutdown

pub mod bot_loop;
pub mod command;
pub mod dispatcher;
pub mod permissions;
pub mod registration;
pub mod replies;
pub mod shutdown;

pub use bot_loop::BotLoop;
pub use command::{CommandName, Parsed, parse};
pub use dispatcher::{CommandDispatcher, DispatchSettings};
pub use shutdown::install_signal_handler;
