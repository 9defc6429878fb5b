// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Who may run which command.
//!
//! Direct messages may run everything except admin-only commands. In a
//! guild the sender must be an administrator or hold an allow-listed role.

use pixbot_core::{InboundMessage, PixbotError, StorageAdapter};

use crate::command::CommandName;

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// The command needs an administrator.
    AdminRequired,
    /// The sender is neither an administrator nor in the allow-list.
    Denied,
}

/// Decides whether `msg`'s sender may run `name`.
///
/// The first message checked in a guild seeds its allow-list with
/// `seed_roles`, whoever sends it.
pub async fn check(
    storage: &dyn StorageAdapter,
    seed_roles: &[String],
    msg: &InboundMessage,
    name: CommandName,
) -> Result<Access, PixbotError> {
    let is_admin = msg.guild_id.is_some() && msg.sender.is_admin;

    // Seed before any admin command can edit the allow-list.
    if let Some(guild_id) = &msg.guild_id {
        storage.seed_allowed_roles(guild_id, seed_roles).await?;
    }

    if name.checks_admin_first() && !is_admin {
        return Ok(Access::AdminRequired);
    }

    if let Some(guild_id) = &msg.guild_id
        && !is_admin
    {
        let allowed = storage.allowed_roles(guild_id).await?;
        if !msg.sender.role_ids.iter().any(|r| allowed.contains(r)) {
            return Ok(Access::Denied);
        }
    }

    if name.is_admin_only() && !is_admin {
        return Ok(Access::AdminRequired);
    }

    Ok(Access::Granted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dm, guild_msg};
    use pixbot_storage::SqliteStorage;

    async fn storage() -> SqliteStorage {
        SqliteStorage::in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn dm_allows_everything_but_admin_commands() {
        let storage = storage().await;
        let msg = dm("!pix");
        for name in [CommandName::Pix, CommandName::PixReg, CommandName::PixHelp] {
            assert_eq!(check(&storage, &[], &msg, name).await.unwrap(), Access::Granted);
        }
        for name in [
            CommandName::PixAdd,
            CommandName::PixRem,
            CommandName::PixList,
            CommandName::PixLog,
        ] {
            assert_eq!(
                check(&storage, &[], &msg, name).await.unwrap(),
                Access::AdminRequired
            );
        }
    }

    #[tokio::test]
    async fn dm_admin_flag_is_ignored() {
        let storage = storage().await;
        let mut msg = dm("!pixlist");
        msg.sender.is_admin = true;
        assert_eq!(
            check(&storage, &[], &msg, CommandName::PixList).await.unwrap(),
            Access::AdminRequired
        );
    }

    #[tokio::test]
    async fn guild_requires_allowed_role() {
        let storage = storage().await;
        let msg = guild_msg("!pix", &["5"], false);
        assert_eq!(
            check(&storage, &[], &msg, CommandName::Pix).await.unwrap(),
            Access::Denied
        );

        storage.add_allowed_role("g1", "5").await.unwrap();
        assert_eq!(
            check(&storage, &[], &msg, CommandName::Pix).await.unwrap(),
            Access::Granted
        );
    }

    #[tokio::test]
    async fn seeded_roles_grant_access() {
        let storage = storage().await;
        let msg = guild_msg("!pix", &["77"], false);
        let seeds = vec!["77".to_string()];
        assert_eq!(
            check(&storage, &seeds, &msg, CommandName::Pix).await.unwrap(),
            Access::Granted
        );
    }

    #[tokio::test]
    async fn allowed_non_admin_cannot_run_admin_commands() {
        let storage = storage().await;
        storage.add_allowed_role("g1", "5").await.unwrap();
        let msg = guild_msg("!pixlist", &["5"], false);
        assert_eq!(
            check(&storage, &[], &msg, CommandName::PixList).await.unwrap(),
            Access::AdminRequired
        );
    }

    #[tokio::test]
    async fn add_role_checks_admin_before_allow_list() {
        let storage = storage().await;
        let msg = guild_msg("!pixadd", &[], false);
        assert_eq!(
            check(&storage, &[], &msg, CommandName::PixAdd).await.unwrap(),
            Access::AdminRequired
        );

        let admin = guild_msg("!pixadd", &[], true);
        assert_eq!(
            check(&storage, &[], &admin, CommandName::PixAdd).await.unwrap(),
            Access::Granted
        );
    }

    #[tokio::test]
    async fn admin_message_seeds_the_guild() {
        let storage = storage().await;
        let seeds = vec!["5".to_string()];
        let admin = guild_msg("!pixrem", &[], true);
        assert_eq!(
            check(&storage, &seeds, &admin, CommandName::PixRem).await.unwrap(),
            Access::Granted
        );
        assert_eq!(storage.allowed_roles("g1").await.unwrap(), vec!["5".to_string()]);
    }
}
