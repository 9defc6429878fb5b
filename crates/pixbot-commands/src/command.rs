// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line parsing of chat messages.

use strum::{Display, EnumString};

/// Every command the bot answers to, by the word after the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommandName {
    PixAdd,
    PixRem,
    PixReg,
    Pix,
    PixVer,
    PixQrCode,
    PixCopy,
    PixDel,
    PixList,
    PixLog,
    PixCmd,
    PixHelp,
    PixInfo,
}

impl CommandName {
    /// Commands reserved to guild administrators.
    pub fn is_admin_only(self) -> bool {
        matches!(
            self,
            CommandName::PixAdd | CommandName::PixRem | CommandName::PixList | CommandName::PixLog
        )
    }

    /// Admin-only commands whose admin check runs before the allow-list gate,
    /// so an admin can always fix the allow-list.
    pub fn checks_admin_first(self) -> bool {
        matches!(self, CommandName::PixAdd | CommandName::PixRem)
    }
}

/// A recognized command with its whitespace-separated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: CommandName,
    pub args: Vec<&'a str>,
}

impl<'a> Invocation<'a> {
    /// The first argument that is not a user, role or channel mention.
    pub fn first_plain_arg(&self) -> Option<&'a str> {
        self.args.iter().copied().find(|arg| !is_mention(arg))
    }
}

/// How a message relates to the command syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<'a> {
    /// Free text.
    NotCommand,
    /// Prefixed, but not a command this bot knows.
    Unknown(&'a str),
    Command(Invocation<'a>),
}

/// Parses `content` against `prefix`. The command word is case-insensitive.
pub fn parse<'a>(prefix: &str, content: &'a str) -> Parsed<'a> {
    let Some(rest) = content.trim_start().strip_prefix(prefix) else {
        return Parsed::NotCommand;
    };

    let mut words = rest.split_whitespace();
    let word = if rest.starts_with(char::is_whitespace) {
        ""
    } else {
        words.next().unwrap_or("")
    };

    match word.parse::<CommandName>() {
        Ok(name) => Parsed::Command(Invocation {
            name,
            args: words.collect(),
        }),
        Err(_) => Parsed::Unknown(word),
    }
}

/// `<@id>`, `<@!id>`, `<@&id>` or `<#id>`.
pub fn is_mention(token: &str) -> bool {
    token
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .and_then(|t| t.strip_prefix(['@', '#']))
        .map(|t| t.trim_start_matches(['!', '&']))
        .is_some_and(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(content: &str) -> Invocation<'_> {
        match parse("!", content) {
            Parsed::Command(inv) => inv,
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn parses_name_and_args() {
        let inv = command("!pixqrcode <@123> 10,50");
        assert_eq!(inv.name, CommandName::PixQrCode);
        assert_eq!(inv.args, ["<@123>", "10,50"]);
        assert_eq!(inv.first_plain_arg(), Some("10,50"));
    }

    #[test]
    fn command_word_is_case_insensitive() {
        assert_eq!(command("!PIXHELP").name, CommandName::PixHelp);
        assert_eq!(command("  !Pix 5").name, CommandName::Pix);
    }

    #[test]
    fn extra_whitespace_between_args_is_ignored() {
        assert_eq!(command("!pix    7.5  ").args, ["7.5"]);
    }

    #[test]
    fn free_text_is_not_a_command() {
        assert_eq!(parse("!", "cpf"), Parsed::NotCommand);
        assert_eq!(parse("!", "oi !pix"), Parsed::NotCommand);
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(parse("!", "!pixx"), Parsed::Unknown("pixx"));
        assert_eq!(parse("!", "! pix"), Parsed::Unknown(""));
        assert_eq!(parse("!", "!"), Parsed::Unknown(""));
    }

    #[test]
    fn custom_prefix() {
        assert!(matches!(parse("$$", "$$pixinfo"), Parsed::Command(_)));
        assert_eq!(parse("$$", "!pixinfo"), Parsed::NotCommand);
    }

    #[test]
    fn admin_classification() {
        assert!(CommandName::PixList.is_admin_only());
        assert!(!CommandName::PixList.checks_admin_first());
        assert!(CommandName::PixAdd.checks_admin_first());
        assert!(!CommandName::Pix.is_admin_only());
    }

    #[test]
    fn mention_detection() {
        for token in ["<@1>", "<@!22>", "<@&333>", "<#4444>"] {
            assert!(is_mention(token), "{token}");
        }
        for token in ["10", "<@>", "<@abc>", "@user", "<#1"] {
            assert!(!is_mention(token), "{token}");
        }
    }
}
