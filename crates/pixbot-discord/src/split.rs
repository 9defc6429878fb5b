// SPDX-FileCopyrightText: 2026 Pixbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splitting long replies under Discord's message length limit.

/// Discord rejects messages longer than this many characters.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Splits `text` into parts of at most `max_chars` characters.
///
/// Prefers the last newline inside the window, then the last space, then a
/// hard split. The separator at a soft split is dropped. Always returns at
/// least one part.
pub fn split_message(text: &str, max_chars: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;

    while let Some((limit, _)) = rest.char_indices().nth(max_chars) {
        let window = &rest[..limit];
        let soft = window
            .rfind('\n')
            .or_else(|| window.rfind(' '))
            .filter(|&pos| pos > 0);

        let (head, tail) = match soft {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (window, &rest[limit..]),
        };
        parts.push(head);
        rest = tail;
    }

    parts.push(rest);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_part() {
        assert_eq!(split_message("hello", 10), vec!["hello"]);
        assert_eq!(split_message("", 10), vec![""]);
        assert_eq!(split_message("0123456789", 10), vec!["0123456789"]);
    }

    #[test]
    fn prefers_line_boundaries() {
        let parts = split_message("- a: 1\n- b: 2\n- c: 3", 14);
        assert_eq!(parts, vec!["- a: 1\n- b: 2", "- c: 3"]);
    }

    #[test]
    fn falls_back_to_space() {
        assert_eq!(split_message("aaaa bbbb cccc", 10), vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn hard_split_is_char_safe() {
        let text = "é".repeat(2500);
        let parts = split_message(&text, MAX_MESSAGE_LENGTH);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].chars().count(), 2000);
        assert_eq!(parts[1].chars().count(), 500);
    }

    #[test]
    fn every_part_fits() {
        let line = "- usuario_com_nome_longo: chave@exemplo.com.br (email)\n";
        let text = line.repeat(120);
        let parts = split_message(&text, MAX_MESSAGE_LENGTH);
        assert!(parts.len() > 1);
        for part in &parts {
            assert!(part.chars().count() <= MAX_MESSAGE_LENGTH);
            assert!(!part.starts_with('\n'));
        }
        let rejoined: usize = parts.iter().map(|p| p.len()).sum::<usize>() + parts.len() - 1;
        assert_eq!(rejoined, text.len());
    }

    #[test]
    fn leading_separator_does_not_loop() {
        let text = format!("\n{}", "x".repeat(25));
        let parts = split_message(&text, 10);
        assert!(parts.iter().all(|p| p.chars().count() <= 10));
        assert_eq!(parts.concat().len(), 26);
    }
}
