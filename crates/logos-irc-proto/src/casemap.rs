//! Nickname comparison under the `rfc1459` case mapping.
//!
//! ASCII letters fold as usual, and `[]\~` fold onto `{}|^`.

fn fold(c: char) -> char {
    match c {
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c.to_ascii_lowercase(),
    }
}

/// Whether two nicknames are equal ignoring IRC case.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.chars().map(fold).eq(b.chars().map(fold))
}
