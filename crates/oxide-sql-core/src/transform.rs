//! Identifier name transforms.
//!
//! Dialects that accept a name transform apply it to every identifier
//! before quoting, e.g. to map Rust-side `camelCase` names onto
//! `snake_case` columns.

/// `userId` -> `user_id`.
///
/// A run of capitals is one word (`userID` -> `user_id`,
/// `HTTPStatus` -> `http_status`), and no separator is added after `.` or
/// `_`, so qualified names keep their shape.
#[must_use]
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut chars = name.chars().peekable();
    let mut prev: Option<char> = None;
    while let Some(ch) = chars.next() {
        if ch.is_ascii_uppercase() {
            let boundary = match prev {
                None | Some('.' | '_') => false,
                Some(p) if p.is_ascii_uppercase() => {
                    chars.peek().is_some_and(char::is_ascii_lowercase)
                }
                Some(_) => true,
            };
            if boundary {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
        prev = Some(ch);
    }
    out
}

/// `user_id` -> `userId`.
#[must_use]
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' && !out.is_empty() {
            upper_next = true;
        } else if upper_next {
            out.push(ch.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
