/// Characters that may start a channel name.
const CHANNEL_PREFIXES: &[char] = &['#', '&', '+', '!'];

/// Whether `name` is a well-formed channel name: a prefix character followed
/// by at least one character, with no spaces, commas or BEL.
pub fn is_channel(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !CHANNEL_PREFIXES.contains(&first) {
        return false;
    }
    let rest = chars.as_str();
    !rest.is_empty()
        && !rest
            .chars()
            .any(|c| matches!(c, ' ' | ',' | '\x07' | '\r' | '\n' | '\0'))
}
