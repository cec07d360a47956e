//! User-facing notice text.

pub const ALREADY_REGISTERED: &str = "You've already registered.";

pub const TEST_REPLY: &str = "Testing.";

pub const JOIN_USAGE: &[&str] = &[
    "Usage: join <channel name> <invite_threshold> <part_threshold>",
    "Example: join #test 15 12",
];

pub const PART_USAGE: &[&str] = &["Usage: part <channel name> Example: part #test"];

pub const CLEAR_USAGE: &[&str] = &["Usage: clear <channel name> Example: clear #test"];

pub const FORGET_USAGE: &[&str] = &["Usage: forget <channel name> Example: forget #test"];

pub fn welcome(channel: &str, invite_threshold: i64) -> Vec<String> {
    vec![
        format!("Welcome to {channel}! To register your interest in this channel, type 'register'."),
        format!(
            "You will be invited back once {invite_threshold} people have registered as well."
        ),
        "Type 'help' into the channel for a command listing.".to_string(),
    ]
}

/// First line of a `list` reply, e.g. `2/5 users have registered interest in #test:`.
pub fn list_header(registered: usize, invite_threshold: i64, channel: &str) -> String {
    format!("{registered}/{invite_threshold} users have registered interest in {channel}:")
}

pub fn unmanaged(channel: &str) -> String {
    format!("{channel} is not managed by this bot.")
}

pub fn forgotten(channel: &str) -> String {
    format!("Forgot {channel}; its registrations are gone.")
}

pub fn channel_summary(
    channel: &str,
    registered: usize,
    invite_threshold: i64,
    part_threshold: i64,
) -> String {
    format!("{channel} {registered}/{invite_threshold} (part above {part_threshold})")
}

pub const NO_CHANNELS: &str = "No channels are managed.";
