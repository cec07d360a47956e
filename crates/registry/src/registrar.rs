use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Result of a [`Registrar::register`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The user was appended to the registrant list.
    Accepted,
    /// The user was already on the list; nothing changed.
    AlreadyRegistered,
}

/// Registration state for one managed channel.
///
/// Users register interest while the channel is still small. Once
/// `invite_threshold` distinct users have registered, every one of them is
/// invited back in registration order. `part_threshold` is the member count
/// above which the bot leaves the channel to grow on its own. Thresholds of
/// zero or below are accepted: every registration then triggers an invite,
/// or every join a part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrar {
    channel: String,
    invite_threshold: i64,
    part_threshold: i64,
    #[serde(rename = "registrar", default)]
    registrants: Vec<String>,
}

impl Registrar {
    pub fn new(channel: impl Into<String>, invite_threshold: i64, part_threshold: i64) -> Self {
        Self {
            channel: channel.into(),
            invite_threshold,
            part_threshold,
            registrants: Vec::new(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn invite_threshold(&self) -> i64 {
        self.invite_threshold
    }

    pub fn part_threshold(&self) -> i64 {
        self.part_threshold
    }

    /// Append `user` unless it is already registered.
    pub fn register(&mut self, user: &str) -> RegisterOutcome {
        if self.registrants.iter().any(|r| r == user) {
            return RegisterOutcome::AlreadyRegistered;
        }
        self.registrants.push(user.to_string());
        RegisterOutcome::Accepted
    }

    /// True once the registrant count reaches the invite threshold.
    ///
    /// A threshold of zero or below is always exceeded.
    pub fn threshold_exceeded(&self) -> bool {
        count(self.registrants.len()) >= self.invite_threshold
    }

    /// Registrants in registration order.
    pub fn list(&self) -> &[String] {
        &self.registrants
    }

    pub fn len(&self) -> usize {
        self.registrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrants.is_empty()
    }

    pub fn clear(&mut self) {
        self.registrants.clear();
    }

    /// Clear the registrant list and hand back what it held.
    pub fn take_registrants(&mut self) -> Vec<String> {
        std::mem::take(&mut self.registrants)
    }

    /// Whether a channel with `members` users has outgrown the bot.
    pub fn should_part(&self, members: usize) -> bool {
        count(members) > self.part_threshold
    }

    /// Drop repeated registrants, keeping first occurrences. Returns how many
    /// were removed.
    pub fn dedupe(&mut self) -> usize {
        let before = self.registrants.len();
        let mut seen = HashSet::with_capacity(before);
        self.registrants.retain(|r| seen.insert(r.clone()));
        before - self.registrants.len()
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[test]
    fn register_keeps_first_occurrence_order() {
        let mut r = Registrar::new("#test", 10, 5);
        for user in ["bob", "alice", "bob", "carol", "alice", "dave", "carol"] {
            r.register(user);
        }
        assert_eq!(r.list(), ["bob", "alice", "carol", "dave"]);
    }

    #[test]
    fn repeat_registration_is_reported() {
        let mut r = Registrar::new("#test", 10, 5);
        assert_eq!(r.register("alice"), RegisterOutcome::Accepted);
        assert_eq!(r.register("alice"), RegisterOutcome::AlreadyRegistered);
        assert_eq!(r.len(), 1);
    }

    #[rstest]
    #[case(-1, 0, true)]
    #[case(0, 0, true)]
    #[case(0, 1, true)]
    #[case(1, 0, false)]
    #[case(1, 1, true)]
    #[case(3, 2, false)]
    #[case(3, 3, true)]
    #[case(3, 4, true)]
    fn threshold_exceeded_matches_count(
        #[case] threshold: i64,
        #[case] registered: usize,
        #[case] expected: bool,
    ) {
        let mut r = Registrar::new("#test", threshold, 5);
        for i in 0..registered {
            r.register(&format!("user{i}"));
        }
        assert_eq!(r.threshold_exceeded(), expected);
    }

    #[test]
    fn take_registrants_empties_the_list() {
        let mut r = Registrar::new("#test", 3, 5);
        r.register("alice");
        r.register("bob");
        assert_eq!(r.take_registrants(), vec!["alice", "bob"]);
        assert!(r.is_empty());
        assert_eq!(r.register("alice"), RegisterOutcome::Accepted);
    }

    #[test]
    fn clear_keeps_thresholds() {
        let mut r = Registrar::new("#test", 3, 7);
        r.register("alice");
        r.clear();
        assert!(r.is_empty());
        assert_eq!(r.invite_threshold(), 3);
        assert_eq!(r.part_threshold(), 7);
        assert_eq!(r.channel(), "#test");
    }

    #[test]
    fn should_part_only_above_threshold() {
        let r = Registrar::new("#test", 3, 4);
        assert!(!r.should_part(4));
        assert!(r.should_part(5));
    }

    #[test]
    fn negative_part_threshold_parts_on_any_join() {
        let r = Registrar::new("#test", 3, -1);
        assert!(r.should_part(0));
        assert!(r.should_part(1));
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let mut r: Registrar = serde_json::from_value(serde_json::json!({
            "channel": "#test",
            "invite_threshold": 5,
            "part_threshold": 9,
            "registrar": ["bob", "carol", "bob", "dave", "carol"],
        }))
        .unwrap();
        assert_eq!(r.dedupe(), 2);
        assert_eq!(r.list(), ["bob", "carol", "dave"]);
        assert_eq!(r.dedupe(), 0);
    }

    #[test]
    fn negative_thresholds_load_from_json() {
        let r: Registrar = serde_json::from_value(serde_json::json!({
            "channel": "#test",
            "invite_threshold": -1,
            "part_threshold": -3,
        }))
        .unwrap();
        assert_eq!(r.invite_threshold(), -1);
        assert!(r.threshold_exceeded());
        assert_eq!(serde_json::to_value(&r).unwrap()["part_threshold"], -3);
    }

    #[test]
    fn serializes_with_legacy_field_names() {
        let mut r = Registrar::new("#test", 15, 12);
        r.register("alice");
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "channel": "#test",
                "invite_threshold": 15,
                "part_threshold": 12,
                "registrar": ["alice"],
            })
        );
    }
}
