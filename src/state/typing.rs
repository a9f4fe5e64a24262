//! Who is typing right now, and how to say it.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

/// Usernames with a live typing notice, in the order they started typing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypingSet {
    users: Vec<String>,
}

impl TypingSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `username`. Returns `false` if already present.
    pub fn insert(&mut self, username: &str) -> bool {
        if self.contains(username) {
            return false;
        }
        self.users.push(username.to_owned());
        true
    }

    /// Remove `username`. Returns `false` if absent.
    pub fn remove(&mut self, username: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u != username);
        self.users.len() != before
    }

    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.users.iter().any(|u| u == username)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Indicator text for the current set, `None` when nobody is typing.
    #[must_use]
    pub fn indicator_text(&self) -> Option<String> {
        indicator_text(&self.users)
    }
}

/// Render the typing indicator sentence.
///
/// - one: `"alice is typing..."`
/// - two: `"alice and bob are typing..."`
/// - more: `"alice, bob and carol are typing..."`
#[must_use]
pub fn indicator_text(users: &[String]) -> Option<String> {
    match users {
        [] => None,
        [only] => Some(format!("{only} is typing...")),
        [first, second] => Some(format!("{first} and {second} are typing...")),
        [rest @ .., last] => Some(format!("{} and {last} are typing...", rest.join(", "))),
    }
}
