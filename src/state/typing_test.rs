use super::*;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn indicator_text_for_nobody_is_none() {
    assert_eq!(indicator_text(&[]), None);
}

#[test]
fn indicator_text_for_one_user() {
    assert_eq!(indicator_text(&names(&["alice"])).as_deref(), Some("alice is typing..."));
}

#[test]
fn indicator_text_for_two_users() {
    assert_eq!(
        indicator_text(&names(&["alice", "bob"])).as_deref(),
        Some("alice and bob are typing...")
    );
}

#[test]
fn indicator_text_for_three_users() {
    assert_eq!(
        indicator_text(&names(&["alice", "bob", "carol"])).as_deref(),
        Some("alice, bob and carol are typing...")
    );
}

#[test]
fn indicator_text_for_many_users() {
    assert_eq!(
        indicator_text(&names(&["a", "b", "c", "d", "e"])).as_deref(),
        Some("a, b, c, d and e are typing...")
    );
}

#[test]
fn insert_is_idempotent_and_keeps_first_position() {
    let mut set = TypingSet::new();
    assert!(set.insert("alice"));
    assert!(set.insert("bob"));
    assert!(!set.insert("alice"));
    assert_eq!(set.users(), ["alice".to_owned(), "bob".to_owned()]);
    assert_eq!(set.len(), 2);
}

#[test]
fn remove_reports_presence() {
    let mut set = TypingSet::new();
    set.insert("alice");
    assert!(set.remove("alice"));
    assert!(!set.remove("alice"));
    assert!(set.is_empty());
    assert_eq!(set.indicator_text(), None);
}

#[test]
fn reinsert_after_remove_moves_to_end() {
    let mut set = TypingSet::new();
    set.insert("alice");
    set.insert("bob");
    set.remove("alice");
    set.insert("alice");
    assert_eq!(set.indicator_text().as_deref(), Some("bob and alice are typing..."));
}
