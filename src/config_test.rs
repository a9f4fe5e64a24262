use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect::<HashMap<_, _>>();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_match_page_script() {
    let config = ClientConfig::default();
    assert_eq!(config.socket_path, "/socket");
    assert_eq!(config.live_path, "/live");
    assert_eq!(config.long_poll_fallback_ms, 2500);
    assert_eq!(config.typing_expiry, Duration::from_secs(3));
    assert_eq!(config.typing_idle, Duration::from_secs(1));
}

#[test]
fn from_lookup_without_keys_equals_default() {
    let config = ClientConfig::from_lookup(|_| None);
    assert_eq!(config, ClientConfig::default());
}

#[test]
fn from_lookup_applies_overrides() {
    let config = ClientConfig::from_lookup(lookup_from(&[
        ("chat-socket-path", "/rt"),
        ("chat-typing-expiry-ms", "5000"),
        ("chat-typing-idle-ms", " 250 "),
    ]));
    assert_eq!(config.socket_path, "/rt");
    assert_eq!(config.live_path, "/live");
    assert_eq!(config.typing_expiry, Duration::from_secs(5));
    assert_eq!(config.typing_idle, Duration::from_millis(250));
}

#[test]
fn from_lookup_ignores_unparseable_numbers_and_blank_paths() {
    let config = ClientConfig::from_lookup(lookup_from(&[
        ("chat-live-path", "  "),
        ("chat-long-poll-fallback-ms", "soon"),
        ("chat-typing-expiry-ms", "-1"),
    ]));
    assert_eq!(config.live_path, "/live");
    assert_eq!(config.long_poll_fallback_ms, 2500);
    assert_eq!(config.typing_expiry, Duration::from_secs(3));
}

#[test]
fn mount_config_reads_dataset_keys() {
    let mount = MountConfig::from_dataset(lookup_from(&[("channelId", "42"), ("socketToken", "tok")]))
        .expect("mount config");
    assert_eq!(mount.channel_id, "42");
    assert_eq!(mount.socket_token, "tok");
}

#[test]
fn mount_config_requires_channel_id() {
    let err = MountConfig::from_dataset(lookup_from(&[("socketToken", "tok")])).expect_err("missing id");
    assert!(matches!(err, ChatError::MissingAttribute("data-channel-id")));
}

#[test]
fn mount_config_requires_socket_token() {
    let err = MountConfig::from_dataset(lookup_from(&[("channelId", "42")])).expect_err("missing token");
    assert!(matches!(err, ChatError::MissingAttribute("data-socket-token")));
}
