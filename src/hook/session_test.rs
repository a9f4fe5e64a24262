use super::*;
use crate::hook::event::inbox;
use crate::hook::fakes::FakeTransport;

fn mount(channel_id: &str, token: &str) -> MountConfig {
    MountConfig { channel_id: channel_id.to_owned(), socket_token: token.to_owned() }
}

#[test]
fn first_attach_opens_and_connects_socket() {
    let transport = FakeTransport::default();
    let mut session = Session::new(transport.clone(), "/socket");
    assert!(!session.is_connected());

    let (sink, _rx) = inbox();
    let channel = session.attach(&mount("7", "tok-1"), sink);

    let log = transport.log.borrow();
    assert_eq!(log.sockets, vec![("/socket".to_owned(), "tok-1".to_owned())]);
    assert_eq!(log.connects, 1);
    assert_eq!(channel.topic().as_str(), "channel:7");
    assert!(session.is_connected());
    assert_eq!(session.current().map(|c| c.topic().as_str()), Some("channel:7"));
}

#[test]
fn attach_does_not_join() {
    let transport = FakeTransport::default();
    let mut session = Session::new(transport.clone(), "/socket");
    let (sink, _rx) = inbox();
    session.attach(&mount("7", "tok"), sink);
    assert!(transport.log.borrow().joins.is_empty());
}

#[test]
fn second_attach_leaves_first_and_reuses_socket() {
    let transport = FakeTransport::default();
    let mut session = Session::new(transport.clone(), "/socket");

    let (sink, _rx1) = inbox();
    session.attach(&mount("1", "tok-1"), sink);
    let (sink, _rx2) = inbox();
    session.attach(&mount("2", "tok-2"), sink);

    let log = transport.log.borrow();
    assert_eq!(log.sockets.len(), 1, "socket is opened once per session");
    assert_eq!(log.sockets[0].1, "tok-1", "later tokens are ignored");
    assert_eq!(log.connects, 1);
    assert_eq!(log.leaves, vec![Topic::for_channel("1")]);
    assert_eq!(session.current().map(|c| c.topic().as_str()), Some("channel:2"));
}

#[test]
fn at_most_one_channel_stays_unleft() {
    let transport = FakeTransport::default();
    let mut session = Session::new(transport.clone(), "/socket");

    for id in ["a", "b", "c", "d"] {
        let (sink, _rx) = inbox();
        session.attach(&mount(id, "tok"), sink);
    }

    let log = transport.log.borrow();
    assert_eq!(log.channels.len(), 4);
    assert_eq!(log.leaves.len(), 3);
    let unleft = log
        .channels
        .iter()
        .filter(|topic| !log.leaves.contains(topic))
        .collect::<Vec<_>>();
    assert_eq!(unleft, vec![&Topic::for_channel("d")]);
}

#[test]
fn detach_leaves_current_once() {
    let transport = FakeTransport::default();
    let mut session = Session::new(transport.clone(), "/socket");
    let (sink, _rx) = inbox();
    session.attach(&mount("9", "tok"), sink);

    session.detach();
    session.detach();

    assert_eq!(transport.log.borrow().leaves, vec![Topic::for_channel("9")]);
    assert!(session.current().is_none());
    assert!(session.is_connected(), "socket outlives the channel");
}

#[test]
fn detach_without_channel_is_noop() {
    let transport = FakeTransport::default();
    let mut session = Session::new(transport.clone(), "/socket");
    session.detach();
    assert!(transport.log.borrow().leaves.is_empty());
    assert!(!session.is_connected());
}
