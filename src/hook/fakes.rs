//! Recording doubles for the hook's capabilities.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::hook::event::{ChatEvent, EventSink};
use crate::hook::timers::{TimerId, Timers};
use crate::hook::view::ChatView;
use crate::net::transport::{Channel, Socket, Transport};
use crate::net::types::{OutboundEvent, Topic};
use crate::util::render::MessageCard;

#[derive(Debug, Default)]
pub struct TransportLog {
    pub sockets: Vec<(String, String)>,
    pub connects: usize,
    pub channels: Vec<Topic>,
    pub joins: Vec<Topic>,
    pub pushes: Vec<(Topic, OutboundEvent)>,
    pub leaves: Vec<Topic>,
    pub sinks: Vec<EventSink>,
}

#[derive(Clone, Default)]
pub struct FakeTransport {
    pub log: Rc<RefCell<TransportLog>>,
}

pub struct FakeSocket {
    log: Rc<RefCell<TransportLog>>,
}

#[derive(Clone, Debug)]
pub struct FakeChannel {
    topic: Topic,
    log: Rc<RefCell<TransportLog>>,
}

impl Transport for FakeTransport {
    type Socket = FakeSocket;

    fn open_socket(&self, endpoint: &str, token: &str) -> FakeSocket {
        self.log.borrow_mut().sockets.push((endpoint.to_owned(), token.to_owned()));
        FakeSocket { log: self.log.clone() }
    }
}

impl Socket for FakeSocket {
    type Channel = FakeChannel;

    fn connect(&mut self) {
        self.log.borrow_mut().connects += 1;
    }

    fn channel(&mut self, topic: &Topic, sink: EventSink) -> FakeChannel {
        let mut log = self.log.borrow_mut();
        log.channels.push(topic.clone());
        log.sinks.push(sink);
        FakeChannel { topic: topic.clone(), log: self.log.clone() }
    }
}

impl Channel for FakeChannel {
    fn topic(&self) -> &Topic {
        &self.topic
    }

    fn join(&self) {
        self.log.borrow_mut().joins.push(self.topic.clone());
    }

    fn push(&self, event: &OutboundEvent) {
        self.log.borrow_mut().pushes.push((self.topic.clone(), event.clone()));
    }

    fn leave(&self) {
        self.log.borrow_mut().leaves.push(self.topic.clone());
    }
}

#[derive(Debug, Default)]
pub struct ViewLog {
    pub messages: Vec<MessageCard>,
    pub clears: usize,
    pub scrolls: usize,
    pub input: String,
    pub focused: bool,
    /// `None` while the indicator is hidden.
    pub typing: Option<String>,
    pub alerts: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeView {
    pub log: Rc<RefCell<ViewLog>>,
}

impl FakeView {
    pub fn type_text(&self, text: &str) {
        text.clone_into(&mut self.log.borrow_mut().input);
    }
}

impl ChatView for FakeView {
    fn clear_messages(&mut self) {
        let mut log = self.log.borrow_mut();
        log.clears += 1;
        log.messages.clear();
    }

    fn append_message(&mut self, card: &MessageCard) {
        self.log.borrow_mut().messages.push(card.clone());
    }

    fn scroll_to_bottom(&mut self) {
        self.log.borrow_mut().scrolls += 1;
    }

    fn input_value(&self) -> String {
        self.log.borrow().input.clone()
    }

    fn set_input_value(&mut self, value: &str) {
        value.clone_into(&mut self.log.borrow_mut().input);
    }

    fn focus_input(&mut self) {
        self.log.borrow_mut().focused = true;
    }

    fn show_typing(&mut self, text: &str) {
        self.log.borrow_mut().typing = Some(text.to_owned());
    }

    fn hide_typing(&mut self) {
        self.log.borrow_mut().typing = None;
    }

    fn alert(&mut self, message: &str) {
        self.log.borrow_mut().alerts.push(message.to_owned());
    }
}

#[derive(Debug, Default)]
pub struct TimerLog {
    pub scheduled: Vec<(TimerId, Duration, ChatEvent)>,
    pub cancelled: Vec<TimerId>,
}

/// Timers that never fire on their own; tests feed the events back by hand.
#[derive(Clone, Default)]
pub struct ManualTimers {
    pub log: Rc<RefCell<TimerLog>>,
}

impl Timers for ManualTimers {
    fn schedule(&mut self, delay: Duration, event: ChatEvent) -> TimerId {
        let mut log = self.log.borrow_mut();
        let id = TimerId::new(log.scheduled.len() as u64 + 1);
        log.scheduled.push((id, delay, event));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.log.borrow_mut().cancelled.push(id);
    }
}
