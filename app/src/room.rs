//! A producer exposing several events through one shared [`EventSet`].

use std::sync::LazyLock;

use eventset::{EventKey, EventSet, EventSource, Handler};

use crate::mail::{NewMail, SomeEvent};

static SOME_EVENT: LazyLock<EventKey> = LazyLock::new(|| EventKey::named("some_event"));
static NEW_MAIL: LazyLock<EventKey> = LazyLock::new(|| EventKey::named("new_mail"));

pub type SomeEventHandler = Handler<MailRoom, SomeEvent>;
pub type MailEventHandler = Handler<MailRoom, NewMail>;

/// Exposes a "some event" and a "new mail" event. Both live in one table, so
/// adding more events costs a key each, not a lock each.
#[derive(Debug, Default)]
pub struct MailRoom {
    events: EventSet<MailRoom>,
}

impl EventSource for MailRoom {
    fn event_set(&self) -> &EventSet<Self> {
        &self.events
    }
}

impl MailRoom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_some_events(&self, handler: SomeEventHandler) -> eventset::Result<()> {
        self.events.add(&SOME_EVENT, handler)
    }

    pub fn unsubscribe_some_events(&self, handler: &SomeEventHandler) -> bool {
        self.events.remove(&SOME_EVENT, handler)
    }

    pub fn subscribe_mail_events(&self, handler: MailEventHandler) -> eventset::Result<()> {
        self.events.add(&NEW_MAIL, handler)
    }

    pub fn unsubscribe_mail_events(&self, handler: &MailEventHandler) -> bool {
        self.events.remove(&NEW_MAIL, handler)
    }

    /// Fires the "some event" channel. Returns how many handlers ran.
    pub fn do_something_with_some_event(&self) -> eventset::Result<usize> {
        self.on_event(&SOME_EVENT, &SomeEvent)
    }

    /// Fires the "new mail" channel with the room's standing message.
    pub fn do_something_with_mail_event(&self) -> eventset::Result<usize> {
        self.on_event(&NEW_MAIL, &NewMail::new("Vladyslav", "Vadim", "Work"))
    }

    pub fn some_event_subscribers(&self) -> usize {
        self.events.handler_count(&SOME_EVENT)
    }

    pub fn mail_event_subscribers(&self) -> usize {
        self.events.handler_count(&NEW_MAIL)
    }
}
