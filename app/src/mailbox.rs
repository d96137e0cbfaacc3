//! A single-event producer and a subscriber that attaches itself to it.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use eventset::{Channel, Handler};
use log::info;

use crate::mail::NewMail;

pub type NewMailHandler = Handler<Mailbox, NewMail>;

/// Receives messages and announces each one on its `new_mail` channel.
#[derive(Debug)]
pub struct Mailbox {
    new_mail: Channel<Mailbox, NewMail>,
}

impl Default for Mailbox {
    fn default() -> Self {
        Self {
            new_mail: Channel::named("mailbox.new_mail"),
        }
    }
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_new_mail(&self, handler: NewMailHandler) {
        self.new_mail.subscribe(handler);
    }

    pub fn unsubscribe_new_mail(&self, handler: &NewMailHandler) -> bool {
        self.new_mail.unsubscribe(handler)
    }

    pub fn subscribers(&self) -> usize {
        self.new_mail.handler_count()
    }

    /// Builds a message and notifies subscribers. Returns how many were notified.
    pub fn get_message(&self, from: &str, to: &str, subject: &str) -> eventset::Result<usize> {
        self.on_new_message(&NewMail::new(from, to, subject))
    }

    fn on_new_message(&self, mail: &NewMail) -> eventset::Result<usize> {
        self.new_mail.raise(self, mail)
    }
}

/// Faxes every message that arrives in the mailbox it was attached to.
#[derive(Debug)]
pub struct Fax {
    handler: NewMailHandler,
    sent: Arc<AtomicUsize>,
}

impl Fax {
    /// Creates a fax machine and subscribes it to `mailbox`.
    pub fn new(mailbox: &Mailbox) -> Self {
        let sent = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&sent);
        let handler = Handler::new(move |_: &Mailbox, mail: &NewMail| {
            info!("Faxing new mail message:");
            info!(
                "From:\t{}\tTo:\t{}\tSubject:\t{}",
                mail.from(),
                mail.to(),
                mail.subject()
            );
            counter.fetch_add(1, Ordering::SeqCst);
        });
        mailbox.subscribe_new_mail(handler.clone());
        Self { handler, sent }
    }

    /// Detaches from `mailbox`. Returns `false` if it was not attached.
    pub fn unregister(&self, mailbox: &Mailbox) -> bool {
        mailbox.unsubscribe_new_mail(&self.handler)
    }

    /// Number of messages faxed so far.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fax_sends_until_unregistered() {
        let mailbox = Mailbox::new();
        let fax = Fax::new(&mailbox);

        assert_eq!(mailbox.get_message("a", "b", "first").unwrap(), 1);
        assert!(fax.unregister(&mailbox));
        assert_eq!(mailbox.get_message("a", "b", "second").unwrap(), 0);

        assert_eq!(fax.sent(), 1);
        assert!(!fax.unregister(&mailbox));
    }

    #[test]
    fn two_faxes_both_receive() {
        let mailbox = Mailbox::new();
        let first = Fax::new(&mailbox);
        let second = Fax::new(&mailbox);

        mailbox.get_message("a", "b", "c").unwrap();

        assert_eq!(mailbox.subscribers(), 2);
        assert_eq!(first.sent(), 1);
        assert_eq!(second.sent(), 1);
    }

    #[test]
    fn subscriber_sees_mailbox_as_sender() {
        let mailbox = Mailbox::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);
        mailbox.subscribe_new_mail(Handler::new(move |sender: &Mailbox, _: &NewMail| {
            seen_clone.store(sender.subscribers(), Ordering::SeqCst)
        }));

        mailbox.get_message("a", "b", "c").unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
