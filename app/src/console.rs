//! Scripted walkthrough and interactive prompt driving the demo producers.

use std::io::Write;

use anyhow::{Context, bail};
use crossbeam::channel::Receiver;
use eventset::Handler;
use log::info;
use rustyline::{Editor, error::ReadlineError};

use crate::{
    logger::{self, LogMessage},
    mail::{NewMail, SomeEvent},
    mailbox::{Fax, Mailbox},
    room::{MailEventHandler, MailRoom, SomeEventHandler},
};

const HELP: &str = "\
commands:
  subscribe <some|mail|fax>     attach a handler
  unsubscribe <some|mail|fax>   detach it again
  fire <some|mail>              raise a room event
  mail <from> <to> <subject>    deliver a message to the mailbox
  status                        show subscriber counts
  help                          show this text
  exit                          leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Something,
    Mail,
    Fax,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Subscribe(Target),
    Unsubscribe(Target),
    Fire(Target),
    Mail {
        from: String,
        to: String,
        subject: String,
    },
    Status,
    Help,
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let command = match verb {
            "subscribe" => Command::Subscribe(target(words.next())?),
            "unsubscribe" => Command::Unsubscribe(target(words.next())?),
            "fire" => match target(words.next())? {
                Target::Fax => bail!("the fax is a subscriber, try `mail`"),
                t => Command::Fire(t),
            },
            "mail" => {
                let from = words.next().context("mail needs a sender")?.to_string();
                let to = words.next().context("mail needs a recipient")?.to_string();
                let subject = words.collect::<Vec<_>>().join(" ");
                if subject.is_empty() {
                    bail!("mail needs a subject");
                }
                Command::Mail { from, to, subject }
            }
            "status" => Command::Status,
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => bail!("unknown command `{other}`"),
        };
        Ok(command)
    }
}

fn target(word: Option<&str>) -> anyhow::Result<Target> {
    match word {
        Some("some") => Ok(Target::Something),
        Some("mail") => Ok(Target::Mail),
        Some("fax") => Ok(Target::Fax),
        Some(other) => bail!("unknown target `{other}`"),
        None => bail!("missing target (some, mail or fax)"),
    }
}

pub fn handle_mail_event(_sender: &MailRoom, mail: &NewMail) {
    info!("New mail event handler");
    info!("From: {}", mail.from());
    info!("To: {}", mail.to());
    info!("Subject: {}", mail.subject());
}

pub fn handle_some_event(_sender: &MailRoom, _event: &SomeEvent) {
    info!("Some event handler");
}

/// The producers plus the handler values the console subscribes, kept so the
/// exact same handlers can be unsubscribed later.
pub struct Session {
    room: MailRoom,
    mailbox: Mailbox,
    fax: Option<Fax>,
    some_handler: SomeEventHandler,
    mail_handler: MailEventHandler,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            room: MailRoom::new(),
            mailbox: Mailbox::new(),
            fax: None,
            some_handler: Handler::new(handle_some_event),
            mail_handler: Handler::new(handle_mail_event),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one command. Returns `false` once the session should end.
    pub fn execute(&mut self, command: Command) -> anyhow::Result<bool> {
        match command {
            Command::Subscribe(Target::Something) => {
                self.room.subscribe_some_events(self.some_handler.clone())?
            }
            Command::Subscribe(Target::Mail) => {
                self.room.subscribe_mail_events(self.mail_handler.clone())?
            }
            Command::Subscribe(Target::Fax) => {
                if self.fax.is_some() {
                    info!("fax already attached");
                } else {
                    self.fax = Some(Fax::new(&self.mailbox));
                }
            }
            Command::Unsubscribe(Target::Something) => {
                report_removed(self.room.unsubscribe_some_events(&self.some_handler))
            }
            Command::Unsubscribe(Target::Mail) => {
                report_removed(self.room.unsubscribe_mail_events(&self.mail_handler))
            }
            Command::Unsubscribe(Target::Fax) => match self.fax.take() {
                Some(fax) => {
                    report_removed(fax.unregister(&self.mailbox));
                    info!("fax detached after sending {} message(s)", fax.sent());
                }
                None => report_removed(false),
            },
            Command::Fire(Target::Something) => {
                report_fired(self.room.do_something_with_some_event()?)
            }
            Command::Fire(Target::Mail | Target::Fax) => {
                report_fired(self.room.do_something_with_mail_event()?)
            }
            Command::Mail { from, to, subject } => {
                report_fired(self.mailbox.get_message(&from, &to, &subject)?)
            }
            Command::Status => info!(
                "some: {} subscriber(s), mail: {} subscriber(s), mailbox: {} subscriber(s)",
                self.room.some_event_subscribers(),
                self.room.mail_event_subscribers(),
                self.mailbox.subscribers()
            ),
            Command::Help => info!("{HELP}"),
            Command::Exit => return Ok(false),
        }
        Ok(true)
    }

    /// Replays the reference walkthrough: both room handlers subscribed, mail
    /// fired, mail handler removed, mail fired to nobody, some-event fired; then
    /// the fax attached to the mailbox, a message delivered, the fax detached and
    /// another message delivered to nobody.
    pub fn run_script(&mut self) -> anyhow::Result<()> {
        let script = [
            "subscribe some",
            "subscribe mail",
            "fire mail",
            "unsubscribe mail",
            "fire mail",
            "fire some",
            "subscribe fax",
            "mail Vladyslav Vadim Work",
            "unsubscribe fax",
            "mail Vladyslav Vadim Holiday",
        ];
        for line in script {
            info!("> {line}");
            self.execute(Command::parse(line)?)?;
        }
        Ok(())
    }
}

fn report_removed(removed: bool) {
    if !removed {
        info!("nothing to unsubscribe");
    }
}

fn report_fired(handlers: usize) {
    if handlers == 0 {
        info!("nobody is listening");
    }
}

/// Reads commands until `exit` or end of input, printing log output after each.
pub fn repl(session: &mut Session, logs: &Receiver<LogMessage>) -> anyhow::Result<()> {
    let mut editor = Editor::<()>::new();
    let mut stdout = std::io::stdout();
    info!("{HELP}");
    logger::drain(logs, &mut stdout)?;

    loop {
        let line = match editor.readline("eventset> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        editor.add_history_entry(line.as_str());

        let keep_going = match Command::parse(&line) {
            Ok(command) => session.execute(command).unwrap_or_else(|err| {
                log::error!("{err:#}");
                true
            }),
            Err(err) => {
                log::warn!("{err:#}");
                true
            }
        };
        logger::drain(logs, &mut stdout)?;
        stdout.flush()?;
        if !keep_going {
            break;
        }
    }
    Ok(())
}
