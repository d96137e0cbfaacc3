use std::io::{self, Write};

use crossbeam::channel::{Receiver, Sender, unbounded};
use log::{Level, LevelFilter, Metadata, Record};

#[derive(Debug)]
pub struct LogMessage {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Forwards log records to the console loop over a channel, so output from
/// handlers is printed between commands instead of interleaving with the prompt.
pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    max_level: LevelFilter,
}

impl log::Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = self.sender.try_send(LogMessage {
                level: record.metadata().level(),
                target: record.target().to_string(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

impl ChannelLogger {
    pub fn new(sender: Sender<LogMessage>, max_level: LevelFilter) -> Self {
        Self { sender, max_level }
    }

    pub fn with_receiver(max_level: LevelFilter) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender, max_level), receiver)
    }

    /// Installs the logger globally and returns the receiving end.
    pub fn install(max_level: LevelFilter) -> anyhow::Result<Receiver<LogMessage>> {
        let (logger, receiver) = Self::with_receiver(max_level);
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(max_level);
        Ok(receiver)
    }
}

/// Writes every pending message to `out`. Info lines from the demo print bare;
/// everything else is tagged with level and target.
pub fn drain(receiver: &Receiver<LogMessage>, out: &mut impl Write) -> io::Result<usize> {
    let mut written = 0;
    for msg in receiver.try_iter() {
        if msg.level == Level::Info && !msg.target.starts_with("eventset::") {
            writeln!(out, "{}", msg.message)?;
        } else {
            writeln!(out, "[{:<5} {}] {}", msg.level, msg.target, msg.message)?;
        }
        written += 1;
    }
    Ok(written)
}
