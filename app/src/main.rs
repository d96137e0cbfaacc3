mod config;
mod console;
mod logger;
mod mail;
mod mailbox;
mod room;

use clap::Parser;
use config::DemoConfig;
use console::Session;
use logger::ChannelLogger;

fn main() -> anyhow::Result<()> {
    let config = DemoConfig::parse();
    let logs = ChannelLogger::install(config.log_level)?;
    let mut stdout = std::io::stdout();

    let mut session = Session::new();
    session.run_script()?;
    logger::drain(&logs, &mut stdout)?;

    if config.interactive {
        console::repl(&mut session, &logs)?;
    }
    Ok(())
}
