use clap::Parser;
use log::LevelFilter;

/// Environment variable consulted for the log level when `--log-level` is absent.
pub const LOG_ENV: &str = "EVENTSET_LOG";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "eventset-demo",
    about = "Walks a mail room and a mailbox through subscribe, raise and unsubscribe"
)]
pub struct DemoConfig {
    /// Open a prompt after the scripted run
    #[arg(short, long)]
    pub interactive: bool,

    /// Maximum log level printed (off, error, warn, info, debug, trace)
    #[arg(long, env = LOG_ENV, default_value = "info")]
    pub log_level: LevelFilter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        DemoConfig::command().debug_assert();
    }

    #[test]
    fn flags_are_parsed() {
        let config =
            DemoConfig::try_parse_from(["eventset-demo", "-i", "--log-level", "trace"]).unwrap();

        assert!(config.interactive);
        assert_eq!(config.log_level, LevelFilter::Trace);
    }

    #[test]
    fn equals_form_and_long_flag_are_accepted() {
        let config =
            DemoConfig::try_parse_from(["eventset-demo", "--interactive", "--log-level=debug"])
                .unwrap();

        assert!(config.interactive);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn log_level_reads_the_environment_variable() {
        let command = DemoConfig::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "log_level")
            .unwrap();

        assert_eq!(arg.get_env().and_then(|env| env.to_str()), Some(LOG_ENV));
    }

    #[test]
    fn help_is_available() {
        let err = DemoConfig::try_parse_from(["eventset-demo", "--help"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("--log-level"));
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(DemoConfig::try_parse_from(["eventset-demo", "--verbose"]).is_err());
        assert!(DemoConfig::try_parse_from(["eventset-demo", "--log-level"]).is_err());
        assert!(DemoConfig::try_parse_from(["eventset-demo", "--log-level", "loud"]).is_err());
    }
}
