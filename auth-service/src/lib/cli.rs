use clap::Arg;
use clap::ArgMatches;
use clap::Command;

/// Command line of the server binary.
#[must_use]
pub fn new() -> Command {
    Command::new("auth-service")
        .about("Credential authentication gRPC service")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a configuration file")
                .long_help(
                    "Path to a configuration file layered over config/default.toml and config/{RUN_MODE}.toml. Environment variables still take precedence.",
                )
                .env("CONFIG_PATH"),
        )
}

/// Explicit configuration file, from `--config` or `CONFIG_PATH`.
pub fn config_path(matches: &ArgMatches) -> Option<&str> {
    matches.get_one::<String>("config").map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flag() {
        let matches = new()
            .try_get_matches_from(["auth-service", "--config", "/etc/auth/local.toml"])
            .unwrap();
        assert_eq!(config_path(&matches), Some("/etc/auth/local.toml"));
    }

    #[test]
    fn test_config_short_flag() {
        let matches = new()
            .try_get_matches_from(["auth-service", "-c", "local.toml"])
            .unwrap();
        assert_eq!(config_path(&matches), Some("local.toml"));
    }

    #[test]
    fn test_no_config_path() {
        if std::env::var_os("CONFIG_PATH").is_some() {
            return;
        }
        let matches = new().try_get_matches_from(["auth-service"]).unwrap();
        assert_eq!(config_path(&matches), None);
    }

    #[test]
    fn test_unknown_argument_is_rejected() {
        assert!(new()
            .try_get_matches_from(["auth-service", "--port", "1"])
            .is_err());
    }
}
