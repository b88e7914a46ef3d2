use std::path::PathBuf;

use clap::Parser;

/// Runtime settings, read from flags or the environment (a `.env` file is
/// loaded first when present).
#[derive(Clone, Debug, Parser)]
#[command(name = "campaign_tracker", about = "Podcast advertising campaign tracker")]
pub struct Settings {
    /// Interface to listen on
    #[arg(long, env = "CAMPAIGN_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CAMPAIGN_PORT", default_value_t = 8001)]
    pub port: u16,

    /// Path to the sqlite database file, created if missing
    #[arg(long, env = "CAMPAIGN_DATABASE", default_value = "campaigns.db")]
    pub database: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "CAMPAIGN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Settings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let settings = Settings::try_parse_from([
            "campaign_tracker",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--database",
            "/tmp/other.db",
        ])
        .unwrap();

        assert_eq!(settings.address(), "127.0.0.1:9000");
        assert_eq!(settings.database, PathBuf::from("/tmp/other.db"));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let result = Settings::try_parse_from(["campaign_tracker", "--port", "http"]);

        assert!(result.is_err());
    }
}
