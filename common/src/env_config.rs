use std::{env, sync::Arc, time::Duration};

#[derive(Clone, Debug)]
/// Configuration struct for the dashboard gateway.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server: the upstream admin API
/// location and request budget, server host and port, number of worker
/// threads, CORS settings, and logging preferences.
pub struct Config {
    /// Base URL of the upstream global-chat admin API.
    pub upstream_api_url: String,
    /// Budget for a single proxied call, in seconds. A call that outlives
    /// it is aborted and reported as a timeout.
    pub upstream_timeout_secs: u64,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// Every setting has a default, so the gateway starts with no
    /// environment at all and points at a local upstream.
    ///
    /// # Environment Variables
    ///
    /// - `UPSTREAM_API_URL`: Upstream admin API base URL (default: "http://localhost:2000")
    /// - `UPSTREAM_TIMEOUT_SECS`: Per-request budget in seconds (default: 30)
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            upstream_api_url: env::var("UPSTREAM_API_URL")
                .unwrap_or_else(|_| "http://localhost:2000".to_string()),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
