use std::path::PathBuf;

use clipgate_providers::ProviderKind;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Provider
/// endpoint and credential configuration lives with the provider clients
/// (`KieConfig`, `FalConfig`, `ElevenConfig`); this struct covers the
/// gateway itself.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins. The single entry `*` allows any origin,
    /// which is the default since the front end is a static page.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60` -- submission
    /// handlers block for the inline poll).
    pub request_timeout_secs: u64,
    /// Per-call timeout for upstream HTTP requests in seconds
    /// (default: `15`), so one slow upstream call cannot stall a whole
    /// retry budget.
    pub upstream_timeout_secs: u64,
    /// Provider used when the caller does not select one.
    pub default_provider: ProviderKind,
    /// Writable root served under `/static` (default: `/tmp/public`).
    pub static_root: PathBuf,
    /// Whether the ffmpeg mux endpoint is enabled (`ENABLE_MUX=1`).
    pub enable_mux: bool,
    /// Path to the ffmpeg binary (default: `ffmpeg`).
    pub ffmpeg_path: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default       |
    /// |-------------------------|---------------|
    /// | `HOST`                  | `0.0.0.0`     |
    /// | `PORT`                  | `8080`        |
    /// | `CORS_ORIGINS`          | `*`           |
    /// | `REQUEST_TIMEOUT_SECS`  | `60`          |
    /// | `UPSTREAM_TIMEOUT_SECS` | `15`          |
    /// | `DEFAULT_PROVIDER`      | `kie`         |
    /// | `STATIC_ROOT`           | `/tmp/public` |
    /// | `ENABLE_MUX`            | *(unset)*     |
    /// | `FFMPEG_PATH`           | `ffmpeg`      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(&std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()));

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        let default_provider = std::env::var("DEFAULT_PROVIDER")
            .ok()
            .map(|raw| ProviderKind::parse(&raw).expect("DEFAULT_PROVIDER must be kie or fal"))
            .unwrap_or(ProviderKind::Kie);

        let static_root =
            PathBuf::from(std::env::var("STATIC_ROOT").unwrap_or_else(|_| "/tmp/public".into()));

        let enable_mux = std::env::var("ENABLE_MUX").as_deref() == Ok("1");

        let ffmpeg_path = std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upstream_timeout_secs,
            default_provider,
            static_root,
            enable_mux,
            ffmpeg_path,
        }
    }

    /// Directory for saved TTS output, under the static root.
    pub fn tts_dir(&self) -> PathBuf {
        self.static_root.join("tts")
    }

    /// Directory for merged mux output, under the static root.
    pub fn mux_dir(&self) -> PathBuf {
        self.static_root.join("mux")
    }

    /// Whether any origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
