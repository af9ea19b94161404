use fakenodo_core::deposition::DEFAULT_DOI_PREFIX;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running next to a local hub
/// instance. Override via environment variables (or a `.env` file).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5005`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size, which bounds uploads.
    pub max_upload_bytes: usize,
    /// Namespace prepended to every minted DOI.
    pub doi_prefix: String,
    /// Whether uploads may reference a file on the server's filesystem.
    pub allow_local_path_uploads: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `5005`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5000` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `MAX_UPLOAD_BYTES`         | `104857600`             |
    /// | `DOI_PREFIX`               | `10.9999/fakenodo`      |
    /// | `ALLOW_LOCAL_PATH_UPLOADS` | `true`                  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5005".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "104857600".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let doi_prefix = std::env::var("DOI_PREFIX").unwrap_or_else(|_| DEFAULT_DOI_PREFIX.into());

        let allow_local_path_uploads: bool = std::env::var("ALLOW_LOCAL_PATH_UPLOADS")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .expect("ALLOW_LOCAL_PATH_UPLOADS must be `true` or `false`");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            doi_prefix,
            allow_local_path_uploads,
        }
    }
}
