use canvasify_core::{PackageOptions, DEFAULT_CANVAS_SIZE, DEFAULT_JPEG_QUALITY};

/// Default request body ceiling: 100 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared read-only through [`crate::state::AppState`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Largest accepted request body in bytes (default: 100 MiB).
    pub max_upload_bytes: usize,
    /// Edge of the square output canvas (default: `1000`).
    pub canvas_size: u32,
    /// Quality for JPEG entries (default: `75`).
    pub jpeg_quality: u8,
    /// HTTP request timeout in seconds (default: `120`).
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            canvas_size: DEFAULT_CANVAS_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            request_timeout_secs: 120,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default     |
    /// |------------------------|-------------|
    /// | `HOST`                 | `0.0.0.0`   |
    /// | `PORT`                 | `8080`      |
    /// | `MAX_UPLOAD_BYTES`     | `104857600` |
    /// | `CANVAS_SIZE`          | `1000`      |
    /// | `JPEG_QUALITY`         | `75`        |
    /// | `REQUEST_TIMEOUT_SECS` | `120`       |
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);
        let port: u16 = env_or("PORT", defaults.port);
        let max_upload_bytes: usize = env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes);
        let canvas_size: u32 = env_or("CANVAS_SIZE", defaults.canvas_size);
        let jpeg_quality: u8 = env_or("JPEG_QUALITY", defaults.jpeg_quality);
        let request_timeout_secs: u64 =
            env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs);

        assert!(canvas_size > 0, "CANVAS_SIZE must be greater than zero");
        assert!(
            (1..=100).contains(&jpeg_quality),
            "JPEG_QUALITY must be between 1 and 100"
        );

        Self {
            host,
            port,
            max_upload_bytes,
            canvas_size,
            jpeg_quality,
            request_timeout_secs,
        }
    }

    /// Options handed to the batch packager for every request.
    pub fn package_options(&self) -> PackageOptions {
        PackageOptions {
            canvas_size: self.canvas_size,
            jpeg_quality: self.jpeg_quality,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}
