use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub printer: PrinterConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Moonraker (printer control-plane) location. `host` is required for any upstream call;
/// when it is missing the server still starts and handlers answer 500.
#[derive(Debug, Clone, Deserialize)]
pub struct PrinterConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_printer_port")]
    pub port: u16,
    /// Upper bound for every JSON request to Moonraker.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_printer_port(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_printer_port() -> u16 {
    7127
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

/// Base used for root-relative webcam URLs. Host falls back to the printer host.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_camera_port")]
    pub port: u16,
    #[serde(default = "default_snapshot_timeout_ms")]
    pub snapshot_timeout_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_camera_port(),
            snapshot_timeout_ms: default_snapshot_timeout_ms(),
        }
    }
}

fn default_camera_port() -> u16 {
    80
}

fn default_snapshot_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_system_stats_ttl_ms")]
    pub system_stats_ttl_ms: u64,
    #[serde(default = "default_temperature_ttl_ms")]
    pub temperature_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            system_stats_ttl_ms: default_system_stats_ttl_ms(),
            temperature_ttl_ms: default_temperature_ttl_ms(),
        }
    }
}

fn default_system_stats_ttl_ms() -> u64 {
    1_000
}

fn default_temperature_ttl_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "data/printdash.db".into()
}

impl PrinterConfig {
    /// Configured host, treating an empty string as unset.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().map(str::trim).filter(|h| !h.is_empty())
    }

    pub fn base_url(&self) -> Option<String> {
        self.host().map(|h| format!("http://{}:{}", h, self.port))
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        let mut config: AppConfig = toml::from_str(&s)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests). No env overrides.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// PRINTER_HOST / PRINTER_PORT win over the file.
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(host) = std::env::var("PRINTER_HOST") {
            self.printer.host = Some(host);
        }
        if let Ok(port) = std::env::var("PRINTER_PORT") {
            self.printer.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("PRINTER_PORT must be a port number: {}", e))?;
        }
        Ok(())
    }

    /// Base for root-relative webcam URLs, e.g. `http://printer.local:80`.
    pub fn camera_base_url(&self) -> Option<String> {
        let host = self
            .camera
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .or_else(|| self.printer.host())?;
        Some(format!("http://{}:{}", host, self.camera.port))
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.printer.port > 0,
            "printer.port must be between 1 and 65535, got {}",
            self.printer.port
        );
        anyhow::ensure!(
            self.printer.request_timeout_ms > 0,
            "printer.request_timeout_ms must be > 0, got {}",
            self.printer.request_timeout_ms
        );
        anyhow::ensure!(
            self.camera.port > 0,
            "camera.port must be between 1 and 65535, got {}",
            self.camera.port
        );
        anyhow::ensure!(
            self.camera.snapshot_timeout_ms > 0,
            "camera.snapshot_timeout_ms must be > 0, got {}",
            self.camera.snapshot_timeout_ms
        );
        anyhow::ensure!(
            self.cache.system_stats_ttl_ms > 0,
            "cache.system_stats_ttl_ms must be > 0, got {}",
            self.cache.system_stats_ttl_ms
        );
        anyhow::ensure!(
            self.cache.temperature_ttl_ms > 0,
            "cache.temperature_ttl_ms must be > 0, got {}",
            self.cache.temperature_ttl_ms
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        Ok(())
    }
}
