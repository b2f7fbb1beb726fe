/// Engine configuration - planning ceilings and external endpoints
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | AREA_API_URL | http://localhost:7272 | External area registry base URL |
/// | AREA_PAGE_SIZE | 1000 | Page size for the area list call |
/// | SCANNER_RELOAD_URL | (empty) | Scanner backend reload endpoint |
/// | ALERTS_RELOAD_URL | (empty) | Alerts backend reload endpoint |
/// | MAP_RELOAD_URL | (empty) | Map frontend reload endpoint |
/// | RELOAD_SECRET | (empty) | Shared secret sent on reload calls |
/// | REQUEST_TIMEOUT_MS | 30000 | Area registry request timeout |
/// | NOTIFY_TIMEOUT_MS | 5000 | Per-target reload deadline |
/// | SCAN_RADIUS_M | 70 | Sampling disc radius in meters |
/// | MAX_SAMPLE_POINTS | 2000 | Point-count ceiling per zone |
/// | MAX_POSITIONS | 200 | Hard cap on selected sampling positions |
/// | MAX_TOUR_LENGTH_M | 10000 | Estimated tour length ceiling |
/// | POINT_RETENTION_DAYS | 30 | Rolling recency window of the point source |
/// | BOOTSTRAP_MAX_AREA_KM2 | 10 | Provisional zone area ceiling |
/// | BOOTSTRAP_TTL_SECS | 1800 | Provisional tour time-to-live |
/// | SWEEP_INTERVAL_SECS | 60 | Expiry sweep poll interval |
///
/// An empty reload URL disables that notification target.
#[derive(Debug, Clone)]
pub struct Config {
    /// External area registry base URL
    pub area_api_url: String,
    /// Page size requested from the area list endpoint
    pub area_page_size: u32,
    /// Scanner backend reload endpoint (empty = disabled)
    pub scanner_reload_url: String,
    /// Alerts backend reload endpoint (empty = disabled)
    pub alerts_reload_url: String,
    /// Map frontend reload endpoint (empty = disabled)
    pub map_reload_url: String,
    /// Shared secret sent in the reload header
    pub reload_secret: String,
    /// Area registry request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Per-target reload deadline (milliseconds)
    pub notify_timeout_ms: u64,

    // === Planning ceilings ===
    /// Sampling disc radius in meters
    pub scan_radius_m: f64,
    /// Point-count ceiling per zone
    pub max_sample_points: usize,
    /// Hard cap on selected sampling positions
    pub max_positions: usize,
    /// Estimated tour length ceiling in meters
    pub max_tour_length_m: f64,
    /// Rolling recency window of the point source, in days
    pub point_retention_days: i64,

    // === Bootstrap lifecycle ===
    /// Provisional zone area ceiling in square kilometers
    pub bootstrap_max_area_km2: f64,
    /// Provisional tour time-to-live in seconds
    pub bootstrap_ttl_secs: u64,
    /// Expiry sweep poll interval in seconds
    pub sweep_interval_secs: u64,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            area_api_url: std::env::var("AREA_API_URL")
                .unwrap_or_else(|_| "http://localhost:7272".into()),
            area_page_size: env_parse("AREA_PAGE_SIZE", 1000),
            scanner_reload_url: std::env::var("SCANNER_RELOAD_URL").unwrap_or_default(),
            alerts_reload_url: std::env::var("ALERTS_RELOAD_URL").unwrap_or_default(),
            map_reload_url: std::env::var("MAP_RELOAD_URL").unwrap_or_default(),
            reload_secret: std::env::var("RELOAD_SECRET").unwrap_or_default(),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30_000),
            notify_timeout_ms: env_parse("NOTIFY_TIMEOUT_MS", 5_000),
            scan_radius_m: env_parse("SCAN_RADIUS_M", 70.0),
            max_sample_points: env_parse("MAX_SAMPLE_POINTS", 2000),
            max_positions: env_parse("MAX_POSITIONS", 200),
            max_tour_length_m: env_parse("MAX_TOUR_LENGTH_M", 10_000.0),
            point_retention_days: env_parse("POINT_RETENTION_DAYS", 30),
            bootstrap_max_area_km2: env_parse("BOOTSTRAP_MAX_AREA_KM2", 10.0),
            bootstrap_ttl_secs: env_parse("BOOTSTRAP_TTL_SECS", 1800),
            sweep_interval_secs: env_parse("SWEEP_INTERVAL_SECS", 60),
        }
    }

    /// Override the external endpoints, keeping everything else from the
    /// environment. Commonly used in tests against an in-process registry.
    pub fn with_overrides(
        area_api_url: impl Into<String>,
        reload_urls: [&str; 3],
        reload_secret: impl Into<String>,
    ) -> Self {
        let mut config = Self::from_env();
        config.area_api_url = area_api_url.into();
        config.scanner_reload_url = reload_urls[0].to_string();
        config.alerts_reload_url = reload_urls[1].to_string();
        config.map_reload_url = reload_urls[2].to_string();
        config.reload_secret = reload_secret.into();
        config
    }

    /// Grid spacing of bootstrap tours: one disc diameter.
    pub fn grid_spacing_m(&self) -> f64 {
        self.scan_radius_m * 2.0
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
