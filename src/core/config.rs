use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub weather: WeatherConfig,
    pub session: SessionConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    pub frontend_url: String,
}

/// Village REST backend that owns every persisted record
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL including the API prefix, e.g. "http://localhost:5000/api"
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

/// Open-Meteo current weather for the village coordinates
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a login session stays valid
    pub ttl: Duration,
    /// How often expired sessions are swept from memory
    pub sweep_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            backend: BackendConfig::from_env()?,
            weather: WeatherConfig::from_env()?,
            session: SessionConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
            frontend_url,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BackendConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("BACKEND_API_URL")
            .map_err(|_| "BACKEND_API_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        let request_timeout_secs = env::var("BACKEND_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "BACKEND_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        let connect_timeout_secs = env::var("BACKEND_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CONNECT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "BACKEND_CONNECT_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }
}

impl WeatherConfig {
    // Baturaden, Banyumas
    const DEFAULT_LATITUDE: f64 = -7.3127;
    const DEFAULT_LONGITUDE: f64 = 109.2285;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("WEATHER_API_URL")
            .unwrap_or_else(|_| "https://api.open-meteo.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();

        let latitude = env::var("VILLAGE_LATITUDE")
            .unwrap_or_else(|_| Self::DEFAULT_LATITUDE.to_string())
            .parse::<f64>()
            .map_err(|_| "VILLAGE_LATITUDE must be a valid number".to_string())?;

        let longitude = env::var("VILLAGE_LONGITUDE")
            .unwrap_or_else(|_| Self::DEFAULT_LONGITUDE.to_string())
            .parse::<f64>()
            .map_err(|_| "VILLAGE_LONGITUDE must be a valid number".to_string())?;

        let request_timeout_secs = env::var("WEATHER_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "WEATHER_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            latitude,
            longitude,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

impl SessionConfig {
    const DEFAULT_TTL_SECS: u64 = 60 * 60 * 24; // 1 day
    const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300; // 5 minutes

    pub fn from_env() -> Result<Self, String> {
        let ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_SECS must be a valid number".to_string())?;

        let sweep_interval_secs = env::var("SESSION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_SWEEP_INTERVAL_SECS must be a valid number".to_string())?;

        Ok(Self {
            ttl: Duration::from_secs(ttl_secs),
            sweep_interval: Duration::from_secs(sweep_interval_secs.max(1)),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Desa Portal API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the village information portal".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
