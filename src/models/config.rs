use serde::Deserialize;

/// Minimum length of the cookie signing key in bytes.
pub const MIN_SECRET_KEY_LEN: usize = 64;

/// Configuration options for the MiniMart service.
///
/// Values come from `config/default.yaml`, an optional
/// `config/{APP_ENV}.yaml` overlay and finally `APP_*` environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Interface to bind the HTTP server to.
    pub address: String,
    pub port: u16,
    /// Key used to sign session and flash-message cookies.
    pub secret_key: String,
    /// Directory containing Tera templates.
    pub templates_dir: String,
    /// Directory served under `/static`.
    pub static_dir: String,
    /// Directory with uploaded product images, served under `/media`.
    pub media_dir: String,
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Load configuration from files and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{environment}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?;

        let server_config: Self = settings.try_deserialize()?;
        server_config.validate()?;
        Ok(server_config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.secret_key.len() < MIN_SECRET_KEY_LEN {
            return Err(config::ConfigError::Message(format!(
                "secret_key must be at least {MIN_SECRET_KEY_LEN} bytes"
            )));
        }
        Ok(())
    }
}
