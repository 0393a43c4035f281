//! Fill the database with the sample catalog.
//!
//! Uses the same configuration sources as the web server.

use dotenvy::dotenv;

use minimart::db::{establish_connection_pool, run_migrations};
use minimart::models::config::ServerConfig;
use minimart::repository::DieselRepository;
use minimart::services::seed::populate;

fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match pool.get() {
        Ok(mut conn) => {
            if let Err(e) = run_migrations(&mut conn) {
                log::error!("Failed to run database migrations: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            log::error!("Failed to get database connection: {e}");
            std::process::exit(1);
        }
    }

    let repo = DieselRepository::new(pool);
    match populate(&repo) {
        Ok(_) => log::info!("Successfully populated database!"),
        Err(e) => {
            log::error!("Failed to populate database: {e}");
            std::process::exit(1);
        }
    }
}
