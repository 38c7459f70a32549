use anyhow::{Result, anyhow, bail};
use config::{Config, File};
use serde::Deserialize;
use url::Url;

const DEFAULT_CONFIG_PATH: &str = "settings.yml";
const APP_PORT_ENV: &str = "APP_PORT";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const SESSION_TTL_ENV: &str = "SESSION_TTL_HOURS";

pub struct Settings {
    pub port: u16,
    pub database_url: Url,
    pub session_ttl_hours: u64,
}

#[derive(Deserialize)]
struct DefaultConfig {
    app_port: u16,
    session_ttl_hours: u64,
    db_name: String,
    db_host: String,
    db_port: u16,
    db_user: String,
    db_pass: String,
}

fn load_default_config() -> Result<DefaultConfig> {
    let settings = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_PATH))
        .build()
        .map_err(|_| anyhow!("Failed to read config file"))?;

    settings
        .try_deserialize::<DefaultConfig>()
        .map_err(|_| anyhow!("Failed to deserialize config file"))
}

/// Try to parse env variable. If it's not set, return None. If it's invalid, treat it as an error.
fn try_from_env<T, F>(env_var: &str, f: F) -> Result<Option<T>>
where
    F: FnOnce(String) -> Result<T>,
{
    match std::env::var(env_var) {
        Ok(raw) => {
            let val = f(raw).map_err(|_| anyhow!("Failed to parse {}", env_var))?;
            Ok(Some(val))
        }
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(_) => bail!("Could not read {env_var} from env"),
    }
}

/// Load configuration from env with fallback to default config file. Early returns if everything is set in env.
pub fn load() -> Result<Settings> {
    let port_opt: Option<u16> = try_from_env(APP_PORT_ENV, |env_str| {
        env_str.parse::<u16>().map_err(|e| e.into())
    })?;

    let database_url_opt: Option<Url> = try_from_env(DATABASE_URL_ENV, |env_str| {
        Url::parse(&env_str).map_err(|e| e.into())
    })?;

    let session_ttl_opt: Option<u64> = try_from_env(SESSION_TTL_ENV, |env_str| {
        env_str.parse::<u64>().map_err(|e| e.into())
    })?;

    if let (Some(port), Some(database_url), Some(session_ttl_hours)) =
        (port_opt, database_url_opt.clone(), session_ttl_opt)
    {
        return Ok(Settings {
            port,
            database_url,
            session_ttl_hours,
        });
    }

    let config = load_default_config()?;

    let port = match port_opt {
        Some(val) => val,
        None => {
            tracing::warn!("{APP_PORT_ENV} is not set, using value from {DEFAULT_CONFIG_PATH}");
            config.app_port
        }
    };

    let session_ttl_hours = match session_ttl_opt {
        Some(val) => val,
        None => {
            tracing::warn!("{SESSION_TTL_ENV} is not set, using value from {DEFAULT_CONFIG_PATH}");
            config.session_ttl_hours
        }
    };

    let database_url = match database_url_opt {
        Some(url) => url,
        None => {
            tracing::warn!("{DATABASE_URL_ENV} is not set, using value from {DEFAULT_CONFIG_PATH}");
            let url_str = format!(
                "postgres://{}:{}@{}:{}/{}",
                config.db_user, config.db_pass, config.db_host, config.db_port, config.db_name
            );
            Url::parse(&url_str)?
        }
    };

    Ok(Settings {
        port,
        database_url,
        session_ttl_hours,
    })
}
