//! Configuration loading helper functions
//! Priority resolution for values that may come from a config file, the
//! environment, or a built-in default.

use tracing::debug;

/// Get string configuration value with priority: file > ENV > Default
pub fn get_string_config(
    file_value: Option<String>,
    is_default: bool,
    env_var: &str,
    default: String,
) -> String {
    if let Some(val) = file_value {
        if !val.is_empty() && !is_default {
            debug!("Using {} from config file", env_var);
            return val;
        }
    }

    if let Ok(env_val) = std::env::var(env_var) {
        if !env_val.is_empty() {
            debug!("Using {} from environment", env_var);
            return env_val;
        }
    }

    debug!("Using default value for {}", env_var);
    default
}
