use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub twilio: TwilioConfig,
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Session token lifetime in seconds. Tokens are valid for 7 days.
    #[serde(default = "default_token_expires_in")]
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub verify_service_sid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    pub file_path: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            file_path: "messages.json".to_string(),
        }
    }
}

fn default_token_expires_in() -> i64 {
    7 * 24 * 3600
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Read the config file if present, otherwise build from environment
        // variables only.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => Self::from_toml_str(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 4000u16),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET").unwrap_or_default(),
                        expires_in: get_env_parse("JWT_EXPIRES_IN", default_token_expires_in()),
                    },
                    twilio: TwilioConfig {
                        account_sid: get_env("TWILIO_ACCOUNT_SID").unwrap_or_default(),
                        auth_token: get_env("TWILIO_AUTH_TOKEN").unwrap_or_default(),
                        verify_service_sid: get_env("TWILIO_VERIFY_SERVICE_SID")
                            .unwrap_or_default(),
                    },
                    supabase: SupabaseConfig {
                        url: get_env("SUPABASE_URL").unwrap_or_default(),
                        service_key: get_env("SUPABASE_SERVICE_KEY").unwrap_or_default(),
                    },
                    messages: MessagesConfig {
                        file_path: get_env("MESSAGES_FILE")
                            .unwrap_or_else(|| "messages.json".to_string()),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Environment overrides apply even when the file exists.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.expires_in = n;
        }
        if let Ok(v) = env::var("TWILIO_ACCOUNT_SID") {
            config.twilio.account_sid = v;
        }
        if let Ok(v) = env::var("TWILIO_AUTH_TOKEN") {
            config.twilio.auth_token = v;
        }
        if let Ok(v) = env::var("TWILIO_VERIFY_SERVICE_SID") {
            config.twilio.verify_service_sid = v;
        }
        if let Ok(v) = env::var("SUPABASE_URL") {
            config.supabase.url = v;
        }
        if let Ok(v) = env::var("SUPABASE_SERVICE_KEY") {
            config.supabase.service_key = v;
        }
        if let Ok(v) = env::var("MESSAGES_FILE") {
            config.messages.file_path = v;
        }

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Config =
            toml::from_str(config_str).map_err(|e| format!("Failed to parse config: {e}"))?;
        Ok(config)
    }

    /// The whole OTP/session path is useless without credentials, so refuse
    /// to start instead of failing on the first request.
    pub fn validate(&self) -> AppResult<()> {
        let mut missing = Vec::new();

        if self.jwt.secret.is_empty() {
            missing.push("jwt.secret (JWT_SECRET)");
        }
        if self.twilio.account_sid.is_empty() {
            missing.push("twilio.account_sid (TWILIO_ACCOUNT_SID)");
        }
        if self.twilio.auth_token.is_empty() {
            missing.push("twilio.auth_token (TWILIO_AUTH_TOKEN)");
        }
        if self.twilio.verify_service_sid.is_empty() {
            missing.push("twilio.verify_service_sid (TWILIO_VERIFY_SERVICE_SID)");
        }
        if self.supabase.url.is_empty() {
            missing.push("supabase.url (SUPABASE_URL)");
        }
        if self.supabase.service_key.is_empty() {
            missing.push("supabase.service_key (SUPABASE_SERVICE_KEY)");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::ConfigError(format!(
                "Missing required configuration: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 4000

            [jwt]
            secret = "test-secret"

            [twilio]
            account_sid = "ACxxx"
            auth_token = "token"
            verify_service_sid = "VAxxx"

            [supabase]
            url = "https://example.supabase.co"
            service_key = "service-key"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.jwt.expires_in, 7 * 24 * 3600);
        assert_eq!(config.messages.file_path, "messages.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_missing_credentials() {
        let config = Config::from_toml_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 4000

            [jwt]
            secret = ""

            [twilio]
            account_sid = "ACxxx"
            auth_token = "token"
            verify_service_sid = "VAxxx"

            [supabase]
            url = ""
            service_key = "service-key"
            "#,
        )
        .unwrap();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("jwt.secret"));
        assert!(err.contains("supabase.url"));
        assert!(!err.contains("twilio.account_sid"));
    }
}
