use std::env;

use secrecy::SecretString;

use crate::constants::prompts::{
    BATCH_TREND_INSTRUCTION, METADATA_INSTRUCTION, QUALITY_INSTRUCTION,
    STRENGTHS_WEAKNESSES_INSTRUCTION,
};

/// Values shipped in sample configuration files. Treated the same as unset.
const PLACEHOLDER_VALUES: &[&str] = &[
    "YOUR_OPENAI_API_KEY_HERE",
    "YOUR_AIRTABLE_API_KEY_HERE",
    "YOUR_AIRTABLE_BASE_ID_HERE",
    "YOUR_AIRTABLE_TABLE_NAME_HERE",
];

#[derive(Clone, Debug)]
pub struct GenerationCredentials {
    pub api_key: SecretString,
    pub api_base: String,
    pub model: String,
}

#[derive(Clone, Debug)]
pub enum StoreCredentials {
    Airtable {
        api_key: SecretString,
        api_url: String,
        base_id: String,
        table_name: String,
    },
    Mongo {
        conn_string: String,
        db_name: String,
        collection: String,
    },
}

/// System instructions for the analysis passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instructions {
    pub quality: String,
    pub metadata: String,
    pub strengths_weaknesses: String,
    pub batch_trends: String,
}

impl Default for Instructions {
    fn default() -> Self {
        Self {
            quality: QUALITY_INSTRUCTION.to_string(),
            metadata: METADATA_INSTRUCTION.to_string(),
            strengths_weaknesses: STRENGTHS_WEAKNESSES_INSTRUCTION.to_string(),
            batch_trends: BATCH_TREND_INSTRUCTION.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub generation: Option<GenerationCredentials>,
    pub store: Option<StoreCredentials>,
    pub admin_secret: Option<SecretString>,
    pub instructions: Instructions,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub admin_session_hours: i64,
    pub cors_allowed_origin: Option<String>,
}

pub const DEFAULT_ADMIN_SESSION_HOURS: i64 = 8;
pub const MAX_ADMIN_SESSION_HOURS: i64 = 720;

fn session_hours(raw: Option<String>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_ADMIN_SESSION_HOURS;
    };

    match raw.trim().parse::<i64>() {
        Ok(hours) if (1..=MAX_ADMIN_SESSION_HOURS).contains(&hours) => hours,
        _ => {
            log::warn!(
                "ADMIN_SESSION_HOURS '{}' is not between 1 and {}; using {}",
                raw,
                MAX_ADMIN_SESSION_HOURS,
                DEFAULT_ADMIN_SESSION_HOURS
            );
            DEFAULT_ADMIN_SESSION_HOURS
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| is_configured(value));

        let generation = get("OPENAI_API_KEY").map(|api_key| GenerationCredentials {
            api_key: SecretString::from(api_key),
            api_base: get("OPENAI_API_BASE")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: get("OPENAI_MODEL_NAME").unwrap_or_else(|| "gpt-4o".to_string()),
        });

        let backend = get("STORE_BACKEND").unwrap_or_else(|| "airtable".to_string());
        let store = match backend.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => get("MONGO_CONN_STRING").map(|conn_string| {
                StoreCredentials::Mongo {
                    conn_string,
                    db_name: get("MONGO_DB_NAME")
                        .unwrap_or_else(|| "prompt-engineer".to_string()),
                    collection: get("SUBMISSIONS_COLLECTION")
                        .unwrap_or_else(|| "submissions".to_string()),
                }
            }),
            "airtable" => match (
                get("AIRTABLE_API_KEY"),
                get("AIRTABLE_BASE_ID"),
                get("AIRTABLE_TABLE_NAME"),
            ) {
                (Some(api_key), Some(base_id), Some(table_name)) => {
                    Some(StoreCredentials::Airtable {
                        api_key: SecretString::from(api_key),
                        api_url: get("AIRTABLE_API_URL")
                            .unwrap_or_else(|| "https://api.airtable.com/v0".to_string()),
                        base_id,
                        table_name,
                    })
                }
                _ => None,
            },
            other => {
                log::warn!("Unknown STORE_BACKEND '{}'; data storage will be disabled", other);
                None
            }
        };

        let defaults = Instructions::default();
        let instructions = Instructions {
            quality: get("QUALITY_INSTRUCTION").unwrap_or(defaults.quality),
            metadata: get("METADATA_INSTRUCTION").unwrap_or(defaults.metadata),
            strengths_weaknesses: get("STRENGTHS_WEAKNESSES_INSTRUCTION")
                .unwrap_or(defaults.strengths_weaknesses),
            batch_trends: get("BATCH_TREND_INSTRUCTION").unwrap_or(defaults.batch_trends),
        };

        // Without a fixed secret, sessions live only as long as the process.
        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
        });

        Self {
            generation,
            store,
            admin_secret: get("ADMIN_PASSWORD").map(SecretString::from),
            instructions,
            web_server_host: get("WEB_SERVER_HOST").unwrap_or_else(|| "localhost".to_string()),
            web_server_port: get("WEB_SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(jwt_secret),
            admin_session_hours: session_hours(get("ADMIN_SESSION_HOURS")),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN"),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            generation: Some(GenerationCredentials {
                api_key: SecretString::from("sk-test".to_string()),
                api_base: "http://localhost:9999/v1".to_string(),
                model: "gpt-test".to_string(),
            }),
            store: None,
            admin_secret: Some(SecretString::from("letmein".to_string())),
            instructions: Instructions::default(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            admin_session_hours: 1,
            cors_allowed_origin: None,
        }
    }
}

fn is_configured(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !PLACEHOLDER_VALUES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_disables_backends() {
        let config = config_from(&[]);

        assert!(config.generation.is_none());
        assert!(config.store.is_none());
        assert!(config.admin_secret.is_none());
        assert_eq!(config.web_server_port, 8080);
        assert_eq!(config.instructions, Instructions::default());
        assert!(!config.jwt_secret.expose_secret().is_empty());
    }

    #[test]
    fn test_admin_session_hours_out_of_range_fall_back() {
        for raw in ["0", "-3", "721", "9223372036854775807", "eight"] {
            let config = config_from(&[("ADMIN_SESSION_HOURS", raw)]);
            assert_eq!(config.admin_session_hours, DEFAULT_ADMIN_SESSION_HOURS, "{}", raw);
        }

        assert_eq!(config_from(&[("ADMIN_SESSION_HOURS", "1")]).admin_session_hours, 1);
        assert_eq!(
            config_from(&[("ADMIN_SESSION_HOURS", "720")]).admin_session_hours,
            MAX_ADMIN_SESSION_HOURS
        );
    }

    #[test]
    fn test_placeholder_values_are_treated_as_missing() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "YOUR_OPENAI_API_KEY_HERE"),
            ("AIRTABLE_API_KEY", "key123"),
            ("AIRTABLE_BASE_ID", "YOUR_AIRTABLE_BASE_ID_HERE"),
            ("AIRTABLE_TABLE_NAME", "Prompts"),
        ]);

        assert!(config.generation.is_none());
        assert!(config.store.is_none());
    }

    #[test]
    fn test_generation_credentials_with_defaults() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-live")]);
        let generation = config.generation.expect("generation should be configured");

        assert_eq!(generation.api_key.expose_secret(), "sk-live");
        assert_eq!(generation.api_base, "https://api.openai.com/v1");
        assert_eq!(generation.model, "gpt-4o");
    }

    #[test]
    fn test_airtable_store_credentials() {
        let config = config_from(&[
            ("AIRTABLE_API_KEY", "pat123"),
            ("AIRTABLE_BASE_ID", "appXYZ"),
            ("AIRTABLE_TABLE_NAME", "Prompts"),
        ]);

        match config.store {
            Some(StoreCredentials::Airtable {
                base_id,
                table_name,
                api_url,
                ..
            }) => {
                assert_eq!(base_id, "appXYZ");
                assert_eq!(table_name, "Prompts");
                assert_eq!(api_url, "https://api.airtable.com/v0");
            }
            other => panic!("Expected Airtable credentials, got {:?}", other),
        }
    }

    #[test]
    fn test_mongo_store_credentials() {
        let config = config_from(&[
            ("STORE_BACKEND", "mongodb"),
            ("MONGO_CONN_STRING", "mongodb://localhost:27017"),
        ]);

        match config.store {
            Some(StoreCredentials::Mongo {
                db_name, collection, ..
            }) => {
                assert_eq!(db_name, "prompt-engineer");
                assert_eq!(collection, "submissions");
            }
            other => panic!("Expected Mongo credentials, got {:?}", other),
        }
    }

    #[test]
    fn test_instruction_override() {
        let config = config_from(&[("QUALITY_INSTRUCTION", "Grade this prompt.")]);

        assert_eq!(config.instructions.quality, "Grade this prompt.");
        assert_eq!(config.instructions.metadata, METADATA_INSTRUCTION);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert!(config.generation.is_some());
        assert!(config.store.is_none());
        assert_eq!(config.admin_session_hours, 1);
    }
}
