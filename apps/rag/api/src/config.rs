use core_config::{AppInfo, FromEnv, app_info, env_optional, server::ServerConfig};

use database::postgres::PostgresConfig;
use domain_query::OpenAiConfig;
use domain_vector::WeaviateConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    /// `None` when `DATABASE_URL` is unset; the stores then live in memory
    pub database: Option<PostgresConfig>,
    pub openai: OpenAiConfig,
    pub server: ServerConfig,
    pub weaviate: WeaviateConfig,
    pub environment: Environment,
    /// Memory ids registered as `interviewer` at startup (`SEED_INTERVIEWER_MEMORY_IDS`)
    pub seed_interviewer_memories: Vec<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = match env_optional("DATABASE_URL") {
            Some(_) => Some(PostgresConfig::from_env()?),
            None => None,
        };
        let openai = OpenAiConfig::from_env()?; // Required - OPENAI_API_KEY must be set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let weaviate = WeaviateConfig::from_env()?;
        let seed_interviewer_memories = env_optional("SEED_INTERVIEWER_MEMORY_IDS")
            .map(|ids| parse_id_list(&ids))
            .unwrap_or_default();

        Ok(Self {
            app: app_info!(),
            database,
            openai,
            server,
            weaviate,
            environment,
            seed_interviewer_memories,
        })
    }
}

fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_without_database_url_uses_memory_stores() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None),
                ("OPENAI_API_KEY", Some("sk-test")),
                ("PORT", None),
                ("WEAVIATE_SCHEME", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.database.is_none());
                assert_eq!(config.app.name, "rag_api");
                assert_eq!(config.server.port, 8080);
            },
        );
    }

    #[test]
    fn test_config_with_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/rag")),
                ("OPENAI_API_KEY", Some("sk-test")),
                ("WEAVIATE_SCHEME", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(
                    config.database.map(|db| db.url),
                    Some("postgresql://localhost/rag".to_string())
                );
            },
        );
    }

    #[test]
    fn test_parse_id_list_skips_blanks() {
        assert_eq!(parse_id_list(" mem-1, ,mem-2,"), vec!["mem-1", "mem-2"]);
    }

    #[test]
    fn test_config_requires_openai_key() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("OPENAI_API_KEY"));
        });
    }
}
