use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use strum::{Display, EnumString};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Storage backing the items service, selected once at startup
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RepositoryKind {
    #[default]
    Memory,
    Sql,
    NamedSql,
    Orm,
    QueryBuilder,
    Cqrs,
}

impl RepositoryKind {
    pub fn requires_database(self) -> bool {
        !matches!(self, RepositoryKind::Memory)
    }
}

/// Items service settings
#[derive(Clone, Debug)]
pub struct ItemsConfig {
    pub repository: RepositoryKind,
    /// Save the two sample items on startup
    pub seed_data: bool,
    pub run_migrations: bool,
}

impl FromEnv for ItemsConfig {
    /// - `ITEM_REPOSITORY`: defaults to memory
    /// - `ITEM_SEED_DATA`: defaults to false
    /// - `RUN_MIGRATIONS`: defaults to true
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            repository: env_parse("ITEM_REPOSITORY", "memory")?,
            seed_data: env_parse("ITEM_SEED_DATA", "false")?,
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
        })
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub items: ItemsConfig,
    /// Present only when the selected repository talks to PostgreSQL
    pub database: Option<PostgresConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let items = ItemsConfig::from_env()?;
        let database = if items.repository.requires_database() {
            Some(PostgresConfig::from_env()?) // DATABASE_URL required here
        } else {
            None
        };
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        Ok(Self {
            app: app_info!(),
            items,
            database,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 4] = [
        "ITEM_REPOSITORY",
        "ITEM_SEED_DATA",
        "RUN_MIGRATIONS",
        "DATABASE_URL",
    ];

    fn unset_all<F: FnOnce()>(f: F) {
        temp_env::with_vars_unset(VARS, f);
    }

    #[test]
    fn test_repository_kind_parses_kebab_case() {
        let cases = [
            ("memory", RepositoryKind::Memory),
            ("sql", RepositoryKind::Sql),
            ("named-sql", RepositoryKind::NamedSql),
            ("orm", RepositoryKind::Orm),
            ("query-builder", RepositoryKind::QueryBuilder),
            ("cqrs", RepositoryKind::Cqrs),
            ("ORM", RepositoryKind::Orm),
        ];
        for (raw, expected) in cases {
            assert_eq!(raw.parse::<RepositoryKind>().unwrap(), expected, "{raw}");
        }
        assert_eq!(RepositoryKind::QueryBuilder.to_string(), "query-builder");
        assert!("sqlite".parse::<RepositoryKind>().is_err());
    }

    #[test]
    fn test_only_memory_runs_without_database() {
        assert!(!RepositoryKind::Memory.requires_database());
        assert!(RepositoryKind::Sql.requires_database());
        assert!(RepositoryKind::Cqrs.requires_database());
    }

    #[test]
    fn test_items_config_defaults() {
        unset_all(|| {
            let config = ItemsConfig::from_env().unwrap();
            assert_eq!(config.repository, RepositoryKind::Memory);
            assert!(!config.seed_data);
            assert!(config.run_migrations);
        });
    }

    #[test]
    fn test_items_config_rejects_unknown_repository() {
        unset_all(|| {
            temp_env::with_var("ITEM_REPOSITORY", Some("mongodb"), || {
                let err = ItemsConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "ITEM_REPOSITORY"));
            });
        });
    }

    #[test]
    fn test_memory_config_skips_database() {
        unset_all(|| {
            let config = Config::from_env().unwrap();
            assert!(config.database.is_none());
            assert_eq!(config.app.name, "items_api");
        });
    }

    #[test]
    fn test_sql_config_requires_database_url() {
        unset_all(|| {
            temp_env::with_var("ITEM_REPOSITORY", Some("sql"), || {
                assert!(Config::from_env().is_err());
            });

            temp_env::with_vars(
                [
                    ("ITEM_REPOSITORY", Some("sql")),
                    ("DATABASE_URL", Some("postgresql://localhost/items")),
                ],
                || {
                    let config = Config::from_env().unwrap();
                    let database = config.database.unwrap();
                    assert_eq!(database.url(), "postgresql://localhost/items");
                },
            );
        });
    }
}
