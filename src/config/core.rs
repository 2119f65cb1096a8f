use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use serde::Serialize;

use super::Settings;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub struct FilebenchConfig {
    figment: Figment,
}

impl FilebenchConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(None, None::<()>)
    }

    /// Build the layered configuration.
    ///
    /// Priority, lowest first: embedded defaults, then either the custom file or
    /// the user and repository files, then `FILEBENCH_` environment variables,
    /// then `cli_overrides`.
    pub fn load_with<T: Serialize>(
        custom_config: Option<&str>,
        cli_overrides: Option<T>,
    ) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !std::path::Path::new(custom_path).exists() {
                anyhow::bail!("Config file not found: {}", custom_path);
            }
            figment = match custom_path.rsplit('.').next() {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            let user_config = Self::user_config_path();
            figment = figment
                .merge(Toml::file(&user_config))
                .merge(Json::file(user_config.replace(".toml", ".json")))
                .merge(Yaml::file(user_config.replace(".toml", ".yaml")))
                .merge(Toml::file("filebench.toml"))
                .merge(Json::file("filebench.json"))
                .merge(Yaml::file("filebench.yaml"))
                .merge(Yaml::file("filebench.yml"));
        }

        figment = figment.merge(Env::prefixed("FILEBENCH_").split("__"));

        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(FilebenchConfig { figment })
    }

    /// Extract the typed settings tree
    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .context("Failed to parse filebench configuration")
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        Ok(self.figment.extract_inner(path)?)
    }

    /// Get the full merged configuration as a structured value
    pub fn get_full_config(&self) -> Result<serde_json::Value> {
        Ok(self.figment.extract()?)
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/filebench/config.toml", home),
            Err(_) => "~/.config/filebench/config.toml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::path::PathBuf;

    fn settings_in_jail(
        custom_config: Option<&str>,
        overrides: Option<serde_json::Value>,
    ) -> figment::error::Result<Settings> {
        FilebenchConfig::load_with(custom_config, overrides)
            .and_then(|config| config.settings())
            .map_err(|e| figment::Error::from(e.to_string()))
    }

    #[test]
    fn test_config_loads_defaults() {
        Jail::expect_with(|_jail| {
            let settings = settings_in_jail(None, None)?;
            assert_eq!(settings, Settings::default());
            Ok(())
        });
    }

    #[test]
    fn test_repo_config_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "filebench.toml",
                r#"
                [search]
                directories = ["files", "files2"]

                [results]
                directory = "out"
                "#,
            )?;

            let settings = settings_in_jail(None, None)?;
            assert_eq!(
                settings.search.directories,
                vec![PathBuf::from("files"), PathBuf::from("files2")]
            );
            assert_eq!(settings.results.directory, PathBuf::from("out"));
            assert_eq!(settings.benchmark.thread_percentage, 100);
            Ok(())
        });
    }

    #[test]
    fn test_environment_beats_files() {
        Jail::expect_with(|jail| {
            jail.create_file("filebench.yaml", "results:\n  directory: from-yaml\n")?;
            jail.set_env("FILEBENCH_RESULTS__DIRECTORY", "from-env");
            jail.set_env("FILEBENCH_BENCHMARK__MAX_THREADS", "3");

            let settings = settings_in_jail(None, None)?;
            assert_eq!(settings.results.directory, PathBuf::from("from-env"));
            assert_eq!(settings.benchmark.max_threads, 3);
            Ok(())
        });
    }

    #[test]
    fn test_custom_config_and_cli_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "bench.json",
                r#"{ "general": { "base_dir": "/srv/data" }, "search": { "directories": ["a"] } }"#,
            )?;

            let overrides = serde_json::json!({ "search": { "directories": ["b", "c"] } });
            let settings = settings_in_jail(Some("bench.json"), Some(overrides))?;
            assert_eq!(settings.general.base_dir, PathBuf::from("/srv/data"));
            assert_eq!(
                settings.search.directories,
                vec![PathBuf::from("b"), PathBuf::from("c")]
            );
            Ok(())
        });
    }

    #[test]
    fn test_missing_custom_config_is_an_error() {
        Jail::expect_with(|_jail| {
            assert!(FilebenchConfig::load_with(Some("nope.toml"), None::<()>).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_sections_are_queryable() {
        Jail::expect_with(|_jail| {
            let config = FilebenchConfig::load().map_err(|e| e.to_string())?;
            let search = config.get_section("search").map_err(|e| e.to_string())?;
            assert_eq!(search["directories"][0], "uploads");
            assert!(config.get_full_config().is_ok());
            Ok(())
        });
    }
}
