use std::collections::BTreeMap;
use std::fs;
use std::{env, path::PathBuf};

use color_eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_CONFIG: &str = include_str!("../assets/default-config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// Key chords per context: `context -> chord -> action label`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct KeyBindings(pub BTreeMap<String, BTreeMap<String, String>>);

impl KeyBindings {
    pub fn label_for(&self, context: &str, chord: &str) -> Option<&str> {
        self.0.get(context)?.get(chord).map(String::as_str)
    }

    /// Bindings of one context grouped by label, chords sorted.
    pub fn entries(&self, context: &str) -> Vec<(String, Vec<String>)> {
        let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        if let Some(bindings) = self.0.get(context) {
            for (chord, label) in bindings {
                grouped.entry(label).or_default().push(chord.clone());
            }
        }
        grouped
            .into_iter()
            .map(|(label, chords)| (label.to_string(), chords))
            .collect()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    pub tick_rate: f64,
    pub frame_rate: f64,
    #[serde(default)]
    pub keybindings: KeyBindings,
}

impl Default for Config {
    fn default() -> Self {
        // Embedded at compile time and covered by the tests below.
        let mut cfg: Config = json5::from_str(DEFAULT_CONFIG).unwrap_or_else(|_| Config {
            config: AppConfig::default(),
            tick_rate: 4.0,
            frame_rate: 30.0,
            keybindings: KeyBindings::default(),
        });
        cfg.config = AppConfig {
            data_dir: get_data_dir(),
            config_dir: get_config_dir(),
        };
        cfg
    }
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref LOG_ENV: String = format!("{}_LOG_LEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME").replace('_', "-"));
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_dirs(get_data_dir(), get_config_dir())
    }

    /// Layer the embedded defaults with `config.json5` / `config.toml` found in `config_dir`.
    pub fn from_dirs(data_dir: PathBuf, config_dir: PathBuf) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Json5,
            ))
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            warn!("No configuration file found, using built-in defaults");
        }

        builder.build()?.try_deserialize()
    }

    pub fn export_path(&self) -> PathBuf {
        self.config
            .data_dir
            .join(crate::core::state::EXPORT_FILE_NAME)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "chicken105", env!("CARGO_PKG_NAME"))
}

pub fn ensure_data_and_config_dirs_exist() -> std::io::Result<()> {
    let data_dir = get_data_dir();
    let config_dir = get_config_dir();

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_defaults_parse() {
        let cfg: Config = json5::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(cfg.tick_rate, 4.0);
        assert_eq!(cfg.keybindings.label_for("global", "ctrl+c"), Some("Quit"));
        assert_eq!(cfg.keybindings.label_for("editor", "a"), Some("AddField"));
    }

    #[test]
    fn user_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.json5"),
            r#"{ frame_rate: 10.0, keybindings: { global: { "ctrl+q": "Quit" } } }"#,
        )
        .unwrap();
        let cfg = Config::from_dirs(dir.path().join("data"), dir.path().to_path_buf()).unwrap();
        assert_eq!(cfg.frame_rate, 10.0);
        assert_eq!(cfg.tick_rate, 4.0);
        assert_eq!(cfg.keybindings.label_for("global", "ctrl+q"), Some("Quit"));
        assert_eq!(cfg.keybindings.label_for("global", "q"), Some("Quit"));
        assert_eq!(
            cfg.export_path(),
            dir.path().join("data").join("form-config.json")
        );
    }

    #[test]
    fn entries_group_chords_by_label() {
        let cfg: Config = json5::from_str(DEFAULT_CONFIG).unwrap();
        let quit = cfg
            .keybindings
            .entries("global")
            .into_iter()
            .find(|(label, _)| label == "Quit")
            .unwrap();
        assert_eq!(quit.1, vec!["ctrl+c".to_string(), "q".to_string()]);
    }
}
