//! Configuration du système
//!
//! Emplacements des fichiers et table des provinces. Les noms de fichiers
//! produits sont attendus tels quels par les consommateurs en aval.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

const CANADA_PRESET: &str = include_str!("presets/canada.json");

/// Configuration principale
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Répertoire des fichiers `da_<code>_<abbr>.geojson`
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Répertoire racine des limites électorales
    #[serde(default = "default_elections_dir")]
    pub elections_dir: PathBuf,

    /// Fréquence d'affichage de la progression (en features)
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,

    /// Indenter le JSON écrit
    #[serde(default)]
    pub pretty: bool,

    /// Provinces et territoires connus
    #[serde(default)]
    pub provinces: Vec<Province>,

    /// Millésimes et types de limites électorales
    #[serde(default)]
    pub elections: ElectionConfig,
}

/// Une province ou un territoire
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Province {
    /// Code numérique (ex: "35")
    pub code: String,

    /// Abréviation (ex: "ON")
    pub abbr: String,

    #[serde(default)]
    pub name: String,
}

/// Fichiers de limites électorales à convertir
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ElectionConfig {
    #[serde(default)]
    pub years: Vec<String>,

    /// Types de limites (riding, poll, adv)
    #[serde(default)]
    pub kinds: Vec<String>,
}

/// Paire de chemins entrée/sortie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub input: PathBuf,
    pub output: PathBuf,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("new_boundaries/provinces")
}

fn default_elections_dir() -> PathBuf {
    PathBuf::from("election_boundaries_19-25")
}

fn default_progress_interval() -> usize {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            elections_dir: default_elections_dir(),
            progress_interval: default_progress_interval(),
            pretty: false,
            provinces: Vec::new(),
            elections: ElectionConfig::default(),
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    ///
    /// Les champs absents du fichier sont repris du preset `canada`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let overrides: Value =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        if !overrides.is_object() {
            bail!("Config file must contain a JSON object: {}", path.display());
        }

        let mut merged: Value =
            serde_json::from_str(CANADA_PRESET).context("Failed to parse embedded config")?;
        merge(&mut merged, overrides);

        serde_json::from_value(merged).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "canada" => Self::load_embedded(CANADA_PRESET),
            _ => bail!("Unknown preset: {}. Use: canada", preset),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Fichier source : `<base>/da_<code>_<abbr>.geojson`
    pub fn input_path(&self, code: &str, abbr: &str) -> PathBuf {
        self.base_dir.join(format!("da_{}_{}.geojson", code, abbr))
    }

    /// Fichier produit : `<base>/da_<code>_<abbr>_wgs84.geojson`
    pub fn output_path(&self, code: &str, abbr: &str) -> PathBuf {
        self.base_dir.join(format!("da_{}_{}_wgs84.geojson", code, abbr))
    }

    /// Paire entrée/sortie pour une région
    pub fn region_paths(&self, code: &str, abbr: &str) -> FilePair {
        FilePair {
            input: self.input_path(code, abbr),
            output: self.output_path(code, abbr),
        }
    }

    /// Paire entrée/sortie pour un fichier électoral :
    /// `<elections>/<year>_boundaries/geojson/<year>_<kind>[_wgs84].json`
    pub fn election_paths(&self, year: &str, kind: &str) -> FilePair {
        let dir = self
            .elections_dir
            .join(format!("{}_boundaries", year))
            .join("geojson");
        FilePair {
            input: dir.join(format!("{}_{}.json", year, kind)),
            output: dir.join(format!("{}_{}_wgs84.json", year, kind)),
        }
    }

    /// Récupère une province par code
    pub fn get_province(&self, code: &str) -> Option<&Province> {
        self.provinces.iter().find(|p| p.code == code)
    }
}

/// Fusionne récursivement les objets ; les autres valeurs sont remplacées
fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_paths() {
        let config = Config::default();
        let pair = config.region_paths("35", "ON");

        assert_eq!(
            pair.input,
            PathBuf::from("new_boundaries/provinces/da_35_ON.geojson")
        );
        assert_eq!(
            pair.output,
            PathBuf::from("new_boundaries/provinces/da_35_ON_wgs84.geojson")
        );
    }

    #[test]
    fn test_custom_base_dir() {
        let config = Config {
            base_dir: PathBuf::from("/data"),
            ..Default::default()
        };
        assert_eq!(
            config.output_path("46", "MB"),
            PathBuf::from("/data/da_46_MB_wgs84.geojson")
        );
    }

    #[test]
    fn test_election_paths() {
        let pair = Config::default().election_paths("2021", "poll");
        assert_eq!(
            pair.input,
            PathBuf::from("election_boundaries_19-25/2021_boundaries/geojson/2021_poll.json")
        );
        assert_eq!(
            pair.output,
            PathBuf::from("election_boundaries_19-25/2021_boundaries/geojson/2021_poll_wgs84.json")
        );
    }

    #[test]
    fn test_canada_preset() {
        let config = Config::from_preset("canada").unwrap();
        assert_eq!(config.provinces.len(), 13);
        assert_eq!(config.get_province("61").unwrap().abbr, "NT");
        assert_eq!(config.elections.years, vec!["2019", "2021", "2025"]);
        assert_eq!(config.progress_interval, 1000);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(Config::from_preset("france").is_err());
    }

    fn write_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_partial_config_keeps_preset_tables() {
        let path = write_config("da_wgs84_partial_config.json", r#"{"pretty": true}"#);
        let config = Config::load(&path).unwrap();

        assert!(config.pretty);
        assert_eq!(config.base_dir, PathBuf::from("new_boundaries/provinces"));
        assert_eq!(config.provinces.len(), 13);
        assert_eq!(config.elections.years, vec!["2019", "2021", "2025"]);
        assert_eq!(config.elections.kinds, vec!["riding", "poll", "adv"]);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_nested_config_override() {
        let path = write_config(
            "da_wgs84_nested_config.json",
            r#"{"elections": {"years": ["2021"]}, "provinces": [{"code": "46", "abbr": "MB"}]}"#,
        );
        let config = Config::load(&path).unwrap();

        assert_eq!(config.elections.years, vec!["2021"]);
        assert_eq!(config.elections.kinds, vec!["riding", "poll", "adv"]);
        assert_eq!(config.provinces.len(), 1);
        assert!(config.get_province("35").is_none());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_config_must_be_object() {
        let path = write_config("da_wgs84_array_config.json", "[]");
        assert!(Config::load(&path).is_err());
        std::fs::remove_file(path).ok();
    }
}
