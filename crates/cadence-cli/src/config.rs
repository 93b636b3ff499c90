//! Config file persistence

use std::path::{Path, PathBuf};

use anyhow::Context;
use cadence_core::{ChordTexture, ClipTiming, Mode, PitchClass, VoicingStyle};
use cadence_core::clip::{DEFAULT_BEATS_PER_CHORD, DEFAULT_PPQ, DEFAULT_TEMPO_BPM, DEFAULT_VELOCITY};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fallbacks for arguments not given on the command line
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize, Default)]
#[serde(default)]
pub struct DefaultsConfig {
    pub key: PitchClass,
    pub mode: Mode,
    pub texture: ChordTexture,
    pub style: VoicingStyle,
}

/// Note-event layout for `--clip`
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub tempo_bpm: u16,
    pub ppq: u16,
    pub beats_per_chord: u16,
    pub velocity: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            tempo_bpm: DEFAULT_TEMPO_BPM,
            ppq: DEFAULT_PPQ,
            beats_per_chord: DEFAULT_BEATS_PER_CHORD,
            velocity: DEFAULT_VELOCITY,
        }
    }
}

impl ExportConfig {
    pub fn timing(&self) -> ClipTiming {
        ClipTiming {
            ppq: self.ppq,
            tempo_bpm: self.tempo_bpm,
            beats_per_chord: self.beats_per_chord,
            velocity: self.velocity.min(127),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, Default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cadence")
        .join("config.toml")
}

/// A missing file yields defaults; an unreadable or malformed one is an error.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(s) => toml::from_str(&s).with_context(|| format!("Failed to parse {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

pub fn save_config(path: &Path, config: &AppConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let s = toml::to_string_pretty(config)?;
    std::fs::write(path, s).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the effective config to `path`. A file that exists but does not
/// parse is left untouched and reported as an error.
pub fn init_config(path: &Path) -> anyhow::Result<AppConfig> {
    let config = load_config(path).context("Refusing to overwrite config")?;
    save_config(path, &config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.defaults.key, PitchClass::C);
        assert_eq!(config.defaults.mode, Mode::Ionian);
        assert_eq!(config.export.timing(), ClipTiming::default());
        assert!(config.logging.filter.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [defaults]
            key = "Bb"
            mode = "makam_hicaz"

            [export]
            tempo_bpm = 120
            "#,
        )
        .unwrap();
        assert_eq!(config.defaults.key, PitchClass::As);
        assert_eq!(config.defaults.mode, Mode::MakamHicaz);
        assert_eq!(config.defaults.texture, ChordTexture::Triad);
        assert_eq!(config.export.tempo_bpm, 120);
        assert_eq!(config.export.ppq, DEFAULT_PPQ);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(toml::from_str::<AppConfig>("[defaults]\nkey = \"H\"").is_err());
        assert!(toml::from_str::<AppConfig>("[defaults]\nstyle = \"drop2\"").is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = AppConfig::default();
        config.defaults.style = VoicingStyle::Wide;
        config.logging.filter = Some("cadence=trace".to_string());
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<AppConfig>(&text).unwrap(), config);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("cadence-config-test-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.defaults.key = PitchClass::Fs;
        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(load_config(&dir.join("missing.toml")).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_init_keeps_malformed_file() {
        let dir = std::env::temp_dir().join(format!("cadence-config-init-{}", std::process::id()));
        let path = dir.join("config.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[defaults\nkey = ").unwrap();

        assert!(init_config(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[defaults\nkey = ");

        std::fs::write(&path, "[defaults]\nkey = \"E\"\n").unwrap();
        let written = init_config(&path).unwrap();
        assert_eq!(written.defaults.key, PitchClass::E);
        assert_eq!(load_config(&path).unwrap(), written);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
