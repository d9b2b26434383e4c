//! Preset files: a named effect + pot vector as a TOML document.
//!
//! ```toml
//! name = "warm growl"
//! effect = "braid"
//! pots = [0.4, 0.8, 0.3, 0.9]
//! ```

use ruido_core::Pots;
use serde::Deserialize;
use std::path::Path;

/// One stored effect configuration.
#[derive(Debug, Deserialize)]
pub struct Preset {
    /// Display name
    pub name: String,
    /// Optional free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Registry id of the effect
    pub effect: String,
    /// The four control values
    pub pots: [f32; 4],
}

impl Preset {
    /// Load a preset from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
        let preset: Self = toml::from_str(&text)
            .map_err(|e| anyhow::anyhow!("parsing {}: {e}", path.display()))?;
        Ok(preset)
    }

    /// The pot vector, clamped into range.
    pub fn pots(&self) -> Pots {
        Pots::new(self.pots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_preset() {
        let preset: Preset = toml::from_str(
            r#"
            name = "warm growl"
            description = "sub-heavy braid"
            effect = "braid"
            pots = [0.4, 0.8, 0.3, 0.9]
            "#,
        )
        .unwrap();
        assert_eq!(preset.name, "warm growl");
        assert_eq!(preset.effect, "braid");
        assert_eq!(preset.pots().get(1), 0.8);
        assert!(preset.description.is_some());
    }

    #[test]
    fn description_is_optional() {
        let preset: Preset = toml::from_str(
            r#"
            name = "plain"
            effect = "tremolo"
            pots = [0.5, 0.5, 0.5, 0.5]
            "#,
        )
        .unwrap();
        assert!(preset.description.is_none());
    }

    #[test]
    fn wrong_pot_count_is_rejected() {
        let result: Result<Preset, _> = toml::from_str(
            r#"
            name = "bad"
            effect = "tremolo"
            pots = [0.5, 0.5]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_pots_clamp_on_use() {
        let preset: Preset = toml::from_str(
            r#"
            name = "hot"
            effect = "distortion"
            pots = [2.0, -1.0, 0.5, 0.5]
            "#,
        )
        .unwrap();
        let pots = preset.pots();
        assert_eq!(pots.get(0), 1.0);
        assert_eq!(pots.get(1), 0.0);
    }
}
