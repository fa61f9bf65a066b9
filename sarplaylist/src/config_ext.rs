//! Extension de sarconfig pour la génération et la lecture des playlists
//!
//! Clés gérées (sous `playlist`, `export` et `live`) :
//!
//! ```yaml
//! playlist:
//!   include_ads: true
//!   include_weather: true
//!   include_bridges: true
//!   talk_radio_key: wctr
//!   end_of_list: wrap        # ou regenerate
//!   probabilities:
//!     jingle: 0.7
//!     ad: 0.35
//!     talk_ad: 0.5
//!     news_interval: 2
//! export:
//!   base_path: ""
//! live:
//!   base_url: http://localhost:8080/api/
//! ```

use crate::generator::{GenerationOptions, PlaylistGenerator, Probabilities, DEFAULT_TALK_RADIO_KEY};
use crate::resolver::LiveResolver;
use crate::sequencer::EndOfListPolicy;
use anyhow::Result;
use rand::Rng;
use sarconfig::Config;
use serde_yaml::Value;

/// Default live endpoint
pub const DEFAULT_LIVE_BASE_URL: &str = "http://localhost:8080/api/";

/// Trait d'extension pour sarconfig::Config
pub trait RadioConfigExt {
    /// Catégories optionnelles (publicités, météo, ponts)
    fn get_generation_options(&self) -> Result<GenerationOptions>;

    /// Enregistre les catégories optionnelles
    fn set_generation_options(&self, options: GenerationOptions) -> Result<()>;

    /// Probabilités de tirage
    fn get_probabilities(&self) -> Result<Probabilities>;

    /// Enregistre les probabilités de tirage
    fn set_probabilities(&self, probabilities: Probabilities) -> Result<()>;

    /// Clé de la station parlée
    fn get_talk_radio_key(&self) -> String;

    /// Politique de fin de liste (défaut : `wrap`)
    fn get_end_of_list_policy(&self) -> EndOfListPolicy;

    fn set_end_of_list_policy(&self, policy: EndOfListPolicy) -> Result<()>;

    /// Préfixe des chemins dans les exports M3U
    fn get_export_base_path(&self) -> String;

    fn set_export_base_path(&self, base_path: &str) -> Result<()>;

    /// Résolveur live construit depuis `live.base_url`
    fn get_live_resolver(&self) -> Result<LiveResolver>;

    /// Générateur configuré (probabilités et station parlée) sur la source `rng`
    fn playlist_generator<R: Rng>(&self, rng: R) -> Result<PlaylistGenerator<R>>;
}

fn get_bool(config: &Config, path: &[&str], default: bool) -> bool {
    match config.get_value(path) {
        Ok(Value::Bool(b)) => b,
        _ => default,
    }
}

impl RadioConfigExt for Config {
    fn get_generation_options(&self) -> Result<GenerationOptions> {
        let defaults = GenerationOptions::default();
        let flag = |key: &str, default: bool| get_bool(self, &["playlist", key], default);
        Ok(GenerationOptions {
            include_ads: flag("include_ads", defaults.include_ads),
            include_weather: flag("include_weather", defaults.include_weather),
            include_bridges: flag("include_bridges", defaults.include_bridges),
        })
    }

    fn set_generation_options(&self, options: GenerationOptions) -> Result<()> {
        self.set_value(&["playlist", "include_ads"], Value::Bool(options.include_ads))?;
        self.set_value(&["playlist", "include_weather"], Value::Bool(options.include_weather))?;
        self.set_value(&["playlist", "include_bridges"], Value::Bool(options.include_bridges))
    }

    fn get_probabilities(&self) -> Result<Probabilities> {
        let defaults = Probabilities::default();
        let probabilities = Probabilities {
            jingle: self.get_f64(&["playlist", "probabilities", "jingle"], defaults.jingle),
            ad: self.get_f64(&["playlist", "probabilities", "ad"], defaults.ad),
            talk_ad: self.get_f64(&["playlist", "probabilities", "talk_ad"], defaults.talk_ad),
            news_interval: self.get_usize(
                &["playlist", "probabilities", "news_interval"],
                defaults.news_interval,
            ),
        };

        for (name, value) in [
            ("jingle", probabilities.jingle),
            ("ad", probabilities.ad),
            ("talk_ad", probabilities.talk_ad),
        ] {
            if !(0.0..=1.0).contains(&value) {
                tracing::warn!(
                    probability = name,
                    value,
                    "Probability outside [0, 1], it will be clamped"
                );
            }
        }

        Ok(probabilities)
    }

    fn set_probabilities(&self, probabilities: Probabilities) -> Result<()> {
        self.set_f64(&["playlist", "probabilities", "jingle"], probabilities.jingle)?;
        self.set_f64(&["playlist", "probabilities", "ad"], probabilities.ad)?;
        self.set_f64(&["playlist", "probabilities", "talk_ad"], probabilities.talk_ad)?;
        self.set_usize(
            &["playlist", "probabilities", "news_interval"],
            probabilities.news_interval,
        )
    }

    fn get_talk_radio_key(&self) -> String {
        self.get_string(&["playlist", "talk_radio_key"], DEFAULT_TALK_RADIO_KEY)
    }

    fn get_end_of_list_policy(&self) -> EndOfListPolicy {
        let configured = self.get_string(&["playlist", "end_of_list"], "wrap");
        configured.parse().unwrap_or_else(|err| {
            tracing::warn!("{}, using wrap", err);
            EndOfListPolicy::Wrap
        })
    }

    fn set_end_of_list_policy(&self, policy: EndOfListPolicy) -> Result<()> {
        self.set_string(&["playlist", "end_of_list"], policy.as_str())
    }

    fn get_export_base_path(&self) -> String {
        self.get_string(&["export", "base_path"], "")
    }

    fn set_export_base_path(&self, base_path: &str) -> Result<()> {
        self.set_string(&["export", "base_path"], base_path)
    }

    fn get_live_resolver(&self) -> Result<LiveResolver> {
        let base = self.get_string(&["live", "base_url"], DEFAULT_LIVE_BASE_URL);
        Ok(LiveResolver::new(&base)?)
    }

    fn playlist_generator<R: Rng>(&self, rng: R) -> Result<PlaylistGenerator<R>> {
        Ok(PlaylistGenerator::new(rng)
            .with_probabilities(self.get_probabilities()?)
            .with_talk_radio_key(self.get_talk_radio_key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        (dir, config)
    }

    #[test]
    fn test_defaults() {
        let (_dir, config) = config();
        assert_eq!(config.get_generation_options().unwrap(), GenerationOptions::default());
        assert_eq!(config.get_probabilities().unwrap(), Probabilities::default());
        assert_eq!(config.get_talk_radio_key(), "wctr");
        assert_eq!(config.get_end_of_list_policy(), EndOfListPolicy::Wrap);
        assert_eq!(config.get_export_base_path(), "");
    }

    #[test]
    fn test_options_round_trip() {
        let (_dir, config) = config();
        let options = GenerationOptions {
            include_ads: false,
            include_weather: true,
            include_bridges: false,
        };
        config.set_generation_options(options).unwrap();
        assert_eq!(config.get_generation_options().unwrap(), options);

        config.set_end_of_list_policy(EndOfListPolicy::Regenerate).unwrap();
        assert_eq!(config.get_end_of_list_policy(), EndOfListPolicy::Regenerate);
    }

    #[test]
    fn test_invalid_policy_falls_back_to_wrap() {
        let (_dir, config) = config();
        config.set_string(&["playlist", "end_of_list"], "shuffle").unwrap();
        assert_eq!(config.get_end_of_list_policy(), EndOfListPolicy::Wrap);
    }

    #[test]
    fn test_configured_generator() {
        let (_dir, config) = config();
        config.set_string(&["playlist", "talk_radio_key"], "talk").unwrap();
        let generator = config.playlist_generator(StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(generator.talk_radio_key(), "talk");
        assert_eq!(generator.probabilities().jingle, 0.7);
    }

    #[test]
    fn test_live_resolver_from_config() {
        let (_dir, config) = config();
        let resolver = config.get_live_resolver().unwrap();
        assert_eq!(resolver.base().as_str(), DEFAULT_LIVE_BASE_URL);
    }
}
