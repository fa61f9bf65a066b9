//! Extension pour intégrer le catalogue dans sarconfig
//!
//! Ce module fournit le trait `CatalogConfigExt` qui ajoute à
//! `sarconfig::Config` l'emplacement des fichiers du catalogue et un
//! chargement direct.
//!
//! # Exemple
//!
//! ```no_run
//! use sarconfig::get_config;
//! use sarcatalog::CatalogConfigExt;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = get_config();
//! let catalog = config.load_catalog()?;
//! println!("{} stations", catalog.stations.len());
//! # Ok(())
//! # }
//! ```

use crate::models::Catalog;
use anyhow::Result;
use sarconfig::Config;
use std::path::PathBuf;

/// Default station list file name
pub const DEFAULT_STATIONS_FILE: &str = "data.json";

/// Default advertisement list file name
pub const DEFAULT_ADS_FILE: &str = "ads.json";

/// Trait d'extension pour gérer la configuration du catalogue
///
/// Les chemins relatifs sont résolus par rapport au répertoire de configuration.
pub trait CatalogConfigExt {
    /// Chemin du fichier des stations
    fn get_catalog_stations_file(&self) -> PathBuf;

    /// Définit le fichier des stations
    fn set_catalog_stations_file(&self, path: &str) -> Result<()>;

    /// Chemin du fichier des publicités
    fn get_catalog_ads_file(&self) -> PathBuf;

    /// Définit le fichier des publicités
    fn set_catalog_ads_file(&self, path: &str) -> Result<()>;

    /// Charge le catalogue depuis les fichiers configurés
    fn load_catalog(&self) -> Result<Catalog>;
}

impl CatalogConfigExt for Config {
    fn get_catalog_stations_file(&self) -> PathBuf {
        let configured = self.get_string(&["catalog", "stations_file"], DEFAULT_STATIONS_FILE);
        self.resolve_path(&configured)
    }

    fn set_catalog_stations_file(&self, path: &str) -> Result<()> {
        self.set_string(&["catalog", "stations_file"], path)
    }

    fn get_catalog_ads_file(&self) -> PathBuf {
        let configured = self.get_string(&["catalog", "ads_file"], DEFAULT_ADS_FILE);
        self.resolve_path(&configured)
    }

    fn set_catalog_ads_file(&self, path: &str) -> Result<()> {
        self.set_string(&["catalog", "ads_file"], path)
    }

    fn load_catalog(&self) -> Result<Catalog> {
        let catalog = Catalog::load(self.get_catalog_stations_file(), self.get_catalog_ads_file())?;
        Ok(catalog)
    }
}
