//! Implémentation des sous-commandes

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sarcatalog::{Catalog, CatalogConfigExt};
use sarconfig::Config;
use sarplaylist::{
    FileResolver, GenerationOptions, ItemResolver, PlaylistStats, RadioConfigExt, Session,
    playlist_filename, to_m3u, write_m3u,
};
use std::path::PathBuf;
use tracing::info;

/// Options communes de génération
#[derive(Args, Debug)]
pub struct GenerationArgs {
    /// Station key (see `saradio stations`)
    pub station: String,

    /// Leave advertisements out
    #[arg(long)]
    pub no_ads: bool,

    /// Leave weather reports out
    #[arg(long)]
    pub no_weather: bool,

    /// Leave bridge announcements out
    #[arg(long)]
    pub no_bridges: bool,

    /// Seed for a reproducible playlist
    #[arg(long)]
    pub seed: Option<u64>,

    /// Resolve items to live service URLs instead of file paths
    #[arg(long)]
    pub live: bool,
}

impl GenerationArgs {
    fn options(&self, config: &Config) -> Result<GenerationOptions> {
        let mut options = config.get_generation_options()?;
        options.include_ads &= !self.no_ads;
        options.include_weather &= !self.no_weather;
        options.include_bridges &= !self.no_bridges;
        Ok(options)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    fn resolver(&self, config: &Config) -> Result<Box<dyn ItemResolver>> {
        if self.live {
            Ok(Box::new(config.get_live_resolver()?))
        } else {
            Ok(Box::new(FileResolver))
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Write the M3U playlist to this file (`-` for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Prefix for every path in the M3U export
    #[arg(long)]
    pub base_path: Option<String>,

    /// Print the playlist as JSON
    #[arg(long, conflicts_with_all = ["output", "live"])]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct QueueArgs {
    #[command(flatten)]
    pub generation: GenerationArgs,

    /// Number of items to play
    #[arg(short = 'n', long, default_value_t = 10)]
    pub steps: usize,
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    config.load_catalog().with_context(|| {
        format!(
            "Failed to load catalog from {} and {}",
            config.get_catalog_stations_file().display(),
            config.get_catalog_ads_file().display()
        )
    })
}

/// `saradio stations`
pub fn stations(config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;
    let talk_radio_key = config.get_talk_radio_key();

    println!("{} stations, {} advertisements\n", catalog.stations.len(), catalog.ads.len());
    for station in &catalog.stations {
        let segments: usize = station.segments.values().map(Vec::len).sum();
        let marker = if station.key == talk_radio_key { " (talk)" } else { "" };
        println!(
            "  {:<24} {}{} - {} songs, {} segments",
            station.key,
            station.name,
            marker,
            station.songs.len(),
            segments
        );
    }
    Ok(())
}

/// `saradio generate`
pub fn generate(config: &Config, args: GenerateArgs) -> Result<()> {
    let catalog = load_catalog(config)?;
    let station = catalog.station(&args.generation.station)?;
    let options = args.generation.options(config)?;

    let mut generator = config.playlist_generator(args.generation.rng())?;
    let playlist = generator.generate(station, &catalog.ads, options);
    info!(
        station = %station.key,
        stats = %PlaylistStats::from_items(&playlist),
        "Playlist ready"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&playlist)?);
        return Ok(());
    }

    if args.generation.live {
        let resolver = args.generation.resolver(config)?;
        for item in &playlist {
            println!("{}\t{}", item.name(), resolver.resolve(item, station)?);
        }
        return Ok(());
    }

    let base_path = args
        .base_path
        .unwrap_or_else(|| config.get_export_base_path());
    match args.output {
        Some(path) if path.as_os_str() == "-" => {
            print!("{}", to_m3u(&station.name, &playlist, &base_path))
        }
        Some(path) => write_m3u(&path, &station.name, &playlist, &base_path)?,
        None => {
            let path = PathBuf::from(playlist_filename(&station.name));
            write_m3u(&path, &station.name, &playlist, &base_path)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// `saradio queue`
pub fn queue(config: &Config, args: QueueArgs) -> Result<()> {
    let catalog = load_catalog(config)?;
    let options = args.generation.options(config)?;
    let generator = config.playlist_generator(args.generation.rng())?;
    let resolver = args.generation.resolver(config)?;

    let mut session = Session::from_catalog(
        &catalog,
        &args.generation.station,
        options,
        generator,
        config.get_end_of_list_policy(),
    )?;

    for _ in 0..args.steps {
        let Some((index, identifier)) = session.skip_failed(resolver.as_ref()) else {
            println!("Nothing playable on {}", session.station().name);
            break;
        };
        let name = session.playlist()[index].name().to_string();
        println!("{:>4}  {:<48} {}", index, name, identifier);
        session.next();
    }
    Ok(())
}
