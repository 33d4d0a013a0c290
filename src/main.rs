use std::path::PathBuf;

use anyhow::Context;
use bevy::prelude::*;
use clap::Parser;
use sigil::components::{Enemy, Player};
use sigil::{
    init_logging, load_level, AssetRegistry, LevelMap, PlayerData, SigilPlugin, SigilSettings,
};

/// Headless runner for Sigil levels
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Asset manifest listing texture regions and colours
    #[arg(long, default_value = "assets/manifest.json")]
    assets: PathBuf,
    /// Level to load
    #[arg(long, default_value = "assets/levels/demo.json")]
    level: PathBuf,
    /// Player tuning overrides
    #[arg(long)]
    player: Option<PathBuf>,
    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: usize,
    /// Seconds simulated per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let assets = AssetRegistry::from_path(&args.assets)
        .with_context(|| format!("loading assets from {}", args.assets.display()))?;
    let player = match &args.player {
        Some(path) => PlayerData::from_path(path)
            .with_context(|| format!("loading player data from {}", path.display()))?,
        None => PlayerData::default(),
    };
    let level = LevelMap::from_path(&args.level)?;

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(assets)
        .insert_resource(player)
        .insert_resource(SigilSettings::fixed(args.dt))
        .add_plugins(SigilPlugin);
    app.finish();
    app.cleanup();

    let summary = load_level(app.world_mut(), &level)
        .with_context(|| format!("loading level {}", args.level.display()))?;
    log::info!(
        "level ready: player {:?}, {} enemies",
        summary.player, summary.enemies
    );

    for _ in 0..args.ticks {
        app.update();
    }

    let world = app.world_mut();
    let enemies = world.query_filtered::<Entity, With<Enemy>>().iter(world).count();
    let alive = world.query_filtered::<Entity, With<Player>>().iter(world).count();
    log::info!(
        "simulated {} ticks: {enemies} enemies remain, player present: {}",
        args.ticks,
        alive > 0
    );
    Ok(())
}
