use anyhow::Context;
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use rts_control::config::RtsConfig;
use rts_control::setup::setup_scene;
use rts_control::RtsControlPlugin;

/// command line arguments for the RTS control demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// path to a JSON file overriding camera and selection settings
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => RtsConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RtsConfig::default(),
    };

    let exit = App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "RTS Control".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RtsControlPlugin::new(config))
        .add_systems(Startup, setup_scene)
        .run();

    if let AppExit::Error(code) = exit {
        anyhow::bail!("app exited with error code {code}");
    }
    Ok(())
}
