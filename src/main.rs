use anyhow::{Result, ensure};
use clap::Parser;
use torus_snake::game::GameConfig;
use torus_snake::modes::ArcadeMode;

#[derive(Parser)]
#[command(name = "torus_snake")]
#[command(version, about = "Classic wrap-around snake for the terminal")]
struct Cli {
    /// Grid width in tiles (overrides the window derivation)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in tiles (overrides the window derivation)
    #[arg(long)]
    height: Option<usize>,

    /// Window width in pixels; the grid is window size over tile size
    #[arg(long, default_value = "800")]
    window_width: usize,

    /// Window height in pixels
    #[arg(long, default_value = "576")]
    window_height: usize,

    /// Tile size in pixels
    #[arg(long, default_value = "32")]
    tile_size: usize,

    /// Simulation ticks per second
    #[arg(long, default_value = "8")]
    tps: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ensure!(cli.tile_size > 0, "tile size must be positive");
    ensure!(cli.tps > 0, "ticks per second must be positive");
    ensure!(
        cli.width.map_or(cli.window_width >= cli.tile_size, |w| w > 0)
            && cli.height.map_or(cli.window_height >= cli.tile_size, |h| h > 0),
        "grid must have at least one tile"
    );

    let (grid_width, grid_height) = match (cli.width, cli.height) {
        (Some(width), Some(height)) => (width, height),
        (width, height) => {
            let derived =
                GameConfig::from_window(cli.window_width, cli.window_height, cli.tile_size);
            (
                width.unwrap_or(derived.grid_width),
                height.unwrap_or(derived.grid_height),
            )
        }
    };

    let mut config = GameConfig::new(grid_width, grid_height);
    config.tick_rate = cli.tps;

    let mut mode = ArcadeMode::new(config);
    mode.run().await?;

    Ok(())
}
