use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use simplelog::{ColorChoice, CombinedLogger, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use voxpaint::{App, AppConfig, LogScene};
use voxpaint_world::VoxelCoord;

#[derive(Parser, Debug)]
#[command(author, version, about = "Paint textured voxels from scripts and a drop folder", long_about = None)]
struct Args {
    /// Config file (default: $VOXPAINT_CONFIG, then voxpaint.toml nearby)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save file to open before anything else
    #[arg(long)]
    load: Option<PathBuf>,

    /// Input script to run
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write the final scene here
    #[arg(long)]
    save: Option<PathBuf>,

    /// Watch a folder for dropped textures; runs until interrupted, so it
    /// cannot be combined with --save or --summary
    #[arg(long, conflicts_with_all = ["save", "summary"])]
    watch: Option<PathBuf>,

    /// Also log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print an occupancy summary at the end
    #[arg(long)]
    summary: bool,
}

fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    simplelog::Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, simplelog::Config::default(), file),
            ])?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
    }
    Ok(())
}

fn print_summary(app: &App<LogScene>) {
    let stats = app.gs.world.stats();
    println!("voxels: {}", stats.voxels);
    println!("textures loaded: {}", app.gs.textures.len());
    println!("textures in use: {}", stats.textures_in_use);
    for name in app.gs.textures.names() {
        println!("  {name}");
    }
    let mut cells = app.gs.world.iter().map(|v| v.coord);
    if let Some(first) = cells.next() {
        let (lo, hi) = cells.fold((first, first), |(lo, hi), c| {
            (
                VoxelCoord::new(lo.x.min(c.x), lo.y.min(c.y), lo.z.min(c.z)),
                VoxelCoord::new(hi.x.max(c.x), hi.y.max(c.y), hi.z.max(c.z)),
            )
        });
        println!("bounds: {lo} .. {hi}");
    }
    let dangling = app.gs.world.dangling_references(&app.gs.textures);
    if !dangling.is_empty() {
        println!("voxels with missing textures: {}", dangling.len());
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let config = AppConfig::load(args.config.clone())?;
    let mut app = App::new(&config, LogScene::default())?;

    if let Some(path) = &args.load {
        app.load(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    if let Some(path) = &args.script {
        app.run_script_file(path)?;
    }
    if let Some(dir) = &args.watch {
        app.watch_dir(dir)?;
        log::info!("press Ctrl-C to stop");
        loop {
            app.step();
            std::thread::sleep(Duration::from_millis(50));
        }
    }

    app.wait_for_decodes(Duration::from_secs(30));
    if let Some(path) = &args.save {
        app.save(path)
            .with_context(|| format!("saving {}", path.display()))?;
    }
    if args.summary {
        print_summary(&app);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_excludes_end_of_run_outputs() {
        let err = Args::try_parse_from(["voxpaint", "--watch", "drop", "--save", "out.json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert!(Args::try_parse_from(["voxpaint", "--watch", "drop", "--summary"]).is_err());

        let args = Args::try_parse_from(["voxpaint", "--watch", "drop", "--load", "in.json"]).unwrap();
        assert_eq!(args.watch, Some(PathBuf::from("drop")));
        let args = Args::try_parse_from(["voxpaint", "--script", "s.txt", "--save", "o.json", "--summary"]).unwrap();
        assert!(args.summary && args.watch.is_none());
    }
}
