//! floorkit CLI - inspect and check floor-plan files
//!
//! Reads a plan document (or a stored plan version) as JSON and runs the
//! scene builders and walk-mode helpers over it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use floorkit::designer::{ModelDirLoader, SceneCache, ViewMode};
use floorkit::{describe, init_logging, load_plan_file, spawn_point, Config, ElementKind, Scene3D};

#[derive(Parser)]
#[command(name = "floorkit")]
#[command(about = "Floor-plan geometry and editing engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (.toml or .json); defaults to the user config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about a plan file
    Info {
        /// Plan JSON file
        file: PathBuf,
        /// Print a description line for every element
        #[arg(short, long)]
        verbose: bool,
    },
    /// Check a plan file against the document invariants
    Validate {
        /// Plan JSON file
        file: PathBuf,
    },
    /// Build the 2D and 3D scenes of a plan and print their statistics
    Scene {
        /// Plan JSON file
        file: PathBuf,
        /// Directory holding `<type>.glb` furniture models
        #[arg(short, long)]
        models: Option<PathBuf>,
    },
    /// Print where walk mode would place the camera
    WalkSpawn {
        /// Plan JSON file
        file: PathBuf,
    },
}

const KINDS: [ElementKind; 5] = [
    ElementKind::Wall,
    ElementKind::Zone,
    ElementKind::Door,
    ElementKind::Window,
    ElementKind::Label,
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info { file, verbose } => show_info(&file, verbose),
        Commands::Validate { file } => validate(&file),
        Commands::Scene { file, models } => show_scene(&file, models.as_deref(), &config),
        Commands::WalkSpawn { file } => show_spawn(&file, &config),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => {
            let path = floorkit_settings::default_path()?;
            Config::load_or_default(&path)
                .with_context(|| format!("loading config {}", path.display()))
        }
    }
}

fn load(file: &Path) -> Result<floorkit::LoadedPlan> {
    load_plan_file(file).with_context(|| format!("reading plan {}", file.display()))
}

fn show_info(file: &Path, verbose: bool) -> Result<()> {
    let plan = load(file)?;
    let doc = &plan.document;

    println!("File:     {}", file.display());
    println!("Sheet:    {} x {} px", doc.meta.width, doc.meta.height);
    println!("Scale:    {}", doc.scale());
    if let Some(version) = &plan.version {
        println!("Version:  {} ({:?})", version.id, version.version_type);
    }
    for kind in KINDS {
        println!("{:<9} {}", format!("{}s:", kind), doc.count_of(kind));
    }
    println!("Objects:  {}", plan.objects.len());

    if verbose {
        println!();
        let px_per_meter = doc.meta.px_per_meter();
        for element in &doc.elements {
            println!("  {:<24} {}", element.id(), describe(element, px_per_meter));
        }
    }
    Ok(())
}

fn validate(file: &Path) -> Result<()> {
    let plan = load(file)?;
    let errors = plan.document.validation_errors();
    if errors.is_empty() {
        println!("{}: ok", file.display());
        return Ok(());
    }
    for error in &errors {
        println!("{}: {}", file.display(), error);
    }
    anyhow::bail!("{} invariant violation(s)", errors.len())
}

fn show_scene(file: &Path, models: Option<&Path>, config: &Config) -> Result<()> {
    let plan = load(file)?;
    let doc = &plan.document;

    let mut cache = SceneCache::new(config.scene.clone(), config.palette.clone());
    let diff = cache.rebuild(doc);
    let primitives: usize = cache.draw_order().iter().map(|o| o.primitives.len()).sum();
    println!("2D: {} objects, {} primitives", diff.added, primitives);

    let mut scene = Scene3D::new(config.scene.clone(), config.palette.clone());
    let stats = scene.sync(doc);
    println!(
        "3D: {} walls, {} floors, {} labels",
        stats.walls, stats.floors, stats.labels
    );

    if let Some(dir) = models {
        scene.load_furniture(&plan.objects, &doc.scale(), &ModelDirLoader::new(dir));
        let placeholders = scene.furniture().iter().filter(|m| m.is_placeholder()).count();
        println!(
            "Furniture: {} loaded, {} placeholders",
            scene.furniture().len() - placeholders,
            placeholders
        );
    }
    Ok(())
}

fn show_spawn(file: &Path, config: &Config) -> Result<()> {
    let plan = load(file)?;
    let doc = &plan.document;

    let spawn = spawn_point(doc, &config.walk);
    let p = spawn.position;
    println!("Position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
    println!("Yaw:      {:.4} rad", spawn.yaw);
    match spawn.zone_index.and_then(|i| doc.zones().nth(i)) {
        Some(zone) => println!("Zone:     {} ({})", zone.id, zone.zone_type),
        None => println!("Zone:     none, plan center"),
    }

    let mut scene = Scene3D::new(config.scene.clone(), config.palette.clone());
    scene.set_mode(ViewMode::Walk);
    scene.sync(doc);
    let blocked = floorkit::designer::walk::collides(
        &p,
        &scene.wall_boxes(),
        config.walk.collision_radius_m,
    );
    if blocked {
        println!("Warning:  spawn point touches a wall");
    }
    Ok(())
}
