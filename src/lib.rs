//! # FloorKit
//!
//! Floor-plan geometry and editing engine:
//! - 2D scene building for walls, zones, doors, windows and labels
//! - Hit-testing, selection, copy/paste and bounded undo/redo
//! - Absolute rotation and resize from the original geometry
//! - 3D wall solids, floor slabs and furniture placement
//! - First-person walk mode with wall collision
//!
//! ## Architecture
//!
//! FloorKit is organized as a workspace with multiple crates:
//!
//! 1. **floorkit-core** - Plan model, units, polygon math, palette, errors
//! 2. **floorkit-designer** - Scenes, editor state machine, history, walk mode
//! 3. **floorkit-settings** - JSON/TOML configuration
//! 4. **floorkit** - Command line front end over plan files

pub use floorkit_core::data;
pub use floorkit_designer as designer;

pub use floorkit_core::{
    load_plan_file, load_plan_str, Element, ElementKind, Error, LoadedPlan, Palette, PlanDocument,
    PlanError, Result, Scale,
};

pub use floorkit_designer::{
    build_scene, describe, spawn_point, ElementFactory, PlanEditor, Scene3D, SceneCache,
    WalkController,
};

pub use floorkit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr
/// - RUST_LOG environment variable support, `info` by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
