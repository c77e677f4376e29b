//! # FloorKit Designer
//!
//! Editing and scene building on top of the `floorkit-core` plan model.
//!
//! ## Core Components
//!
//! ### Scenes
//! - **2D scene**: wall slabs, zone fills, door and window glyphs, label boxes
//! - **Scene cache**: element-keyed primitives with a diff-based rebuild
//! - **3D scene**: wall solids, floor slabs, furniture and label billboards
//!
//! ### Editing
//! - **Editor**: pointer state machine, selection, copy/paste, delete
//! - **Transforms**: absolute rotation and resize from the base geometry
//! - **History**: bounded undo/redo over document snapshots
//! - **Viewport**: screen/plan mapping with zoom and pan
//! - **Keymap**: layout-independent shortcuts
//!
//! ### Walk mode
//! - Spawn in the largest zone and sphere/AABB collision against walls
//!
//! ## Architecture
//!
//! ```text
//! PlanEditor
//!   ├── PlanDocument (model)
//!   ├── PlanHistory (snapshots)
//!   ├── SceneCache → scene2d (primitives)
//!   └── Viewport
//!
//! Scene3D → WalkController (collision)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use floorkit_designer::{PlanEditor, ElementFactory, Tool, WallTool};
//!
//! let mut editor = PlanEditor::default();
//! editor.load_document(document);
//! editor.add_element(ElementFactory::default().create(&Tool::Wall(WallTool::Partition)));
//! editor.undo();
//! ```

pub mod describe;
pub mod editor;
pub mod error;
pub mod factory;
pub mod history;
pub mod keymap;
pub mod options;
pub mod scene2d;
pub mod scene3d;
pub mod scene_cache;
pub mod selection;
pub mod transform;
pub mod viewport;
pub mod walk;

pub use describe::{describe, short_label};
pub use editor::{EditorCallbacks, InteractionState, PlanEditor};
pub use error::{DesignerError, Result};
pub use factory::{new_element_id, DoorTool, ElementFactory, Tool, WallTool, WindowTool};
pub use history::{HistorySnapshot, PlanHistory, DEFAULT_HISTORY_CAPACITY};
pub use hit_test::hit_test;
pub use keymap::{match_shortcut, KeyInput, Shortcut, WalkInput, WalkKey};
pub use options::{EditorOptions, HitTolerances, SceneOptions, WalkOptions};
pub use scene2d::{build_scene, Primitive2D, SceneObject2D};
pub use scene3d::{
    Aabb, AssetLoader, FloorSlab, FurnitureMesh, FurnitureModel, Label3D, LoadTicket,
    ModelDirLoader, ModelHandle, PickHit3D, Ray, Scene3D, SyncStats, ViewMode, WallSolid,
};
pub use scene_cache::{CachedPrimitive, SceneCache, SceneDiff};
pub use selection::SelectionManager;
pub use transform::{Dimension, Measurements};
pub use viewport::Viewport;
pub use walk::{spawn_point, try_safe_position, CameraObserver, SpawnPoint, WalkController};
