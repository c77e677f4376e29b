//! First-person walk mode.
//!
//! The camera moves on a horizontal plane at eye height. Every step is
//! checked against the wall solids of the 3D scene with a sphere/AABB test;
//! a colliding step is dropped and the camera stays where it was.

use std::f64::consts::{FRAC_PI_2, PI};

use floorkit_core::{PlanDocument, Zone};
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

use crate::keymap::WalkInput;
use crate::options::WalkOptions;
use crate::scene3d::{Aabb, WallSolid};

/// Receives the camera pose after every movement step.
pub trait CameraObserver {
    fn on_camera_position_change(&mut self, position: Point3<f64>);
    /// Euler angles `(pitch, yaw, roll)` in radians.
    fn on_camera_rotation_change(&mut self, rotation: Vector3<f64>);
}

impl CameraObserver for () {
    fn on_camera_position_change(&mut self, _position: Point3<f64>) {}
    fn on_camera_rotation_change(&mut self, _rotation: Vector3<f64>) {}
}

/// Where the camera starts when walk mode is entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Point3<f64>,
    pub yaw: f64,
    /// Zone the camera spawned in, `None` when the plan has no zones.
    pub zone_index: Option<usize>,
}

/// Zone with the largest area in square meters.
///
/// Ties keep the first zone. Zones with zero area never win.
pub fn largest_zone(doc: &PlanDocument) -> Option<(usize, &Zone)> {
    let scale = doc.scale();
    let mut best: Option<(usize, &Zone)> = None;
    let mut best_area = 0.0;
    for (i, zone) in doc.zones().enumerate() {
        let area = scale.area_to_square_meters(zone.geometry.area());
        if area > best_area {
            best_area = area;
            best = Some((i, zone));
        }
    }
    best
}

/// Spawn point: the centroid of the largest zone, or the plan center.
///
/// The camera is pushed `spawn_offset_m` along +z and faces yaw π.
pub fn spawn_point(doc: &PlanDocument, options: &WalkOptions) -> SpawnPoint {
    let scale = doc.scale();
    let eye = options.eye_height_m;

    let (center, zone_index) = match largest_zone(doc) {
        Some((i, zone)) => (zone.geometry.centroid(), Some(i)),
        None => {
            warn!("No zones in plan, spawning at the plan center");
            (
                floorkit_core::Point2::new(doc.meta.width / 2.0, doc.meta.height / 2.0),
                None,
            )
        }
    };

    let (x, y, z) = scale.plan_to_world(center.x, center.y, eye);
    SpawnPoint {
        position: Point3::new(x, y, z + options.spawn_offset_m),
        yaw: PI,
        zone_index,
    }
}

/// Whether a sphere at `position` touches any of `boxes`.
pub fn collides(position: &Point3<f64>, boxes: &[Aabb], radius: f64) -> bool {
    boxes.iter().any(|b| b.intersects_sphere(position, radius))
}

/// Resolves one movement step against the walls.
///
/// Both positions are pinned to eye height. Wall bounds are recomputed
/// from the solids on every call.
pub fn try_safe_position(
    new_position: Point3<f64>,
    old_position: Point3<f64>,
    walls: &[WallSolid],
    options: &WalkOptions,
) -> Point3<f64> {
    let pin = |p: Point3<f64>| Point3::new(p.x, options.eye_height_m, p.z);
    let candidate = pin(new_position);
    let boxes: Vec<Aabb> = walls.iter().map(WallSolid::aabb).collect();
    if collides(&candidate, &boxes, options.collision_radius_m) {
        pin(old_position)
    } else {
        candidate
    }
}

/// Horizontal forward vector for a yaw; yaw 0 looks down -z.
pub fn forward_vector(yaw: f64) -> Vector3<f64> {
    Vector3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal right vector, `forward × up`.
pub fn right_vector(yaw: f64) -> Vector3<f64> {
    let f = forward_vector(yaw);
    Vector3::new(-f.z, 0.0, f.x)
}

/// First-person camera state.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkController {
    position: Point3<f64>,
    yaw: f64,
    pitch: f64,
    options: WalkOptions,
}

impl WalkController {
    pub fn new(options: WalkOptions) -> Self {
        Self {
            position: Point3::new(0.0, options.eye_height_m, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            options,
        }
    }

    /// Places the camera at the spawn point of `doc`.
    pub fn spawn(&mut self, doc: &PlanDocument) -> SpawnPoint {
        let spawn = spawn_point(doc, &self.options);
        self.position = spawn.position;
        self.yaw = spawn.yaw;
        self.pitch = 0.0;
        debug!("Walk spawn at {:?} in zone {:?}", spawn.position, spawn.zone_index);
        spawn
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// `(pitch, yaw, 0)`.
    pub fn rotation(&self) -> Vector3<f64> {
        Vector3::new(self.pitch, self.yaw, 0.0)
    }

    /// Applies mouse travel in pixels. Pitch is clamped to straight up/down.
    pub fn look(&mut self, dx: f64, dy: f64) {
        self.yaw -= dx * self.options.look_sensitivity;
        self.pitch = (self.pitch - dy * self.options.look_sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Advances the camera by `dt` seconds and reports the new pose.
    ///
    /// # Returns
    ///
    /// `true` if the camera moved.
    pub fn step<O>(
        &mut self,
        input: &WalkInput,
        dt: f64,
        walls: &[WallSolid],
        observer: &mut O,
    ) -> bool
    where
        O: CameraObserver + ?Sized,
    {
        let speed = if input.run {
            self.options.walk_speed * self.options.run_multiplier
        } else {
            self.options.walk_speed
        };
        let distance = speed * dt;
        let forward = forward_vector(self.yaw);
        let right = right_vector(self.yaw);

        let mut delta = Vector3::zeros();
        if input.forward {
            delta += forward * distance;
        }
        if input.backward {
            delta -= forward * distance;
        }
        if input.left {
            delta -= right * distance;
        }
        if input.right {
            delta += right * distance;
        }

        let old = self.position;
        self.position = try_safe_position(old + delta, old, walls, &self.options);

        observer.on_camera_position_change(self.position);
        observer.on_camera_rotation_change(self.rotation());
        self.position != old
    }
}

impl Default for WalkController {
    fn default() -> Self {
        Self::new(WalkOptions::default())
    }
}
