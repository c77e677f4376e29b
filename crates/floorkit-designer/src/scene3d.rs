//! 3D scene builder.
//!
//! Builds wall solids, floor slabs, furniture placements and label
//! billboards in world meters. World axes: `x` follows plan x, `y` points up
//! and `z` is the negated plan y.
//!
//! The renderer is not part of this crate. It consumes the solids built
//! here. Picks test walls as oriented boxes and floors as their outline on
//! the ground plane.

use std::path::{Path, PathBuf};

use anyhow::Context;
use floorkit_core::polygon::point_in_polygon;
use floorkit_core::{
    Color, ElementId, Label, Object3D, Object3DType, Palette, PlanDocument, Point2, Scale, Wall,
    Zone,
};
use nalgebra::{Point3, Rotation3, Vector3};

use crate::options::SceneOptions;

/// Axis-aligned bounding box in world meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Smallest box holding every point, `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |b, p| {
            Self::new(b.min.inf(&p), b.max.sup(&p))
        }))
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn contains(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Sphere test: clamps the center into the box and compares the
    /// squared distance with the squared radius.
    pub fn intersects_sphere(&self, center: &Point3<f64>, radius: f64) -> bool {
        let closest = Point3::new(
            center.x.clamp(self.min.x, self.max.x),
            center.y.clamp(self.min.y, self.max.y),
            center.z.clamp(self.min.z, self.max.z),
        );
        (closest - center).norm_squared() <= radius * radius
    }

    /// Slab test. Returns the ray parameter of the entry point, or 0 when
    /// the origin is inside the box.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f64> {
        let mut t_min = 0.0_f64;
        let mut t_max = f64::INFINITY;
        for i in 0..3 {
            let o = ray.origin[i];
            let d = ray.direction[i];
            if d.abs() < f64::EPSILON {
                if o < self.min[i] || o > self.max[i] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (t1, t2) = {
                let a = (self.min[i] - o) * inv;
                let b = (self.max[i] - o) * inv;
                if a <= b {
                    (a, b)
                } else {
                    (b, a)
                }
            };
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

/// A pick ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }
}

/// Box solid of one wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSolid {
    pub element_id: ElementId,
    pub center: Point3<f64>,
    /// Length along local x, height along y, thickness along z.
    pub size: Vector3<f64>,
    /// Yaw about world y, `atan2(dz, dx)` of the wall direction.
    pub yaw: f64,
    pub color: Color,
}

impl WallSolid {
    /// Rotation taking local +x onto the wall direction `(cos yaw, 0, sin yaw)`.
    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_euler_angles(0.0, -self.yaw, 0.0)
    }

    /// World positions of the eight box corners.
    pub fn corners(&self) -> [Point3<f64>; 8] {
        box_corners(&self.center, &(self.size / 2.0), &self.rotation())
    }

    /// World-space bounds of the rotated box.
    pub fn aabb(&self) -> Aabb {
        let c = self.corners();
        Aabb::from_points(c).unwrap_or(Aabb::new(self.center, self.center))
    }

    /// Ray test against the oriented box, in the wall's local frame.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f64> {
        let inverse = self.rotation().inverse();
        let local = Ray::new(
            Point3::from(inverse * (ray.origin - self.center)),
            inverse * ray.direction,
        );
        let half = self.size / 2.0;
        Aabb::new(Point3::from(-half), Point3::from(half)).ray_intersection(&local)
    }
}

/// Flat floor polygon of one zone, laid at `y = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorSlab {
    pub element_id: ElementId,
    /// Center of the outline's bounding box.
    pub center: Point3<f64>,
    /// Outline in world meters relative to `center`.
    pub outline: Vec<Point3<f64>>,
    pub color: Color,
}

impl FloorSlab {
    pub fn world_outline(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.outline.iter().map(move |p| Point3::from(p.coords + self.center.coords))
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.world_outline()).unwrap_or(Aabb::new(self.center, self.center))
    }

    /// Ray test against the outline on the plane `y = center.y`.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f64> {
        if ray.direction.y.abs() < f64::EPSILON {
            return None;
        }
        let t = (self.center.y - ray.origin.y) / ray.direction.y;
        if t < 0.0 {
            return None;
        }
        let hit = ray.at(t);
        let ground: Vec<f64> = self.world_outline().flat_map(|p| [p.x, p.z]).collect();
        point_in_polygon(Point2::new(hit.x, hit.z), &ground).then_some(t)
    }
}

/// Opaque handle to a loaded furniture model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelHandle {
    pub kind: Object3DType,
    pub path: PathBuf,
}

/// What a furniture mesh draws.
#[derive(Debug, Clone, PartialEq)]
pub enum FurnitureModel {
    Loaded(ModelHandle),
    /// Unit box in a flat color, used when the model could not be loaded.
    Placeholder { color: Color },
}

/// A placed piece of furniture.
#[derive(Debug, Clone, PartialEq)]
pub struct FurnitureMesh {
    pub object_id: String,
    pub kind: Object3DType,
    pub position: Point3<f64>,
    pub scale: Vector3<f64>,
    pub rotation: Rotation3<f64>,
    pub model: FurnitureModel,
}

impl FurnitureMesh {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.model, FurnitureModel::Placeholder { .. })
    }

    /// Bounds of the unit box after scale, rotation and translation.
    pub fn aabb(&self) -> Aabb {
        let c = box_corners(&self.position, &(self.scale / 2.0), &self.rotation);
        Aabb::from_points(c).unwrap_or(Aabb::new(self.position, self.position))
    }
}

/// Billboard text above a label anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Label3D {
    pub element_id: ElementId,
    pub text: String,
    pub position: Point3<f64>,
    pub scale: f64,
}

/// Source of furniture models.
pub trait AssetLoader {
    fn load(&self, kind: &Object3DType) -> anyhow::Result<ModelHandle>;
}

/// Loads `<root>/<type>.glb` models from a directory.
#[derive(Debug, Clone)]
pub struct ModelDirLoader {
    root: PathBuf,
}

impl ModelDirLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn model_path(&self, kind: &Object3DType) -> PathBuf {
        self.root.join(format!("{}.glb", kind.as_str()))
    }
}

impl AssetLoader for ModelDirLoader {
    fn load(&self, kind: &Object3DType) -> anyhow::Result<ModelHandle> {
        let path = self.model_path(kind);
        let meta = std::fs::metadata(&path)
            .with_context(|| format!("reading model {}", path.display()))?;
        if !meta.is_file() {
            anyhow::bail!("{} is not a file", path.display());
        }
        Ok(ModelHandle {
            kind: kind.clone(),
            path,
        })
    }
}

/// Whether the 3D view is orbiting or walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    View,
    Walk,
}

/// Generation stamp handed out when an asynchronous furniture load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Result of a 3D pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickHit3D {
    Element(ElementId),
    Object(String),
}

/// Counts reported by [`Scene3D::sync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncStats {
    pub walls: usize,
    pub floors: usize,
    pub labels: usize,
    /// `false` when walk mode kept the previous wall and floor sets.
    pub rebuilt_solids: bool,
}

/// Builds the solid of one wall, `None` for a zero-length segment.
pub fn build_wall_solid(
    wall: &Wall,
    scale: &Scale,
    ceiling_height_m: f64,
    options: &SceneOptions,
    palette: &Palette,
) -> Option<WallSolid> {
    let [x1, y1, x2, y2] = wall.geometry.points;
    let (sx, _, sz) = scale.plan_to_world(x1, y1, 0.0);
    let (ex, _, ez) = scale.plan_to_world(x2, y2, 0.0);
    let (dx, dz) = (ex - sx, ez - sz);
    let length = dx.hypot(dz);
    if length == 0.0 {
        tracing::debug!("Skipping zero-length wall {}", wall.id);
        return None;
    }

    let thickness = wall
        .thickness
        .filter(|t| *t > 0.0)
        .map(|t| scale.pixels_to_meters(t))
        .unwrap_or(options.wall_thickness_m);
    let color = style_color(wall.style.as_ref().and_then(|s| s.color.as_deref()), palette.wall_3d);

    Some(WallSolid {
        element_id: wall.id.clone(),
        center: Point3::new((sx + ex) / 2.0, ceiling_height_m / 2.0, (sz + ez) / 2.0),
        size: Vector3::new(length, ceiling_height_m, thickness),
        yaw: dz.atan2(dx),
        color,
    })
}

/// Builds the floor of one zone, `None` with fewer than three vertices.
pub fn build_floor_slab(zone: &Zone, scale: &Scale, palette: &Palette) -> Option<FloorSlab> {
    if !zone.geometry.is_valid() {
        tracing::debug!(
            "Skipping floor for zone {}: {} coordinates",
            zone.id,
            zone.geometry.points.len()
        );
        return None;
    }
    let world: Vec<Point3<f64>> = zone
        .geometry
        .vertices()
        .map(|p| {
            let (x, y, z) = scale.plan_to_world(p.x, p.y, 0.0);
            Point3::new(x, y, z)
        })
        .collect();
    let center = Aabb::from_points(world.iter().copied())?.center();
    let outline = world.iter().map(|p| Point3::from(p - center)).collect();
    let color = style_color(zone.style.as_ref().and_then(|s| s.color.as_deref()), palette.floor_3d);

    Some(FloorSlab {
        element_id: zone.id.clone(),
        center,
        outline,
        color,
    })
}

/// Places one piece of furniture.
///
/// Loader failures are logged and replaced by a placeholder box.
pub fn build_furniture(
    object: &Object3D,
    scale: &Scale,
    loader: &dyn AssetLoader,
    palette: &Palette,
) -> FurnitureMesh {
    let p = object.position;
    let position = Point3::new(
        scale.pixels_to_meters(p.x),
        p.y,
        -scale.pixels_to_meters(p.z),
    );
    let size = match object.size {
        Some(s) => Vector3::new(
            scale.pixels_to_meters(s.x),
            scale.pixels_to_meters(s.y),
            scale.pixels_to_meters(s.z),
        ),
        None => {
            let d = object.kind.default_scale();
            Vector3::new(d.x, d.y, d.z)
        }
    };
    let rotation = object
        .rotation
        .map(|r| {
            Rotation3::from_axis_angle(&Vector3::x_axis(), r.x)
                * Rotation3::from_axis_angle(&Vector3::y_axis(), r.y)
                * Rotation3::from_axis_angle(&Vector3::z_axis(), r.z)
        })
        .unwrap_or_else(Rotation3::identity);

    let model = match loader.load(&object.kind) {
        Ok(handle) => FurnitureModel::Loaded(handle),
        Err(err) => {
            let err = crate::error::DesignerError::asset_load(object.kind.as_str(), &err);
            tracing::warn!("{}; using placeholder for {}", err, object.id);
            FurnitureModel::Placeholder {
                color: palette.placeholder_3d,
            }
        }
    };

    FurnitureMesh {
        object_id: object.id.clone(),
        kind: object.kind.clone(),
        position,
        scale: size,
        rotation,
        model,
    }
}

pub fn build_label_3d(label: &Label, scale: &Scale, options: &SceneOptions) -> Label3D {
    let (x, y, z) =
        scale.plan_to_world(label.geometry.x, label.geometry.y, options.label_height_3d);
    Label3D {
        element_id: label.id.clone(),
        text: label.text.clone(),
        position: Point3::new(x, y, z),
        scale: options.label_scale_3d,
    }
}

fn style_color(value: Option<&str>, fallback: Color) -> Color {
    match value {
        Some(hex) => Color::from_hex(hex).unwrap_or_else(|e| {
            tracing::warn!("Invalid style color {:?}: {}", hex, e);
            fallback
        }),
        None => fallback,
    }
}

fn box_corners(
    center: &Point3<f64>,
    half: &Vector3<f64>,
    rotation: &Rotation3<f64>,
) -> [Point3<f64>; 8] {
    let mut out = [*center; 8];
    for (i, corner) in out.iter_mut().enumerate() {
        let local = Vector3::new(
            if i & 1 == 0 { -half.x } else { half.x },
            if i & 2 == 0 { -half.y } else { half.y },
            if i & 4 == 0 { -half.z } else { half.z },
        );
        *corner = center + rotation * local;
    }
    out
}

/// The 3D scene kept in sync with the plan.
#[derive(Debug, Clone)]
pub struct Scene3D {
    mode: ViewMode,
    walls: Vec<WallSolid>,
    floors: Vec<FloorSlab>,
    furniture: Vec<FurnitureMesh>,
    labels: Vec<Label3D>,
    generation: u64,
    options: SceneOptions,
    palette: Palette,
}

impl Scene3D {
    pub fn new(options: SceneOptions, palette: Palette) -> Self {
        Self {
            mode: ViewMode::View,
            walls: Vec::new(),
            floors: Vec::new(),
            furniture: Vec::new(),
            labels: Vec::new(),
            generation: 0,
            options,
            palette,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            tracing::debug!("3D view mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn walls(&self) -> &[WallSolid] {
        &self.walls
    }

    pub fn floors(&self) -> &[FloorSlab] {
        &self.floors
    }

    pub fn furniture(&self) -> &[FurnitureMesh] {
        &self.furniture
    }

    pub fn labels(&self) -> &[Label3D] {
        &self.labels
    }

    /// Brings the scene in line with `doc`.
    ///
    /// In view mode walls, floors and furniture are dropped and rebuilt. In
    /// walk mode the existing walls and floors stay as long as there are any,
    /// so collision geometry does not change under the walker. Labels are
    /// always rebuilt. Every sync invalidates outstanding furniture loads.
    pub fn sync(&mut self, doc: &PlanDocument) -> SyncStats {
        let scale = doc.scale();
        let rebuild = self.mode == ViewMode::View || self.walls.is_empty();

        if rebuild {
            let ceiling = doc.meta.ceiling_height_m.unwrap_or(self.options.ceiling_height_m);
            self.walls = doc
                .walls()
                .filter_map(|w| build_wall_solid(w, &scale, ceiling, &self.options, &self.palette))
                .collect();
            self.floors = doc
                .zones()
                .filter_map(|z| build_floor_slab(z, &scale, &self.palette))
                .collect();
            if self.mode == ViewMode::View {
                self.furniture.clear();
            }
        } else {
            tracing::debug!("Walk mode: keeping {} wall solids", self.walls.len());
        }

        self.labels = doc
            .elements
            .iter()
            .filter_map(|e| match e {
                floorkit_core::Element::Label(l) => Some(build_label_3d(l, &scale, &self.options)),
                _ => None,
            })
            .collect();
        self.generation += 1;

        let stats = SyncStats {
            walls: self.walls.len(),
            floors: self.floors.len(),
            labels: self.labels.len(),
            rebuilt_solids: rebuild,
        };
        tracing::info!(
            "3D scene synced: {} walls, {} floors, {} labels",
            stats.walls,
            stats.floors,
            stats.labels
        );
        stats
    }

    /// Starts an asynchronous furniture load.
    pub fn begin_furniture_load(&self) -> LoadTicket {
        LoadTicket(self.generation)
    }

    /// Finishes a furniture load.
    ///
    /// The meshes replace the current furniture only if no sync happened
    /// since `ticket` was issued.
    ///
    /// # Returns
    ///
    /// `true` if the meshes were installed.
    pub fn complete_furniture_load(
        &mut self,
        ticket: LoadTicket,
        meshes: Vec<FurnitureMesh>,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                "Discarding {} furniture meshes from generation {} (current {})",
                meshes.len(),
                ticket.0,
                self.generation
            );
            return false;
        }
        self.furniture = meshes;
        true
    }

    /// Loads every object synchronously through `loader`.
    pub fn load_furniture(
        &mut self,
        objects: &[Object3D],
        scale: &Scale,
        loader: &dyn AssetLoader,
    ) -> bool {
        let ticket = self.begin_furniture_load();
        let meshes = objects
            .iter()
            .map(|o| build_furniture(o, scale, loader, &self.palette))
            .collect();
        self.complete_furniture_load(ticket, meshes)
    }

    /// Bounds of every wall solid, recomputed from the current transforms.
    pub fn wall_boxes(&self) -> Vec<Aabb> {
        self.walls.iter().map(WallSolid::aabb).collect()
    }

    /// Nearest wall, floor or furniture hit by `ray`.
    ///
    /// Walls are tested as oriented boxes, floors as polygons and furniture
    /// by bounds. Always `None` in walk mode.
    pub fn pick(&self, ray: &Ray) -> Option<PickHit3D> {
        if self.mode != ViewMode::View {
            return None;
        }

        let walls = self
            .walls
            .iter()
            .filter_map(|w| {
                w.ray_intersection(ray)
                    .map(|t| (t, PickHit3D::Element(w.element_id.clone())))
            });
        let floors = self
            .floors
            .iter()
            .filter_map(|f| {
                f.ray_intersection(ray)
                    .map(|t| (t, PickHit3D::Element(f.element_id.clone())))
            });
        let furniture = self
            .furniture
            .iter()
            .filter_map(|m| {
                m.aabb()
                    .ray_intersection(ray)
                    .map(|t| (t, PickHit3D::Object(m.object_id.clone())))
            });

        walls
            .chain(floors)
            .chain(furniture)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, hit)| hit)
    }
}

impl Default for Scene3D {
    fn default() -> Self {
        Self::new(SceneOptions::default(), Palette::default())
    }
}
