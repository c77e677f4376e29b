//! Element-keyed cache of 2D scene objects.
//!
//! `rebuild` diffs the document against the cache and only rebuilds the
//! elements that changed. `update_one` patches a single element, which is
//! what a drag does on every pointer move.

use std::collections::HashMap;

use floorkit_core::{Element, ElementId, Palette, PlanDocument, Point2, Scale};
use tracing::{debug, info};

use crate::options::{HitTolerances, SceneOptions};
use crate::scene2d::{self, draw_rank, SceneObject2D};

/// Cache entry: the element as last built and its primitives.
///
/// `object` is `None` when the element had no drawable geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedPrimitive {
    pub element: Element,
    pub object: Option<SceneObject2D>,
}

/// Outcome of a [`SceneCache::rebuild`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneDiff {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl SceneDiff {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.updated == 0 && self.removed == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneCache {
    entries: HashMap<ElementId, CachedPrimitive>,
    /// Element ids in document order.
    order: Vec<ElementId>,
    scale: Scale,
    options: SceneOptions,
    palette: Palette,
}

impl SceneCache {
    pub fn new(options: SceneOptions, palette: Palette) -> Self {
        Self {
            options,
            palette,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CachedPrimitive> {
        self.entries.get(id)
    }

    pub fn options(&self) -> &SceneOptions {
        &self.options
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Synchronizes the cache with `doc`.
    ///
    /// A scale change invalidates every entry.
    pub fn rebuild(&mut self, doc: &PlanDocument) -> SceneDiff {
        let scale = doc.scale();
        if scale != self.scale {
            debug!("Scale changed to {}, dropping {} cached objects", scale, self.entries.len());
            self.entries.clear();
            self.scale = scale;
        }

        let mut diff = SceneDiff::default();
        let mut stale: HashMap<ElementId, CachedPrimitive> = std::mem::take(&mut self.entries);

        for element in &doc.elements {
            let id = element.id().to_string();
            match stale.remove(&id) {
                Some(cached) if cached.element == *element => {
                    diff.unchanged += 1;
                    self.entries.insert(id, cached);
                }
                Some(_) => {
                    diff.updated += 1;
                    let entry = self.build(element);
                    self.entries.insert(id, entry);
                }
                None => {
                    diff.added += 1;
                    let entry = self.build(element);
                    self.entries.insert(id, entry);
                }
            }
        }
        diff.removed = stale.len();
        self.order = doc.elements.iter().map(|e| e.id().to_string()).collect();

        info!(
            "Scene rebuilt: {} added, {} updated, {} removed, {} unchanged",
            diff.added, diff.updated, diff.removed, diff.unchanged
        );
        diff
    }

    /// Rebuilds the primitives of one element.
    pub fn update_one(&mut self, element: &Element) {
        let id = element.id().to_string();
        if !self.entries.contains_key(&id) {
            self.order.push(id.clone());
        }
        let entry = self.build(element);
        self.entries.insert(id, entry);
    }

    /// Drops one element from the cache.
    pub fn remove(&mut self, id: &str) -> Option<CachedPrimitive> {
        self.order.retain(|o| o != id);
        self.entries.remove(id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Scene objects in draw order.
    pub fn draw_order(&self) -> Vec<&SceneObject2D> {
        let mut objects: Vec<&SceneObject2D> = self
            .order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .filter_map(|c| c.object.as_ref())
            .collect();
        objects.sort_by_key(|o| draw_rank(o.kind));
        objects
    }

    /// Topmost cached object at `point`.
    pub fn pick(&self, point: Point2, tolerances: &HitTolerances) -> Option<&str> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|o| scene2d::object_contains(o, point, tolerances))
            .map(|o| o.element_id.as_str())
    }

    fn build(&self, element: &Element) -> CachedPrimitive {
        CachedPrimitive {
            element: element.clone(),
            object: scene2d::build_element(element, &self.scale, &self.options, &self.palette),
        }
    }
}
