//! Plan editor controller.
//!
//! Owns the active document, the interaction state, the selection, the
//! undo history, the viewport and the 2D scene cache. The host forwards
//! pointer and keyboard events and is notified through [`EditorCallbacks`].
//!
//! History is recorded around every commit: a checkpoint before the
//! mutation and a record after it. Both are deduplicated by
//! [`PlanHistory::push`], so a checkpoint of an unchanged document never
//! creates an empty undo step.

use floorkit_core::units::parse_meters;
use floorkit_core::{Element, ElementId, Palette, PlanDocument, Point2};
use tracing::{debug, info, warn};

use crate::error::{DesignerError, Result};
use crate::factory::new_element_id;
use crate::hit_test::{element_contains, hit_test};
use crate::history::PlanHistory;
use crate::keymap::{match_shortcut, KeyInput, Shortcut};
use crate::options::{EditorOptions, SceneOptions};
use crate::scene3d::PickHit3D;
use crate::scene_cache::SceneCache;
use crate::selection::{is_click, SelectionManager};
use crate::transform::{self, Dimension, Measurements};
use crate::viewport::Viewport;

/// Notifications sent to the host.
///
/// Every method has an empty default so hosts implement only what they use.
pub trait EditorCallbacks {
    /// The document changed through a commit, undo or redo.
    fn on_data_change(&mut self, _document: &PlanDocument) {}
    fn on_element_select(&mut self, _id: Option<&str>) {}
    fn on_object3d_select(&mut self, _id: Option<&str>) {}
}

impl EditorCallbacks for () {}

/// What the pointer is currently doing.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    Idle,
    /// An element follows the pointer.
    Dragging {
        element_id: ElementId,
        /// Plan point of the press.
        press: Point2,
        /// The element as it was at the press.
        start: Element,
    },
    /// The edit panel is open on an element. Rotation and resize apply live.
    Rotating {
        element_id: ElementId,
        /// Document at the time the panel opened, restored on cancel.
        before: Box<PlanDocument>,
    },
}

/// Press that may turn into a click or a pan.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PointerPress {
    origin: (f64, f64),
    last: (f64, f64),
}

pub struct PlanEditor {
    document: Option<PlanDocument>,
    history: Option<PlanHistory>,
    selection: SelectionManager,
    clipboard: Option<Element>,
    state: InteractionState,
    press: Option<PointerPress>,
    viewport: Viewport,
    cache: SceneCache,
    options: EditorOptions,
    callbacks: Box<dyn EditorCallbacks>,
}

impl PlanEditor {
    pub fn new(options: EditorOptions, scene_options: SceneOptions, palette: Palette) -> Self {
        Self {
            document: None,
            history: None,
            selection: SelectionManager::new(),
            clipboard: None,
            state: InteractionState::Idle,
            press: None,
            viewport: Viewport::default(),
            cache: SceneCache::new(scene_options, palette),
            options,
            callbacks: Box::new(()),
        }
    }

    pub fn with_callbacks(mut self, callbacks: Box<dyn EditorCallbacks>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn set_callbacks(&mut self, callbacks: Box<dyn EditorCallbacks>) {
        self.callbacks = callbacks;
    }

    /// Replaces the active document.
    ///
    /// The history restarts from `document` and the viewport is fitted to
    /// the plan sheet. A selection that no longer resolves is dropped.
    pub fn load_document(&mut self, mut document: PlanDocument) {
        document.normalize();
        info!(
            "Loaded plan with {} elements at {}",
            document.len(),
            document.scale()
        );
        self.state = InteractionState::Idle;
        self.press = None;
        match self.history.as_mut() {
            Some(history) => history.reset(&document),
            None => {
                self.history = Some(PlanHistory::new(&document, self.options.history_capacity))
            }
        }
        self.viewport
            .fit_to_plan(document.meta.width, document.meta.height);
        self.cache.rebuild(&document);
        let dropped = self
            .selection
            .selected_id()
            .is_some_and(|id| !document.contains(id));
        self.document = Some(document);
        if dropped {
            self.selection.set_selected_id(None);
            self.callbacks.on_element_select(None);
        }
    }

    pub fn document(&self) -> Option<&PlanDocument> {
        self.document.as_ref()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Zoom and pan are allowed unless an element is being dragged.
    pub fn navigation_enabled(&self) -> bool {
        !matches!(self.state, InteractionState::Dragging { .. })
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selected_element(&self) -> Option<&Element> {
        let id = self.selection.selected_id()?;
        self.document.as_ref()?.find(id)
    }

    pub fn clipboard(&self) -> Option<&Element> {
        self.clipboard.as_ref()
    }

    pub fn history(&self) -> Option<&PlanHistory> {
        self.history.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(PlanHistory::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(PlanHistory::can_redo)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scene(&self) -> &SceneCache {
        &self.cache
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Selects an element programmatically.
    pub fn select(&mut self, id: Option<&str>) {
        let id = id.filter(|id| self.document.as_ref().is_some_and(|d| d.contains(id)));
        self.selection.set_selected_id(id.map(String::from));
        self.callbacks.on_element_select(id);
    }

    // ---- pointer -------------------------------------------------------

    /// Pointer pressed at a screen position.
    ///
    /// A press on the selected wall, door, window or zone starts a drag;
    /// anything else may become a click or a pan.
    pub fn pointer_down(&mut self, screen_x: f64, screen_y: f64) {
        if matches!(self.state, InteractionState::Dragging { .. }) {
            return;
        }
        let plan = self.viewport.screen_to_plan(screen_x, screen_y);

        if let Some(start) = self.draggable_at(plan) {
            self.checkpoint();
            debug!("Drag start on {}", start.id());
            self.state = InteractionState::Dragging {
                element_id: start.id().to_string(),
                press: plan,
                start,
            };
            return;
        }

        self.press = Some(PointerPress {
            origin: (screen_x, screen_y),
            last: (screen_x, screen_y),
        });
    }

    /// Pointer moved to a screen position.
    pub fn pointer_move(&mut self, screen_x: f64, screen_y: f64) {
        if let InteractionState::Dragging { press, start, .. } = &self.state {
            let plan = self.viewport.screen_to_plan(screen_x, screen_y);
            let moved = start.translated(plan.x - press.x, plan.y - press.y);
            let Some(doc) = self.document.as_mut() else {
                return;
            };
            if doc.replace(moved.clone()).is_ok() {
                self.cache.update_one(&moved);
            }
            return;
        }

        if let Some(press) = self.press.as_mut() {
            let (dx, dy) = (screen_x - press.last.0, screen_y - press.last.1);
            press.last = (screen_x, screen_y);
            self.viewport.pan_by(dx, dy);
        }
    }

    /// Pointer released at a screen position.
    ///
    /// Ends a drag, or resolves a click when the pointer barely moved.
    pub fn pointer_up(&mut self, screen_x: f64, screen_y: f64) {
        if matches!(self.state, InteractionState::Dragging { .. }) {
            self.finish_drag();
            return;
        }

        let Some(press) = self.press.take() else {
            return;
        };
        if !is_click(press.origin, (screen_x, screen_y), self.options.click_threshold) {
            return;
        }

        let plan = self.viewport.screen_to_plan(screen_x, screen_y);
        let hit = self
            .document
            .as_ref()
            .and_then(|doc| hit_test(plan, doc, &self.options.hit))
            .map(|e| e.id().to_string());
        let selected = self.selection.click(hit.as_deref()).map(String::from);
        self.callbacks.on_element_select(selected.as_deref());
    }

    /// Pointer left the canvas. A running drag is committed.
    pub fn pointer_leave(&mut self) {
        self.press = None;
        if matches!(self.state, InteractionState::Dragging { .. }) {
            self.finish_drag();
        }
    }

    fn draggable_at(&self, plan: Point2) -> Option<Element> {
        let doc = self.document.as_ref()?;
        let selected = doc.find(self.selection.selected_id()?)?;
        if !selected.is_rotatable() {
            return None;
        }
        element_contains(selected, plan, &doc.scale(), &self.options.hit).then(|| selected.clone())
    }

    fn finish_drag(&mut self) {
        let state = std::mem::replace(&mut self.state, InteractionState::Idle);
        if let InteractionState::Dragging { element_id, .. } = state {
            debug!("Drag end on {}", element_id);
            self.record();
        }
    }

    // ---- navigation ----------------------------------------------------

    /// Wheel zoom about a screen position. Refused while dragging.
    pub fn wheel(&mut self, screen_x: f64, screen_y: f64, delta: f64) -> bool {
        if !self.navigation_enabled() {
            return false;
        }
        self.viewport.wheel_zoom(screen_x, screen_y, delta);
        true
    }

    /// Pans by screen pixels. Refused while dragging.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if !self.navigation_enabled() {
            return false;
        }
        self.viewport.pan_by(dx, dy);
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        if !self.navigation_enabled() {
            return false;
        }
        self.viewport.zoom_in();
        true
    }

    pub fn zoom_out(&mut self) -> bool {
        if !self.navigation_enabled() {
            return false;
        }
        self.viewport.zoom_out();
        true
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
    }

    // ---- commands ------------------------------------------------------

    /// Dispatches a key press.
    ///
    /// # Returns
    ///
    /// The shortcut that was recognized, if any.
    pub fn handle_key(&mut self, input: &KeyInput) -> Option<Shortcut> {
        let shortcut = match_shortcut(input)?;
        match shortcut {
            Shortcut::Undo => {
                self.undo();
            }
            Shortcut::Redo => {
                self.redo();
            }
            Shortcut::Copy => {
                self.copy_selected();
            }
            Shortcut::Paste => {
                self.paste();
            }
        }
        Some(shortcut)
    }

    /// Appends a new element and selects it.
    pub fn add_element(&mut self, element: Element) -> Option<ElementId> {
        let Some(doc) = self.document.as_ref() else {
            warn!("Cannot add {}: no active document", element.kind());
            return None;
        };
        let id = element.id().to_string();
        if doc.contains(&id) {
            warn!("Element {} already exists, not added", id);
            return None;
        }
        self.checkpoint();
        if let Some(doc) = self.document.as_mut() {
            self.cache.update_one(&element);
            doc.push(element);
        }
        self.record();
        self.selection.set_selected_id(Some(id.clone()));
        self.callbacks.on_element_select(Some(&id));
        Some(id)
    }

    /// Removes an element by id.
    pub fn delete_element(&mut self, id: &str) -> Result<Element> {
        let doc = self.document.as_ref().ok_or(DesignerError::NoDocument)?;
        if !doc.contains(id) {
            return Err(DesignerError::unknown(id));
        }
        self.checkpoint();
        let removed = self
            .document
            .as_mut()
            .and_then(|doc| doc.remove(id))
            .ok_or_else(|| DesignerError::unknown(id))?;
        self.cache.remove(id);
        self.record();
        if self.selection.forget(id) {
            self.callbacks.on_element_select(None);
        }
        Ok(removed)
    }

    pub fn delete_selected(&mut self) -> Option<Element> {
        let id = self.selection.selected_id()?.to_string();
        self.delete_element(&id).ok()
    }

    /// Copies the selected element into the clipboard.
    pub fn copy_selected(&mut self) -> bool {
        match self.selected_element().cloned() {
            Some(element) => {
                debug!("Copied {}", element.id());
                self.clipboard = Some(element);
                true
            }
            None => false,
        }
    }

    /// Pastes the clipboard as a new element offset on both axes.
    pub fn paste(&mut self) -> Option<ElementId> {
        let source = self.clipboard.as_ref()?;
        if self.document.is_none() {
            warn!("Cannot paste: no active document");
            return None;
        }
        let copy = transform::offset_copy(
            source,
            new_element_id(source.kind()),
            self.options.paste_offset,
        );
        self.add_element(copy)
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.as_mut().and_then(PlanHistory::undo) else {
            return false;
        };
        self.restore(previous);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.as_mut().and_then(PlanHistory::redo) else {
            return false;
        };
        self.restore(next);
        true
    }

    fn restore(&mut self, document: PlanDocument) {
        self.state = InteractionState::Idle;
        self.cache.rebuild(&document);
        let dropped = self
            .selection
            .selected_id()
            .is_some_and(|id| !document.contains(id));
        self.callbacks.on_data_change(&document);
        self.document = Some(document);
        if dropped {
            self.selection.set_selected_id(None);
            self.callbacks.on_element_select(None);
        }
    }

    fn checkpoint(&mut self) {
        if let (Some(doc), Some(history)) = (self.document.as_ref(), self.history.as_mut()) {
            history.push(doc);
        }
    }

    /// Records the current document and notifies the host when it changed.
    fn record(&mut self) {
        let (Some(doc), Some(history)) = (self.document.as_ref(), self.history.as_mut()) else {
            return;
        };
        if history.push(doc) {
            self.callbacks.on_data_change(doc);
        }
    }

    // ---- 3D picks ------------------------------------------------------

    /// Forwards a pick from the 3D view.
    ///
    /// Walls and floors select plan elements, furniture selects a 3D
    /// object. A miss clears both selections.
    pub fn apply_3d_pick(&mut self, hit: Option<PickHit3D>) {
        match hit {
            Some(PickHit3D::Element(id)) => {
                self.selection.set_selected_id(Some(id.clone()));
                self.callbacks.on_element_select(Some(&id));
            }
            Some(PickHit3D::Object(id)) => {
                self.selection.set_selected_object(Some(id.clone()));
                self.callbacks.on_object3d_select(Some(&id));
            }
            None => {
                self.selection.clear();
                self.callbacks.on_element_select(None);
                self.callbacks.on_object3d_select(None);
            }
        }
    }

    // ---- edit panel ----------------------------------------------------

    /// Opens the edit panel on an element.
    pub fn open_panel(&mut self, id: &str) -> Result<Measurements> {
        if matches!(self.state, InteractionState::Rotating { .. }) {
            self.close_panel(true);
        }
        let doc = self.document.as_ref().ok_or(DesignerError::NoDocument)?;
        let element = doc.find(id).ok_or_else(|| DesignerError::unknown(id))?;
        let measurements = transform::measure(element, &doc.scale());
        self.state = InteractionState::Rotating {
            element_id: id.to_string(),
            before: Box::new(doc.clone()),
        };
        Ok(measurements)
    }

    /// Measurements of the element in the open panel.
    pub fn panel_measurements(&self) -> Option<Measurements> {
        let id = self.panel_element_id()?;
        let doc = self.document.as_ref()?;
        Some(transform::measure(doc.find(id)?, &doc.scale()))
    }

    pub fn panel_element_id(&self) -> Option<&str> {
        match &self.state {
            InteractionState::Rotating { element_id, .. } => Some(element_id),
            _ => None,
        }
    }

    /// Applies an absolute rotation live, without touching the history.
    pub fn set_panel_rotation(&mut self, angle_deg: f64) -> Result<()> {
        self.apply_panel_edit(|element, _| transform::rotate_to(element, angle_deg))
    }

    /// Applies a dimension typed into the panel, in meters.
    ///
    /// Accepts `,` as the decimal separator. Values not above zero are
    /// ignored.
    pub fn set_panel_dimension(&mut self, dimension: Dimension, input: &str) -> Result<()> {
        let meters = parse_meters(input).map_err(DesignerError::InvalidValue)?;
        self.apply_panel_edit(|element, scale| transform::resize(element, dimension, meters, scale))
    }

    fn apply_panel_edit<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&Element, &floorkit_core::Scale) -> Result<Element>,
    {
        let id = self
            .panel_element_id()
            .map(String::from)
            .ok_or(DesignerError::NoDocument)?;
        let doc = self.document.as_mut().ok_or(DesignerError::NoDocument)?;
        let scale = doc.scale();
        let element = doc.find(&id).ok_or_else(|| DesignerError::unknown(&id))?;
        let edited = edit(element, &scale)?;
        self.cache.update_one(&edited);
        doc.replace(edited)?;
        Ok(())
    }

    /// Closes the edit panel.
    ///
    /// Committing records one snapshot for everything the panel changed.
    /// Cancelling restores the document as it was when the panel opened.
    pub fn close_panel(&mut self, commit: bool) {
        match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::Rotating { .. } if commit => self.record(),
            InteractionState::Rotating { element_id, before } => {
                debug!("Panel on {} cancelled", element_id);
                self.cache.rebuild(&before);
                self.document = Some(*before);
            }
            other => self.state = other,
        }
    }
}

impl Default for PlanEditor {
    fn default() -> Self {
        Self::new(
            EditorOptions::default(),
            SceneOptions::default(),
            Palette::default(),
        )
    }
}

impl std::fmt::Debug for PlanEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanEditor")
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("elements", &self.document.as_ref().map(PlanDocument::len))
            .field("viewport", &self.viewport)
            .finish()
    }
}
