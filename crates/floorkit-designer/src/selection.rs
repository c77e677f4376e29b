use floorkit_core::ElementId;

/// Manages single-element selection.
///
/// At most one plan element and at most one 3D object are selected at a
/// time. Clicking the selected element again deselects it and clicking
/// empty space clears the selection.
///
/// # Examples
///
/// ```
/// use floorkit_designer::selection::SelectionManager;
///
/// let mut manager = SelectionManager::new();
/// manager.click(Some("wall_1"));
/// assert_eq!(manager.selected_id(), Some("wall_1"));
/// manager.click(Some("wall_1"));
/// assert_eq!(manager.selected_id(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionManager {
    selected_id: Option<ElementId>,
    selected_object: Option<String>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the selected plan element.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Returns the id of the selected 3D object.
    pub fn selected_object(&self) -> Option<&str> {
        self.selected_object.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id.as_deref() == Some(id)
    }

    /// Replaces the plan selection.
    pub fn set_selected_id(&mut self, id: Option<ElementId>) {
        self.selected_id = id;
    }

    /// Replaces the 3D object selection.
    pub fn set_selected_object(&mut self, id: Option<String>) {
        self.selected_object = id;
    }

    /// Applies a click that hit `hit` (or nothing).
    ///
    /// # Returns
    ///
    /// The selection after the click.
    pub fn click(&mut self, hit: Option<&str>) -> Option<&str> {
        self.selected_id = match hit {
            Some(id) if self.is_selected(id) => None,
            Some(id) => Some(id.to_string()),
            None => None,
        };
        self.selected_id.as_deref()
    }

    /// Clears the plan selection if it points at `id`.
    ///
    /// # Returns
    ///
    /// `true` if the selection changed.
    pub fn forget(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.selected_id = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.selected_id = None;
        self.selected_object = None;
    }
}

/// Whether a press/release pair is a click rather than a pan.
///
/// # Arguments
///
/// * `press` - Screen position of the press
/// * `release` - Screen position of the release
/// * `threshold` - Largest travel, in screen pixels, still counted as a click
pub fn is_click(press: (f64, f64), release: (f64, f64), threshold: f64) -> bool {
    let dx = release.0 - press.0;
    let dy = release.1 - press.1;
    dx.hypot(dy) <= threshold
}
