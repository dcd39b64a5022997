//! The editor: element store plus all transient UI state.
//!
//! The editor is the single owner of the canvas. Pointer, keyboard, toolbar,
//! panel and upload events come in through its methods; every change to the
//! store is expressed as a `Mutation`. Time only advances through `tick`,
//! which finishes initialization and expires toasts.

use crate::drag::DragController;
use crate::input::{InputEvent, Modifiers};
use crate::mutation::{Mutation, apply_mutation};
use crate::notify::{Notifier, ToastKind};
use crate::panel::{PanelField, PanelView, PropertyPanel};
use crate::selection::Selection;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::style::{self, StyleToggle};
use crate::tools::{ShapesTool, TextTool, Tool, ToolAction, ToolContext, ToolKind, UploadTool, image_element};
use crate::upload;
use easel_core::model::*;
use easel_core::{Canvas, EditorConfig, EditorError, ElementId, Point, Rect, Size, Viewport};
use easel_render::{EstimatedMeasure, Measure, PaintItem, PaintState, build_display_list, hit_test, resolve_size};

/// Result of clicking a toolbar button.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResponse {
    /// An element was placed and selected.
    Created(ElementId),
    MenuToggled { open: bool },
    /// The host should open its file picker with this filter.
    PickFile { accept: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Loading { ready_at: f64 },
    Ready,
}

pub struct Editor {
    config: EditorConfig,
    canvas: Canvas,
    selection: Selection,
    drag: DragController,
    panel: PropertyPanel,
    text_tool: TextTool,
    shapes_tool: ShapesTool,
    upload_tool: UploadTool,
    notifier: Notifier,
    /// Text element whose content currently has focus.
    editing: Option<ElementId>,
    phase: Phase,
    now_ms: f64,
    measure: Box<dyn Measure>,
}

impl Editor {
    pub fn new(config: EditorConfig, now_ms: f64) -> Self {
        Self::with_elements(config, Vec::new(), now_ms)
    }

    /// Start over pre-placed elements. Their z-indices are adopted when
    /// initialization finishes.
    pub fn with_elements(config: EditorConfig, elements: Vec<CanvasElement>, now_ms: f64) -> Self {
        let mut notifier = Notifier::new(config.toast_duration_ms, config.toast_history);
        notifier.set_loading(true);
        Self {
            canvas: Canvas::with_elements(elements, config.initial_z_index),
            selection: Selection::default(),
            drag: DragController::new(),
            panel: PropertyPanel::default(),
            text_tool: TextTool,
            shapes_tool: ShapesTool::default(),
            upload_tool: UploadTool,
            notifier,
            editing: None,
            phase: Phase::Loading {
                ready_at: now_ms + config.init_delay_ms,
            },
            now_ms,
            measure: Box::new(EstimatedMeasure {
                font_size: config.text_font_size,
            }),
            config,
        }
    }

    /// Replace the text measurer (the browser uses real font metrics).
    pub fn set_measure(&mut self, measure: Box<dyn Measure>) {
        self.measure = measure;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.config.viewport = viewport;
    }

    // ─── Time ────────────────────────────────────────────────────────────

    /// Advance the clock.
    pub fn tick(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        if let Phase::Loading { ready_at } = self.phase
            && now_ms >= ready_at
        {
            self.finish_init();
        }
        self.notifier.tick(now_ms);
    }

    fn finish_init(&mut self) {
        self.canvas.adopt_existing();
        self.deselect_all();
        self.notifier.set_loading(false);
        self.phase = Phase::Ready;
        log::info!("editor ready with {} element(s)", self.canvas.len());
        self.notifier
            .show(ToastKind::Info, self.config.welcome_message.clone(), self.now_ms);
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route an input event. Returns `true` when the canvas needs a redraw.
    /// Input before initialization finishes is dropped.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        if !self.is_ready() {
            return false;
        }
        match event {
            InputEvent::PointerDown { x, y, .. } => self.pointer_down(Point::new(*x, *y)),
            InputEvent::PointerMove { x, y, .. } => self.pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::PointerCancel => self.drag.end().is_some(),
            InputEvent::Key { key, modifiers } => self.handle_key(key, *modifiers).is_some(),
        }
    }

    /// Run the shortcut bound to `key`. Returns the action only when it
    /// changed something.
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if !self.is_ready() {
            return None;
        }
        let action = ShortcutMap::resolve(key, modifiers)?;
        self.shortcut(action).then_some(action)
    }

    fn pointer_down(&mut self, point: Point) -> bool {
        let hit = hit_test(&self.canvas, self.measure.as_ref(), point);
        if let Some(editing) = self.editing {
            // Clicks inside the focused text belong to the caret.
            if hit == Some(editing) {
                return false;
            }
            self.blur_text();
        }
        self.shapes_tool.close_menu();
        match hit {
            Some(id) => {
                self.select(id);
                if let Some(element) = self.canvas.get(id) {
                    self.drag.begin(id, point, element.position);
                }
            }
            None => self.deselect_all(),
        }
        true
    }

    fn pointer_move(&mut self, point: Point) -> bool {
        let Some(mutation) = self.drag.update(point) else {
            return false;
        };
        apply_mutation(&mut self.canvas, mutation);
        self.refresh_panel();
        true
    }

    fn pointer_up(&mut self) -> bool {
        let Some(outcome) = self.drag.end() else {
            return false;
        };
        if !outcome.moved && self.canvas.get(outcome.id).is_some_and(CanvasElement::is_text) {
            self.focus_text(outcome.id);
        }
        true
    }

    fn shortcut(&mut self, action: ShortcutAction) -> bool {
        log::debug!("shortcut {}", action.name());
        match action {
            ShortcutAction::Deselect => {
                self.blur_text();
                self.deselect_all();
                self.shapes_tool.close_menu();
                true
            }
            ShortcutAction::Delete => self.delete_selected(),
            ShortcutAction::Duplicate => self.duplicate_selected().is_some(),
        }
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Click a toolbar button. `anchor` is the button's screen rect.
    pub fn use_tool(&mut self, kind: ToolKind, anchor: Rect, window_width: f64) -> Option<ToolResponse> {
        if !self.is_ready() {
            return None;
        }
        let ctx = ToolContext {
            config: &self.config,
            anchor,
            window_width,
        };
        let tool: &mut dyn Tool = match kind {
            ToolKind::Text => &mut self.text_tool,
            ToolKind::Shapes => &mut self.shapes_tool,
            ToolKind::Upload => &mut self.upload_tool,
        };
        let action = tool.activate(&ctx);
        log::debug!("tool {} activated", tool.kind().name());

        Some(match action {
            ToolAction::Create(element) => {
                let id = self.place(*element);
                if kind == ToolKind::Text {
                    self.focus_text(id);
                    self.notify(ToastKind::Info, "Text added. Click to edit.");
                } else {
                    self.select(id);
                }
                ToolResponse::Created(id)
            }
            ToolAction::MenuToggled { open } => ToolResponse::MenuToggled { open },
            ToolAction::PickFile { accept } => ToolResponse::PickFile { accept },
        })
    }

    /// Pick an entry from the shapes menu. Unknown names make a rectangle.
    pub fn choose_shape(&mut self, name: &str) -> Option<ElementId> {
        if !self.is_ready() {
            return None;
        }
        let shape = ShapeKind::from_name(name);
        let element = self.shapes_tool.choose(&self.config, shape);
        let id = self.place(element);
        self.select(id);
        self.notify(ToastKind::Success, format!("{} added", shape.label()));
        Some(id)
    }

    pub fn shapes_menu(&self) -> Option<Point> {
        self.shapes_tool.menu_position()
    }

    pub fn close_shapes_menu(&mut self) {
        self.shapes_tool.close_menu();
    }

    /// Assign the next z-index and insert.
    fn place(&mut self, mut element: CanvasElement) -> ElementId {
        element.z_index = self.canvas.next_z_index();
        let id = element.id;
        apply_mutation(
            &mut self.canvas,
            Mutation::Insert {
                element: Box::new(element),
            },
        );
        id
    }

    // ─── Upload ──────────────────────────────────────────────────────────

    /// A file was picked. Non-images are rejected with an error toast;
    /// images show the loading overlay until the host reports back.
    pub fn begin_upload(&mut self, mime: &str) -> Result<(), EditorError> {
        if let Err(err) = upload::check_mime(mime) {
            self.report(&err);
            return Err(err);
        }
        self.notifier.set_loading(true);
        Ok(())
    }

    /// The host finished reading the file.
    pub fn finish_upload(&mut self, mime: &str, bytes: &[u8]) -> Result<ElementId, EditorError> {
        self.notifier.set_loading(false);
        let image = match upload::prepare_image(mime, bytes) {
            Ok(image) => image,
            Err(err) => {
                self.report(&err);
                return Err(err);
            }
        };
        let element = image_element(&self.config, image);
        let id = self.place(element);
        self.select(id);
        self.notify(ToastKind::Success, "Image uploaded successfully");
        Ok(id)
    }

    /// The host could not read the file.
    pub fn fail_upload(&mut self) {
        self.notifier.set_loading(false);
        self.report(&EditorError::ReadFailed);
    }

    /// The presentation layer could not load a placed image; drop it.
    pub fn image_failed(&mut self, id: ElementId) -> bool {
        if !self.remove_element(id) {
            return false;
        }
        self.report(&EditorError::DecodeFailed(format!("{id} failed to load")));
        true
    }

    // ─── Selection & element actions ─────────────────────────────────────

    /// Map an id string from the host to a live element.
    pub fn resolve(&self, id: &str) -> Result<ElementId, EditorError> {
        let element = ElementId::parse(id)?;
        if self.canvas.contains(element) {
            Ok(element)
        } else {
            Err(EditorError::UnknownElement(id.to_string()))
        }
    }

    pub fn select(&mut self, id: ElementId) -> bool {
        if !self.canvas.contains(id) {
            return false;
        }
        if self.editing.is_some_and(|editing| editing != id) {
            self.blur_text();
        }
        if let Some(previous) = self.selection.select(id)
            && previous != id
        {
            log::debug!("selection {previous} → {id}");
        }
        if let Some(element) = self.canvas.get(id) {
            self.panel.show(element, self.measure.as_ref());
        }
        true
    }

    pub fn deselect_all(&mut self) {
        if let Some(id) = self.selection.deselect_all() {
            log::debug!("deselected {id}");
        }
        self.panel.hide();
    }

    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection.selected() else {
            return false;
        };
        if !self.remove_element(id) {
            return false;
        }
        self.notify(ToastKind::Info, "Element deleted");
        true
    }

    /// Copy the selection, offset by the configured amount, on top of
    /// everything else. The copy becomes the selection.
    pub fn duplicate_selected(&mut self) -> Option<ElementId> {
        let id = self.selection.selected()?;
        let offset = self.config.duplicate_offset;
        let copy = self.canvas.get(id)?.duplicate(offset, offset);
        let copy_id = self.place(copy);
        self.select(copy_id);
        self.notify(ToastKind::Success, "Element duplicated");
        Some(copy_id)
    }

    pub fn bring_to_front(&mut self) -> bool {
        let Some(id) = self.selection.selected() else {
            return false;
        };
        let z_index = self.canvas.next_z_index();
        apply_mutation(&mut self.canvas, Mutation::SetZIndex { id, z_index });
        self.notify(ToastKind::Info, "Brought to front");
        true
    }

    pub fn send_to_back(&mut self) -> bool {
        let Some(id) = self.selection.selected() else {
            return false;
        };
        apply_mutation(&mut self.canvas, Mutation::SetZIndex { id, z_index: 0 });
        self.notify(ToastKind::Info, "Sent to back");
        true
    }

    fn remove_element(&mut self, id: ElementId) -> bool {
        if !apply_mutation(&mut self.canvas, Mutation::Remove { id }) {
            return false;
        }
        if self.selection.is_selected(id) {
            self.panel.hide();
        }
        self.selection.forget(id);
        self.drag.forget(id);
        if self.editing == Some(id) {
            self.editing = None;
        }
        true
    }

    // ─── Panel & styling ─────────────────────────────────────────────────

    /// Write a panel field back to the selection.
    pub fn set_field(&mut self, field: PanelField, value: &str) -> bool {
        let Some(element) = self.selection.selected().and_then(|id| self.canvas.get(id)) else {
            return false;
        };
        let mutation = self.panel.edit(element, field, value, self.config.min_dimension);
        apply_mutation(&mut self.canvas, mutation)
    }

    pub fn set_font(&mut self, family: &str) -> bool {
        self.restyle(|s| style::with_font(s, family))
    }

    pub fn toggle_style(&mut self, toggle: StyleToggle) -> bool {
        self.restyle(|s| style::toggled(s, toggle))
    }

    pub fn set_alignment(&mut self, align: TextAlign) -> bool {
        self.restyle(|s| style::aligned(s, align))
    }

    fn restyle(&mut self, restyle: impl FnOnce(&TextStyle) -> TextStyle) -> bool {
        let Some(mutation) = self
            .selected_element()
            .and_then(|element| style::text_style_mutation(element, restyle))
        else {
            return false;
        };
        apply_mutation(&mut self.canvas, mutation)
    }

    /// Apply a swatch color (any CSS color string) to the selection.
    pub fn apply_color(&mut self, css: &str) -> bool {
        let Some(mutation) = self
            .selected_element()
            .and_then(|element| style::color_mutation(element, css))
        else {
            return false;
        };
        apply_mutation(&mut self.canvas, mutation)
    }

    fn refresh_panel(&mut self) {
        if let Some(id) = self.selection.selected()
            && let Some(element) = self.canvas.get(id)
        {
            self.panel.refresh(element, self.measure.as_ref());
        }
    }

    // ─── Text editing ────────────────────────────────────────────────────

    /// Put the caret in a text element. Selects it.
    pub fn focus_text(&mut self, id: ElementId) -> bool {
        if !self.canvas.get(id).is_some_and(CanvasElement::is_text) {
            return false;
        }
        self.select(id);
        self.editing = Some(id);
        log::debug!("editing {id}");
        true
    }

    pub fn set_text_content(&mut self, id: ElementId, content: &str) -> bool {
        let changed = apply_mutation(
            &mut self.canvas,
            Mutation::SetText {
                id,
                content: content.to_string(),
            },
        );
        if changed && self.selection.is_selected(id) {
            self.refresh_panel();
        }
        changed
    }

    /// Leave text editing. Blank content reverts to the placeholder.
    pub fn blur_text(&mut self) -> bool {
        let Some(id) = self.editing.take() else {
            return false;
        };
        if let Some(text) = self.canvas.get(id).and_then(CanvasElement::text)
            && text.content.trim().is_empty()
        {
            let content = self.config.text_placeholder.clone();
            apply_mutation(&mut self.canvas, Mutation::SetText { id, content });
        }
        log::debug!("stopped editing {id}");
        true
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selection.selected()
    }

    pub fn selected_element(&self) -> Option<&CanvasElement> {
        self.canvas.get(self.selection.selected()?)
    }

    pub fn editing(&self) -> Option<ElementId> {
        self.editing
    }

    pub fn dragging(&self) -> Option<ElementId> {
        self.drag.dragging()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn is_loading(&self) -> bool {
        self.notifier.is_loading()
    }

    pub fn panel(&self) -> &PropertyPanel {
        &self.panel
    }

    pub fn panel_view(&self) -> PanelView {
        self.panel.view(self.selected_element(), &self.config.fonts)
    }

    /// Rendered size of an element, auto extents resolved.
    pub fn element_size(&self, id: ElementId) -> Option<Size> {
        self.canvas.get(id).map(|e| resolve_size(e, self.measure.as_ref()))
    }

    pub fn display_list(&self) -> Vec<PaintItem> {
        build_display_list(
            &self.canvas,
            self.measure.as_ref(),
            PaintState {
                selected: self.selection.selected(),
                dragging: self.drag.dragging(),
            },
        )
    }

    fn notify(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.notifier.show(kind, message, self.now_ms);
    }

    fn report(&mut self, err: &EditorError) {
        log::warn!("{err}");
        self.notify(ToastKind::Error, err.user_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerSource;

    fn ready() -> Editor {
        let mut editor = Editor::new(EditorConfig::default(), 0.0);
        editor.tick(800.0);
        editor
    }

    #[test]
    fn input_is_dropped_until_ready() {
        let mut editor = Editor::new(EditorConfig::default(), 0.0);
        assert!(editor.is_loading());
        assert_eq!(editor.use_tool(ToolKind::Text, Rect::ZERO, 1280.0), None);
        editor.tick(799.0);
        assert!(!editor.is_ready());

        editor.tick(800.0);
        assert!(editor.is_ready());
        assert!(!editor.is_loading());
        assert_eq!(
            editor.notifier().visible().map(|t| t.message.as_str()),
            Some("Welcome to Easel! Click on any element to edit.")
        );
    }

    #[test]
    fn seeded_elements_raise_the_counter() {
        let mut seeded = CanvasElement::new(
            ElementKind::Shape(ShapeBody {
                shape: ShapeKind::Circle,
                color: Color::BLACK,
            }),
            Point::ZERO,
            Footprint::px(10.0, 10.0),
        );
        seeded.z_index = 25;
        let mut editor = Editor::with_elements(EditorConfig::default(), vec![seeded], 0.0);
        editor.tick(1000.0);

        let id = editor.choose_shape("rectangle").unwrap();
        assert_eq!(editor.canvas().get(id).unwrap().z_index, 26);
    }

    #[test]
    fn delete_key_removes_text_being_edited() {
        let mut editor = ready();
        let Some(ToolResponse::Created(id)) = editor.use_tool(ToolKind::Text, Rect::ZERO, 1280.0) else {
            panic!("expected a text element");
        };
        assert_eq!(editor.editing(), Some(id));

        assert_eq!(
            editor.handle_key("Delete", Modifiers::NONE),
            Some(ShortcutAction::Delete)
        );
        assert!(!editor.canvas().contains(id));
        assert_eq!(editor.editing(), None);
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.handle_key("Delete", Modifiers::NONE), None);
    }

    #[test]
    fn unbound_and_ineffective_keys_report_nothing() {
        let mut editor = Editor::new(EditorConfig::default(), 0.0);
        editor.choose_shape("circle");
        assert_eq!(editor.handle_key("Escape", Modifiers::NONE), None);

        editor.tick(800.0);
        assert_eq!(editor.handle_key("q", Modifiers::NONE), None);
        assert_eq!(editor.handle_key("Delete", Modifiers::NONE), None);
        assert_eq!(editor.handle_key("Escape", Modifiers::NONE), Some(ShortcutAction::Deselect));
    }

    #[test]
    fn resolve_only_accepts_live_elements() {
        let mut editor = ready();
        let id = editor.choose_shape("triangle").unwrap();
        assert_eq!(editor.resolve(id.as_str()).ok(), Some(id));

        assert!(editor.delete_selected());
        assert!(matches!(
            editor.resolve(id.as_str()),
            Err(EditorError::UnknownElement(s)) if s == id.as_str()
        ));
        assert!(matches!(
            editor.resolve("no_such_element_abc"),
            Err(EditorError::UnknownElement(_))
        ));
    }

    #[test]
    fn click_without_motion_on_text_starts_editing() {
        let mut editor = ready();
        editor.use_tool(ToolKind::Text, Rect::ZERO, 1280.0);
        let id = editor.editing().unwrap();
        editor.blur_text();

        // Text sits at (300, 250) with the placeholder content.
        editor.handle(&InputEvent::pointer_down(310.0, 260.0, PointerSource::Mouse));
        assert_eq!(editor.dragging(), Some(id));
        editor.handle(&InputEvent::pointer_up(310.0, 260.0, PointerSource::Mouse));
        assert_eq!(editor.editing(), Some(id));
        assert_eq!(editor.dragging(), None);

        // A press inside the edited text is left to the caret.
        assert!(!editor.handle(&InputEvent::pointer_down(312.0, 262.0, PointerSource::Mouse)));
        assert_eq!(editor.dragging(), None);
    }

    #[test]
    fn blur_restores_placeholder_for_blank_text() {
        let mut editor = ready();
        editor.use_tool(ToolKind::Text, Rect::ZERO, 1280.0);
        let id = editor.editing().unwrap();
        editor.set_text_content(id, "  \n ");
        editor.blur_text();
        assert_eq!(
            editor.canvas().get(id).and_then(CanvasElement::text).map(|t| t.content.as_str()),
            Some("Add your text here")
        );
    }

    #[test]
    fn failed_image_is_removed_with_error() {
        let mut editor = ready();
        let mut image = image_element(
            editor.config(),
            ImageSource {
                data_uri: "data:image/png;base64,AAAA".into(),
                mime: "image/png".into(),
                natural: Some(Size::new(2.0, 1.0)),
            },
        );
        image.z_index = 99;
        let id = image.id;
        editor.place(image);
        editor.select(id);

        assert!(editor.image_failed(id));
        assert!(editor.canvas().is_empty());
        assert_eq!(editor.selected(), None);
        assert!(!editor.panel_view().visible);
        assert_eq!(
            editor.notifier().visible().map(|t| (t.kind, t.message.as_str())),
            Some((ToastKind::Error, "Failed to load image. Please try another one."))
        );
        assert!(!editor.image_failed(id));
    }
}
