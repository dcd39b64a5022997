//! WASM bridge for Easel — exposes the editor engine to the browser page.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards pointer,
//! keyboard, toolbar, panel and file events to `EaselCanvas`, calls `tick`
//! from `requestAnimationFrame`, and reads panel/toast/menu state back as
//! JSON strings.

mod render2d;

use easel_core::model::{ShapeKind, TextAlign};
use easel_core::{EditorConfig, ElementId, Rect, Size, Viewport};
use easel_editor::notify::Toast;
use easel_editor::panel::PanelField;
use easel_editor::shortcuts::ShortcutAction;
use easel_editor::style::StyleToggle;
use easel_editor::tools::ToolKind;
use easel_editor::{Editor, InputEvent, Modifiers, PointerSource, ToolResponse};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The browser-facing editor controller.
#[wasm_bindgen]
pub struct EaselCanvas {
    editor: Editor,
    images: render2d::ImageCache,
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl EaselCanvas {
    /// Create an editor for a canvas of the given size. `config_json` may
    /// override any `EditorConfig` field.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config_json: Option<String>, now_ms: f64) -> Result<EaselCanvas, JsError> {
        console_error_panic_hook_setup();

        let mut config = match config_json.as_deref() {
            Some(json) => EditorConfig::from_json(json).map_err(|e| JsError::new(&e.to_string()))?,
            None => EditorConfig::default(),
        };
        config.viewport = Viewport { width, height };
        log::info!("easel canvas {width}x{height}");

        Ok(Self {
            editor: Editor::new(config, now_ms),
            images: render2d::ImageCache::default(),
            width,
            height,
        })
    }

    /// Measure text with this context from now on.
    pub fn attach_context(&mut self, ctx: CanvasRenderingContext2d) {
        let font_size = self.editor.config().text_font_size;
        self.editor
            .set_measure(Box::new(render2d::Canvas2dMeasure::new(ctx, font_size)));
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.editor.set_viewport(Viewport { width, height });
    }

    /// Advance the clock: finishes initialization and expires toasts.
    pub fn tick(&mut self, now_ms: f64) {
        self.editor.tick(now_ms);
    }

    /// Draw the scene. Returns `true` if images that failed to load were
    /// removed, in which case the page should render again.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) -> bool {
        let items = self.editor.display_list();
        let broken = render2d::render_scene(
            ctx,
            &items,
            Size::new(self.width, self.height),
            self.editor.config().text_font_size,
            &mut self.images,
        );
        let mut removed = false;
        for id in broken {
            removed |= self.editor.image_failed(id);
        }
        let canvas = self.editor.canvas();
        self.images.retain(|id| canvas.contains(id));
        removed
    }

    pub fn is_ready(&self) -> bool {
        self.editor.is_ready()
    }

    pub fn is_loading(&self) -> bool {
        self.editor.is_loading()
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Mouse down / touch start. Returns `true` if a redraw is needed.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64, touch: bool) -> bool {
        self.editor
            .handle(&InputEvent::pointer_down(x, y, pointer_source(touch)))
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64, touch: bool) -> bool {
        self.editor
            .handle(&InputEvent::pointer_move(x, y, pointer_source(touch)))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64, touch: bool) -> bool {
        self.editor
            .handle(&InputEvent::pointer_up(x, y, pointer_source(touch)))
    }

    pub fn handle_pointer_cancel(&mut self) -> bool {
        self.editor.handle(&InputEvent::PointerCancel)
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a keyboard event. Returns JSON:
    /// `{"changed":bool,"action":"<action_name>"}`
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let action = self.editor.handle_key(key, modifiers);
        serde_json::json!({
            "changed": action.is_some(),
            "action": action.map_or("none", ShortcutAction::name),
        })
        .to_string()
    }

    // ─── Toolbar ─────────────────────────────────────────────────────────

    /// Click a toolbar button given its `data-tool` name and screen rect.
    /// Returns JSON describing what happened, or `{"kind":"none"}`.
    #[allow(clippy::too_many_arguments)]
    pub fn use_tool(
        &mut self,
        name: &str,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        window_width: f64,
    ) -> String {
        let response = ToolKind::from_name(name).and_then(|kind| {
            self.editor
                .use_tool(kind, Rect::new(left, top, right, bottom), window_width)
        });
        tool_response_json(response.as_ref()).to_string()
    }

    /// Pick a shape from the flyout. Returns the new element id.
    pub fn choose_shape(&mut self, name: &str) -> String {
        self.editor
            .choose_shape(name)
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// `{"open":bool,"left":f64,"top":f64}`
    pub fn get_shapes_menu_json(&self) -> String {
        match self.editor.shapes_menu() {
            Some(p) => serde_json::json!({ "open": true, "left": p.x, "top": p.y }),
            None => serde_json::json!({ "open": false }),
        }
        .to_string()
    }

    pub fn close_shapes_menu(&mut self) {
        self.editor.close_shapes_menu();
    }

    // ─── Upload ──────────────────────────────────────────────────────────

    /// A file was picked. Returns `false` (and shows an error toast) for
    /// non-images; the page should then skip reading it.
    pub fn begin_upload(&mut self, mime: &str) -> bool {
        self.editor.begin_upload(mime).is_ok()
    }

    /// The file was read. Returns the new element id, or `""` on failure.
    pub fn finish_upload(&mut self, mime: &str, bytes: &[u8]) -> String {
        self.editor
            .finish_upload(mime, bytes)
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn fail_upload(&mut self) {
        self.editor.fail_upload();
    }

    pub fn image_failed(&mut self, element_id: &str) -> bool {
        self.element(element_id).is_some_and(|id| self.editor.image_failed(id))
    }

    // ─── Selection & element actions ─────────────────────────────────────

    pub fn get_selected_id(&self) -> String {
        self.editor
            .selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn select_by_id(&mut self, element_id: &str) -> bool {
        self.element(element_id).is_some_and(|id| self.editor.select(id))
    }

    pub fn deselect_all(&mut self) {
        self.editor.deselect_all();
    }

    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected()
    }

    /// Returns the id of the copy, or `""` when nothing is selected.
    pub fn duplicate_selected(&mut self) -> String {
        self.editor
            .duplicate_selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn bring_to_front(&mut self) -> bool {
        self.editor.bring_to_front()
    }

    pub fn send_to_back(&mut self) -> bool {
        self.editor.send_to_back()
    }

    // ─── Properties Panel API ────────────────────────────────────────────

    /// Panel state as JSON (see `PanelView`).
    pub fn get_panel_json(&self) -> String {
        serde_json::to_string(&self.editor.panel_view()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Write a numeric field (`x`, `y`, `width`, `height`).
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        PanelField::from_name(name).is_some_and(|field| self.editor.set_field(field, value))
    }

    pub fn set_font(&mut self, family: &str) -> bool {
        self.editor.set_font(family)
    }

    /// Toggle `bold`, `italic` or `underline`.
    pub fn toggle_style(&mut self, name: &str) -> bool {
        StyleToggle::from_name(name).is_some_and(|toggle| self.editor.toggle_style(toggle))
    }

    /// Set `left`, `center` or `right` alignment.
    pub fn set_alignment(&mut self, name: &str) -> bool {
        TextAlign::from_name(name).is_some_and(|align| self.editor.set_alignment(align))
    }

    /// Apply a swatch's computed background color.
    pub fn apply_color(&mut self, css: &str) -> bool {
        self.editor.apply_color(css)
    }

    // ─── Text editing ────────────────────────────────────────────────────

    pub fn focus_text(&mut self, element_id: &str) -> bool {
        self.element(element_id).is_some_and(|id| self.editor.focus_text(id))
    }

    pub fn set_text_content(&mut self, element_id: &str, content: &str) -> bool {
        self.element(element_id).is_some_and(|id| self.editor.set_text_content(id, content))
    }

    pub fn blur_text(&mut self) -> bool {
        self.editor.blur_text()
    }

    pub fn get_editing_id(&self) -> String {
        self.editor
            .editing()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    // ─── Read-back ───────────────────────────────────────────────────────

    /// Visible toast as JSON, or `null`.
    pub fn get_toast_json(&self) -> String {
        toast_json(self.editor.notifier().visible()).to_string()
    }

    /// All elements in insertion order as JSON.
    pub fn get_elements_json(&self) -> String {
        let elements: Vec<_> = self.editor.canvas().iter().collect();
        serde_json::to_string(&elements).unwrap_or_else(|_| "[]".to_string())
    }

    /// Shape names offered by the flyout.
    pub fn shape_names() -> String {
        let names: Vec<&str> = [ShapeKind::Rectangle, ShapeKind::Circle, ShapeKind::Triangle]
            .into_iter()
            .map(ShapeKind::name)
            .collect();
        serde_json::json!(names).to_string()
    }
}

impl EaselCanvas {
    fn element(&self, element_id: &str) -> Option<ElementId> {
        self.editor
            .resolve(element_id)
            .map_err(|err| log::warn!("{err}"))
            .ok()
    }
}

fn pointer_source(touch: bool) -> PointerSource {
    if touch {
        PointerSource::Touch
    } else {
        PointerSource::Mouse
    }
}

fn tool_response_json(response: Option<&ToolResponse>) -> serde_json::Value {
    match response {
        Some(ToolResponse::Created(id)) => serde_json::json!({ "kind": "created", "id": id.as_str() }),
        Some(ToolResponse::MenuToggled { open }) => serde_json::json!({ "kind": "menu", "open": open }),
        Some(ToolResponse::PickFile { accept }) => serde_json::json!({ "kind": "pickFile", "accept": accept }),
        None => serde_json::json!({ "kind": "none" }),
    }
}

fn toast_json(toast: Option<&Toast>) -> serde_json::Value {
    toast.map_or(serde_json::Value::Null, |t| serde_json::json!(t))
}

// ─── Logging & panic hook ────────────────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
        });
    }
}
