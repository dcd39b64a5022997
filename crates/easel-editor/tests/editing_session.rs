//! Integration tests: full editing sessions (easel-editor ↔ easel-core ↔
//! easel-render).
//!
//! Drives the `Editor` the way the browser bridge does: ticks, pointer and
//! key events, toolbar clicks, panel edits and uploads.

use easel_core::model::*;
use easel_core::{EditorConfig, EditorError, Point, Rect, Size};
use easel_editor::notify::ToastKind;
use easel_editor::panel::PanelField;
use easel_editor::style::StyleToggle;
use easel_editor::tools::ToolKind;
use easel_editor::{Editor, InputEvent, Modifiers, PointerSource, ToolResponse};
use easel_render::PaintOp;
use pretty_assertions::assert_eq;
use std::io::Cursor;

const WINDOW_WIDTH: f64 = 1280.0;
const CTRL: Modifiers = Modifiers {
    ctrl: true,
    ..Modifiers::NONE
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ready_editor() -> Editor {
    init_logging();
    let mut editor = Editor::new(EditorConfig::default(), 0.0);
    editor.tick(800.0);
    editor
}

fn add_shape(editor: &mut Editor, name: &str) -> easel_core::ElementId {
    editor.choose_shape(name).expect("editor is ready")
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::new(width, height);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn press(editor: &mut Editor, x: f64, y: f64) {
    editor.handle(&InputEvent::pointer_down(x, y, PointerSource::Mouse));
}

// ─── Selection ───────────────────────────────────────────────────────────

#[test]
fn at_most_one_element_is_selected() {
    let mut editor = ready_editor();
    let a = add_shape(&mut editor, "rectangle");
    let b = add_shape(&mut editor, "circle");
    assert_eq!(editor.selected(), Some(b));

    editor.select(a);
    let selected: Vec<_> = editor.display_list().into_iter().filter(|i| i.selected).map(|i| i.id).collect();
    assert_eq!(selected, vec![a]);
}

#[test]
fn escape_and_empty_click_deselect() {
    let mut editor = ready_editor();
    add_shape(&mut editor, "rectangle");
    assert!(editor.panel_view().visible);

    editor.handle(&InputEvent::key("Escape", Modifiers::NONE));
    assert_eq!(editor.selected(), None);
    assert!(!editor.panel_view().visible);

    let id = add_shape(&mut editor, "circle");
    assert_eq!(editor.selected(), Some(id));
    press(&mut editor, 5.0, 5.0);
    assert_eq!(editor.selected(), None);
    assert!(!editor.panel_view().visible);
}

#[test]
fn escape_closes_shapes_menu() {
    let mut editor = ready_editor();
    let anchor = Rect::new(10.0, 100.0, 60.0, 150.0);
    assert_eq!(
        editor.use_tool(ToolKind::Shapes, anchor, WINDOW_WIDTH),
        Some(ToolResponse::MenuToggled { open: true })
    );
    assert_eq!(editor.shapes_menu(), Some(Point::new(70.0, 100.0)));
    editor.handle(&InputEvent::key("Escape", Modifiers::NONE));
    assert_eq!(editor.shapes_menu(), None);
}

// ─── Drag ────────────────────────────────────────────────────────────────

#[test]
fn drag_moves_by_exact_delta() {
    let mut editor = ready_editor();
    let id = add_shape(&mut editor, "rectangle");
    let start = editor.canvas().get(id).unwrap().position;
    assert_eq!(start, Point::new(350.0, 250.0));

    editor.handle(&InputEvent::pointer_down(360.0, 260.0, PointerSource::Touch));
    assert_eq!(editor.dragging(), Some(id));
    editor.handle(&InputEvent::pointer_move(400.0, 200.0, PointerSource::Touch));
    editor.handle(&InputEvent::pointer_move(-640.0, 1060.0, PointerSource::Touch));
    editor.handle(&InputEvent::pointer_up(-640.0, 1060.0, PointerSource::Touch));

    assert_eq!(
        editor.canvas().get(id).unwrap().position,
        Point::new(start.x - 1000.0, start.y + 800.0)
    );
    assert_eq!(editor.dragging(), None);
    assert_eq!(editor.panel().fields().x, "-650");
    assert_eq!(editor.panel().fields().y, "1050");
}

#[test]
fn cancel_ends_drag() {
    let mut editor = ready_editor();
    let id = add_shape(&mut editor, "circle");
    press(&mut editor, 360.0, 260.0);
    assert_eq!(editor.dragging(), Some(id));
    editor.handle(&InputEvent::PointerCancel);
    assert_eq!(editor.dragging(), None);
    assert_eq!(editor.selected(), Some(id));
}

#[test]
fn topmost_element_is_grabbed() {
    let mut editor = ready_editor();
    let below = add_shape(&mut editor, "rectangle");
    let above = add_shape(&mut editor, "circle");
    press(&mut editor, 400.0, 300.0);
    assert_eq!(editor.dragging(), Some(above));

    editor.handle(&InputEvent::PointerCancel);
    editor.select(above);
    editor.send_to_back();
    editor.select(below);
    editor.send_to_back();
    // Both at zero: the later insertion stays on top.
    press(&mut editor, 400.0, 300.0);
    assert_eq!(editor.dragging(), Some(above));
}

// ─── Z-order ─────────────────────────────────────────────────────────────

#[test]
fn bring_to_front_is_strictly_increasing() {
    let mut editor = ready_editor();
    let a = add_shape(&mut editor, "rectangle");
    let b = add_shape(&mut editor, "circle");

    editor.select(a);
    assert!(editor.bring_to_front());
    editor.select(b);
    assert!(editor.bring_to_front());

    let z = |id| editor.canvas().get(id).unwrap().z_index;
    assert!(z(b) > z(a));
    assert_eq!(
        editor.notifier().visible().map(|t| t.message.as_str()),
        Some("Brought to front")
    );
}

#[test]
fn send_to_back_sets_zero() {
    let mut editor = ready_editor();
    let id = add_shape(&mut editor, "triangle");
    assert!(editor.send_to_back());
    assert_eq!(editor.canvas().get(id).unwrap().z_index, 0);

    editor.deselect_all();
    assert!(!editor.send_to_back());
    assert!(!editor.bring_to_front());
}

// ─── Duplicate & delete ──────────────────────────────────────────────────

#[test]
fn duplicate_offsets_and_tops_stack() {
    let mut editor = ready_editor();
    let original = add_shape(&mut editor, "circle");
    let highest = editor.canvas().iter().map(|e| e.z_index).max().unwrap();
    let before = editor.notifier().count();

    assert!(editor.handle(&InputEvent::key("d", CTRL)));
    let copy_id = editor.selected().unwrap();
    assert_ne!(copy_id, original);

    let source = editor.canvas().get(original).unwrap().clone();
    let copy = editor.canvas().get(copy_id).unwrap();
    assert_eq!(copy.position, Point::new(source.position.x + 20.0, source.position.y + 20.0));
    assert!(copy.z_index > highest);
    assert_eq!(copy.kind, source.kind);
    assert_eq!(editor.notifier().count(), before + 1);
}

#[test]
fn duplicate_shares_no_state() {
    let mut editor = ready_editor();
    let original = add_shape(&mut editor, "rectangle");
    let copy = editor.duplicate_selected().unwrap();
    assert!(editor.apply_color("#ff0000"));

    let color_of = |id| match &editor.canvas().get(id).unwrap().kind {
        ElementKind::Shape(body) => body.color,
        _ => unreachable!(),
    };
    assert_eq!(color_of(copy), Color::rgb8(255, 0, 0));
    assert_eq!(color_of(original), Color::rgb8(0x4d, 0xab, 0xf7));
}

#[test]
fn delete_removes_selection() {
    let mut editor = ready_editor();
    let id = add_shape(&mut editor, "rectangle");
    assert!(editor.handle(&InputEvent::key("Delete", Modifiers::NONE)));
    assert!(!editor.canvas().contains(id));
    assert_eq!(editor.selected(), None);
    assert!(!editor.panel_view().visible);
    assert_eq!(
        editor.notifier().visible().map(|t| (t.kind, t.message.as_str())),
        Some((ToastKind::Info, "Element deleted"))
    );
    assert!(!editor.handle(&InputEvent::key("Delete", Modifiers::NONE)));
}

// ─── Upload ──────────────────────────────────────────────────────────────

#[test]
fn non_image_upload_changes_nothing() {
    let mut editor = ready_editor();
    let errors_before = editor.notifier().count_of(ToastKind::Error);

    let err = editor.begin_upload("application/pdf").unwrap_err();
    assert!(matches!(err, EditorError::NotAnImage { .. }));
    assert!(editor.canvas().is_empty());
    assert!(!editor.is_loading());
    assert_eq!(editor.notifier().count_of(ToastKind::Error), errors_before + 1);
    assert_eq!(
        editor.notifier().visible().map(|t| t.message.as_str()),
        Some("Please select an image file")
    );
}

#[test]
fn image_upload_places_auto_height_image() {
    let mut editor = ready_editor();
    assert_eq!(
        editor.use_tool(ToolKind::Upload, Rect::ZERO, WINDOW_WIDTH),
        Some(ToolResponse::PickFile { accept: "image/*" })
    );
    editor.begin_upload("image/png").unwrap();
    assert!(editor.is_loading());

    let id = editor.finish_upload("image/png", &png(400, 100)).unwrap();
    assert!(!editor.is_loading());
    assert_eq!(editor.selected(), Some(id));

    let element = editor.canvas().get(id).unwrap();
    assert_eq!(element.position, Point::new(300.0, 200.0));
    assert_eq!(editor.element_size(id), Some(Size::new(200.0, 50.0)));
    assert_eq!(editor.panel().fields().height, "50");
    assert!(matches!(
        editor.display_list().last().map(|i| &i.op),
        Some(PaintOp::Image { data_uri }) if data_uri.starts_with("data:image/png;base64,")
    ));
    assert_eq!(
        editor.notifier().visible().map(|t| (t.kind, t.message.as_str())),
        Some((ToastKind::Success, "Image uploaded successfully"))
    );
}

#[test]
fn unreadable_and_undecodable_uploads() {
    let mut editor = ready_editor();
    editor.begin_upload("image/png").unwrap();
    editor.fail_upload();
    assert!(!editor.is_loading());
    assert_eq!(
        editor.notifier().visible().map(|t| t.message.as_str()),
        Some("Failed to read image file")
    );

    editor.begin_upload("image/png").unwrap();
    let truncated = png(40, 30);
    assert!(matches!(
        editor.finish_upload("image/png", &truncated[..12]),
        Err(EditorError::DecodeFailed(_))
    ));
    assert!(editor.canvas().is_empty());
    assert_eq!(
        editor.notifier().visible().map(|t| t.message.as_str()),
        Some("Failed to load image. Please try another one.")
    );
}

#[test]
fn svg_upload_is_placed_for_the_browser_to_load() {
    let mut editor = ready_editor();
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect width="40" height="20"/></svg>"#;
    editor.begin_upload("image/svg+xml").unwrap();

    let id = editor.finish_upload("image/svg+xml", svg).unwrap();
    assert_eq!(editor.selected(), Some(id));
    assert_eq!(editor.element_size(id), Some(Size::new(200.0, 200.0)));
    assert!(matches!(
        editor.display_list().last().map(|i| &i.op),
        Some(PaintOp::Image { data_uri }) if data_uri.starts_with("data:image/svg+xml;base64,")
    ));
    assert_eq!(
        editor.notifier().visible().map(|t| (t.kind, t.message.as_str())),
        Some((ToastKind::Success, "Image uploaded successfully"))
    );

    // Unreadable bytes under an image MIME reach the browser too, which
    // reports the failed load back.
    editor.begin_upload("image/jpeg").unwrap();
    let junk = editor.finish_upload("image/jpeg", b"garbage bytes").unwrap();
    assert!(editor.image_failed(junk));
    assert!(!editor.canvas().contains(junk));
    assert!(editor.canvas().contains(id));
    assert_eq!(
        editor.notifier().visible().map(|t| t.message.as_str()),
        Some("Failed to load image. Please try another one.")
    );
}

// ─── Text styling ────────────────────────────────────────────────────────

#[test]
fn bold_toggle_round_trip() {
    let mut editor = ready_editor();
    let Some(ToolResponse::Created(id)) = editor.use_tool(ToolKind::Text, Rect::ZERO, WINDOW_WIDTH) else {
        panic!("text tool should create an element");
    };
    assert!(editor.set_text_content(id, "Hello"));

    assert!(editor.toggle_style(StyleToggle::Bold));
    let view = editor.panel_view();
    assert!(view.text.as_ref().unwrap().bold);
    assert!(editor.canvas().get(id).unwrap().text().unwrap().style.bold);

    assert!(editor.toggle_style(StyleToggle::Bold));
    assert!(!editor.panel_view().text.unwrap().bold);
    assert!(!editor.canvas().get(id).unwrap().text().unwrap().style.bold);
}

#[test]
fn text_tool_selects_and_notifies() {
    let mut editor = ready_editor();
    let Some(ToolResponse::Created(id)) = editor.use_tool(ToolKind::Text, Rect::ZERO, WINDOW_WIDTH) else {
        panic!("text tool should create an element");
    };
    assert_eq!(editor.selected(), Some(id));
    assert_eq!(editor.editing(), Some(id));
    assert_eq!(
        editor.notifier().visible().map(|t| t.message.as_str()),
        Some("Text added. Click to edit.")
    );
}

#[test]
fn styling_needs_a_text_selection() {
    let mut editor = ready_editor();
    assert!(!editor.toggle_style(StyleToggle::Italic));
    assert!(!editor.apply_color("#000"));

    add_shape(&mut editor, "circle");
    assert!(!editor.set_alignment(TextAlign::Center));
    assert!(!editor.set_font("Georgia"));
    assert!(editor.panel_view().text.is_none());
    assert!(editor.apply_color("rgb(0, 0, 0)"));
}

#[test]
fn alignment_and_font_show_in_panel() {
    let mut editor = ready_editor();
    editor.use_tool(ToolKind::Text, Rect::ZERO, WINDOW_WIDTH);
    editor.set_alignment(TextAlign::Center);
    editor.set_alignment(TextAlign::Right);
    editor.set_font("\"Times New Roman\"");

    let controls = editor.panel_view().text.unwrap();
    assert_eq!(controls.align, TextAlign::Right);
    assert_eq!(controls.font_index, Some(3));
}

#[test]
fn triangle_color_goes_to_body() {
    let mut editor = ready_editor();
    let id = add_shape(&mut editor, "triangle");
    editor.apply_color("#40c057");
    match &editor.canvas().get(id).unwrap().kind {
        ElementKind::Shape(body) => assert_eq!(body.color.to_hex(), "#40C057"),
        other => panic!("unexpected kind {other:?}"),
    }
}

// ─── Panel ───────────────────────────────────────────────────────────────

#[test]
fn circle_width_then_height() {
    let mut editor = ready_editor();
    let id = add_shape(&mut editor, "circle");

    assert!(editor.set_field(PanelField::Width, "50"));
    assert_eq!(editor.element_size(id), Some(Size::new(50.0, 100.0)));

    assert!(editor.set_field(PanelField::Height, "50"));
    assert_eq!(editor.element_size(id), Some(Size::new(50.0, 50.0)));
}

#[test]
fn bad_panel_values_fall_back() {
    let mut editor = ready_editor();
    let id = add_shape(&mut editor, "rectangle");
    editor.set_field(PanelField::Width, "wide");
    editor.set_field(PanelField::X, "12px");
    editor.set_field(PanelField::Y, "up");

    let element = editor.canvas().get(id).unwrap();
    assert_eq!(element.position, Point::new(12.0, 0.0));
    assert_eq!(editor.element_size(id), Some(Size::new(10.0, 100.0)));
}

#[test]
fn triangle_panel_writes_border_geometry() {
    let mut editor = ready_editor();
    let id = add_shape(&mut editor, "triangle");
    assert_eq!(editor.panel().fields().width, "100");

    editor.set_field(PanelField::Width, "81");
    editor.set_field(PanelField::Height, "40");
    assert_eq!(
        editor.canvas().get(id).unwrap().footprint,
        Footprint::Border {
            half_width: 41.0,
            height: 40.0
        }
    );
}

// ─── Toasts ──────────────────────────────────────────────────────────────

#[test]
fn every_toast_timer_fires_on_schedule() {
    let mut editor = ready_editor();
    editor.tick(1000.0);
    add_shape(&mut editor, "circle");
    assert_eq!(
        editor.notifier().visible().map(|t| (t.kind, t.message.as_str())),
        Some((ToastKind::Success, "Circle added"))
    );
    // The welcome toast shown at 800 ms was never cancelled.
    editor.tick(3799.0);
    assert!(editor.notifier().visible().is_some());
    editor.tick(3800.0);
    assert!(editor.notifier().visible().is_none());

    editor.tick(3900.0);
    add_shape(&mut editor, "rectangle");
    editor.tick(3999.0);
    assert_eq!(
        editor.notifier().visible().map(|t| t.message.as_str()),
        Some("Rectangle added")
    );
    // The circle's timer hides the rectangle toast.
    editor.tick(4000.0);
    assert!(editor.notifier().visible().is_none());
}
