use super::*;
use crate::compositor::WHITE;
use image::Rgb;

const RED: Rgb<u8> = Rgb([255, 0, 0]);

fn editor() -> Editor {
    Editor::new(
        &CanvasConfig::default(),
        &RenderConfig::default(),
        "DejaVuSans.ttf",
    )
}

fn logo() -> RgbImage {
    RgbImage::from_pixel(200, 100, RED)
}

fn drag(editor: &mut Editor, from: Point, to: Point) {
    editor.handle(InputEvent::PointerDown(from));
    editor.handle(InputEvent::PointerMove(to));
    editor.handle(InputEvent::PointerUp(to));
}

fn text_content(editor: &Editor) -> String {
    match editor.objects().last() {
        Some(WatermarkObject::Text(text)) => text.content.clone(),
        other => panic!("expected text watermark, got {:?}", other),
    }
}

#[test]
fn test_add_image_is_fitted_and_centered() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();

    assert_eq!(editor.objects().len(), 1);
    let Some(WatermarkObject::Image(image)) = editor.selected() else {
        panic!("image watermark should be selected");
    };
    // 200x100 shrinks by the 40px gap to 160x60
    assert_eq!(image.pixels.dimensions(), (160, 60));
    assert_eq!(image.position, Rect::new(145, 45, 305, 105));
}

#[test]
fn test_add_empty_image_fails() {
    let mut editor = editor();
    let result = editor.add_image(&RgbImage::new(0, 0));
    assert!(matches!(result, Err(MarkError::EmptyImage)));
    assert!(editor.objects().is_empty());
}

#[test]
fn test_drag_moves_image_selection() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();

    editor.handle(InputEvent::PointerDown(Point::new(200, 70)));
    assert_eq!(editor.move_mode(), MoveMode::Object);

    assert!(editor.handle(InputEvent::PointerMove(Point::new(230, 80))));
    assert_eq!(editor.objects()[0].position(), Rect::new(175, 55, 335, 115));

    // Deltas accumulate from the last pointer position
    editor.handle(InputEvent::PointerMove(Point::new(220, 80)));
    assert_eq!(editor.objects()[0].position(), Rect::new(165, 55, 325, 115));

    editor.handle(InputEvent::PointerUp(Point::new(220, 80)));
    assert_eq!(editor.move_mode(), MoveMode::None);
    assert!(!editor.handle(InputEvent::PointerMove(Point::new(100, 100))));
}

#[test]
fn test_drag_is_clamped_to_canvas_margins() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();

    drag(&mut editor, Point::new(200, 70), Point::new(449, 149));
    assert_eq!(editor.objects()[0].position(), Rect::new(286, 86, 446, 146));

    drag(&mut editor, Point::new(300, 100), Point::new(1, 1));
    assert_eq!(editor.objects()[0].position(), Rect::new(4, 3, 164, 63));
}

#[test]
fn test_leaving_canvas_ends_move() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();

    editor.handle(InputEvent::PointerDown(Point::new(200, 70)));
    assert!(!editor.handle(InputEvent::PointerMove(Point::new(500, 70))));
    assert_eq!(editor.move_mode(), MoveMode::None);
    assert_eq!(editor.objects()[0].position(), Rect::new(145, 45, 305, 105));
}

#[test]
fn test_click_outside_commits_selection() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();

    assert!(editor.handle(InputEvent::PointerDown(Point::new(10, 10))));
    assert!(editor.selected().is_none());
    assert_eq!(editor.objects().len(), 1);
    assert!(matches!(
        editor.delete_selection(),
        Err(MarkError::EmptySelection)
    ));

    // Without a selection, clicks do nothing
    assert!(!editor.handle(InputEvent::PointerDown(Point::new(200, 70))));
    assert_eq!(editor.move_mode(), MoveMode::None);
}

#[test]
fn test_press_outside_canvas_keeps_selection() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();

    assert!(!editor.handle(InputEvent::PointerDown(Point::new(500, 70))));
    assert!(!editor.handle(InputEvent::PointerDown(Point::new(200, -5))));
    assert!(editor.selected().is_some());
    assert_eq!(editor.move_mode(), MoveMode::None);

    // The selection still responds to presses on the canvas
    editor.handle(InputEvent::PointerDown(Point::new(200, 70)));
    assert_eq!(editor.move_mode(), MoveMode::Object);
}

#[test]
fn test_delete_selection_removes_object() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();
    editor.add_text(Some("HELLO"));
    assert_eq!(editor.objects().len(), 2);

    let removed = editor.delete_selection().unwrap();
    assert!(removed.is_text());
    assert_eq!(editor.objects().len(), 1);
    assert!(editor.selected().is_none());
}

#[test]
fn test_typing_replaces_placeholder() {
    let mut editor = editor();
    editor.add_text(None);
    assert!(editor.in_text_mode());
    assert_eq!(text_content(&editor), PLACEHOLDER);

    assert!(editor.handle(InputEvent::Key(Key::Char('h'))));
    assert!(editor.handle(InputEvent::Key(Key::Char('i'))));
    assert_eq!(text_content(&editor), "HI");
    // Right edge follows the marker: 195 + 2 chars * 10px
    assert_eq!(editor.objects()[0].position().right, 215);

    editor.handle(InputEvent::Key(Key::Space));
    editor.handle(InputEvent::Key(Key::Char('7')));
    assert_eq!(text_content(&editor), "HI 7");

    editor.handle(InputEvent::Key(Key::Backspace));
    assert_eq!(text_content(&editor), "HI ");

    assert!(!editor.handle(InputEvent::Key(Key::Other)));
    assert!(!editor.handle(InputEvent::Key(Key::Char('!'))));
    assert_eq!(text_content(&editor), "HI ");
}

#[test]
fn test_ignored_keys_keep_placeholder() {
    let mut editor = editor();
    editor.add_text(None);

    assert!(!editor.handle(InputEvent::Key(Key::Other)));
    assert!(!editor.handle(InputEvent::Key(Key::Char('#'))));
    assert_eq!(text_content(&editor), PLACEHOLDER);

    // The placeholder is still replaced by the first accepted key
    editor.handle(InputEvent::Key(Key::Char('x')));
    assert_eq!(text_content(&editor), "X");
}

#[test]
fn test_backspace_on_placeholder_clears_it() {
    let mut editor = editor();
    editor.add_text(None);
    editor.handle(InputEvent::Key(Key::Backspace));
    assert_eq!(text_content(&editor), "");
}

#[test]
fn test_keys_are_ignored_for_image_selection() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();
    assert!(!editor.handle(InputEvent::Key(Key::Char('a'))));
    assert!(!editor.in_text_mode());
}

#[test]
fn test_text_drag_uses_text_margins() {
    let mut editor = editor();
    editor.add_text(Some("MARK"));
    let start = editor.objects()[0].position();
    assert_eq!(start, Rect::new(195, 65, 241, 75));

    editor.handle(InputEvent::PointerDown(Point::new(200, 70)));
    assert_eq!(editor.move_mode(), MoveMode::Text);
    editor.handle(InputEvent::PointerMove(Point::new(1, 1)));

    // Delta (-199, -69) pushes past the left and top margins
    assert_eq!(editor.objects()[0].position(), Rect::new(1, 10, 47, 20));
}

#[test]
fn test_restyle_readds_active_text() {
    let mut editor = editor();
    editor.add_text(None);
    editor.handle(InputEvent::Key(Key::Char('a')));
    editor.handle(InputEvent::Key(Key::Char('b')));

    editor.set_text_size(TextSize::Small);
    editor.set_color(Color([10, 20, 30]));
    editor.toggle_bold();
    editor.set_font("Other.ttf");

    assert_eq!(editor.objects().len(), 1);
    let Some(WatermarkObject::Text(text)) = editor.selected() else {
        panic!("text watermark should stay selected");
    };
    assert_eq!(text.content, "AB");
    assert_eq!(text.style.size, TextSize::Small);
    assert_eq!(text.style.color, Color([10, 20, 30]));
    assert!(text.style.bold);
    assert_eq!(text.style.font, "Other.ttf");
    assert_eq!(text.position, Rect::new(165, 60, 241, 80));
}

#[test]
fn test_restyle_without_text_only_changes_style() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();
    editor.set_text_size(TextSize::Large);

    assert_eq!(editor.style().size, TextSize::Large);
    assert_eq!(editor.objects().len(), 1);
    assert!(!editor.objects()[0].is_text());
}

#[test]
fn test_adding_commits_previous_selection() {
    let mut editor = editor();
    editor.add_text(Some("FIRST"));
    editor.add_image(&logo()).unwrap();

    assert_eq!(editor.objects().len(), 2);
    assert!(editor.objects()[0].is_text());
    assert!(!editor.in_text_mode());
}

#[test]
fn test_reset_discards_everything() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();
    editor.add_text(None);
    editor.reset();

    assert!(editor.objects().is_empty());
    assert!(editor.selected().is_none());
    assert!(editor.frame(&FontBook::new()).pixels().all(|p| *p == WHITE));
}

#[test]
fn test_frame_shows_selection_and_marker() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();
    let fonts = FontBook::new();

    let frame = editor.frame(&fonts);
    assert_eq!(frame.dimensions(), (450, 150));
    assert_eq!(frame.get_pixel(200, 70), &RED);
    // Marker starts one pixel outside the selection
    assert_eq!(frame.get_pixel(144, 44), &Rgb([0, 0, 0]));
    assert_eq!(frame.get_pixel(10, 10), &WHITE);

    // Redrawing is idempotent
    assert_eq!(editor.frame(&fonts), frame);

    // After commit the image stays but the marker goes
    editor.commit();
    let committed = editor.frame(&fonts);
    assert_eq!(committed.get_pixel(200, 70), &RED);
    assert_eq!(committed.get_pixel(144, 44), &WHITE);
}

#[test]
fn test_frame_draws_text_with_loaded_font() {
    let fonts = FontBook::load_dir(std::path::Path::new("static")).unwrap();
    assert!(fonts.contains("DejaVuSans.ttf"));

    let mut editor = editor();
    editor.add_text(Some("MARK"));
    editor.set_color(Color([255, 0, 0]));

    let with_text = editor.frame(&fonts);
    let without_text = editor.frame(&FontBook::new());
    assert_ne!(with_text, without_text);

    // Text hangs above the baseline at (195, 75) and only differs there
    let mut reddish = 0;
    for (x, y, pixel) in with_text.enumerate_pixels() {
        if pixel != without_text.get_pixel(x, y) {
            assert!((195..260).contains(&x), "ink at ({}, {})", x, y);
            assert!((55..80).contains(&y), "ink at ({}, {})", x, y);
        }
        if pixel[0] > 200 && pixel[1] < 100 {
            reddish += 1;
        }
    }
    assert!(reddish > 0);
}

#[test]
fn test_frame_marker_follows_drag() {
    let mut editor = editor();
    editor.add_image(&logo()).unwrap();
    let fonts = FontBook::new();

    drag(&mut editor, Point::new(200, 70), Point::new(220, 70));
    let frame = editor.frame(&fonts);
    assert_eq!(frame.get_pixel(164, 44), &Rgb([0, 0, 0]));
    assert_eq!(frame.get_pixel(165, 70), &RED);
    assert_eq!(frame.get_pixel(160, 70), &WHITE);
}
