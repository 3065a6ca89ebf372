use std::cell::RefCell;
use std::rc::Rc;

use cairo::{Context, Format, ImageSurface};

use super::*;
use crate::draw::{
    BLACK, BLUE, Color, PixelBuffer, RED, RenderMode, StrokeStyle, TRANSPARENT, WHITE,
};
use crate::input::{PointerEvent, ToolType};
use crate::tool::{StrokeTool, Tool};
use crate::util::Point;

fn solid(width: i32, height: i32, rgb: (f64, f64, f64)) -> ImageSurface {
    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    {
        let ctx = Context::new(&surface).unwrap();
        ctx.set_source_rgb(rgb.0, rgb.1, rgb.2);
        ctx.paint().unwrap();
    }
    surface
}

fn white_canvas(width: i32, height: i32) -> Canvas {
    let mut canvas = Canvas::new(width, height).unwrap();
    canvas.load_image(solid(width, height, (1.0, 1.0, 1.0)), RenderMode::Original);
    canvas
}

fn snapshot(canvas: &Canvas) -> Vec<u8> {
    let mut bytes = Vec::new();
    canvas.image().with_data(|data| bytes = data.to_vec()).unwrap();
    bytes
}

fn pixel(canvas: &Canvas, x: i32, y: i32) -> Color {
    let image = canvas.image();
    let (w, h, stride) = (image.width(), image.height(), image.stride() as usize);
    let mut color = TRANSPARENT;
    image
        .with_data(|data| color = PixelBuffer::new(data, w, h, stride).unwrap().get(x, y).unwrap())
        .unwrap();
    color
}

fn stroke(canvas: &mut Canvas, points: &[(f64, f64)]) {
    let (&(x, y), rest) = points.split_first().unwrap();
    canvas.handle_pointer(PointerEvent::down(0, x, y));
    let mut last = (x, y);
    for &(x, y) in rest {
        canvas.handle_pointer(PointerEvent::moved(0, x, y));
        last = (x, y);
    }
    canvas.handle_pointer(PointerEvent::up(0, last.0, last.1));
}

fn tap(canvas: &mut Canvas, x: f64, y: f64) {
    stroke(canvas, &[(x, y)]);
}

fn use_tool(canvas: &mut Canvas, tool: ToolType, color: Color) {
    canvas.tool_type = tool;
    canvas.style = StrokeStyle::new(3.0, color, 1.0);
}

#[test]
fn fill_turns_white_canvas_black() {
    let mut canvas = white_canvas(10, 10);
    use_tool(&mut canvas, ToolType::Fill, BLACK);
    tap(&mut canvas, 5.0, 5.0);

    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(pixel(&canvas, x, y), BLACK, "pixel ({x}, {y})");
        }
    }
    assert!(canvas.can_undo());
    assert_eq!(canvas.tools().len(), 1);
}

#[test]
fn fill_stops_at_red_rectangle() {
    let background = solid(10, 10, (1.0, 1.0, 1.0));
    {
        let ctx = Context::new(&background).unwrap();
        ctx.set_source_rgb(1.0, 0.0, 0.0);
        ctx.rectangle(0.0, 0.0, 5.0, 10.0);
        ctx.fill().unwrap();
    }
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.load_image(background, RenderMode::Original);
    use_tool(&mut canvas, ToolType::Fill, BLUE);
    tap(&mut canvas, 7.0, 5.0);

    for y in 0..10 {
        for x in 0..10 {
            let expected = if x < 5 { RED } else { BLUE };
            assert_eq!(pixel(&canvas, x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn undo_pen_stroke_restores_background() {
    let mut canvas = white_canvas(20, 20);
    let background = snapshot(&canvas);
    use_tool(&mut canvas, ToolType::Pen, RED);
    stroke(&mut canvas, &[(2.0, 5.0), (10.0, 5.0), (18.0, 5.0)]);
    assert_ne!(snapshot(&canvas), background);

    canvas.undo();
    assert!(canvas.tools().is_empty());
    assert_eq!(canvas.redo_len(), 1);
    assert_eq!(snapshot(&canvas), background);
}

#[test]
fn clear_empties_both_lists() {
    let mut canvas = white_canvas(40, 40);
    use_tool(&mut canvas, ToolType::Line, BLUE);
    for i in 0..5 {
        let y = 5.0 + i as f64 * 6.0;
        stroke(&mut canvas, &[(2.0, y), (38.0, y)]);
    }
    canvas.undo();
    assert_eq!(canvas.tools().len(), 4);

    canvas.clear();
    assert!(canvas.tools().is_empty());
    assert_eq!(canvas.redo_len(), 0);
    assert!(!canvas.can_undo());
    assert!(!canvas.can_redo());
    assert_eq!(pixel(&canvas, 20, 5), TRANSPARENT);
}

#[test]
fn redo_after_undo_is_pixel_identical() {
    let mut canvas = white_canvas(30, 30);
    use_tool(&mut canvas, ToolType::EllipseFill, RED);
    stroke(&mut canvas, &[(3.0, 3.0), (20.0, 15.0)]);
    use_tool(&mut canvas, ToolType::Fill, BLUE);
    tap(&mut canvas, 28.0, 28.0);
    let before = snapshot(&canvas);

    canvas.undo();
    assert_ne!(snapshot(&canvas), before);
    canvas.redo();
    assert_eq!(snapshot(&canvas), before);
    assert_eq!(canvas.tools().len(), 2);
}

#[test]
fn new_stroke_discards_redo_buffer() {
    let mut canvas = white_canvas(20, 20);
    use_tool(&mut canvas, ToolType::Line, RED);
    stroke(&mut canvas, &[(1.0, 1.0), (10.0, 10.0)]);
    stroke(&mut canvas, &[(1.0, 10.0), (10.0, 1.0)]);
    canvas.undo();
    assert!(canvas.can_redo());

    stroke(&mut canvas, &[(5.0, 1.0), (5.0, 18.0)]);
    assert!(!canvas.can_redo());
    assert_eq!(canvas.tools().len(), 2);

    canvas.redo();
    assert_eq!(canvas.tools().len(), 2);
}

#[test]
fn undo_and_redo_on_empty_lists_are_noops() {
    let mut canvas = white_canvas(8, 8);
    let before = snapshot(&canvas);
    canvas.undo();
    canvas.redo();
    assert!(!canvas.can_undo());
    assert!(!canvas.can_redo());
    assert_eq!(snapshot(&canvas), before);
}

#[test]
fn preview_shows_stroke_in_progress() {
    let mut canvas = white_canvas(20, 20);
    use_tool(&mut canvas, ToolType::RectFill, RED);
    canvas.handle_pointer(PointerEvent::down(0, 0.0, 0.0));
    canvas.handle_pointer(PointerEvent::moved(0, 10.0, 10.0));

    assert_eq!(canvas.state(), DrawingState::Drawing { index: 0 });
    assert_eq!(pixel(&canvas, 5, 5), RED);
    assert_eq!(pixel(&canvas, 15, 15), WHITE);

    canvas.handle_pointer(PointerEvent::up(0, 10.0, 10.0));
    assert_eq!(canvas.state(), DrawingState::Idle);
    assert_eq!(pixel(&canvas, 5, 5), RED);
}

#[test]
fn secondary_touches_are_ignored() {
    let mut canvas = white_canvas(60, 60);
    use_tool(&mut canvas, ToolType::Line, BLUE);
    canvas.handle_pointer(PointerEvent::down(1, 10.0, 10.0));
    canvas.handle_pointer(PointerEvent::down(2, 50.0, 50.0));
    canvas.handle_pointer(PointerEvent::moved(2, 40.0, 5.0));
    canvas.handle_pointer(PointerEvent::moved(1, 20.0, 20.0));
    canvas.handle_pointer(PointerEvent::up(2, 40.0, 5.0));
    assert_eq!(canvas.state(), DrawingState::Drawing { index: 0 });

    canvas.handle_pointer(PointerEvent::up(1, 20.0, 20.0));
    assert_eq!(canvas.state(), DrawingState::Idle);
    assert_eq!(canvas.tools().len(), 1);
    let Tool::Shape(line) = &canvas.tools()[0] else {
        panic!("expected a line");
    };
    assert_eq!(
        line.endpoints(),
        Some((Point::new(10.0, 10.0), Point::new(20.0, 20.0)))
    );
}

#[test]
fn eraser_clears_to_transparent() {
    let mut canvas = white_canvas(20, 20);
    use_tool(&mut canvas, ToolType::Eraser, RED);
    stroke(&mut canvas, &[(2.0, 5.0), (10.0, 5.0), (18.0, 5.0)]);
    assert_eq!(pixel(&canvas, 10, 5).a, 0);
    assert_eq!(pixel(&canvas, 10, 15), WHITE);
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl StrokeObserver for Recorder {
    fn stroke_began(&mut self, tool: &Tool) {
        self.0.borrow_mut().push(format!("began {}", tool.kind().label()));
    }

    fn stroke_ended(&mut self, tool: &Tool) {
        self.0.borrow_mut().push(format!("ended {}", tool.kind().label()));
    }
}

#[test]
fn observer_sees_stroke_boundaries() {
    let recorder = Recorder::default();
    let mut canvas = white_canvas(20, 20);
    canvas.set_observer(Box::new(recorder.clone()));
    use_tool(&mut canvas, ToolType::Arrow, RED);
    stroke(&mut canvas, &[(2.0, 2.0), (15.0, 15.0)]);
    use_tool(&mut canvas, ToolType::Fill, BLUE);
    tap(&mut canvas, 18.0, 2.0);
    canvas.undo();

    let label = |t: ToolType| t.label();
    assert_eq!(
        *recorder.0.borrow(),
        vec![
            format!("began {}", label(ToolType::Arrow)),
            format!("ended {}", label(ToolType::Arrow)),
            format!("began {}", label(ToolType::Fill)),
            format!("ended {}", label(ToolType::Fill)),
        ]
    );
}

#[test]
fn dirty_regions_drain_and_reset_redraw_flag() {
    let mut canvas = white_canvas(50, 50);
    canvas.take_dirty_regions();
    assert!(!canvas.needs_redraw);

    use_tool(&mut canvas, ToolType::Pen, RED);
    canvas.handle_pointer(PointerEvent::down(0, 10.0, 10.0));
    canvas.handle_pointer(PointerEvent::moved(0, 20.0, 12.0));
    assert!(canvas.needs_redraw);
    let regions = canvas.take_dirty_regions();
    assert!(!regions.is_empty());
    assert!(regions.iter().all(|r| r.width < 50 || r.height < 50));
    assert!(!canvas.needs_redraw);

    canvas.handle_pointer(PointerEvent::up(0, 20.0, 12.0));
    assert_eq!(canvas.take_dirty_regions().len(), 1);
}

#[test]
fn stamp_without_image_is_ignored() {
    let mut canvas = white_canvas(20, 20);
    canvas.tool_type = ToolType::Stamp;
    tap(&mut canvas, 10.0, 10.0);
    assert!(canvas.tools().is_empty());
    assert_eq!(canvas.state(), DrawingState::Idle);
}

fn stamp_canvas() -> Canvas {
    let mut canvas = white_canvas(200, 200);
    canvas.set_stamp_image(solid(20, 20, (0.0, 0.0, 1.0)));
    canvas.set_stamp_editable(true);
    canvas.tool_type = ToolType::Stamp;
    canvas
}

fn editing_count(canvas: &Canvas) -> usize {
    canvas
        .tools()
        .iter()
        .filter_map(Tool::as_editable)
        .filter(|stamp| stamp.is_editing())
        .count()
}

#[test]
fn plain_stamp_is_placed_at_natural_size() {
    let mut canvas = white_canvas(40, 40);
    canvas.set_stamp_image(solid(10, 10, (0.0, 0.0, 1.0)));
    canvas.tool_type = ToolType::Stamp;
    tap(&mut canvas, 20.0, 20.0);

    assert!(matches!(canvas.tools()[0], Tool::Stamp(_)));
    assert_eq!(pixel(&canvas, 16, 16), BLUE);
    assert_eq!(pixel(&canvas, 10, 10), WHITE);
}

#[test]
fn only_one_stamp_is_edited_at_a_time() {
    let mut canvas = stamp_canvas();
    tap(&mut canvas, 30.0, 30.0);
    assert_eq!(canvas.editing_index(), Some(0));
    assert_eq!(editing_count(&canvas), 1);

    // Outside the edited stamp: edit mode ends and a new stamp is placed.
    tap(&mut canvas, 120.0, 120.0);
    assert_eq!(canvas.tools().len(), 2);
    assert_eq!(canvas.editing_index(), Some(1));
    assert_eq!(editing_count(&canvas), 1);

    // Tapping the first stamp selects it and drags it.
    stroke(&mut canvas, &[(30.0, 30.0), (35.0, 30.0), (40.0, 30.0)]);
    assert_eq!(canvas.tools().len(), 2);
    assert_eq!(canvas.editing_index(), Some(0));
    assert_eq!(editing_count(&canvas), 1);
    assert_eq!(canvas.selected_stamp().unwrap().center(), Point::new(40.0, 30.0));
}

#[test]
fn delete_handle_removes_stamp_without_history() {
    let mut canvas = stamp_canvas();
    tap(&mut canvas, 100.0, 100.0);
    tap(&mut canvas, 30.0, 30.0);
    assert_eq!(canvas.editing_index(), Some(1));

    // Frame spans (20,20)-(40,40); the delete handle sits on its top-left corner.
    tap(&mut canvas, 20.0, 20.0);
    assert_eq!(canvas.tools().len(), 1);
    assert_eq!(canvas.editing_index(), None);
    assert_eq!(editing_count(&canvas), 0);
    assert_eq!(canvas.redo_len(), 0);
    assert_eq!(pixel(&canvas, 30, 30), WHITE);
}

#[test]
fn resize_handle_scales_stamp() {
    let mut canvas = stamp_canvas();
    tap(&mut canvas, 100.0, 100.0);
    // Bottom-right corner of the 20x20 frame.
    stroke(&mut canvas, &[(110.0, 110.0), (130.0, 110.0)]);
    let stamp = canvas.selected_stamp().unwrap();
    assert_eq!(stamp.scale(), 2.0);
    assert_eq!(stamp.center(), Point::new(100.0, 100.0));
}

#[test]
fn redo_resumes_stamp_edit_mode() {
    let mut canvas = stamp_canvas();
    tap(&mut canvas, 50.0, 50.0);
    assert_eq!(canvas.editing_index(), Some(0));
    canvas.undo();
    assert_eq!(canvas.editing_index(), None);
    assert!(canvas.selected_stamp().is_none());

    canvas.redo();
    assert_eq!(canvas.tools().len(), 1);
    assert_eq!(canvas.editing_index(), Some(0));
    assert_eq!(editing_count(&canvas), 1);
}

#[test]
fn redo_stays_out_of_edit_mode_once_editing_is_disabled() {
    let mut canvas = stamp_canvas();
    tap(&mut canvas, 50.0, 50.0);
    canvas.undo();
    canvas.set_stamp_editable(false);

    canvas.redo();
    assert_eq!(canvas.tools().len(), 1);
    assert_eq!(canvas.editing_index(), None);
    assert_eq!(editing_count(&canvas), 0);
}

#[test]
fn undo_all_then_redo_all_is_pixel_identical() {
    let mut canvas = stamp_canvas();
    let mut states = vec![snapshot(&canvas)];

    use_tool(&mut canvas, ToolType::Pen, RED);
    stroke(&mut canvas, &[(10.0, 10.0), (60.0, 40.0), (120.0, 20.0)]);
    states.push(snapshot(&canvas));
    use_tool(&mut canvas, ToolType::RectFill, BLUE);
    stroke(&mut canvas, &[(20.0, 100.0), (90.0, 180.0)]);
    states.push(snapshot(&canvas));
    use_tool(&mut canvas, ToolType::Fill, RED);
    tap(&mut canvas, 55.0, 140.0);
    states.push(snapshot(&canvas));
    use_tool(&mut canvas, ToolType::Arrow, BLACK);
    stroke(&mut canvas, &[(150.0, 20.0), (180.0, 120.0)]);
    states.push(snapshot(&canvas));
    canvas.tool_type = ToolType::Stamp;
    tap(&mut canvas, 150.0, 160.0);
    states.push(snapshot(&canvas));
    assert_eq!(canvas.editing_index(), Some(4));

    for expected in states.iter().rev().skip(1) {
        canvas.undo();
        assert!(*expected == snapshot(&canvas));
    }
    assert!(!canvas.can_undo());

    for expected in states.iter().skip(1) {
        canvas.redo();
        assert!(*expected == snapshot(&canvas));
    }
    assert!(!canvas.can_redo());
    assert_eq!(canvas.tools().len(), 5);
    assert_eq!(canvas.editing_index(), Some(4));
    assert_eq!(editing_count(&canvas), 1);
}

#[test]
fn disabling_stamp_editing_deselects() {
    let mut canvas = stamp_canvas();
    tap(&mut canvas, 50.0, 50.0);
    canvas.set_stamp_editable(false);
    assert_eq!(canvas.editing_index(), None);
    assert_eq!(editing_count(&canvas), 0);

    tap(&mut canvas, 150.0, 150.0);
    assert!(matches!(canvas.tools()[1], Tool::Stamp(_)));
}

#[test]
fn config_defaults_apply_to_new_strokes() {
    let mut config = crate::config::Config::default();
    config.drawing.default_tool = ToolType::RectFill;
    config.drawing.default_color = crate::config::ColorSpec::Name("green".into());
    config.canvas.width = 12;
    config.canvas.height = 12;

    let mut canvas = Canvas::from_config(&config).unwrap();
    assert_eq!((canvas.width(), canvas.height()), (12, 12));
    stroke(&mut canvas, &[(0.0, 0.0), (12.0, 12.0)]);
    assert_eq!(canvas.tools()[0].kind(), ToolType::RectFill);
    assert_eq!(pixel(&canvas, 6, 6), crate::draw::GREEN);
}

#[test]
fn tools_keep_their_creation_style() {
    let mut canvas = white_canvas(20, 20);
    use_tool(&mut canvas, ToolType::Line, RED);
    stroke(&mut canvas, &[(1.0, 1.0), (5.0, 5.0)]);
    canvas.style = StrokeStyle::new(9.0, BLUE, 0.5);

    let style = canvas.tools()[0].style().unwrap();
    assert_eq!(style.color, RED);
    assert_eq!(style.width, 3.0);
    assert!(canvas.tools()[0].bounds().is_some());
}
