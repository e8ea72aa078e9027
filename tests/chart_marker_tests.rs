use compound_chart::ChartError;
use compound_chart::core::{Point, Rect, Viewport};
use compound_chart::interaction::HoverState;
use compound_chart::marker::{
    ChartMarker, DEFAULT_FILL_COLOR, DEFAULT_FILL_HIGHLIGHT_COLOR, HOVER_PADDING, MarkerShape,
};
use compound_chart::render::{Color, DrawCommand, GlyphTexture, RenderFrame};

fn frame() -> RenderFrame {
    RenderFrame::new(Viewport::new(400, 300))
}

fn marker_at(x: f64, y: f64) -> ChartMarker {
    let mut marker = ChartMarker::new(2.0, 5.0);
    marker.set_size(8.0);
    marker.set_coordinate(Point::new(x, y));
    marker.set_stroke_color(Color::rgb(0.2, 0.4, 0.6));
    marker
}

#[test]
fn set_value_does_not_move_marker() {
    let mut marker = marker_at(40.0, 50.0);
    let bounds = marker.bounds();

    marker.set_value(100.0, -3.0);

    assert_eq!(marker.value().x, 100.0);
    assert_eq!(marker.value().y, -3.0);
    assert_eq!(marker.bounds(), bounds);
}

#[test]
fn bounding_box_is_padded_and_centered() {
    let marker = marker_at(40.0, 50.0);
    assert_eq!(marker.bounding_size(), (8.0 + HOVER_PADDING, 8.0 + HOVER_PADDING));
    assert_eq!(marker.bounds(), Rect::new(31.0, 41.0, 18.0, 18.0));
}

#[test]
fn negative_size_clamps_to_zero_without_panicking() {
    let mut marker = marker_at(0.0, 0.0);
    marker.set_size(-4.0);
    assert_eq!(marker.size(), 0.0);
    assert_eq!(marker.bounding_size(), (HOVER_PADDING, HOVER_PADDING));
}

#[test]
fn out_of_canvas_coordinates_are_accepted() {
    let mut marker = marker_at(0.0, 0.0);
    marker.set_coordinate(Point::new(-500.0, 9_000.0));
    assert_eq!(marker.coordinate(), Point::new(-500.0, 9_000.0));
    assert_eq!(marker.bounds().center(), Point::new(-500.0, 9_000.0));
}

#[test]
fn hover_toggling_is_idempotent() {
    let mut marker = marker_at(10.0, 10.0);

    marker.on_pointer_enter();
    marker.on_pointer_enter();
    assert!(marker.is_hovered());
    assert_eq!(marker.hover_state(), HoverState::Hovered);

    marker.on_pointer_leave();
    assert!(!marker.is_hovered());
    assert_eq!(marker.hover_state(), HoverState::Normal);

    marker.on_pointer_leave();
    assert!(!marker.is_hovered());
}

#[test]
fn hover_requests_repaint() {
    let mut marker = marker_at(10.0, 10.0);
    marker.on_pointer_enter();
    assert!(marker.take_repaint_request());
    marker.on_pointer_leave();
    assert!(marker.take_repaint_request());
}

#[test]
fn hidden_marker_draws_nothing_in_any_state() {
    for shape in MarkerShape::ALL {
        for hovered in [false, true] {
            let mut marker = marker_at(30.0, 30.0);
            marker.set_shape(shape);
            marker.set_visible(false);
            if hovered {
                marker.on_pointer_enter();
            }

            let mut frame = frame();
            marker.draw(&mut frame);
            assert!(frame.is_empty(), "shape={shape} hovered={hovered}");
        }
    }
}

#[test]
fn hidden_marker_stays_hit_testable() {
    let mut marker = marker_at(30.0, 30.0);
    marker.set_visible(false);
    assert!(marker.hit_test(Point::new(30.0, 30.0)));
    assert!(marker.hit_test(Point::new(38.5, 38.5)));
    assert!(!marker.hit_test(Point::new(39.0, 30.0)));
}

#[test]
fn circle_draws_disc_then_glyph() {
    let marker = marker_at(100.0, 60.0);
    let mut frame = frame();
    marker.draw(&mut frame);

    assert_eq!(frame.commands.len(), 2);
    let DrawCommand::Disc(disc) = frame.commands[0] else {
        panic!("disc must be painted first");
    };
    let DrawCommand::Texture(glyph) = frame.commands[1] else {
        panic!("glyph must be painted over the disc");
    };

    assert_eq!(disc.center, Point::new(100.0, 60.0));
    assert_eq!(disc.radius, 4.0);
    assert_eq!(disc.color, DEFAULT_FILL_COLOR);

    assert_eq!(glyph.glyph, GlyphTexture::MarkerCircle);
    assert_eq!(glyph.rect, Rect::new(96.0, 56.0, 8.0, 8.0));
    assert_eq!(glyph.tint, Color::rgb(0.2, 0.4, 0.6));
}

#[test]
fn hovered_circle_uses_highlight_fill() {
    let mut marker = marker_at(100.0, 60.0);
    marker.on_pointer_enter();

    let mut frame = frame();
    marker.draw(&mut frame);

    let disc = frame.discs().next().expect("disc");
    assert_eq!(disc.color, DEFAULT_FILL_HIGHLIGHT_COLOR);
    let glyph = frame.textures().next().expect("glyph");
    assert_eq!(glyph.tint, Color::rgb(0.2, 0.4, 0.6));
}

#[test]
fn cross_draws_only_glyph() {
    let mut marker = marker_at(20.0, 20.0);
    marker.set_shape(MarkerShape::Cross);

    let mut frame = frame();
    marker.draw(&mut frame);

    assert_eq!(frame.discs().count(), 0);
    let glyph = frame.textures().next().expect("cross glyph");
    assert_eq!(glyph.glyph, GlyphTexture::MarkerCross);
    assert_eq!(glyph.tint, Color::rgb(0.2, 0.4, 0.6));
}

#[test]
fn hovered_cross_is_lightened_halfway_to_white() {
    let mut marker = marker_at(20.0, 20.0);
    marker.set_shape(MarkerShape::Cross);
    marker.on_pointer_enter();

    let mut frame = frame();
    marker.draw(&mut frame);

    let tint = frame.textures().next().expect("cross glyph").tint;
    assert!((tint.red - 0.6).abs() < 1e-12);
    assert!((tint.green - 0.7).abs() < 1e-12);
    assert!((tint.blue - 0.8).abs() < 1e-12);
    assert_eq!(tint.alpha, 1.0);
}

#[test]
fn shape_change_takes_effect_on_next_draw() {
    let mut marker = marker_at(20.0, 20.0);
    let mut before = frame();
    marker.draw(&mut before);

    marker.set_shape(MarkerShape::Cross);
    let mut after = frame();
    marker.draw(&mut after);

    assert_eq!(before.commands.len(), 2);
    assert_eq!(after.commands.len(), 1);
}

#[test]
fn unrecognized_shape_is_a_fatal_invariant_violation() {
    let err = MarkerShape::try_from(2u8).expect_err("code 2 is not a shape");
    assert!(matches!(err, ChartError::InvariantViolation(_)));

    let err = "triangle"
        .parse::<MarkerShape>()
        .expect_err("triangle is not a shape");
    assert!(matches!(err, ChartError::InvariantViolation(_)));
    assert!(err.to_string().contains("triangle"));
}

#[test]
fn display_shows_value_and_coordinate() {
    let marker = marker_at(40.0, 50.5);
    assert_eq!(marker.to_string(), "Value: (2, 5) Coord: (40, 50.5)");
}
