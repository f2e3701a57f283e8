use macroquad::prelude::*;
use parabolic_flight::core::{CoordinateGrid, GridElement, SurfacePoint, SurfaceSize};

use crate::constants::{BALL_RADIUS, GRID_LABEL_FONT_SIZE, TRAIL_COLOR, TRAIL_THICKNESS};

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgba(r, g, b, 255)
}

/// Maps a surface-local point onto the screen.
fn screen(origin: Vec2, point: SurfacePoint) -> Vec2 {
    vec2(origin.x + point.x as f32, origin.y + point.y as f32)
}

pub(crate) fn draw_surface_background(origin: Vec2, surface: SurfaceSize, color: Color) {
    draw_rectangle(
        origin.x,
        origin.y,
        surface.width as f32,
        surface.height as f32,
        color,
    );
}

/// Draws the grid's element list as-is. Text anchors are top-left corners.
pub(crate) fn draw_grid(grid: &CoordinateGrid, origin: Vec2, color: Color, font: Option<&Font>) {
    for element in grid.elements() {
        match element {
            GridElement::AxisLine { from, to } => {
                let (a, b) = (screen(origin, *from), screen(origin, *to));
                draw_line(a.x, a.y, b.x, b.y, 2.0, color);
            }
            GridElement::TickLine { from, to, .. } => {
                let (a, b) = (screen(origin, *from), screen(origin, *to));
                draw_line(a.x, a.y, b.x, b.y, 1.0, color);
            }
            GridElement::AxisCaption { text, anchor, .. }
            | GridElement::TickLabel { text, anchor, .. } => {
                let p = screen(origin, *anchor);
                draw_ui_text(
                    text,
                    p.x,
                    p.y + f32::from(GRID_LABEL_FONT_SIZE),
                    GRID_LABEL_FONT_SIZE,
                    color,
                    font,
                );
            }
        }
    }
}

pub(crate) fn draw_trail(points: &[SurfacePoint], origin: Vec2) {
    for pair in points.windows(2) {
        let (a, b) = (screen(origin, pair[0]), screen(origin, pair[1]));
        draw_line(a.x, a.y, b.x, b.y, TRAIL_THICKNESS, TRAIL_COLOR);
    }
}

pub(crate) fn draw_ball(position: Option<SurfacePoint>, origin: Vec2) {
    if let Some(point) = position {
        let p = screen(origin, point);
        draw_circle(p.x, p.y, BALL_RADIUS, RED);
        draw_circle_lines(p.x, p.y, BALL_RADIUS, 2.0, MAROON);
    }
}
