use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: i32 = 800;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const PANEL_WIDTH: f32 = 360.0;
pub const PANEL_X: f32 = 12.0;
pub const PANEL_Y: f32 = 12.0;
pub const PANEL_HEIGHT: f32 = 440.0;

pub const SURFACE_LEFT: f32 = PANEL_X + PANEL_WIDTH + 12.0;
pub const SURFACE_TOP: f32 = 64.0;
pub const SURFACE_RIGHT_MARGIN: f32 = 12.0;
pub const SURFACE_BOTTOM_MARGIN: f32 = 96.0;

pub const TITLE_Y: f32 = 40.0;
pub const GRID_LABEL_FONT_SIZE: u16 = 15;
pub const BALL_RADIUS: f32 = 6.0;
pub const TRAIL_THICKNESS: f32 = 2.5;

pub const MAX_SPEED_SLIDER_MPS: f32 = 2000.0;
pub const MAX_HEIGHT_SLIDER_M: f32 = 2000.0;
pub const HEIGHT_KEY_RATE_MPS: f32 = 90.0;
pub const SPEED_KEY_RATE_MPS2: f32 = 140.0;

pub const WINDOW_BG: Color = Color::new(0.92, 0.93, 0.95, 1.0);
pub const HEADER_COLOR: Color = Color::new(0.12, 0.12, 0.14, 1.0);
pub const TRAIL_COLOR: Color = Color::new(0.21, 0.48, 0.96, 1.0);
