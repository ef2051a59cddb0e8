//! Scene drawing
//!
//! Reads the game state and draws it; never mutates it. Clouds drift with
//! wall-clock time so the idle and game-over screens stay alive.

use glam::Vec2;
use std::f32::consts::TAU;

use super::surface::{Color, LinearGradient, Paint, Rect, Surface};
use crate::settings::Settings;
use crate::sim::{Avatar, GameState, Obstacle};
use crate::tuning::Tuning;

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY: Color = [0.439, 0.773, 0.808, 1.0];
    pub const CLOUD: Color = [1.0, 1.0, 1.0, 0.5];
    pub const AVATAR: Color = [1.0, 0.843, 0.0, 1.0];
    pub const OUTLINE: Color = [0.0, 0.0, 0.0, 1.0];
    pub const OBSTACLE_LIGHT: Color = [0.180, 0.800, 0.443, 1.0];
    pub const OBSTACLE_DARK: Color = [0.153, 0.682, 0.376, 1.0];
}

const CLOUD_COUNT: usize = 3;
/// Cloud drift speed in pixels per second
const CLOUD_SPEED: f64 = 20.0;
const LIP_HEIGHT: f32 = 10.0;
const LIP_OVERHANG: f32 = 10.0;
const OUTLINE_WIDTH: f32 = 2.0;
const EYE_RADIUS: f32 = 4.0;

/// Draw one frame
pub fn draw_frame(
    surface: &mut dyn Surface,
    state: &GameState,
    tuning: &Tuning,
    settings: &Settings,
    time_ms: f64,
) {
    surface.clear(colors::SKY);

    let size = surface.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }

    if settings.quality.clouds_enabled() {
        let time_secs = if settings.clouds_drift() {
            time_ms * 0.001
        } else {
            0.0
        };
        draw_clouds(surface, size.x, time_secs);
    }

    let tilt = if settings.effective_tilt() {
        state.avatar.velocity * tuning.tilt_factor
    } else {
        0.0
    };
    draw_avatar(surface, &state.avatar, tilt);

    for obstacle in &state.obstacles {
        draw_obstacle(surface, obstacle, tuning, size.y);
    }
}

/// Horizontal position of cloud `index` at `time_secs`, wrapping around the surface
pub fn cloud_x(index: usize, time_secs: f64, width: f32) -> f32 {
    let period = width as f64 + 100.0;
    ((time_secs * CLOUD_SPEED + index as f64 * 200.0).rem_euclid(period) - 50.0) as f32
}

fn draw_clouds(surface: &mut dyn Surface, width: f32, time_secs: f64) {
    for i in 0..CLOUD_COUNT {
        let x = cloud_x(i, time_secs, width);
        let y = 50.0 + i as f32 * 40.0;
        draw_cloud(surface, Vec2::new(x, y));
    }
}

fn draw_cloud(surface: &mut dyn Surface, origin: Vec2) {
    let puffs = [
        (Vec2::new(0.0, 0.0), 20.0),
        (Vec2::new(15.0, -10.0), 15.0),
        (Vec2::new(15.0, 10.0), 15.0),
        (Vec2::new(30.0, 0.0), 20.0),
    ];
    for (offset, radius) in puffs {
        surface.fill_arc(origin + offset, radius, 0.0, TAU, colors::CLOUD);
    }
}

fn draw_avatar(surface: &mut dyn Surface, avatar: &Avatar, tilt: f32) {
    let radius = avatar.size.x / 2.0;

    surface.save();
    surface.translate(avatar.center());
    surface.rotate(tilt);

    surface.fill_arc(Vec2::ZERO, radius, 0.0, TAU, colors::AVATAR);
    surface.stroke_arc(Vec2::ZERO, radius, 0.0, TAU, colors::OUTLINE, OUTLINE_WIDTH);

    let eye = Vec2::new(avatar.size.x * 0.2, -avatar.size.y * 0.1);
    surface.fill_arc(eye, EYE_RADIUS, 0.0, TAU, colors::OUTLINE);

    surface.restore();
}

fn draw_obstacle(surface: &mut dyn Surface, obstacle: &Obstacle, tuning: &Tuning, height: f32) {
    let width = tuning.obstacle_width;
    let gate_bottom = obstacle.gate_bottom(tuning.gap);

    draw_segment(
        surface,
        Rect::new(obstacle.x, 0.0, width, obstacle.gate_top),
        SegmentEnd::Bottom,
    );
    draw_segment(
        surface,
        Rect::new(obstacle.x, gate_bottom, width, height - gate_bottom),
        SegmentEnd::Top,
    );
}

/// Which end of a segment faces the gate
#[derive(Clone, Copy)]
enum SegmentEnd {
    Top,
    Bottom,
}

fn draw_segment(surface: &mut dyn Surface, body: Rect, lip_at: SegmentEnd) {
    if body.size.x <= 0.0 || body.size.y <= 0.0 {
        return;
    }

    let gradient = LinearGradient::new(
        body.min,
        Vec2::new(body.max().x, body.min.y),
        colors::OBSTACLE_LIGHT,
        colors::OBSTACLE_DARK,
    );
    surface.fill_rect(body, &Paint::Linear(gradient));
    surface.stroke_rect(body, colors::OBSTACLE_DARK, OUTLINE_WIDTH);

    let lip_y = match lip_at {
        SegmentEnd::Top => body.min.y,
        SegmentEnd::Bottom => body.max().y - LIP_HEIGHT,
    };
    let lip = Rect::new(
        body.min.x - LIP_OVERHANG / 2.0,
        lip_y,
        body.size.x + LIP_OVERHANG,
        LIP_HEIGHT,
    );
    surface.fill_rect(lip, &Paint::Solid(colors::OBSTACLE_DARK));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::shapes::Tessellator;
    use crate::settings::QualityPreset;
    use crate::sim::{GamePhase, Viewport};

    /// Surface that logs calls by name
    #[derive(Default)]
    struct CallLog {
        size: Vec2,
        calls: Vec<String>,
        rects: Vec<Rect>,
        rotations: Vec<f32>,
        depth: i32,
    }

    impl Surface for CallLog {
        fn size(&self) -> Vec2 {
            self.size
        }
        fn clear(&mut self, _color: Color) {
            self.calls.push("clear".into());
        }
        fn fill_rect(&mut self, rect: Rect, _paint: &Paint) {
            self.calls.push("fill_rect".into());
            self.rects.push(rect);
        }
        fn stroke_rect(&mut self, _rect: Rect, _color: Color, _line_width: f32) {
            self.calls.push("stroke_rect".into());
        }
        fn fill_arc(&mut self, _c: Vec2, _r: f32, _s: f32, _e: f32, _color: Color) {
            self.calls.push("fill_arc".into());
        }
        fn stroke_arc(&mut self, _c: Vec2, _r: f32, _s: f32, _e: f32, _color: Color, _w: f32) {
            self.calls.push("stroke_arc".into());
        }
        fn save(&mut self) {
            self.depth += 1;
        }
        fn restore(&mut self) {
            self.depth -= 1;
        }
        fn translate(&mut self, _offset: Vec2) {}
        fn rotate(&mut self, angle: f32) {
            self.rotations.push(angle);
        }
    }

    fn state() -> GameState {
        GameState::new(&Tuning::default(), Viewport::new(800.0, 600.0))
    }

    fn surface() -> CallLog {
        CallLog {
            size: Vec2::new(800.0, 600.0),
            ..Default::default()
        }
    }

    fn count(log: &CallLog, name: &str) -> usize {
        log.calls.iter().filter(|c| *c == name).count()
    }

    #[test]
    fn test_empty_scene() {
        let mut log = surface();
        draw_frame(&mut log, &state(), &Tuning::default(), &Settings::default(), 0.0);

        assert_eq!(log.calls[0], "clear");
        // 3 clouds x 4 puffs + avatar body and eye
        assert_eq!(count(&log, "fill_arc"), 14);
        assert_eq!(count(&log, "stroke_arc"), 1);
        assert_eq!(count(&log, "fill_rect"), 0);
        assert_eq!(log.depth, 0);
    }

    #[test]
    fn test_obstacle_segments() {
        let mut log = surface();
        let mut state = state();
        state.obstacles.push(Obstacle::new(300.0, 150.0));
        draw_frame(&mut log, &state, &Tuning::default(), &Settings::default(), 0.0);

        // Body + lip per segment
        assert_eq!(count(&log, "fill_rect"), 4);
        assert_eq!(count(&log, "stroke_rect"), 2);
        assert_eq!(log.rects[0], Rect::new(300.0, 0.0, 60.0, 150.0));
        assert_eq!(log.rects[1], Rect::new(295.0, 140.0, 70.0, 10.0));
        assert_eq!(log.rects[2], Rect::new(300.0, 350.0, 60.0, 250.0));
        assert_eq!(log.rects[3], Rect::new(295.0, 350.0, 70.0, 10.0));
    }

    #[test]
    fn test_avatar_tilts_with_velocity() {
        let mut state = state();
        state.avatar.velocity = -5.0;

        let mut log = surface();
        draw_frame(&mut log, &state, &Tuning::default(), &Settings::default(), 0.0);
        assert_eq!(log.rotations, vec![-0.5]);

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut log = surface();
        draw_frame(&mut log, &state, &Tuning::default(), &calm, 0.0);
        assert_eq!(log.rotations, vec![0.0]);
    }

    #[test]
    fn test_zero_size_surface() {
        let mut log = CallLog::default();
        let mut state = state();
        state.obstacles.push(Obstacle::new(10.0, 100.0));
        draw_frame(&mut log, &state, &Tuning::default(), &Settings::default(), 1234.0);
        assert_eq!(log.calls, vec!["clear"]);
    }

    #[test]
    fn test_draw_does_not_touch_state() {
        let mut state = state();
        state.phase = GamePhase::Running;
        state.obstacles.push(Obstacle::new(400.0, 120.0));
        state.avatar.velocity = 3.0;
        let before = format!("{:?}", state);

        let mut tess = Tessellator::new(800.0, 600.0, 24);
        draw_frame(&mut tess, &state, &Tuning::default(), &Settings::default(), 500.0);

        assert_eq!(format!("{:?}", state), before);
        assert!(!tess.vertices().is_empty());
    }

    #[test]
    fn test_low_quality_skips_clouds() {
        let mut log = surface();
        let settings = Settings::from_preset(QualityPreset::Low);
        draw_frame(&mut log, &state(), &Tuning::default(), &settings, 0.0);
        assert_eq!(count(&log, "fill_arc"), 2);
    }

    #[test]
    fn test_clouds_wrap() {
        assert_eq!(cloud_x(0, 0.0, 800.0), -50.0);
        assert_eq!(cloud_x(1, 0.0, 800.0), 150.0);
        // 45 s * 20 px/s = 900 = one full period
        assert_eq!(cloud_x(0, 45.0, 800.0), -50.0);
    }
}
