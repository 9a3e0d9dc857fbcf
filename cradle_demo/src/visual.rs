use ggez::event::{self, EventHandler};
use ggez::glam::Vec2 as GVec2;
use ggez::graphics::{self, Color, DrawMode, DrawParam, Mesh, Text};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{Context, GameError, GameResult};
use pendulum_cradle::*;

use crate::DemoSettings;

const WINDOW_HEIGHT: f32 = 300.0;

struct MainState {
    settings: DemoSettings,
    sim: CradleSimulation,
    paused: bool,
}

impl MainState {
    fn new(settings: DemoSettings) -> GameResult<MainState> {
        let sim = build_simulation(&settings)?;
        Ok(MainState {
            settings,
            sim,
            paused: false,
        })
    }
}

fn build_simulation(settings: &DemoSettings) -> GameResult<CradleSimulation> {
    CradleSimulation::from_layout(settings.config, &settings.layout)
        .map_err(|e| GameError::CustomError(e.to_string()))
}

impl EventHandler for MainState {
    fn update(&mut self, _ctx: &mut Context) -> GameResult {
        // One tick per frame; drawing happens strictly after it.
        if !self.paused {
            self.sim.tick();
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, Color::BLACK);

        for body in self.sim.bodies() {
            let color = parse_color(&body.color).unwrap_or(Color::WHITE);
            let pivot = body.pivot();
            let location = body.location();

            let line_mesh = Mesh::new_line(
                ctx,
                &[
                    GVec2::new(pivot.x as f32, pivot.y as f32),
                    GVec2::new(location.x as f32, location.y as f32),
                ],
                1.0,
                color,
            )?;
            canvas.draw(&line_mesh, DrawParam::new());

            let circle_mesh = Mesh::new_circle(
                ctx,
                DrawMode::fill(),
                GVec2::new(location.x as f32, location.y as f32),
                body.radius() as f32,
                0.1,
                color,
            )?;
            canvas.draw(&circle_mesh, DrawParam::new());
        }

        let hud = Text::new(format!(
            "tick {}  momentum {:.2}  energy {:.2}{}",
            self.sim.ticks(),
            self.sim.total_momentum(),
            self.sim.kinetic_energy(),
            if self.paused { "  [paused]" } else { "" }
        ));
        canvas.draw(&hud, DrawParam::new().dest(GVec2::new(8.0, WINDOW_HEIGHT - 24.0)));

        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeated: bool) -> GameResult {
        match input.keycode {
            Some(KeyCode::Escape) => ctx.request_quit(),
            Some(KeyCode::Space) => self.paused = !self.paused,
            Some(KeyCode::R) => self.sim = build_simulation(&self.settings)?,
            _ => {}
        }
        Ok(())
    }
}

/// HSL to RGB, all components in `[0, 1]`.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return [v, v, v];
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        (hue_to_rgb(p, q, h + 1.0 / 3.0) * 255.0).round() as u8,
        (hue_to_rgb(p, q, h) * 255.0).round() as u8,
        (hue_to_rgb(p, q, h - 1.0 / 3.0) * 255.0).round() as u8,
    ]
}

/// One evenly spaced hue per body, as `#rrggbb` tags.
fn rainbow_tags(count: usize) -> Vec<ColorTag> {
    (0..count)
        .map(|i| {
            let [r, g, b] = hsl_to_rgb(i as f64 / count as f64, 0.9, 0.4);
            ColorTag::new(format!("#{:02x}{:02x}{:02x}", r, g, b))
        })
        .collect()
}

fn parse_color(tag: &ColorTag) -> Option<Color> {
    let hex = tag.as_str().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

pub fn run_visual(mut settings: DemoSettings) -> GameResult {
    if settings.layout.colors.is_empty() {
        settings.layout.colors = rainbow_tags(settings.layout.body_count);
    }
    let width = settings.config.reference_width as f32;

    let cb = ggez::ContextBuilder::new("cradle_demo", "author")
        .window_setup(ggez::conf::WindowSetup::default().title("Newton's Cradle"))
        .window_mode(ggez::conf::WindowMode::default().dimensions(width, WINDOW_HEIGHT));

    let (ctx, event_loop) = cb.build()?;
    let state = MainState::new(settings)?;
    event::run(ctx, event_loop, state)
}
