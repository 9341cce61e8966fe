//! Classical mechanics 101: balls under gravity and air drag, bouncing off
//! the window edges and off each other. Grab a ball with the left mouse
//! button and fling it around.

use anyhow::{Context, Result};
use clap::Parser;
use rphys::spawn::{rng_for, spawn_balls};
use rphys::{Pointer, Settings, Tint, World};
use sdl2::event::Event;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;
use sdl2::render::{Canvas, RenderTarget};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Window title displayed in the title bar
const TITLE: &str = "Classical mechanics 101";
/// Background color for the canvas
const BACKGROUND: Color = Color::WHITE;

#[derive(Parser, Debug)]
struct Args {
    /// YAML settings file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for the starting layout, overrides the settings file
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Converts a ball tint into the byte order the gfx primitives expect.
fn to_abgr(tint: Tint) -> Color {
    let Tint(r, g, b) = tint;
    Color::RGBA(255, b, g, r)
}

/// Draws every ball as a filled circle, using the snapshot taken after
/// the last tick.
///
/// # Arguments
///
/// * `world` - The simulation to render
/// * `canvas` - SDL2 canvas to draw on
fn draw<T: RenderTarget>(world: &World, canvas: &mut Canvas<T>) {
    for view in world.snapshot() {
        let x = view.position[0] as i16;
        let y = view.position[1] as i16;
        let rad = view.radius as i16;
        let _ = canvas.filled_circle(x, y, rad, to_abgr(view.tint));
    }
}

/// Reads settings from the `--config` file, or the defaults when none is
/// given, and applies the `--seed` override.
///
/// # Arguments
///
/// * `args` - Parsed command line arguments
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.spawn.seed = args.seed;
    }
    Ok(settings)
}

/// Main entry point for the ball simulation.
///
/// Loads the settings, spawns the balls, opens a window sized to the canvas
/// and runs the main loop at 60 FPS until the window is closed.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = load_settings(&args)?;
    let mut rng = rng_for(&settings);
    let balls = spawn_balls(&settings, &mut rng)?;
    let mut world = World::new(settings, balls)?;
    let (width, height) = (world.settings().width as u32, world.settings().height as u32);

    // SDL reports its errors as plain strings
    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;
    let window = video_subsystem
        .window(TITLE, width, height)
        .position_centered()
        .build()?;
    let mut canvas = window.into_canvas().build()?;
    let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;

    let mut pointer = Pointer::new();
    let mut mouse = [0.0, 0.0];

    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown { keycode: Some(Keycode::Escape), .. } => break 'running,
                Event::MouseButtonDown { mouse_btn: MouseButton::Left, x, y, .. } => {
                    mouse = [f64::from(x), f64::from(y)];
                    pointer.press(world.balls(), mouse);
                }
                Event::MouseButtonUp { mouse_btn: MouseButton::Left, .. } => {
                    if let Some((index, tint)) = pointer.release(&mut rng) {
                        if let Some(ball) = world.ball_mut(index) {
                            ball.tint = tint;
                        }
                    }
                }
                Event::MouseMotion { x, y, .. } => mouse = [f64::from(x), f64::from(y)],
                _ => {}
            }
        }

        // resolve the grab before stepping so the held ball is skipped
        let hold = pointer.drag(world.balls(), mouse);
        world.tick(hold.as_ref());

        canvas.set_draw_color(BACKGROUND);
        canvas.clear();
        draw(&world, &mut canvas);
        canvas.present();
        // Target 60 FPS
        ::std::thread::sleep(Duration::new(0, 1_000_000_000u32 / 60));
    }

    tracing::info!(ticks = world.ticks(), "simulation stopped");
    Ok(())
}
