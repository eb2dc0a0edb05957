use anyhow::Result;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::{SceneId, WorldConfig};
use game::characters::PlayerStats;
use game::Game;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting Kirb...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let window = WindowBuilder::new()
        .with_title("Kirb")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut input = InputManager::default();
    let mut game_loop = GameLoop::new();
    // KIRB_SCENE picks the starting level, e.g. KIRB_SCENE=level-2
    let scene = match std::env::var("KIRB_SCENE") {
        Ok(name) => name.parse::<SceneId>()?,
        Err(_) => SceneId::Level1,
    };
    let mut game = Game::new(scene, PlayerStats::default(), WorldConfig::default());
    let mut title = String::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(focused),
                ..
            } => {
                // Keys released while unfocused never reach us
                if !focused {
                    input.release_all();
                }
                game_loop.set_paused(!focused);
            }
            Event::AboutToWait => {
                let steps = game_loop.begin_frame();
                for _ in 0..steps {
                    if let Err(e) = game.update(game_loop.fixed_timestep(), input.state()) {
                        error!("Simulation failed: {}", e);
                        elwt.exit();
                        return;
                    }
                    input.end_frame();
                }

                let status = game.status();
                if status != title {
                    window.set_title(&status);
                    title = status;
                }
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
