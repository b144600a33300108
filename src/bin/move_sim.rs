//! Move Sim - Headless Locomotion Runner
//!
//! Drives a [`MovementController`] against a kinematic capsule in a static
//! test world with scripted input, logs what happens each frame, and prints
//! the final motion state and body position as JSON.
//!
//! Run with: `cargo run --bin move_sim -- --preset double-jump --jump-at 0.5 0.8`
//!
//! Logging follows `RUST_LOG` (default `info`; `debug` shows every frame).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use glam::{Vec2, Vec3};
use log::{debug, error, info};
use serde::Serialize;

use player_move_engine::physics::Ramp;
use player_move_engine::player::JumpEvent;
use player_move_engine::{
    CharacterBody, ConfigError, InputAction, InputState, KinematicCapsule, MotionState,
    MovementConfig, MovementController, StaticWorld,
};

/// Built-in tuning presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Single jump, crouch only slows down
    Base,
    /// Two jumps before landing, crouch shrinks the capsule
    DoubleJump,
}

/// Headless character locomotion simulator
#[derive(Parser, Debug)]
#[command(version, about = "Runs the movement controller headless with scripted input")]
struct Cli {
    /// Movement config JSON. Overrides --preset.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Preset used when no config file is given
    #[arg(long, value_enum, default_value_t = Preset::Base)]
    preset: Preset,

    /// Simulated time in seconds
    #[arg(long, default_value_t = 3.0)]
    seconds: f32,

    /// Frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Forward axis value in [-1, 1]
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    forward: f32,

    /// Strafe axis value in [-1, 1]
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    strafe: f32,

    /// Hold the sprint key the whole run
    #[arg(long)]
    sprint: bool,

    /// Hold the crouch key the whole run
    #[arg(long)]
    crouch: bool,

    /// Press jump at these times (seconds)
    #[arg(long, value_name = "SECONDS", num_args = 1..)]
    jump_at: Vec<f32>,

    /// Put a ramp of this incline (degrees) two meters ahead
    #[arg(long, value_name = "DEGREES")]
    ramp_degrees: Option<f32>,
}

/// Flat floor, plus a ramp rising toward -Z when requested.
fn build_world(ramp_degrees: Option<f32>) -> StaticWorld {
    let world = StaticWorld::flat(0.0);
    let Some(degrees) = ramp_degrees else {
        return world;
    };

    let length = 40.0;
    let rise = degrees.to_radians().tan();
    world.with_ramp(Ramp {
        min: Vec2::new(-20.0, -2.0 - length),
        max: Vec2::new(20.0, -2.0),
        base_height: rise * length,
        gradient: Vec2::new(0.0, -rise),
    })
}

/// Printed once the run ends.
#[derive(Debug, Serialize)]
struct Summary {
    state: MotionState,
    position: Vec3,
    grounded: bool,
}

fn run(cli: &Cli) -> Result<Summary, ConfigError> {
    let config = match &cli.config {
        Some(path) => {
            info!("loading config from {}", path.display());
            MovementConfig::load(path)?
        }
        None => match cli.preset {
            Preset::Base => MovementConfig::default(),
            Preset::DoubleJump => MovementConfig::double_jump(),
        },
    };

    let sprint_key = config.key_for(InputAction::Sprint);
    let crouch_key = config.key_for(InputAction::Crouch);
    let jump_key = config.key_for(InputAction::Jump);

    let mut input = InputState::new();
    input.axes.set_raw(config.vertical_axis.clone(), cli.forward);
    input.axes.set_raw(config.horizontal_axis.clone(), cli.strafe);
    input.keyboard.handle_key(sprint_key, cli.sprint);
    input.keyboard.handle_key(crouch_key, cli.crouch);

    let mut controller = MovementController::new(config)?;
    let world = Arc::new(build_world(cli.ramp_degrees));
    let mut body = KinematicCapsule::standing_at(world.clone(), Vec3::ZERO);

    let fps = cli.fps.max(1);
    let dt = 1.0 / fps as f32;
    let frames = (cli.seconds.max(0.0) * fps as f32).round() as u32;

    let mut jump_frames: Vec<u32> = cli
        .jump_at
        .iter()
        .map(|t| (t.max(0.0) * fps as f32).round() as u32)
        .collect();
    jump_frames.sort_unstable();

    info!(
        "simulating {frames} frames at {fps} fps ({} jump press(es))",
        jump_frames.len()
    );

    for frame in 0..frames {
        let press = jump_frames.binary_search(&frame).is_ok();
        input.keyboard.handle_key(jump_key, press);

        let report = controller.tick(dt, &input, &mut body, world.as_ref());
        input.end_frame();

        let time = (frame + 1) as f32 * dt;
        match report.jump {
            JumpEvent::Started { count } => {
                info!("t={time:.3}s jump {count} at height {:.2}", body.feet())
            }
            JumpEvent::Landed => info!("t={time:.3}s landed at height {:.2}", body.feet()),
            JumpEvent::None => {}
        }
        debug!(
            "t={time:.3}s pos=({:.2}, {:.2}, {:.2}) speed={:.2} grounded={} slope={}",
            body.position().x,
            body.position().y,
            body.position().z,
            controller.speed(),
            body.is_grounded(),
            report.slope_correction
        );
    }

    Ok(Summary {
        state: *controller.state(),
        position: body.position(),
        grounded: body.is_grounded(),
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("failed to serialize summary: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
