mod frame_input;
mod game_layout;
mod ui_render;
mod ui_text;
mod window_config;

use frame_input::{KeyboardInput, capture_frame_input};
use game_layout::{compute_frame_layout, setup_layout};
use macroquad::prelude::*;
use roomwalk_app::app_loop::{AppMode, AppRequest, AppState, PendingEdges};
use roomwalk_app::camera::Camera;
use roomwalk_app::launch_args::{SeedChoice, generate_runtime_seed, resolve_launch_args};
use roomwalk_app::settings_file::SettingsFile;
use roomwalk_core::{Environment, GameConfig, ParticleField, Session, TickOutcome};
use std::env;
use std::mem;
use std::process;
use taffy::TaffyTree;
use window_config::build_window_conf;

const FIXED_STEP_SECONDS: f32 = 1.0 / 60.0;
// Caps catch-up work after a stall so the loop never spirals.
const MAX_STEPS_PER_FRAME: u32 = 5;

#[macroquad::main(build_window_conf)]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let launch = match resolve_launch_args(&args, generate_runtime_seed()) {
        Ok(launch) => launch,
        Err(message) => {
            eprintln!("roomwalk: {message}");
            process::exit(2);
        }
    };

    let mut config = match SettingsFile::get_default_path() {
        Some(path) => {
            let (settings, notice) = SettingsFile::load_or_create(&path);
            if let Some(notice) = notice {
                eprintln!("{notice}");
            }
            settings.game
        }
        None => GameConfig::default(),
    };
    if let Some(movement) = launch.movement {
        config = config.with_movement(movement);
    }
    if let SeedChoice::Generated(seed) = launch.seed {
        eprintln!("seed {seed} (pass --seed {seed} to replay this layout)");
    }

    let mut next_seed = Some(launch.seed.value());
    let mut session = start_session(launch.seed.value(), &config);
    let mut app_state = AppState::new();
    let mut keyboard = KeyboardInput;
    let mut edges = PendingEdges::default();
    let mut camera = Camera::default();
    let mut snap_camera = true;
    let mut stars = ParticleField::new(
        Environment::Starlit,
        screen_width(),
        screen_height(),
        screen_height(),
        launch.seed.value(),
    );
    let mut star_size = (screen_width(), screen_height());
    let mut taffy = TaffyTree::new();
    let layout_nodes = setup_layout(&mut taffy);
    let mut accumulator = 0.0;

    loop {
        let input = capture_frame_input(&mut keyboard);

        if app_state.mode == AppMode::Title {
            let size = (screen_width(), screen_height());
            if size != star_size {
                stars.resize(size.0, size.1, size.1);
                star_size = size;
            }
            stars.update();
        }

        edges.record(&input.keys_pressed, input.movement.jump_pressed);
        accumulator += get_frame_time();

        let layout =
            compute_frame_layout(&mut taffy, &layout_nodes, screen_width(), screen_height());
        let view = (layout.playfield.width, layout.playfield.height);
        let mut steps = 0;
        while steps < MAX_STEPS_PER_FRAME && accumulator >= FIXED_STEP_SECONDS {
            // Edge-triggered input stays buffered until a step consumes it.
            let (keys, movement) = edges.take_for_step(input.movement);
            app_state.tick(&mut session, &movement, &keys);
            accumulator -= FIXED_STEP_SECONDS;
            steps += 1;

            if let Some(TickOutcome::RoomChanged { .. }) = app_state.last_outcome {
                snap_camera = true;
            }
            match app_state.take_request() {
                Some(AppRequest::NewRun) => {
                    let seed = next_seed.take().unwrap_or_else(generate_runtime_seed);
                    session = start_session(seed, &config);
                    snap_camera = true;
                    app_state.start_run();
                }
                Some(AppRequest::Quit) => return,
                None => {}
            }
            if app_state.mode != AppMode::Title {
                update_camera(&mut camera, &session, view, mem::take(&mut snap_camera));
            }
        }
        if steps == MAX_STEPS_PER_FRAME {
            accumulator = 0.0;
        }

        if app_state.mode == AppMode::Title {
            ui_render::draw_title(&stars, screen_width(), screen_height());
        } else {
            if snap_camera {
                update_camera(&mut camera, &session, view, mem::take(&mut snap_camera));
            }
            clear_background(BLACK);
            ui_render::draw_frame(&session, &app_state, &layout, camera);
        }

        next_frame().await;
    }
}

/// Eases the camera towards the player once per simulation step, or jumps when `snap` is set.
fn update_camera(camera: &mut Camera, session: &Session, view: (f32, f32), snap: bool) {
    let room = session.current_room();
    let tile_size = session.config().tile_size;
    let world = (room.width as f32 * tile_size, room.height as f32 * tile_size);
    if snap {
        camera.snap(session.player().center(), view, world);
    } else {
        camera.follow(session.player().center(), view, world);
    }
}

/// Builds a session, falling back to the default config if the loaded one is rejected.
fn start_session(seed: u64, config: &GameConfig) -> Session {
    match Session::new(seed, config.clone()) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("invalid game config ({error}); using defaults");
            let fallback = GameConfig::default().with_movement(config.movement);
            match Session::new(seed, fallback) {
                Ok(session) => session,
                Err(error) => {
                    eprintln!("default config rejected: {error}");
                    process::exit(1);
                }
            }
        }
    }
}
