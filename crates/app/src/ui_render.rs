//! Rendering for the title screen, the playfield, and the side panels.

use std::ops::Range;

use crate::game_layout::{FrameLayout, PanelRect};
use crate::ui_text::{event_log_line, room_info_lines, status_text};
use macroquad::prelude::*;
use roomwalk_app::app_loop::{AppMode, AppState};
use roomwalk_app::camera::Camera;
use roomwalk_app::APP_NAME;
use roomwalk_core::{ParticleField, ParticleKind, Pos, Rgb, Room, Session, TileKind};

const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const PANEL_PAD_X: f32 = 15.0;
const PANEL_PAD_Y: f32 = 25.0;
const LINE_HEIGHT: f32 = 18.0;
const VIGNETTE_BANDS: usize = 6;
const VIGNETTE_BAND_WIDTH: f32 = 14.0;
const PLAYER_COLOR: Color = Color { r: 0.95, g: 0.85, b: 0.2, a: 1.0 };

pub fn draw_frame(session: &Session, app_state: &AppState, layout: &FrameLayout, camera: Camera) {
    draw_panel_borders(layout);
    draw_playfield(session, layout.playfield, camera);
    draw_status_panel(app_state, session, layout.status);
    draw_room_info(session, layout.room_info);
    draw_event_log(session, layout.event_log);
    if app_state.mode == AppMode::ExitPrompt {
        draw_exit_prompt(layout.playfield);
    }
}

pub fn draw_title(stars: &ParticleField, width: f32, height: f32) {
    clear_background(rgb_color(stars.environment().background()));
    draw_particles(stars, 0.0, 0.0);

    let title_size = 64.0;
    let title = measure_text(APP_NAME, None, title_size as u16, 1.0);
    draw_text(APP_NAME, (width - title.width) / 2.0, height * 0.4, title_size, WHITE);

    let hint = "Press Enter to start";
    let hint_size = 24.0;
    let hint_dims = measure_text(hint, None, hint_size as u16, 1.0);
    draw_text(hint, (width - hint_dims.width) / 2.0, height * 0.4 + 60.0, hint_size, LIGHTGRAY);
}

fn draw_panel_borders(layout: &FrameLayout) {
    for panel in [layout.status, layout.playfield, layout.room_info, layout.event_log] {
        draw_rectangle_lines(
            panel.x,
            panel.y,
            panel.width,
            panel.height,
            BORDER_THICKNESS,
            BORDER_COLOR,
        );
    }
}

fn draw_status_panel(app_state: &AppState, session: &Session, panel: PanelRect) {
    let status = status_text(app_state.mode, session.config().movement);
    let color = if app_state.mode == AppMode::Defeated { RED } else { WHITE };
    draw_text(&status, panel.x + PANEL_PAD_X, panel.y + PANEL_PAD_Y, 20.0, color);
}

fn draw_playfield(session: &Session, panel: PanelRect, camera: Camera) {
    let room = session.current_room();
    let tile_size = session.config().tile_size;
    let origin_x = panel.x - camera.x;
    let origin_y = panel.y - camera.y;

    let room_w = (room.width as f32 * tile_size).min(panel.width);
    let room_h = (room.height as f32 * tile_size).min(panel.height);
    draw_rectangle(panel.x, panel.y, room_w, room_h, rgb_color(room.environment.background()));

    let (columns, rows) = visible_tiles(room, tile_size, camera, panel);
    for y in rows {
        for x in columns.clone() {
            let tile = room.tile_at(Pos { y: y as i32, x: x as i32 });
            let Some(color) = tile_color(tile) else {
                continue;
            };
            draw_rectangle(
                origin_x + x as f32 * tile_size,
                origin_y + y as f32 * tile_size,
                tile_size,
                tile_size,
                color,
            );
        }
    }

    let player = session.player();
    draw_rectangle(
        origin_x + player.x,
        origin_y + player.y,
        player.width,
        player.height,
        PLAYER_COLOR,
    );

    draw_particles(session.weather(), origin_x, origin_y);
    if room.environment.has_vignette() {
        draw_vignette(PanelRect { x: panel.x, y: panel.y, width: room_w, height: room_h });
    }
}

fn draw_particles(field: &ParticleField, origin_x: f32, origin_y: f32) {
    for particle in field.particles() {
        let x = origin_x + particle.x;
        let y = origin_y + particle.y;
        match particle.kind {
            ParticleKind::Rain => {
                let color = Color { r: 0.68, g: 0.78, b: 0.9, a: particle.alpha };
                draw_line(x, y, x, y + particle.size, 1.0, color);
            }
            ParticleKind::Splash | ParticleKind::Snow | ParticleKind::Star => {
                let color = Color { r: 1.0, g: 1.0, b: 1.0, a: particle.alpha };
                draw_circle(x, y, particle.size / 2.0, color);
            }
            ParticleKind::Fog => {
                let color = Color { r: 0.85, g: 0.87, b: 0.9, a: particle.alpha };
                draw_circle(x, y, particle.size, color);
            }
        }
    }
}

fn draw_vignette(area: PanelRect) {
    for band in 0..VIGNETTE_BANDS {
        let inset = band as f32 * VIGNETTE_BAND_WIDTH;
        let alpha = 0.35 * (1.0 - band as f32 / VIGNETTE_BANDS as f32);
        draw_rectangle_lines(
            area.x + inset,
            area.y + inset,
            (area.width - 2.0 * inset).max(0.0),
            (area.height - 2.0 * inset).max(0.0),
            VIGNETTE_BAND_WIDTH * 2.0,
            Color { r: 0.0, g: 0.0, b: 0.0, a: alpha },
        );
    }
}

fn draw_exit_prompt(panel: PanelRect) {
    draw_rectangle(panel.x, panel.y, panel.width, panel.height, Color::new(0.0, 0.0, 0.0, 0.6));
    let (cx, cy) = panel.center();
    let text = "Leave this run?";
    let dims = measure_text(text, None, 36, 1.0);
    draw_text(text, cx - dims.width / 2.0, cy - 10.0, 36.0, WHITE);
    let hint = "Enter = title screen    Escape = keep exploring";
    let hint_dims = measure_text(hint, None, 20, 1.0);
    draw_text(hint, cx - hint_dims.width / 2.0, cy + 24.0, 20.0, LIGHTGRAY);
}

fn draw_room_info(session: &Session, panel: PanelRect) {
    let text_x = panel.x + PANEL_PAD_X;
    let lines =
        fit_lines_to_panel(&room_info_lines(session), panel.height, LINE_HEIGHT, PANEL_PAD_Y);
    for (index, line) in lines.iter().enumerate() {
        draw_text(line, text_x, panel.y + PANEL_PAD_Y + index as f32 * LINE_HEIGHT, 18.0, WHITE);
    }
}

fn draw_event_log(session: &Session, panel: PanelRect) {
    draw_text("Event log", panel.x + PANEL_PAD_X, panel.y + 20.0, 24.0, YELLOW);
    let events = session.log();
    let start = events.len().saturating_sub(12);

    for (index, event) in events.iter().skip(start).enumerate() {
        let line = event_log_line(event);
        draw_text(
            &line,
            panel.x + PANEL_PAD_X,
            panel.y + 20.0 + (index as f32 + 1.0) * LINE_HEIGHT,
            16.0,
            LIGHTGRAY,
        );
    }
}

fn fit_lines_to_panel(
    lines: &[String],
    panel_height: f32,
    line_step: f32,
    panel_pad_y: f32,
) -> Vec<String> {
    if line_step <= 0.0 {
        return Vec::new();
    }

    let usable_height = (panel_height - panel_pad_y).max(0.0);
    let max_lines = (usable_height / line_step).floor() as usize;
    if lines.len() <= max_lines {
        return lines.to_vec();
    }
    if max_lines == 0 {
        return Vec::new();
    }
    if max_lines == 1 {
        return vec![format!("... and {} more", lines.len())];
    }

    let hidden_count = lines.len() - (max_lines - 1);
    let mut fitted_lines = lines[..max_lines - 1].to_vec();
    fitted_lines.push(format!("... and {hidden_count} more"));
    fitted_lines
}

/// Column and row ranges of tiles that intersect the panel after scrolling by `camera`.
fn visible_tiles(
    room: &Room,
    tile_size: f32,
    camera: Camera,
    panel: PanelRect,
) -> (Range<usize>, Range<usize>) {
    let axis = |offset: f32, extent: f32, count: usize| {
        let first = (offset / tile_size).floor().max(0.0) as usize;
        let last = ((offset + extent) / tile_size).ceil().max(0.0) as usize;
        first.min(count)..last.min(count)
    };
    (axis(camera.x, panel.width, room.width), axis(camera.y, panel.height, room.height))
}

/// Floor is left to the environment background.
fn tile_color(tile: TileKind) -> Option<Color> {
    match tile {
        TileKind::Floor => None,
        TileKind::Wall => Some(Color::from_rgba(0x4a, 0x4a, 0x55, 255)),
        TileKind::Door => Some(Color::from_rgba(0x8b, 0x5a, 0x2b, 255)),
        TileKind::Obstacle => Some(Color::from_rgba(0x6b, 0x6b, 0x6b, 255)),
        TileKind::Item => Some(Color::from_rgba(0x3c, 0xb3, 0x71, 255)),
        TileKind::Monster => Some(Color::from_rgba(0xc0, 0x39, 0x2b, 255)),
        TileKind::Trap => Some(Color::from_rgba(0x8e, 0x44, 0xad, 255)),
    }
}

fn rgb_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.r, rgb.g, rgb.b, 255)
}
