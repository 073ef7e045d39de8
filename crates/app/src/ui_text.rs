//! Text formatting for the status bar, room panel, and event log entries.

use roomwalk_app::app_loop::AppMode;
use roomwalk_app::{direction_label, format_seed, format_snapshot_hash, status_code};
use roomwalk_core::{MovementModel, Pos, RoomCoord, Session, SessionEvent};

pub fn status_text(mode: AppMode, movement: MovementModel) -> String {
    match mode {
        AppMode::Title => "Press Enter to start, Escape to quit".to_string(),
        AppMode::Playing => match movement {
            MovementModel::Dungeon => "Arrows/WASD to move, Escape for menu".to_string(),
            MovementModel::Platformer => {
                "Left/Right to run, Up/Space to jump, Escape for menu".to_string()
            }
        },
        AppMode::ExitPrompt => "Return to the title screen? (Enter=yes, Escape=no)".to_string(),
        AppMode::Defeated => "A monster got you. (R=new run, Escape=title)".to_string(),
    }
}

pub fn room_info_lines(session: &Session) -> Vec<String> {
    let room = session.current_room();
    let player = session.player();
    let mut lines = vec![
        format!("Room: {}", coord_text(session.current_coord())),
        format!("Weather: {}", room.environment.label()),
        format!("Seed: {}", format_seed(session.seed())),
        format!("Tick: {}", session.tick_count()),
        format!("Items: {}", session.items_collected()),
        format!("Rooms seen: {}", session.rooms_generated()),
        format!("Status: {}", status_code(session.status())),
    ];
    if let Some(penalty) = player.penalty {
        lines.push(format!("Slowed until tick {}", penalty.until_tick));
    }
    lines.push(format!("Snapshot: {}", format_snapshot_hash(session.snapshot_hash())));
    lines
}

pub fn event_log_line(event: &SessionEvent) -> String {
    match event {
        SessionEvent::RoomEntered { coord, via, first_visit } => {
            let verb = if *first_visit { "discovered" } else { "returned to" };
            format!("{verb} room {} via the {} door", coord_text(*coord), direction_label(*via))
        }
        SessionEvent::ItemCollected { tile, .. } => {
            format!("picked up an item at {}", pos_text(*tile))
        }
        SessionEvent::TrapTriggered { tile, until_tick, .. } => {
            format!("trap at {} slows you until tick {until_tick}", pos_text(*tile))
        }
        SessionEvent::SpeedRestored { tick } => format!("speed restored at tick {tick}"),
        SessionEvent::Landed { tick } => format!("landed at tick {tick}"),
        SessionEvent::PlayerDefeated { coord, .. } => {
            format!("defeated by a monster in room {}", coord_text(*coord))
        }
    }
}

fn coord_text(coord: RoomCoord) -> String {
    format!("({}, {})", coord.x, coord.y)
}

fn pos_text(pos: Pos) -> String {
    format!("{},{}", pos.x, pos.y)
}
