//! Layout model for the game's on-screen panels.

use taffy::TaffyTree;
use taffy::prelude::*;

pub struct LayoutNodes {
    root: NodeId,
    status: NodeId,
    main_row: NodeId,
    playfield: NodeId,
    side_col: NodeId,
    room_info: NodeId,
    event_log: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

pub struct FrameLayout {
    pub status: PanelRect,
    pub playfield: PanelRect,
    pub room_info: PanelRect,
    pub event_log: PanelRect,
}

pub fn setup_layout(taffy: &mut TaffyTree<()>) -> LayoutNodes {
    let status = taffy
        .new_leaf(Style {
            size: Size { width: percent(1.0), height: length(40.0) },
            margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(16.0) },
            ..Default::default()
        })
        .expect("status node");
    let playfield = taffy
        .new_leaf(Style {
            flex_grow: 3.0,
            margin: taffy::Rect { left: zero(), right: length(16.0), top: zero(), bottom: zero() },
            ..Default::default()
        })
        .expect("playfield node");
    let room_info = taffy
        .new_leaf(Style {
            size: Size { width: auto(), height: length(170.0) },
            flex_shrink: 0.0,
            margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(16.0) },
            ..Default::default()
        })
        .expect("room info node");
    let event_log =
        taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() }).expect("event log node");
    let side_col = taffy
        .new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                ..Default::default()
            },
            &[room_info, event_log],
        )
        .expect("side column node");
    let main_row = taffy
        .new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Row,
                size: Size { width: percent(1.0), height: percent(1.0) },
                flex_grow: 1.0,
                ..Default::default()
            },
            &[playfield, side_col],
        )
        .expect("main row node");
    let root = taffy
        .new_with_children(
            Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                size: Size { width: percent(1.0), height: percent(1.0) },
                padding: taffy::Rect {
                    left: length(16.0),
                    right: length(16.0),
                    top: length(16.0),
                    bottom: length(16.0),
                },
                ..Default::default()
            },
            &[status, main_row],
        )
        .expect("root node");
    LayoutNodes { root, status, main_row, playfield, side_col, room_info, event_log }
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> FrameLayout {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size).expect("compute layout");

    let l_root = taffy.layout(nodes.root).expect("root layout");
    let l_status = taffy.layout(nodes.status).expect("status layout");
    let l_main = taffy.layout(nodes.main_row).expect("main layout");
    let l_play = taffy.layout(nodes.playfield).expect("playfield layout");
    let l_side = taffy.layout(nodes.side_col).expect("side layout");
    let l_info = taffy.layout(nodes.room_info).expect("room info layout");
    let l_event = taffy.layout(nodes.event_log).expect("event layout");

    FrameLayout {
        status: panel_rect(l_status, &[l_root]),
        playfield: panel_rect(l_play, &[l_root, l_main]),
        room_info: panel_rect(l_info, &[l_root, l_main, l_side]),
        event_log: panel_rect(l_event, &[l_root, l_main, l_side]),
    }
}

fn panel_rect(layout: &taffy::Layout, parents: &[&taffy::Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}
