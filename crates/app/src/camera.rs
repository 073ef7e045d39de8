//! Smoothed camera that keeps the player inside the playfield panel.

pub const FOLLOW_LERP: f32 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    /// Room-pixel coordinate shown at the panel's top-left corner.
    pub x: f32,
    pub y: f32,
}

impl Camera {
    /// Eases towards centring `(target_x, target_y)` in a `view` sized window over a `world`
    /// sized room. Axes where the room fits inside the view stay pinned at zero.
    pub fn follow(&mut self, target: (f32, f32), view: (f32, f32), world: (f32, f32)) {
        self.x = ease_axis(self.x, target.0, view.0, world.0);
        self.y = ease_axis(self.y, target.1, view.1, world.1);
    }

    /// Jumps straight to the clamped target, used after a room change.
    pub fn snap(&mut self, target: (f32, f32), view: (f32, f32), world: (f32, f32)) {
        self.x = clamp_axis(target.0 - view.0 / 2.0, view.0, world.0);
        self.y = clamp_axis(target.1 - view.1 / 2.0, view.1, world.1);
    }
}

fn ease_axis(current: f32, target: f32, view: f32, world: f32) -> f32 {
    let desired = clamp_axis(target - view / 2.0, view, world);
    clamp_axis(current + (desired - current) * FOLLOW_LERP, view, world)
}

fn clamp_axis(value: f32, view: f32, world: f32) -> f32 {
    if world <= view {
        return 0.0;
    }
    value.clamp(0.0, world - view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_rooms_never_scroll() {
        let mut camera = Camera::default();
        camera.follow((700.0, 300.0), (1000.0, 600.0), (800.0, 480.0));
        assert_eq!(camera, Camera { x: 0.0, y: 0.0 });
    }

    #[test]
    fn follow_moves_a_tenth_of_the_way() {
        let mut camera = Camera::default();
        camera.follow((700.0, 0.0), (400.0, 480.0), (800.0, 480.0));
        // Desired x is 700 - 200 = 500.
        assert!((camera.x - 50.0).abs() < 1e-4);
        assert_eq!(camera.y, 0.0);
    }

    #[test]
    fn each_step_closes_a_tenth_of_the_remaining_gap() {
        let mut camera = Camera::default();
        for _ in 0..2 {
            camera.follow((700.0, 0.0), (400.0, 480.0), (800.0, 480.0));
        }
        // 500 * (1 - 0.9^2)
        assert!((camera.x - 95.0).abs() < 1e-3);
    }

    #[test]
    fn snap_clamps_to_the_room_edge() {
        let mut camera = Camera::default();
        camera.snap((790.0, 10.0), (400.0, 300.0), (800.0, 480.0));
        assert_eq!(camera, Camera { x: 400.0, y: 0.0 });
    }
}
