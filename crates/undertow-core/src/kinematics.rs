//! Degree-based motion model shared by every moving entity.
//!
//! # Conventions
//!
//! Headings are degrees, 0° along +x, increasing counter-clockwise. The
//! world is screen-space: y grows downward, so a positive heading moves an
//! entity toward smaller y. Stored headings are never normalised; only the
//! bearing computation folds angles into `[0, 360)`, and it does so on local
//! copies.
//!
//! # Per-tick order
//!
//! Control effects (thrust, turns) are applied first, then [`KinematicBody::integrate`]
//! decays speed by friction and advances the position with the post-friction
//! speed. The order is observable in trajectories.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fraction of the acceleration step added to speed by every turn command.
pub const TURN_IMPULSE_FACTOR: f32 = 0.05;

/// Moves `position` by `speed` along `heading` (degrees).
///
/// Pure; a zero speed leaves the position untouched and a negative speed
/// moves backwards along the heading.
///
/// # Example
///
/// ```
/// use undertow_core::kinematics::advance;
/// use glam::Vec2;
///
/// let moved = advance(Vec2::ZERO, 10.0, 90.0);
/// assert!(moved.x.abs() < 1e-4);
/// assert!((moved.y + 10.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn advance(position: Vec2, speed: f32, heading: f32) -> Vec2 {
    let radians = heading.to_radians();
    Vec2::new(
        position.x + speed * radians.cos(),
        position.y - speed * radians.sin(),
    )
}

/// Folds an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f32) -> f32 {
    let folded = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// Absolute bearing from `from` to `to`, in `[0, 360)`.
///
/// Returns `None` when the two points coincide, since a zero-length
/// displacement has no direction.
#[must_use]
pub fn bearing(from: Vec2, to: Vec2) -> Option<f32> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    if dx == 0.0 && dy == 0.0 {
        return None;
    }

    // Angle of the raw displacement, before the y axis is flipped.
    let raw = if dx == 0.0 {
        if dy > 0.0 {
            90.0
        } else {
            -90.0
        }
    } else {
        (dy / dx).atan().to_degrees()
    };

    let absolute = if dx < 0.0 && dy < 0.0 {
        180.0 - raw
    } else if dx > 0.0 && dy < 0.0 {
        -raw
    } else if dx < 0.0 && dy > 0.0 {
        180.0 - raw
    } else if dx > 0.0 && dy > 0.0 {
        270.0 + (90.0 - raw)
    } else if dx < 0.0 {
        // due west
        180.0
    } else {
        // due east, or straight up/down the screen
        -raw
    };

    Some(normalize_degrees(absolute))
}

/// Angle the bearing to `to` lies counter-clockwise of `heading`, in `[0, 360)`.
///
/// Values up to 180 mean the target is to the left, values above 180 mean it
/// is to the right. Coincident positions yield `0.0`.
///
/// # Example
///
/// ```
/// use undertow_core::kinematics::bearing_error;
/// use glam::Vec2;
///
/// // Target straight up the screen while facing +x: a quarter turn left.
/// let error = bearing_error(Vec2::ZERO, 0.0, Vec2::new(0.0, -50.0));
/// assert!((error - 90.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn bearing_error(from: Vec2, heading: f32, to: Vec2) -> f32 {
    match bearing(from, to) {
        Some(absolute) => normalize_degrees(absolute - normalize_degrees(heading)),
        None => 0.0,
    }
}

/// Direction of a single turn command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnDirection {
    /// Counter-clockwise; heading increases.
    Left,
    /// Clockwise; heading decreases.
    Right,
}

/// Thrust and turn authority of a body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handling {
    /// Speed added or removed by one thrust command.
    pub acceleration_step: f32,
    /// Degrees of heading change per turn command.
    pub agility: f32,
}

/// Physical state of a vessel or torpedo.
///
/// Speed is signed: a negative value moves the body backwards along its
/// heading. Friction is applied exactly once per tick through
/// [`integrate`](Self::integrate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// World position.
    pub position: Vec2,
    /// Heading in degrees, unbounded.
    pub heading: f32,
    /// Signed scalar speed, distance per tick.
    pub speed: f32,
    /// Speed change per thrust command.
    pub acceleration_step: f32,
    /// Heading change per turn command, degrees.
    pub agility: f32,
    /// Fractional speed decay per tick, in (0, 1).
    pub friction: f32,
}

impl KinematicBody {
    /// Creates a body at `position` facing `heading` with the given speed.
    #[must_use]
    pub fn new(position: Vec2, heading: f32, speed: f32, handling: Handling, friction: f32) -> Self {
        Self {
            position,
            heading,
            speed,
            acceleration_step: handling.acceleration_step,
            agility: handling.agility,
            friction,
        }
    }

    /// Adds one acceleration step to speed.
    pub fn accelerate(&mut self) {
        self.speed += self.acceleration_step;
    }

    /// Removes one acceleration step from speed.
    pub fn decelerate(&mut self) {
        self.speed -= self.acceleration_step;
    }

    /// Applies one turn command.
    ///
    /// Either direction also adds a small forward impulse of
    /// `acceleration_step * TURN_IMPULSE_FACTOR`.
    pub fn turn(&mut self, direction: TurnDirection) {
        self.speed += self.acceleration_step * TURN_IMPULSE_FACTOR;
        match direction {
            TurnDirection::Left => self.heading += self.agility,
            TurnDirection::Right => self.heading -= self.agility,
        }
    }

    /// Decays speed by the friction coefficient.
    pub fn apply_friction(&mut self) {
        self.speed -= self.speed * self.friction;
    }

    /// Ends the tick: friction first, then advance along the current heading.
    pub fn integrate(&mut self) {
        self.apply_friction();
        self.position = advance(self.position, self.speed, self.heading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn body() -> KinematicBody {
        KinematicBody::new(
            Vec2::ZERO,
            0.0,
            0.0,
            Handling {
                acceleration_step: 0.15,
                agility: 1.0,
            },
            0.05,
        )
    }

    mod advance_tests {
        use super::*;

        #[test]
        fn zero_speed_stays_put() {
            let p = Vec2::new(12.5, -3.0);
            for heading in [0.0, 33.0, 90.0, 181.0, -270.0, 7200.5] {
                assert_eq!(advance(p, 0.0, heading), p);
            }
        }

        #[test]
        fn east_increases_x() {
            let moved = advance(Vec2::new(1.0, 1.0), 5.0, 0.0);
            assert!((moved.x - 6.0).abs() < EPS);
            assert!((moved.y - 1.0).abs() < EPS);
        }

        #[test]
        fn positive_heading_moves_up_the_screen() {
            let moved = advance(Vec2::ZERO, 4.0, 90.0);
            assert!(moved.x.abs() < EPS);
            assert!((moved.y + 4.0).abs() < EPS);
        }

        #[test]
        fn negative_speed_reverses() {
            let moved = advance(Vec2::ZERO, -2.0, 0.0);
            assert!((moved.x + 2.0).abs() < EPS);
        }

        #[test]
        fn opposite_heading_undoes_displacement() {
            let start = Vec2::new(64.0, 64.0);
            let out = advance(start, 7.5, 30.0);
            let back = advance(out, 7.5, 210.0);
            assert!(back.distance(start) < EPS);
        }
    }

    mod bearing_tests {
        use super::*;

        fn error_to(target: Vec2) -> f32 {
            bearing_error(Vec2::ZERO, 0.0, target)
        }

        #[test]
        fn axis_directions() {
            assert!((error_to(Vec2::new(10.0, 0.0)) - 0.0).abs() < EPS);
            assert!((error_to(Vec2::new(0.0, -10.0)) - 90.0).abs() < EPS);
            assert!((error_to(Vec2::new(-10.0, 0.0)) - 180.0).abs() < EPS);
            assert!((error_to(Vec2::new(0.0, 10.0)) - 270.0).abs() < EPS);
        }

        #[test]
        fn open_quadrants() {
            assert!((error_to(Vec2::new(5.0, -5.0)) - 45.0).abs() < EPS);
            assert!((error_to(Vec2::new(-5.0, -5.0)) - 135.0).abs() < EPS);
            assert!((error_to(Vec2::new(-5.0, 5.0)) - 225.0).abs() < EPS);
            assert!((error_to(Vec2::new(5.0, 5.0)) - 315.0).abs() < EPS);
        }

        #[test]
        fn off_diagonal_quadrant_values() {
            // 30 degrees above the +x axis
            let target = Vec2::new(3.0_f32.sqrt(), -1.0);
            assert!((error_to(target) - 30.0).abs() < EPS);
            // 30 degrees below the -x axis
            let target = Vec2::new(-(3.0_f32.sqrt()), 1.0);
            assert!((error_to(target) - 210.0).abs() < EPS);
        }

        #[test]
        fn coincident_positions_yield_zero() {
            let p = Vec2::new(40.0, 40.0);
            assert_eq!(bearing(p, p), None);
            assert_eq!(bearing_error(p, 123.0, p), 0.0);
        }

        #[test]
        fn heading_is_subtracted() {
            // Target due north, facing north: no error.
            assert!(bearing_error(Vec2::ZERO, 90.0, Vec2::new(0.0, -1.0)).abs() < EPS);
            // Facing 80: target is 10 to the left
            let err = bearing_error(Vec2::ZERO, 80.0, Vec2::new(0.0, -1.0));
            assert!((err - 10.0).abs() < EPS);
            // Facing 100: target is 10 to the right
            let err = bearing_error(Vec2::ZERO, 100.0, Vec2::new(0.0, -1.0));
            assert!((err - 350.0).abs() < EPS);
        }

        #[test]
        fn unnormalised_headings_fold() {
            let target = Vec2::new(10.0, 0.0);
            let a = bearing_error(Vec2::ZERO, 45.0, target);
            let b = bearing_error(Vec2::ZERO, 45.0 + 720.0, target);
            let c = bearing_error(Vec2::ZERO, 45.0 - 1080.0, target);
            assert!((a - 315.0).abs() < EPS);
            assert!((a - b).abs() < EPS);
            assert!((a - c).abs() < EPS);
        }

        #[test]
        fn bearing_is_relative_to_source() {
            let from = Vec2::new(100.0, 100.0);
            let b = bearing(from, Vec2::new(100.0, 50.0)).unwrap();
            assert!((b - 90.0).abs() < EPS);
        }

        #[test]
        fn bearing_error_does_not_touch_inputs() {
            let heading = -725.0;
            let _ = bearing_error(Vec2::ZERO, heading, Vec2::ONE);
            assert_eq!(heading, -725.0);
        }

        #[test]
        fn normalize_range() {
            assert_eq!(normalize_degrees(0.0), 0.0);
            assert_eq!(normalize_degrees(360.0), 0.0);
            assert!((normalize_degrees(-90.0) - 270.0).abs() < EPS);
            assert!((normalize_degrees(725.0) - 5.0).abs() < EPS);
            assert!(normalize_degrees(-1e-7) < 360.0);
        }
    }

    mod body_tests {
        use super::*;

        #[test]
        fn thrust_steps() {
            let mut b = body();
            b.accelerate();
            b.accelerate();
            b.decelerate();
            assert!((b.speed - 0.15).abs() < 1e-6);
        }

        #[test]
        fn turns_change_heading_and_nudge_speed() {
            let mut b = body();
            b.turn(TurnDirection::Left);
            assert!((b.heading - 1.0).abs() < 1e-6);
            assert!((b.speed - 0.0075).abs() < 1e-6);

            b.turn(TurnDirection::Right);
            b.turn(TurnDirection::Right);
            assert!((b.heading + 1.0).abs() < 1e-6);
            assert!((b.speed - 0.0225).abs() < 1e-6);
        }

        #[test]
        fn friction_shrinks_without_flipping_sign() {
            let mut b = body();
            b.speed = 2.0;
            b.apply_friction();
            assert!((b.speed - 1.9).abs() < 1e-6);

            b.speed = -2.0;
            b.apply_friction();
            assert!((b.speed + 1.9).abs() < 1e-6);
        }

        #[test]
        fn integrate_uses_post_friction_speed() {
            let mut b = body();
            b.speed = 10.0;
            b.integrate();
            assert!((b.speed - 9.5).abs() < 1e-5);
            assert!((b.position.x - 9.5).abs() < 1e-4);
        }

        #[test]
        fn heading_not_normalised_on_write() {
            let mut b = body();
            b.agility = 100.0;
            for _ in 0..5 {
                b.turn(TurnDirection::Left);
            }
            assert!((b.heading - 500.0).abs() < 1e-4);
        }
    }
}
