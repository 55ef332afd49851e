//! Avatar integration
//!
//! Semi-implicit Euler, one step per frame. Every accelerative and velocity
//! term is multiplied by the gravity sign so inverted play mirrors normal play.

use super::state::{Avatar, Gravity};
use crate::consts::*;

/// Whether a flap request would be honored right now
///
/// The avatar must already be falling past a minimum speed, which stops
/// flap-spamming from holding it in place.
#[inline]
pub fn can_flap(avatar: &Avatar, gravity: Gravity) -> bool {
    avatar.velocity * gravity.sign() >= FLAP_MIN_FALL_SPEED
}

/// Advance the avatar by `dt` seconds. Returns true if a flap was honored.
pub fn integrate(avatar: &mut Avatar, gravity: Gravity, flap_requested: bool, dt: f32) -> bool {
    let g = gravity.sign();
    let flapped = flap_requested && can_flap(avatar, gravity);

    if flapped {
        avatar.acceleration = 0.0;
        avatar.velocity = FLAP_VELOCITY;
    } else {
        avatar.acceleration += GRAVITY * dt * g;
    }
    avatar.acceleration = avatar.acceleration.clamp(-GRAVITY, GRAVITY);

    avatar.velocity += avatar.acceleration * dt * g;
    avatar.position += avatar.velocity * dt * g;

    flapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScreenSize;
    use proptest::prelude::*;

    fn avatar_at(position: f32, velocity: f32, acceleration: f32) -> Avatar {
        Avatar {
            position,
            velocity,
            acceleration,
            has_collided: false,
        }
    }

    #[test]
    fn test_free_fall_one_second_from_center() {
        let mut avatar = Avatar::centered(ScreenSize::default());
        let flapped = integrate(&mut avatar, Gravity::Normal, false, 1.0);

        assert!(!flapped);
        assert_eq!(avatar.acceleration, 100.0);
        assert_eq!(avatar.velocity, 100.0);
        assert_eq!(avatar.position, 24.0 + 100.0);
    }

    #[test]
    fn test_acceleration_caps_at_gravity() {
        let mut avatar = avatar_at(24.0, 0.0, 90.0);
        integrate(&mut avatar, Gravity::Normal, false, 0.5);
        assert_eq!(avatar.acceleration, GRAVITY);
    }

    #[test]
    fn test_flap_rejected_while_rising() {
        let mut avatar = avatar_at(24.0, -5.0, 0.0);
        let flapped = integrate(&mut avatar, Gravity::Normal, true, 0.1);

        assert!(!flapped);
        // Unforced accumulation: a = 10, v = -5 + 1 = -4
        assert!((avatar.acceleration - 10.0).abs() < 1e-5);
        assert!((avatar.velocity + 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_flap_accepted_at_threshold() {
        let mut avatar = avatar_at(24.0, FLAP_MIN_FALL_SPEED, 50.0);
        let flapped = integrate(&mut avatar, Gravity::Normal, true, 0.1);

        assert!(flapped);
        assert_eq!(avatar.acceleration, 0.0);
        assert_eq!(avatar.velocity, FLAP_VELOCITY);
        assert!((avatar.position - (24.0 - 2.5)).abs() < 1e-5);
    }

    #[test]
    fn test_inverted_gravity_mirrors_free_fall() {
        let mut normal = avatar_at(24.0, 0.0, 0.0);
        let mut inverted = avatar_at(24.0, 0.0, 0.0);
        for _ in 0..10 {
            integrate(&mut normal, Gravity::Normal, false, 0.05);
            integrate(&mut inverted, Gravity::Inverted, false, 0.05);
        }
        let fell = normal.position - 24.0;
        let rose = 24.0 - inverted.position;
        assert!(fell > 0.0);
        assert!((fell - rose).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dt_changes_nothing_without_flap() {
        let mut avatar = avatar_at(10.0, 3.0, 4.0);
        integrate(&mut avatar, Gravity::Normal, false, 0.0);
        assert_eq!(avatar, avatar_at(10.0, 3.0, 4.0));
    }

    fn gravity_strategy() -> impl Strategy<Value = Gravity> {
        prop_oneof![Just(Gravity::Normal), Just(Gravity::Inverted)]
    }

    proptest! {
        #[test]
        fn prop_acceleration_bounded(
            position in -100.0f32..200.0,
            velocity in -500.0f32..500.0,
            acceleration in -500.0f32..500.0,
            dt in 0.0f32..5.0,
            flap in any::<bool>(),
            gravity in gravity_strategy(),
        ) {
            let mut avatar = avatar_at(position, velocity, acceleration);
            integrate(&mut avatar, gravity, flap, dt);
            prop_assert!(avatar.acceleration.abs() <= GRAVITY);
        }

        #[test]
        fn prop_flap_accepted_iff_falling_fast_enough(
            velocity in -200.0f32..200.0,
            acceleration in -100.0f32..100.0,
            dt in 0.0f32..1.0,
            gravity in gravity_strategy(),
        ) {
            let mut avatar = avatar_at(24.0, velocity, acceleration);
            let expected = velocity * gravity.sign() >= GRAVITY / 10.0;
            let flapped = integrate(&mut avatar, gravity, true, dt);
            prop_assert_eq!(flapped, expected);
            if flapped {
                prop_assert_eq!(avatar.acceleration, 0.0);
                prop_assert_eq!(avatar.velocity, FLAP_VELOCITY);
            } else {
                let a = (acceleration + GRAVITY * dt * gravity.sign()).clamp(-GRAVITY, GRAVITY);
                prop_assert_eq!(avatar.acceleration, a);
            }
        }
    }
}
