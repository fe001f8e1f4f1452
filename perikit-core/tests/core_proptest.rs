//! Property tests for the echo-cycle state machine and colour math

use perikit_core::color::Color;
use perikit_core::state::{EchoEvent, EchoPhase};
use proptest::prelude::*;

fn any_event() -> impl Strategy<Value = EchoEvent> {
    prop_oneof![
        Just(EchoEvent::Trigger),
        Just(EchoEvent::EchoRise),
        Just(EchoEvent::EchoFall),
        Just(EchoEvent::Expire),
    ]
}

proptest! {
    /// Whatever the event order, a trigger is only accepted from idle and
    /// expiry always returns to idle.
    #[test]
    fn echo_phase_sequences(events in prop::collection::vec(any_event(), 0..64)) {
        let mut phase = EchoPhase::Idle;

        for event in events {
            let next = phase.transition(event);

            match event {
                EchoEvent::Trigger => {
                    prop_assert_eq!(next.is_some(), !phase.is_busy());
                }
                EchoEvent::Expire => {
                    if phase.is_busy() {
                        prop_assert_eq!(next, Some(EchoPhase::Idle));
                    } else {
                        prop_assert_eq!(next, None);
                    }
                }
                EchoEvent::EchoFall => {
                    prop_assert_eq!(next.is_some(), phase == EchoPhase::EchoHigh);
                }
                EchoEvent::EchoRise => {
                    prop_assert_eq!(next.is_some(), phase.is_busy());
                }
            }

            if let Some(next) = next {
                phase = next;
            }
        }
    }

    #[test]
    fn hsv_components_in_range(
        hue in -4.0f32..4.0,
        saturation in -0.5f32..1.5,
        value in -0.5f32..1.5,
    ) {
        let c = Color::from_hsv(hue, saturation, value);
        let v = value.clamp(0.0, 1.0);

        for component in [c.r, c.g, c.b] {
            prop_assert!((0.0..=1.0).contains(&component));
            prop_assert!(component <= v + 1e-6);
        }
        // The brightest channel always carries the value
        let max = c.r.max(c.g).max(c.b);
        prop_assert!((max - v).abs() < 1e-5);
    }

    #[test]
    fn scale_never_leaves_unit_range(r in 0.0f32..=1.0, g in 0.0f32..=1.0, b in 0.0f32..=1.0, k in 0.0f32..4.0) {
        let c = Color::new(r, g, b).scale(k);
        for component in [c.r, c.g, c.b] {
            prop_assert!((0.0..=1.0).contains(&component));
        }
    }
}
