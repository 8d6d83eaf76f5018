//! Property tests for the channel and the display rounding

use std::collections::VecDeque;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use proptest::prelude::*;

use soilscope_core::render::round_half_away;
use soilscope_core::telemetry::{Reading, TelemetryChannel};

const CAPACITY: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Publish(u16),
    Consume,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![any::<u16>().prop_map(Op::Publish), Just(Op::Consume)]
}

proptest! {
    #[test]
    fn channel_matches_bounded_fifo_model(ops in prop::collection::vec(op(), 0..200)) {
        let channel: TelemetryChannel<NoopRawMutex, CAPACITY> = TelemetryChannel::new();
        let mut model: VecDeque<u16> = VecDeque::new();

        for op in ops {
            match op {
                Op::Publish(m) => {
                    let accepted = channel.try_publish(Reading::new(None, Some(m)));
                    // Model: drop-on-full, never overwrite
                    let expected = model.len() < CAPACITY;
                    if expected {
                        model.push_back(m);
                    }
                    prop_assert_eq!(accepted, expected);
                }
                Op::Consume => {
                    let got = channel.try_consume().map(|r| r.moisture().unwrap());
                    prop_assert_eq!(got, model.pop_front());
                }
            }
            prop_assert_eq!(channel.len(), model.len());
        }
    }

    #[test]
    fn rounding_is_symmetric(x in -10_000.0f32..10_000.0) {
        prop_assert_eq!(round_half_away(-x), -round_half_away(x));
    }

    #[test]
    fn rounding_stays_within_half(x in -10_000.0f32..10_000.0) {
        let rounded = round_half_away(x) as f64;
        prop_assert!((rounded - x as f64).abs() <= 0.5);
    }
}

#[test]
fn rounding_examples() {
    assert_eq!(round_half_away(2.5), 3);
    assert_eq!(round_half_away(-2.5), -3);
    assert_eq!(round_half_away(2.4), 2);
    assert_eq!(round_half_away(0.49999997), 0);
    assert_eq!(round_half_away(-0.49999997), 0);
}
