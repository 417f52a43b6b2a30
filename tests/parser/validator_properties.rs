//! Property tests for the argument validators.

use proptest::prelude::*;
use skytalk_foundation::{AltitudeEnvelope, BoundaryPolicy};
use skytalk_parser::validators;

fn looks_like_identifier(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars.len() == 7
        && chars[..3].iter().all(char::is_ascii_alphabetic)
        && chars[3..].iter().all(char::is_ascii_digit)
}

proptest! {
    #[test]
    fn identifier_accepts_the_icao_shape(id in "[a-zA-Z]{3}[0-9]{4}") {
        prop_assert_eq!(validators::identifier(&id), Some(id.to_ascii_uppercase()));
    }

    #[test]
    fn identifier_rejects_everything_else(s in "[a-zA-Z0-9 ./]{0,12}") {
        prop_assume!(!looks_like_identifier(&s));
        prop_assert_eq!(validators::identifier(&s), None);
    }

    #[test]
    fn altitude_converts_by_hundreds(step in 0i64..=16) {
        let envelope = AltitudeEnvelope::default();
        let typed = step * envelope.step;
        let token = format!("{typed:02}");
        let metres = validators::altitude(&token, &envelope, BoundaryPolicy::RangeOnly);
        prop_assert_eq!(metres.map(|m| m / 100), Some(typed));
    }

    #[test]
    fn altitude_outside_envelope_is_rejected(value in prop_oneof![-500i64..0, 81i64..500]) {
        let envelope = AltitudeEnvelope::default();
        let token = value.to_string();
        prop_assert_eq!(validators::altitude(&token, &envelope, BoundaryPolicy::RangeOnly), None);
    }

    #[test]
    fn altitude_off_step_is_rejected(value in 0i64..=80) {
        prop_assume!(value % 5 != 0);
        let envelope = AltitudeEnvelope::default();
        let token = format!("{value:02}");
        prop_assert_eq!(validators::altitude(&token, &envelope, BoundaryPolicy::RangeOnly), None);
    }

    #[test]
    fn speed_is_monotonic(a in 0i64..100_000, b in 0i64..100_000) {
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        let fast = validators::speed(&hi.to_string());
        let slow = validators::speed(&lo.to_string());
        prop_assert!(fast >= slow);
    }

    #[test]
    fn in_range_headings_pass_every_policy(value in 0i64..=360) {
        let token = format!("{value:03}");
        for policy in [BoundaryPolicy::Legacy, BoundaryPolicy::RangeOnly, BoundaryPolicy::RangeAndWidth] {
            prop_assert_eq!(validators::heading(&token, policy), Some(value));
        }
    }
}

#[test]
fn legacy_heading_rule_depends_on_width() {
    let legacy = BoundaryPolicy::Legacy;
    assert_eq!(validators::heading("400", legacy), None);
    assert_eq!(validators::heading("4000", legacy), Some(4000));
    assert_eq!(validators::heading("-5", legacy), Some(-5));

    assert_eq!(validators::heading("4000", BoundaryPolicy::RangeOnly), None);
    assert_eq!(validators::heading("90", BoundaryPolicy::RangeAndWidth), None);
}

#[test]
fn landing_pair_shapes() {
    assert!(validators::landing("lhr", "09l"));
    assert!(validators::landing("LHR", "9"));
    assert!(!validators::landing("lhr", "009"));
    assert!(!validators::landing("lh", "09"));
    assert!(!validators::landing("lhr", "09x"));
}
