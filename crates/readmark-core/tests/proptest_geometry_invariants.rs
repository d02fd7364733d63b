//! Property-based invariant tests for scroll geometry.
//!
//! 1. Progress is always within 0..=100 and never NaN.
//! 2. Progress is monotone in the scroll offset.
//! 3. Non-scrollable documents always report 0.
//! 4. `percent_of` never yields a non-finite value.

use readmark_core::geometry::{DocumentMetrics, percent_of};
use proptest::prelude::*;

fn any_length() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6f64..1.0e6,
        Just(0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn progress_is_bounded(y in any_length(), h in any_length(), v in any_length()) {
        let metrics = DocumentMetrics::new(y, h, v);
        let pct = metrics.progress_percent();
        prop_assert!(!pct.is_nan(), "NaN progress for {:?}", metrics);
        prop_assert!((0.0..=100.0).contains(&pct), "out of range {} for {:?}", pct, metrics);
        prop_assert!(metrics.progress() <= 100);
    }
}

proptest! {
    #[test]
    fn progress_is_monotone(
        a in 0.0f64..5000.0,
        b in 0.0f64..5000.0,
        h in 1.0f64..10000.0,
        v in 0.0f64..5000.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let low = DocumentMetrics::new(lo, h, v);
        let high = DocumentMetrics::new(hi, h, v);
        prop_assert!(low.progress_percent() <= high.progress_percent());
        prop_assert!(low.progress() <= high.progress());
    }
}

proptest! {
    #[test]
    fn non_scrollable_is_zero(y in -1.0e4f64..1.0e4, h in 0.0f64..5000.0, extra in 0.0f64..5000.0) {
        let metrics = DocumentMetrics::new(y, h, h + extra);
        prop_assert_eq!(metrics.progress(), 0);
    }
}

proptest! {
    #[test]
    fn percent_of_is_finite(part in any_length(), whole in any_length()) {
        prop_assert!(percent_of(part, whole).is_finite());
    }
}
