use proptest::prelude::*;
use sheetviz::core::{CellValue, to_number};

proptest! {
    #[test]
    fn coercion_is_total_over_arbitrary_text(s in "\\PC*") {
        let result = to_number(&CellValue::Text(s));
        prop_assert!(result.is_finite());
    }

    #[test]
    fn coercion_is_total_over_arbitrary_numbers(n in proptest::num::f64::ANY) {
        let result = to_number(&CellValue::Number(n));
        prop_assert!(result.is_finite());
        if n.is_finite() {
            prop_assert_eq!(result, n);
        }
    }

    #[test]
    fn plain_decimal_strings_round_trip(n in -1_000_000.0f64..1_000_000.0) {
        let text = format!("{n}");
        let result = to_number(&CellValue::Text(text));
        prop_assert!((result - n).abs() <= 1e-9 * n.abs().max(1.0));
    }

    #[test]
    fn currency_noise_does_not_change_the_value(n in 0.0f64..1_000_000.0) {
        let text = format!("${n} USD");
        let result = to_number(&CellValue::Text(text));
        prop_assert!((result - n).abs() <= 1e-9 * n.abs().max(1.0));
    }
}
