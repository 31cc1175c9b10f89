//! Display ceiling for bar charts.
//!
//! The ceiling snaps to a small step table so threshold markers land on the
//! same column from one run to the next instead of drifting with the exact
//! maximum.

/// Fixed ceilings tried in ascending order.
pub const SCALE_STEPS: [f64; 4] = [50.0, 100.0, 200.0, 500.0];

/// Ceilings above the last step are rounded up to this granularity.
const OVERFLOW_STEP: f64 = 100.0;

/// Smallest step that is `>= max_cost`; past the table, `max_cost` rounded up
/// to the next multiple of 100.
pub fn select_scale(max_cost: f64) -> f64 {
    let max_cost = if max_cost.is_finite() { max_cost.max(0.0) } else { 0.0 };

    SCALE_STEPS
        .iter()
        .copied()
        .find(|step| *step >= max_cost)
        .unwrap_or_else(|| (max_cost / OVERFLOW_STEP).ceil() * OVERFLOW_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_table() {
        assert_eq!(select_scale(0.0), 50.0);
        assert_eq!(select_scale(25.0), 50.0);
        assert_eq!(select_scale(50.0), 50.0);
        assert_eq!(select_scale(50.01), 100.0);
        assert_eq!(select_scale(150.0), 200.0);
        assert_eq!(select_scale(200.0), 200.0);
        assert_eq!(select_scale(499.0), 500.0);
        assert_eq!(select_scale(500.0), 500.0);
    }

    #[test]
    fn test_beyond_table_rounds_to_hundreds() {
        assert_eq!(select_scale(500.01), 600.0);
        assert_eq!(select_scale(812.4), 900.0);
        assert_eq!(select_scale(1200.0), 1200.0);
    }

    #[test]
    fn test_scale_is_monotonic_and_covers_max() {
        let mut previous = 0.0;
        let mut cost = 0.0;
        while cost < 2_000.0 {
            let scale = select_scale(cost);
            assert!(scale >= cost, "scale {} below max {}", scale, cost);
            assert!(scale >= previous, "scale dropped at {}", cost);
            previous = scale;
            cost += 3.7;
        }
    }
}
