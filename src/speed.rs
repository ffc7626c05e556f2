use std::time::Duration;

use crate::config::{BASE_TICKS_PER_SECOND, LENGTH_DIVISOR, MIN_TICKS_PER_SECOND};

/// Returns the tick rate for a snake of `snake_length` segments.
///
/// The rate drops by one tick per second for every [`LENGTH_DIVISOR`]
/// segments and never goes below [`MIN_TICKS_PER_SECOND`].
#[must_use]
pub fn ticks_per_second(snake_length: usize) -> u32 {
    let reduction = u32::try_from(snake_length / LENGTH_DIVISOR).unwrap_or(u32::MAX);
    BASE_TICKS_PER_SECOND
        .saturating_sub(reduction)
        .max(MIN_TICKS_PER_SECOND)
}

/// Returns the delay between ticks, in milliseconds.
#[must_use]
pub fn tick_interval_ms(snake_length: usize) -> u64 {
    1000 / u64::from(ticks_per_second(snake_length))
}

/// Returns the delay between ticks as a [`Duration`].
#[must_use]
pub fn tick_interval(snake_length: usize) -> Duration {
    Duration::from_millis(tick_interval_ms(snake_length))
}

#[cfg(test)]
mod tests {
    use super::{tick_interval_ms, ticks_per_second};
    use crate::config::{BASE_TICKS_PER_SECOND, MIN_TICKS_PER_SECOND};

    #[test]
    fn short_snake_runs_at_base_rate() {
        assert_eq!(ticks_per_second(1), BASE_TICKS_PER_SECOND);
        assert_eq!(ticks_per_second(4), BASE_TICKS_PER_SECOND);
        assert_eq!(tick_interval_ms(1), 100);
    }

    #[test]
    fn rate_steps_down_every_five_segments() {
        assert_eq!(ticks_per_second(5), 9);
        assert_eq!(ticks_per_second(9), 9);
        assert_eq!(ticks_per_second(10), 8);
        assert_eq!(tick_interval_ms(10), 125);
    }

    #[test]
    fn rate_is_clamped_at_floor() {
        assert_eq!(ticks_per_second(35), MIN_TICKS_PER_SECOND);
        assert_eq!(ticks_per_second(400), MIN_TICKS_PER_SECOND);
        assert_eq!(ticks_per_second(usize::MAX), MIN_TICKS_PER_SECOND);
        assert_eq!(tick_interval_ms(400), 333);
    }

    #[test]
    fn rate_never_increases_with_length() {
        let mut previous = ticks_per_second(0);
        for length in 1..200 {
            let rate = ticks_per_second(length);
            assert!(rate <= previous, "rate rose at length {length}");
            previous = rate;
        }
    }
}
