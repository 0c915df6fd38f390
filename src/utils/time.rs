use chrono::{Local, Timelike};

/// Monotonic milliseconds since device boot.
pub type Millis = u64;

/// Milliseconds between `since` and `now`, zero if the clock reads backwards.
pub fn elapsed(now: Millis, since: Millis) -> Millis {
    now.saturating_sub(since)
}

/// Current local wall-clock hour (0-23).
pub fn local_hour() -> u32 {
    Local::now().hour()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_saturates() {
        assert_eq!(elapsed(1_500, 1_000), 500);
        assert_eq!(elapsed(1_000, 1_500), 0);
    }

    #[test]
    fn test_local_hour_in_range() {
        assert!(local_hour() < 24);
    }
}
