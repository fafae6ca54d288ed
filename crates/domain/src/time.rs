//! Time and timestamp helpers.

use chrono::Utc;

/// Milliseconds since the Unix epoch, the unit of every cache-busting
/// parameter sent to the device.
pub type Millis = i64;

/// Return the current UTC time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> Millis {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_millis() {
        let before = Utc::now().timestamp_millis();
        let ts = now_millis();
        let after = Utc::now().timestamp_millis();
        assert!(ts >= before);
        assert!(ts <= after);
    }
}
