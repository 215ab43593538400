// Time Provider Port (for testability)

use chrono::NaiveDate;

/// Time provider interface (allows fixed dates in tests)
pub trait TimeProvider: Send + Sync {
    /// Current calendar date in the user's local time zone
    fn today(&self) -> NaiveDate;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Fixed date (tests, backfilling old paper logs)
pub struct FixedTimeProvider(pub NaiveDate);

impl TimeProvider for FixedTimeProvider {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
