/// Rating assigned to every item at creation.
///
/// The absolute value is arbitrary; only rating gaps matter to the
/// expected-score formula. 1400 keeps ratings comfortably positive over
/// long losing streaks.
pub const DEFAULT_RATING: i32 = 1400;

/// Standard K-factor: the maximum rating points transferable in a single
/// comparison. Bounds volatility, so an upset against a much stronger
/// opponent moves each side by at most this much.
pub const K_FACTOR: f64 = 32.0;

/// Denominator of the logistic expected-score formula. A rating gap of
/// exactly this size corresponds to 10:1 expected odds for the stronger
/// side.
pub const RATING_SCALE: f64 = 400.0;

/// How many decisions between milestone notifications. The session only
/// exposes the running total; reacting to it (toast, status line) is the
/// event sink's job.
pub const MILESTONE_INTERVAL: usize = 10;
