//! Duration formatting shared by activities and report rows.

/// Formats a duration given in minutes as `H:MM h` (e.g. `1:15 h`).
///
/// Hours and minutes are rounded independently: hours come from flooring the
/// fractional hour count, the remainder from truncating the minute count to
/// an integer before taking it modulo 60. The two roundings can disagree near
/// bucket boundaries for fractional aggregate sums (59.999 minutes renders as
/// `0:59 h`), which is why they are kept separate.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_minutes_as_duration(minutes: f64) -> String {
    let hours = (minutes / 60.0).floor() as i64;
    let remainder = (minutes as i64) % 60;
    format!("{hours}:{remainder:02} h")
}
