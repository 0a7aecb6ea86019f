use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// `Thu, 01 Jan 1970 00:00:01 GMT`, the format browsers expect in a cookie's `expires` attribute.
const COOKIE_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

pub(crate) trait CookieDateExt {
    /// Formats the instant, converted to UTC, as a cookie date.
    fn to_cookie_date(self) -> Result<String, time::error::Format>;
}

impl CookieDateExt for OffsetDateTime {
    fn to_cookie_date(self) -> Result<String, time::error::Format> {
        self.to_offset(UtcOffset::UTC).format(COOKIE_DATE)
    }
}

/// Inverse of [`CookieDateExt::to_cookie_date`]. Whitespace around the input is ignored.
pub(crate) fn parse_cookie_date(input: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(input.trim(), COOKIE_DATE)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}
