use serde::{de::IgnoredAny, Deserialize, Deserializer};
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime,
};

///
/// Creation time as sent by the API.
///
/// Dates arrive as ISO strings or as epoch milliseconds.
/// Values that cannot be interpreted are kept as [Timestamp::Invalid]
/// instead of failing the whole response.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timestamp {
    #[default]
    Missing,
    Invalid,
    At(OffsetDateTime),
}

impl Timestamp {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if let Ok(datetime) = OffsetDateTime::parse(text, &Rfc3339) {
            return Self::At(datetime);
        }

        // Offset-less values are treated as UTC
        let datetime_formats: [&[BorrowedFormatItem<'_>]; 3] = [
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        ];
        for format in datetime_formats {
            if let Ok(datetime) = PrimitiveDateTime::parse(text, format) {
                return Self::At(datetime.assume_utc());
            }
        }

        match Date::parse(text, format_description!("[year]-[month]-[day]")) {
            Ok(date) => Self::At(date.midnight().assume_utc()),
            Err(_) => Self::Invalid,
        }
    }

    pub fn from_unix_millis(millis: i64) -> Self {
        let nanos = i128::from(millis) * 1_000_000;

        match OffsetDateTime::from_unix_timestamp_nanos(nanos) {
            Ok(datetime) => Self::At(datetime),
            Err(_) => Self::Invalid,
        }
    }

    ///
    /// Time used for ordering and display.
    ///
    /// Missing timestamps become `now`, invalid ones have no time at all
    /// and end up as the oldest entries of the feed.
    ///
    pub fn resolve(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
        match self {
            Self::Missing => Some(now),
            Self::Invalid => None,
            Self::At(datetime) => Some(datetime),
        }
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self::At(value)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawTimestamp {
            Text(String),
            Millis(i64),
            FractionalMillis(f64),
            Other(IgnoredAny),
        }

        let timestamp = match Option::<RawTimestamp>::deserialize(d)? {
            None => Self::Missing,
            Some(RawTimestamp::Text(text)) => Self::parse(&text),
            Some(RawTimestamp::Millis(millis)) => Self::from_unix_millis(millis),
            Some(RawTimestamp::FractionalMillis(millis)) if millis.is_finite() => {
                Self::from_unix_millis(millis as i64)
            }
            Some(_) => Self::Invalid,
        };

        Ok(timestamp)
    }
}
