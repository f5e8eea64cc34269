//! Calendar dates travel as ISO-8601 `YYYY-MM-DD` strings.
//! Use with `#[serde(with = "crate::dates")]` on serialized `time::Date` fields.

use serde::Serializer;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = date.format(ISO_DATE).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}
