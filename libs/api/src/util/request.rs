use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

use crate::ApiError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Resolves `page`/`limit` query values. Both start at 1 and `limit` is
/// capped at [`MAX_LIMIT`]. The row offset must fit in a signed 64-bit
/// integer.
pub fn page_and_limit(
    page: Option<u64>,
    limit: Option<u64>,
) -> Result<(u64, u64), ApiError> {
    let page = page.unwrap_or(DEFAULT_PAGE);
    let limit = limit.unwrap_or(DEFAULT_LIMIT);

    if page < 1 {
        return Err(ApiError::ClientError(
            "page must be at least 1".to_string(),
        ));
    }
    if limit < 1 {
        return Err(ApiError::ClientError(
            "limit must be at least 1".to_string(),
        ));
    }

    let limit = limit.min(MAX_LIMIT);
    let offset = (page - 1).checked_mul(limit);
    if !offset.is_some_and(|offset| offset <= i64::MAX as u64) {
        return Err(ApiError::ClientError("page is out of range".to_string()));
    }

    Ok((page, limit))
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Accepts RFC 3339, a zone-less date time or a bare date. Zone-less
/// values are read as UTC.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

pub fn deserialize_datetime<'de, D>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    parse_datetime(&value)
        .ok_or_else(|| de::Error::custom(format!("invalid date: {value}")))
}

/// `null` and `""` both mean no date.
pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            parse_datetime(&value).ok_or_else(|| {
                de::Error::custom(format!("invalid date: {value}"))
            })
        })
        .transpose()
}

/// For patch bodies: paired with `#[serde(default)]`, a missing field is
/// `None` and an explicit `null` is `Some(None)`.
pub fn deserialize_patch_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_datetime(deserializer).map(Some)
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_patch_datetime")]
        at: Option<Option<DateTime<Utc>>>,
    }

    #[test]
    fn test_page_and_limit() {
        assert_eq!(page_and_limit(None, None).ok(), Some((1, 10)));
        assert_eq!(page_and_limit(Some(3), Some(500)).ok(), Some((3, 100)));
        assert!(page_and_limit(Some(0), None).is_err());
        assert!(page_and_limit(None, Some(0)).is_err());
        assert!(page_and_limit(Some(u64::MAX), Some(10)).is_err());
        assert!(page_and_limit(Some(i64::MAX as u64), Some(2)).is_err());
    }

    #[test]
    fn test_parse_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 11, 2, 19, 30, 0).unwrap();

        assert_eq!(parse_datetime("2024-11-02T19:30:00Z"), Some(expected));
        assert_eq!(
            parse_datetime("2024-11-02T21:30:00+02:00"),
            Some(expected)
        );
        assert_eq!(parse_datetime("2024-11-02T19:30"), Some(expected));
        assert_eq!(parse_datetime("2024-11-02T19:30:00.000"), Some(expected));
        assert_eq!(
            parse_datetime("2024-11-02"),
            Some(Utc.with_ymd_and_hms(2024, 11, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_datetime("next friday"), None);
    }

    #[test]
    fn test_patch_datetime_distinguishes_null_from_missing() {
        let missing: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"at":null}"#).unwrap();
        let set: Patch =
            serde_json::from_str(r#"{"at":"2024-11-02"}"#).unwrap();

        assert_eq!(missing.at, None);
        assert_eq!(null.at, Some(None));
        assert!(matches!(set.at, Some(Some(_))));
    }
}
