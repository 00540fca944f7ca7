// used to print out readable forms of a data type
use std::fmt;
// used to let the string types behave like &str
use std::ops::Deref;

// precompiled format checks
use lazy_static::lazy_static;
// used for the dateCreated/dateModified stamps
use chrono::{FixedOffset, NaiveDate, SecondsFormat, TimeZone, Utc};
// used to check the formats of dates and guids
use regex::Regex;
// used to generate fresh ids for entries and senses
use uuid::Uuid;

lazy_static! {
    static ref DATE_TIME: Regex = Regex::new(
        r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?)?$"
    )
    .unwrap();
    static ref GUID: Regex =
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .unwrap();
}

/// A value type that can be read from and written to an XML attribute or text slot.
pub trait DataType: fmt::Display + Sized {
    const DATA_TYPE: &'static str;
    /// Converts raw XML text, giving `None` when the text does not fit the format.
    fn convert(value: &str) -> Option<Self>;
    fn render(&self) -> String {
        self.to_string()
    }
    fn data_type(&self) -> &'static str {
        Self::DATA_TYPE
    }
}

// The string types share everything but their name and their conversion rule.
macro_rules! string_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Eq, PartialEq, Hash, Clone, Debug, Default, PartialOrd, Ord)]
        pub struct $name(String);
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }
        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_type!(
    /// Identifier-like value, e.g. a trait name or a range id.
    Key
);
string_type!(
    /// Language tag of the form `ISO[-SCRIPT[-x-PRIVATE]]`, compared case-sensitively.
    Lang
);
string_type!(
    /// Free-form URL, usually a `file://` reference or a relative path.
    Url
);
string_type!(
    /// Free text content.
    PCData
);
string_type!(
    /// Id of an entry or a sense, normally a hex GUID.
    RefId
);
string_type!(
    /// ISO 8601 date or date-time, kept as written.
    DateTime
);

// ------------- Data Types --------------
impl DataType for Key {
    const DATA_TYPE: &'static str = "Key";
    fn convert(value: &str) -> Option<Key> {
        Some(Key::from(value))
    }
}
impl DataType for Lang {
    const DATA_TYPE: &'static str = "Lang";
    fn convert(value: &str) -> Option<Lang> {
        Some(Lang::from(value))
    }
}
impl DataType for Url {
    const DATA_TYPE: &'static str = "URL";
    fn convert(value: &str) -> Option<Url> {
        Some(Url::from(value))
    }
}
impl DataType for PCData {
    const DATA_TYPE: &'static str = "PCData";
    fn convert(value: &str) -> Option<PCData> {
        Some(PCData::from(value))
    }
}
impl DataType for RefId {
    const DATA_TYPE: &'static str = "RefId";
    // FieldWorks writes entry ids as "<headword>_<guid>", so any text is accepted.
    fn convert(value: &str) -> Option<RefId> {
        Some(RefId::from(value))
    }
}
impl DataType for DateTime {
    const DATA_TYPE: &'static str = "DateTime";
    fn convert(value: &str) -> Option<DateTime> {
        DATE_TIME.is_match(value.trim()).then(|| DateTime::from(value.trim()))
    }
}
impl DataType for String {
    const DATA_TYPE: &'static str = "String";
    fn convert(value: &str) -> Option<String> {
        Some(value.to_string())
    }
}
impl DataType for i64 {
    const DATA_TYPE: &'static str = "i64";
    fn convert(value: &str) -> Option<i64> {
        value.trim().parse().ok()
    }
}

// ------------- RefId -------------
impl RefId {
    /// A fresh random (v4) id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn is_guid(&self) -> bool {
        GUID.is_match(&self.0)
    }
}

// ------------- DateTime -------------
impl DateTime {
    /// The current time in UTC, written with an explicit offset.
    pub fn now() -> Self {
        Self::from_chrono(Utc::now().fixed_offset())
    }
    pub fn from_chrono(value: chrono::DateTime<FixedOffset>) -> Self {
        Self(value.to_rfc3339_opts(SecondsFormat::Secs, false))
    }
    /// The value as a chrono timestamp; date-only values are read as midnight UTC.
    pub fn parsed(&self) -> Option<chrono::DateTime<FixedOffset>> {
        if let Ok(value) = chrono::DateTime::parse_from_rfc3339(&self.0) {
            return Some(value);
        }
        if let Ok(value) = chrono::DateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%z") {
            return Some(value);
        }
        let date = NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        Some(Utc.from_utc_datetime(&midnight).fixed_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_time_formats() {
        assert!(DateTime::convert("2012-03-14T09:03:39Z").is_some());
        assert!(DateTime::convert("2012-03-14T09:03:39+01:00").is_some());
        assert!(DateTime::convert("2012-03-14").is_some());
        assert!(DateTime::convert("yesterday").is_none());
        let stamp = DateTime::now();
        assert!(stamp.ends_with("+00:00"), "stamp {stamp} should carry an offset");
        assert!(stamp.parsed().is_some());
        assert_eq!(
            DateTime::from("2012-03-14").parsed().map(|d| d.timestamp()),
            Some(1_331_683_200)
        );
    }

    #[test]
    fn generated_ids_are_guids() {
        let a = RefId::generate();
        let b = RefId::generate();
        assert!(a.is_guid());
        assert_ne!(a, b);
        assert!(!RefId::from("kɔ́_086e06e3-a5f6-4c54-805a-4a1adcd51d4f").is_guid());
    }

    #[test]
    fn integer_conversion() {
        assert_eq!(i64::convert(" 3 "), Some(3));
        assert_eq!(i64::convert("three"), None);
    }
}
