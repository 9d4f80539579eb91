use crate::validation::ValidationError;
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }

            /// Returns the identifier text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    KeyId,
    "Key fingerprint: base32 characters in `:`-separated groups of four.",
    r"^([A-Z2-7]{4}:)*[A-Z2-7]{1,7}$"
);
newtype!(
    Timestamp,
    "UTC RFC3339 timestamp with second precision and `Z` suffix.",
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$"
);

impl KeyId {
    /// Wraps text produced by the key-ID encoder, which always matches the pattern.
    pub(crate) fn from_encoded(value: String) -> Self {
        Self(value)
    }
}

impl Timestamp {
    /// Formats a Unix time (seconds) as `YYYY-MM-DDTHH:MM:SSZ`.
    ///
    /// Only years 0000 through 9999 have a four-digit form; anything else is `OutOfBounds`.
    pub fn from_unix_seconds(seconds: i64) -> Result<Self, ValidationError> {
        let out_of_bounds = || ValidationError::OutOfBounds {
            field: "Timestamp",
            value: seconds.to_string(),
        };
        let time = DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(out_of_bounds)?;
        if !(0..=9999).contains(&time.year()) {
            return Err(out_of_bounds());
        }
        Ok(Self::from_datetime(time))
    }

    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    fn from_datetime(time: DateTime<Utc>) -> Self {
        Self(time.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_from_unix_seconds() {
        let ts = Timestamp::from_unix_seconds(1478423072).unwrap();
        assert_eq!(ts.as_str(), "2016-11-06T09:04:32Z");
    }

    #[test]
    fn timestamp_stays_within_four_digit_years() {
        let last = Timestamp::from_unix_seconds(253402300799).unwrap();
        assert_eq!(last.as_str(), "9999-12-31T23:59:59Z");
        let first = Timestamp::from_unix_seconds(-62167219200).unwrap();
        assert_eq!(first.as_str(), "0000-01-01T00:00:00Z");

        for seconds in [253402300800, -62167219201, i64::MAX] {
            assert!(matches!(
                Timestamp::from_unix_seconds(seconds),
                Err(ValidationError::OutOfBounds { field: "Timestamp", .. })
            ));
        }
    }

    #[test]
    fn timestamp_now_is_valid() {
        let now = Timestamp::now();
        assert!(Timestamp::parse(now.as_str()).is_ok());
    }

    #[test]
    fn timestamp_rejects_fractional_seconds() {
        assert!(Timestamp::parse("2016-11-06T09:04:32.5Z").is_err());
        assert!(Timestamp::parse("2016-11-06T09:04:32+00:00").is_err());
    }

    #[test]
    fn key_id_pattern() {
        assert!(KeyId::parse("UEV2:PPF2:4DMU:WZYF:WOWU:677P:B7XU:SGFA:BMUG:NCTC:R7CL:XFKZ").is_ok());
        assert!(KeyId::parse("ABCD:EFGHIJ").is_ok());
        assert!(KeyId::parse("abcd:EFGH").is_err());
        assert!(KeyId::parse("ABCD:").is_err());
        assert!(KeyId::parse("").is_err());
    }

    #[test]
    fn key_id_serde_is_transparent_and_validating() {
        let kid = KeyId::parse("ABCD:EFGH").unwrap();
        assert_eq!(serde_json::to_string(&kid).unwrap(), r#""ABCD:EFGH""#);
        assert!(serde_json::from_str::<KeyId>(r#""not a kid""#).is_err());
    }
}
