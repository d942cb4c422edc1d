//! Time-series models shared by the API client and the chart service

use std::collections::BTreeMap;
use std::fmt;

/// Field names inside one Alpha Vantage record, e.g. "2. high" -> "12.50"
pub type PriceRecord = BTreeMap<String, String>;

/// Date (YYYY-MM-DD) -> record, as returned by the API
pub type TimeSeries = BTreeMap<String, PriceRecord>;

/// Record field holding the session high
pub const HIGH_FIELD: &str = "2. high";

/// Sampling period requested from the API.
///
/// Each variant carries both the remote function name and the key under
/// which the response nests its series, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Daily, Granularity::Weekly, Granularity::Monthly];

    /// Parse the form value; only the exact lowercase tags are accepted
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "daily" => Some(Granularity::Daily),
            "weekly" => Some(Granularity::Weekly),
            "monthly" => Some(Granularity::Monthly),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Weekly => "weekly",
            Granularity::Monthly => "monthly",
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            Granularity::Daily => "TIME_SERIES_DAILY",
            Granularity::Weekly => "TIME_SERIES_WEEKLY",
            Granularity::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    pub fn response_key(&self) -> &'static str {
        match self {
            Granularity::Daily => "Time Series (Daily)",
            Granularity::Weekly => "Weekly Time Series",
            Granularity::Monthly => "Monthly Time Series",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_and_are_case_sensitive() {
        for granularity in Granularity::ALL {
            assert_eq!(Granularity::from_tag(granularity.tag()), Some(granularity));
        }
        assert_eq!(Granularity::from_tag("Daily"), None);
        assert_eq!(Granularity::from_tag("hourly"), None);
        assert_eq!(Granularity::from_tag(""), None);
    }

    #[test]
    fn variants_carry_matching_function_and_key() {
        assert_eq!(Granularity::Daily.function_name(), "TIME_SERIES_DAILY");
        assert_eq!(Granularity::Daily.response_key(), "Time Series (Daily)");
        assert_eq!(Granularity::Weekly.function_name(), "TIME_SERIES_WEEKLY");
        assert_eq!(Granularity::Weekly.response_key(), "Weekly Time Series");
        assert_eq!(Granularity::Monthly.function_name(), "TIME_SERIES_MONTHLY");
        assert_eq!(Granularity::Monthly.response_key(), "Monthly Time Series");
    }
}
