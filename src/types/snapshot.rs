use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Canonical metric keys understood by the scoring engine.
pub mod keys {
    pub const PE: &str = "P/E";
    pub const ROE: &str = "ROE";
    pub const DE: &str = "D/E";
    pub const PB: &str = "P/B";
    pub const PEG: &str = "PEG";
    pub const GROSS_MARGIN: &str = "Gross Margin";
    pub const NET_MARGIN: &str = "Net Profit Margin";
    pub const FCF_EV: &str = "FCF % EV";
    pub const EBITDA_EV: &str = "EBITDA % EV";
    pub const BALANCE: &str = "Balance";
    pub const PRICE: &str = "Current Price";
    pub const HIGH_52W: &str = "52W High";
    pub const LOW_52W: &str = "52W Low";
    pub const MARKET_CAP: &str = "Market Cap";
    pub const ENTERPRISE_VALUE: &str = "Enterprise Value";
    pub const TOTAL_CASH: &str = "Total Cash";
    pub const TOTAL_DEBT: &str = "Total Debt";
    pub const P_FCF: &str = "P/FCF";
    pub const RSI: &str = "RSI";
    pub const AVG_VOLUME: &str = "Avg Volume";
    pub const DIVIDEND_YIELD: &str = "Dividend Yield";
    pub const BETA: &str = "Beta";
    pub const REVENUE_GROWTH: &str = "Revenue Growth";
    pub const EARNINGS_GROWTH: &str = "Earnings Growth";
    pub const FORWARD_PE: &str = "Forward P/E";
}

/// A metric observation: either a finite number or the missing sentinel.
///
/// Data providers report unavailable values as "N/A" or null; both parse to
/// `Missing`. Non-finite numbers also degrade to `Missing` so the engine only
/// ever sees finite values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MetricValue {
    Value(f64),
    #[default]
    Missing,
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            MetricValue::Value(v) => serializer.serialize_f64(*v),
            MetricValue::Missing => serializer.serialize_str("N/A"),
        }
    }
}

struct MetricValueVisitor;

impl<'de> Visitor<'de> for MetricValueVisitor {
    type Value = MetricValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or a missing-value sentinel")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<MetricValue, E> {
        if v.is_finite() {
            Ok(MetricValue::Value(v))
        } else {
            Ok(MetricValue::Missing)
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<MetricValue, E> {
        Ok(MetricValue::Value(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<MetricValue, E> {
        Ok(MetricValue::Value(v as f64))
    }

    fn visit_str<E: de::Error>(self, _v: &str) -> std::result::Result<MetricValue, E> {
        Ok(MetricValue::Missing)
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> std::result::Result<MetricValue, E> {
        Ok(MetricValue::Missing)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<MetricValue, E> {
        Ok(MetricValue::Missing)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<MetricValue, E> {
        Ok(MetricValue::Missing)
    }

    fn visit_some<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<MetricValue, D::Error> {
        deserializer.deserialize_any(MetricValueVisitor)
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<MetricValue, D::Error> {
        deserializer.deserialize_any(MetricValueVisitor)
    }
}

/// One point-in-time observation of one entity. Read-only for the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metrics: HashMap<String, MetricValue>,
}

impl MetricSnapshot {
    /// Numeric value for `key`, or 0.0 when missing. This is the single point
    /// where missing-data semantics are enforced; downstream scoring sees a
    /// uniform numeric domain and never fails on absent metrics.
    pub fn metric(&self, key: &str) -> f64 {
        self.raw_metric(key).unwrap_or(0.0)
    }

    /// Numeric value for `key` only if it is actually present.
    pub fn raw_metric(&self, key: &str) -> Option<f64> {
        match self.metrics.get(key) {
            Some(MetricValue::Value(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn has_metric(&self, key: &str) -> bool {
        self.raw_metric(key).is_some()
    }

    pub fn sector_name(&self) -> &str {
        self.sector.as_deref().unwrap_or("Unknown")
    }
}
