use crate::solarmax::catalog::{self, AlarmCode, StatusCode, TypeCode};

use serde::Serialize;
use std::borrow::Borrow;

// {{{ MetricCode
/// A metric identifier such as `PAC` or `SYS`, always trimmed and uppercase.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MetricCode(String);

impl MetricCode {
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn description(&self) -> Option<&'static str> {
        catalog::description(&self.0)
    }

    pub fn is_requestable(&self) -> bool {
        catalog::is_requestable(&self.0)
    }
}

impl From<&str> for MetricCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl Borrow<str> for MetricCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MetricCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for MetricCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
} // }}}

// {{{ MetricValue
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
    Text(String),
} // }}}

// {{{ Scale
/// Unit scaling applied to a raw reply value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    Unit,
    /// power readings
    Div2,
    /// voltages and today's energy
    Div10,
    /// currents and frequency
    Div100,
}

impl Scale {
    pub fn for_code(code: &str) -> Self {
        match code {
            "PAC" | "PDC" => Scale::Div2,
            "UL1" | "UL2" | "UL3" | "KDY" | "UD01" | "UD02" | "UD03" => Scale::Div10,
            "IL1" | "IL2" | "IL3" | "IDC" | "TNF" | "ID01" | "ID02" | "ID03" => Scale::Div100,
            _ => Scale::Unit,
        }
    }

    pub fn apply(&self, raw: i64) -> MetricValue {
        match self {
            Scale::Unit => MetricValue::Integer(raw),
            Scale::Div2 => MetricValue::Float(raw as f64 / 2.0),
            Scale::Div10 => MetricValue::Float(raw as f64 / 10.0),
            Scale::Div100 => MetricValue::Float(raw as f64 / 100.0),
        }
    }
} // }}}

// {{{ Metric
/// One decoded `key=value` pair of a reply.
///
/// Serializes as `{"Value": .., "Description": ..}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metric {
    #[serde(skip)]
    pub code: MetricCode,
    #[serde(skip)]
    pub raw: i64,
    #[serde(rename = "Value")]
    pub value: MetricValue,
    #[serde(rename = "Description")]
    pub description: String,
}

impl Metric {
    pub fn new(code: MetricCode, raw: i64) -> Self {
        let value = Scale::for_code(code.as_str()).apply(raw);

        let mut description = code.description().unwrap_or_default().to_string();
        if let Some(label) = Self::label_for(&code, raw) {
            description.push_str(": ");
            description.push_str(label.unwrap_or_default());
        }

        Self {
            code,
            raw,
            value,
            description,
        }
    }

    /// Outer `None` when `code` has no label table, inner `None` when the
    /// value is not in it.
    fn label_for(code: &MetricCode, raw: i64) -> Option<Option<&'static str>> {
        match code.as_str() {
            "SYS" => Some(StatusCode(raw).label()),
            "SAL" => Some(AlarmCode(raw).label()),
            "TYP" => Some(TypeCode(raw).label()),
            _ => None,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        Self::label_for(&self.code, self.raw).flatten()
    }

    /// Bare value used by the plain output shape.
    ///
    /// `SYS` becomes `"<code - 20000, 3 digits>-<label>"`, e.g. `"001-Running"`.
    pub fn plain_value(&self) -> MetricValue {
        if self.code.as_str() == "SYS" {
            let status = StatusCode(self.raw);
            MetricValue::Text(format!(
                "{:03}-{}",
                status.0 - StatusCode::BASE,
                status.label().unwrap_or_default()
            ))
        } else {
            self.value.clone()
        }
    }
} // }}}
