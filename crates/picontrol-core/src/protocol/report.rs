//! Monitor report shapes.
//!
//! A report is an ordered list of categories, each holding ordered metric
//! results. Failures are carried inline as `ErrorMarker`s so one broken probe
//! never hides its siblings.

use serde::Serialize;

use crate::error::PiControlError;

/// Full result of a `monitor` request.
pub type Report = Vec<CategoryResult>;

/// Resolved metric value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric text becomes a number, anything else stays a string.
    pub fn coerce(text: &str) -> Self {
        if let Ok(i) = text.parse::<i64>() {
            return MetricValue::Int(i);
        }
        match text.parse::<f64>() {
            // `f64::from_str` also accepts "inf"/"NaN"; those stay text.
            Ok(f) if f.is_finite() && text.bytes().any(|b| b.is_ascii_digit()) => {
                MetricValue::Float(f)
            }
            _ => MetricValue::Text(text.to_string()),
        }
    }
}

/// `{code, msg}` pair placed where a value would be.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMarker {
    pub code: &'static str,
    pub msg: String,
}

impl From<&PiControlError> for ErrorMarker {
    fn from(e: &PiControlError) -> Self {
        Self {
            code: e.client_code().as_str(),
            msg: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<MetricValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorMarker>,
}

impl MetricResult {
    pub fn value(name: impl Into<String>, value: MetricValue) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            error: None,
        }
    }

    pub fn failed(name: impl Into<String>, err: &PiControlError) -> Self {
        Self {
            name: name.into(),
            value: None,
            error: Some(err.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    pub name: String,
    pub data: Vec<MetricResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorMarker>,
}

impl CategoryResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            error: None,
        }
    }

    /// Category that could not be probed at all (e.g. not in the table).
    pub fn failed(name: impl Into<String>, err: &PiControlError) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
            error: Some(err.into()),
        }
    }
}
