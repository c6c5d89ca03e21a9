// File: crates/chart-indicators/src/options.rs
// Summary: User-facing indicator configuration (`linkedTo`, `params`), deserializable from JSON.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    /// Number of samples averaged per output point.
    pub period: usize,
    /// Tuple field used for OHLC-like values, e.g. `3` selects close.
    pub index: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self { Self { period: 14, index: 0 } }
}

impl IndicatorParams {
    pub fn new(period: usize) -> Self { Self { period, ..Self::default() } }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if self.period == 0 {
            return Err(ChartError::InvalidParams("period must be >= 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndicatorOptions {
    /// Identifier of the derived series itself.
    pub id: Option<String>,
    pub name: Option<String>,
    /// Identifier of the parent series. Required; binding fails without it.
    pub linked_to: Option<String>,
    pub params: IndicatorParams,
}

impl IndicatorOptions {
    pub fn linked_to(parent: impl Into<String>) -> Self {
        Self { linked_to: Some(parent.into()), ..Self::default() }
    }

    pub fn with_params(mut self, params: IndicatorParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Configured name, or `"<LABEL> (<period>)"`.
    pub fn display_name(&self, label: &str) -> String {
        self.name.clone().unwrap_or_else(|| format!("{label} ({})", self.params.period))
    }
}
