//! Export requests: the input snapshot handed over by the portal.
//!
//! A request bundles everything one ordering run needs: the canonical list,
//! the lot collection and the options. It is read once at the start of an
//! export and never modified afterwards.

use crate::{
    error::{Error, Result},
    Lot, OrderOptions, Orderer, Placement,
};
use serde::{Deserialize, Serialize};

/// Version of the request format for future compatibility.
pub const REQUEST_FORMAT_VERSION: u32 = 1;

/// Title used when a request does not carry one.
pub const DEFAULT_TITLE: &str = "Lot Roster";

/// A validated export request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Request format version
    pub format_version: u32,
    /// Report title, if the portal supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Canonical ordering, duplicates preserved
    pub canonical: Vec<String>,
    /// Lots to order, in arrival order
    pub lots: Vec<Lot>,
    /// Ordering options
    pub options: OrderOptions,
}

/// Wire shape before validation; `null` and missing are kept distinct from
/// empty so they can be rejected.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExportRequest {
    #[serde(default = "default_format_version")]
    format_version: u32,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    canonical: Option<Vec<String>>,
    #[serde(default)]
    lots: Option<Vec<Lot>>,
    #[serde(default)]
    options: Option<OrderOptions>,
}

fn default_format_version() -> u32 {
    REQUEST_FORMAT_VERSION
}

impl ExportRequest {
    /// Create a request with default options.
    pub fn new(canonical: Vec<String>, lots: Vec<Lot>) -> Result<Self> {
        let request = Self {
            format_version: REQUEST_FORMAT_VERSION,
            title: None,
            canonical,
            lots,
            options: OrderOptions::default(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: OrderOptions) -> Self {
        self.options = options;
        self
    }

    /// Title to print, falling back to [`DEFAULT_TITLE`].
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Check the required inputs are present.
    pub fn validate(&self) -> Result<()> {
        if self.format_version > REQUEST_FORMAT_VERSION {
            return Err(Error::InvalidRequest(format!(
                "unsupported request format version: {} (max supported: {})",
                self.format_version, REQUEST_FORMAT_VERSION
            )));
        }
        if self.canonical.is_empty() {
            return Err(Error::EmptyCanonical);
        }
        Ok(())
    }

    /// Order this request's lots.
    pub fn order(&self) -> Result<Vec<&Lot>> {
        Orderer::new(self.options).order(&self.canonical, &self.lots)
    }

    /// Order this request's lots, reporting each placement.
    pub fn placements(&self) -> Result<Vec<Placement<'_, serde_json::Value>>> {
        Orderer::new(self.options).placements(&self.canonical, &self.lots)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// Deserialize and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawExportRequest =
            serde_json::from_str(json).map_err(|e| Error::InvalidRequest(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawExportRequest) -> Result<Self> {
        let lots = raw.lots.ok_or(Error::MissingLots)?;
        let request = Self {
            format_version: raw.format_version,
            title: raw.title,
            canonical: raw.canonical.unwrap_or_default(),
            lots,
            options: raw.options.unwrap_or_default(),
        };
        request.validate()?;
        Ok(request)
    }
}
