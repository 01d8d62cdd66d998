//! Pagination cursor and list envelope, shared by every list operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TychoError};

/// Sort order for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = TychoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            other => Err(TychoError::InvalidArgument(format!(
                "order must be either 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Cursor parameters for one page of a list operation.
///
/// Only non-default fields are serialized onto the query string; omission,
/// not an explicit empty value, expresses "no filter". Validation happens
/// before any request is constructed, so an out-of-range page request is
/// never transmitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
    pub limit: Option<u32>,
    pub order: Option<Order>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl PageRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    /// Reject out-of-range parameters locally.
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.limit {
            if limit > 100 {
                return Err(TychoError::InvalidArgument(format!(
                    "limit must be between 0 and 100, got {limit}"
                )));
            }
        }
        if matches!(self.after.as_deref(), Some("")) {
            return Err(TychoError::InvalidArgument(
                "after cursor must not be empty".to_string(),
            ));
        }
        if matches!(self.before.as_deref(), Some("")) {
            return Err(TychoError::InvalidArgument(
                "before cursor must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Query pairs for the non-default fields, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            if limit > 0 {
                pairs.push(("limit", limit.to_string()));
            }
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str().to_string()));
        }
        if let Some(ref after) = self.after {
            if !after.is_empty() {
                pairs.push(("after", after.clone()));
            }
        }
        if let Some(ref before) = self.before {
            if !before.is_empty() {
                pairs.push(("before", before.clone()));
            }
        }
        pairs
    }
}

/// One page of a list operation.
///
/// Each call returns one page; to continue, issue the next call with
/// `after = last_id`. The files list omits the cursor fields on the wire,
/// so they default here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub object: String,
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_id: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}
