//! Query parameters for reservation listings and lookups

use crate::core::error::{RentalResult, ValidationError};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Column a reservation listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    StartDate,
    EndDate,
    TotalCost,
    Status,
    CreatedAt,
    /// Customer name
    Customer,
    /// Vehicle plate
    Vehicle,
    Id,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::StartDate,
        SortKey::EndDate,
        SortKey::TotalCost,
        SortKey::Status,
        SortKey::CreatedAt,
        SortKey::Customer,
        SortKey::Vehicle,
        SortKey::Id,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::StartDate => "start_date",
            SortKey::EndDate => "end_date",
            SortKey::TotalCost => "total_cost",
            SortKey::Status => "status",
            SortKey::CreatedAt => "created_at",
            SortKey::Customer => "customer",
            SortKey::Vehicle => "vehicle",
            SortKey::Id => "id",
        }
    }

    /// Every accepted key name
    pub fn allowed() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.as_str()).collect()
    }

    fn from_legacy(name: &str) -> Option<Self> {
        match name {
            "data_inicio" => Some(SortKey::StartDate),
            "data_fim" => Some(SortKey::EndDate),
            "valor_total" => Some(SortKey::TotalCost),
            "cliente__nome" => Some(SortKey::Customer),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .or_else(|| SortKey::from_legacy(s))
            .ok_or_else(|| ValidationError::InvalidSortKey {
                value: s.to_string(),
                allowed: SortKey::allowed(),
            })
    }
}

/// A sort key and its direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub descending: bool,
}

impl SortSpec {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending(SortKey::StartDate)
    }
}

impl FromStr for SortSpec {
    type Err = ValidationError;

    /// Parse `key` or `-key` (descending)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (descending, name) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let key = name.parse::<SortKey>().map_err(|_| ValidationError::InvalidSortKey {
            value: s.to_string(),
            allowed: SortKey::allowed(),
        })?;
        Ok(Self { key, descending })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        f.write_str(self.key.as_str())
    }
}

/// Query parameters of the reservation listing
///
/// # Example
/// ```rust,ignore
/// GET /reservations?q=ana&sort=-total_cost
/// GET /reservations?sort=data_inicio
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReservationQuery {
    /// Case-insensitive substring of the customer name
    pub q: Option<String>,

    /// Sort key, optionally prefixed with `-`
    pub sort: Option<String>,
}

impl ReservationQuery {
    /// Search term, ignoring blank values
    pub fn search_term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Validated sort, falling back to `default` when absent or blank
    pub fn sort_spec(&self, default: SortSpec) -> RentalResult<SortSpec> {
        match self.sort.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(raw) => Ok(raw.parse()?),
        }
    }
}

/// Query parameters of the customer history page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryQuery {
    /// Selected customer id
    pub cliente: Option<String>,
}

impl HistoryQuery {
    pub fn customer_id(&self) -> RentalResult<Option<Uuid>> {
        match self.cliente.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Uuid::parse_str(raw).map(Some).map_err(|_| {
                ValidationError::InvalidEntityId {
                    field: "cliente".to_string(),
                    value: raw.to_string(),
                }
                .into()
            }),
        }
    }
}

/// Query parameters of the vehicle listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VehicleQuery {
    pub available: Option<bool>,
}
