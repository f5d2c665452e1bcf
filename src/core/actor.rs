//! Resolution of the employee acting on a request
//!
//! The employee handling a reservation is passed explicitly to the
//! reservation service as an [`Actor`]. At the HTTP edge an
//! [`ActorResolver`] derives it from the request:
//!
//! - [`HeaderActorResolver`] reads the `x-employee-id` header
//! - [`FirstEmployeeResolver`] picks the earliest registered employee, for
//!   deployments that have no notion of a signed-in employee yet

use crate::core::error::{ActorError, RentalResult};
use crate::core::store::RentalStore;
use crate::entities::Employee;
use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Header carrying the acting employee's id
pub const EMPLOYEE_HEADER: &str = "x-employee-id";

/// The employee performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub employee_id: Uuid,
}

impl Actor {
    pub fn new(employee_id: Uuid) -> Self {
        Self { employee_id }
    }
}

impl From<&Employee> for Actor {
    fn from(employee: &Employee) -> Self {
        Self::new(employee.id)
    }
}

/// Derives the acting employee from an incoming request
#[async_trait]
pub trait ActorResolver: Send + Sync {
    async fn resolve(&self, headers: &HeaderMap, store: &dyn RentalStore) -> RentalResult<Actor>;
}

/// Reads the actor from the `x-employee-id` header and checks the employee exists
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderActorResolver;

#[async_trait]
impl ActorResolver for HeaderActorResolver {
    async fn resolve(&self, headers: &HeaderMap, store: &dyn RentalStore) -> RentalResult<Actor> {
        let raw = headers
            .get(EMPLOYEE_HEADER)
            .ok_or(ActorError::Missing {
                header: EMPLOYEE_HEADER,
            })?
            .to_str()
            .map_err(|_| ActorError::Invalid {
                value: "<non-ascii>".to_string(),
            })?
            .trim();

        let id = Uuid::parse_str(raw).map_err(|_| ActorError::Invalid {
            value: raw.to_string(),
        })?;

        match store.employees().get(&id).await? {
            Some(employee) => Ok(Actor::from(&employee)),
            None => Err(ActorError::Unknown { id }.into()),
        }
    }
}

/// Acts as the earliest registered employee, ignoring the request
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEmployeeResolver;

#[async_trait]
impl ActorResolver for FirstEmployeeResolver {
    async fn resolve(&self, _headers: &HeaderMap, store: &dyn RentalStore) -> RentalResult<Actor> {
        let employees = store.employees().list().await?;
        employees
            .iter()
            .min_by_key(|e| (e.created_at, e.id))
            .map(Actor::from)
            .ok_or_else(|| ActorError::NoEmployees.into())
    }
}

/// Configured actor resolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorPolicy {
    #[default]
    Header,
    FirstEmployee,
}

impl ActorPolicy {
    pub fn resolver(self) -> Arc<dyn ActorResolver> {
        match self {
            ActorPolicy::Header => Arc::new(HeaderActorResolver),
            ActorPolicy::FirstEmployee => Arc::new(FirstEmployeeResolver),
        }
    }

    /// Parse the policy name used in configuration and environment
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "header" => Some(ActorPolicy::Header),
            "first_employee" => Some(ActorPolicy::FirstEmployee),
            _ => None,
        }
    }
}
