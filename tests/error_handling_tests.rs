//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses are properly formatted
//! - Error conversions work correctly
//! - Error matching allows clients to handle specific cases

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use rental::core::error::{
    ActorError, ConfigError, EntityError, LifecycleError, StorageError, ValidationError,
};
use rental::core::query::SortKey;
use rental::prelude::*;

fn form_error(field: &str, message: &str) -> RentalError {
    let mut errors = FormErrors::new();
    errors.add(field, message);
    RentalError::Validation(ValidationError::Form(errors))
}

async fn response_json(err: RentalError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_entity_not_found_returns_404() {
        let err = RentalError::not_found("reservation", Uuid::new_v4());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_entity_already_exists_returns_409() {
        let err = RentalError::Entity(EntityError::AlreadyExists {
            entity_type: "vehicle".to_string(),
            id: Uuid::new_v4(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_form_errors_return_422() {
        let err = form_error("final_fuel_level", "too low");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_bad_query_values_return_400() {
        let err: RentalError = "senha".parse::<SortKey>().unwrap_err().into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = RentalError::Validation(ValidationError::InvalidEntityId {
            field: "cliente".to_string(),
            value: "abc".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_pickup_not_registered_returns_409() {
        let err = RentalError::Lifecycle(LifecycleError::PickupNotRegistered {
            reservation_id: Uuid::new_v4(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_actor_errors_return_401() {
        let errors = [
            ActorError::Missing {
                header: "x-employee-id",
            },
            ActorError::Invalid {
                value: "nope".to_string(),
            },
            ActorError::Unknown { id: Uuid::new_v4() },
            ActorError::NoEmployees,
        ];
        for err in errors {
            assert_eq!(RentalError::Actor(err).status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_storage_and_config_errors_return_500() {
        let err = RentalError::Storage(StorageError::IntegrityError {
            message: "vehicle missing".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = RentalError::Config(ConfigError::FileNotFound {
            path: "/etc/rental.yaml".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let cases: Vec<(RentalError, &str)> = vec![
            (RentalError::not_found("vehicle", Uuid::nil()), "ENTITY_NOT_FOUND"),
            (form_error("status", "bad"), "VALIDATION_ERROR"),
            (
                "x".parse::<SortKey>().unwrap_err().into(),
                "INVALID_SORT_KEY",
            ),
            (
                LifecycleError::PickupNotRegistered {
                    reservation_id: Uuid::nil(),
                }
                .into(),
                "PICKUP_NOT_REGISTERED",
            ),
            (
                ActorError::Missing {
                    header: "x-employee-id",
                }
                .into(),
                "ACTOR_REQUIRED",
            ),
            (ActorError::Unknown { id: Uuid::nil() }.into(), "UNKNOWN_ACTOR"),
            (ActorError::NoEmployees.into(), "NO_EMPLOYEES"),
            (RentalError::Internal("boom".to_string()), "INTERNAL_ERROR"),
        ];

        for (err, code) in cases {
            assert_eq!(err.error_code(), code, "for {err}");
        }
    }
}

// =============================================================================
// Error Response Tests
// =============================================================================

mod error_response_tests {
    use super::*;

    #[tokio::test]
    async fn test_error_response_has_code_and_message() {
        let (status, body) = response_json(RentalError::not_found("reservation", Uuid::nil())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ENTITY_NOT_FOUND");
        assert!(body["message"].as_str().unwrap().contains("not found"));
        assert_eq!(body["details"]["entity_type"], "reservation");
    }

    #[tokio::test]
    async fn test_form_errors_keep_field_order() {
        let mut errors = FormErrors::new();
        errors.add("customer_id", "Select a valid choice.");
        errors.add("start_date", "This field is required.");
        errors.add("customer_id", "Another problem.");
        let err = RentalError::Validation(ValidationError::Form(errors));

        let (status, body) = response_json(err).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let fields = body["details"]["fields"].as_object().unwrap();
        let names: Vec<&String> = fields.keys().collect();
        assert_eq!(names, vec!["customer_id", "start_date"]);
        assert_eq!(fields["customer_id"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_sort_lists_allowed_keys() {
        let err: RentalError = "cliente__senha".parse::<SortKey>().unwrap_err().into();

        let (_, body) = response_json(err).await;

        let allowed = body["details"]["allowed"].as_array().unwrap();
        assert_eq!(allowed.len(), SortKey::ALL.len());
        assert!(allowed.contains(&serde_json::json!("total_cost")));
    }

    #[tokio::test]
    async fn test_errors_without_details_omit_the_field() {
        let (_, body) = response_json(ActorError::NoEmployees.into()).await;
        assert!(body.get("details").is_none());
    }
}

// =============================================================================
// Error Conversion Tests
// =============================================================================

mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_entity_error_converts_to_rental_error() {
        let err: RentalError = EntityError::NotFound {
            entity_type: "customer".to_string(),
            id: Uuid::nil(),
        }
        .into();
        assert!(matches!(err, RentalError::Entity(_)));
    }

    #[test]
    fn test_yaml_error_converts_to_config_error() {
        let yaml_err = serde_yaml::from_str::<RentalConfig>("server: [").unwrap_err();
        let err: RentalError = yaml_err.into();
        assert!(matches!(
            err,
            RentalError::Config(ConfigError::ParseError { file: None, .. })
        ));
    }

    #[test]
    fn test_anyhow_store_errors_are_recovered() {
        let err: RentalError = anyhow::Error::new(StorageError::IntegrityError {
            message: "reservation already exists".to_string(),
        })
        .into();
        assert!(matches!(
            err,
            RentalError::Storage(StorageError::IntegrityError { .. })
        ));

        let err: RentalError = anyhow::anyhow!("disk on fire").into();
        assert!(matches!(err, RentalError::Storage(StorageError::Backend { .. })));
    }
}

// =============================================================================
// Error Matching Tests
// =============================================================================

mod error_matching_tests {
    use super::*;

    #[tokio::test]
    async fn test_can_match_store_failures_from_the_service() {
        let store = InMemoryStore::new();
        let service = ReservationService::new(std::sync::Arc::new(store));

        let err = service.get(Uuid::new_v4()).await.unwrap_err();

        match err {
            RentalError::Entity(EntityError::NotFound { entity_type, .. }) => {
                assert_eq!(entity_type, "reservation");
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_can_match_form_errors_from_the_service() {
        let service = ReservationService::new(std::sync::Arc::new(InMemoryStore::new()));
        let vehicle = Vehicle::new("ERR0R00", "Uno", Decimal::from(50));
        service
            .store()
            .vehicles()
            .create(vehicle.clone())
            .await
            .unwrap();

        let actor = Actor::new(Uuid::new_v4());
        let err = service
            .create(vehicle.id, ReservationForm::default(), &actor)
            .await
            .unwrap_err();

        let errors = err.form_errors().expect("form errors");
        assert_eq!(errors.len(), 3);
    }
}
