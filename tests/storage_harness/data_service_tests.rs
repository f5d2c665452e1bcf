//! Macro-generated test suite for `DataService<Vehicle>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use rental::storage::InMemoryStore;
//!
//! data_service_tests!(InMemoryStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`, `test_get_nonexistent`, `test_list_empty`
//! - `test_list_oldest_first`, `test_update_existing`, `test_update_nonexistent`
//! - `test_delete_existing`, `test_delete_nonexistent`
//!
//! ## Search
//! - `test_search_string_field`, `test_search_decimal_field`,
//!   `test_search_boolean_field`, `test_search_uuid_field`
//! - `test_search_no_results`, `test_search_unknown_field`
//!
//! ## Edge Cases
//! - `test_create_duplicate_id`, `test_concurrent_access`

/// Generate a `DataService<Vehicle>` conformance test suite.
///
/// `$factory` must evaluate to a fresh store implementing
/// `DataService<Vehicle> + Clone + 'static`. It is re-evaluated for each test.
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use rental::core::entity::{Data, Entity};
            use rental::core::service::DataService;
            use rental::entities::Vehicle;
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                let vehicle = create_test_vehicle("ABC1D23", "Onix", "120.50", true);
                let id = vehicle.id;

                let created = service.create(vehicle.clone()).await.unwrap();
                assert_eq!(created.id(), id);

                let retrieved = service.get(&id).await.unwrap();
                assert_eq!(retrieved, Some(vehicle));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;

                let result = service.get(&Uuid::new_v4()).await.unwrap();
                assert!(result.is_none(), "Getting a missing vehicle should return None");
            }

            #[tokio::test]
            async fn test_list_empty() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;

                assert!(service.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_oldest_first() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                let mut fleet = sample_fleet(5);
                let base = chrono::Utc::now();
                for (i, vehicle) in fleet.iter_mut().enumerate() {
                    vehicle.created_at = base - chrono::Duration::minutes(i as i64);
                }

                for vehicle in fleet.iter().cloned() {
                    service.create(vehicle).await.unwrap();
                }

                let listed: Vec<Uuid> = service.list().await.unwrap().iter().map(|v| v.id()).collect();
                let expected: Vec<Uuid> = fleet.iter().rev().map(|v| v.id).collect();
                assert_eq!(listed, expected, "List should be ordered by creation time");
            }

            #[tokio::test]
            async fn test_update_existing() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                let mut vehicle = create_test_vehicle("ABC1D23", "Onix", "100.00", true);
                let id = vehicle.id;
                service.create(vehicle.clone()).await.unwrap();

                vehicle.mark_reserved();
                vehicle.rental_price = price("110.00");
                service.update(&id, vehicle).await.unwrap();

                let retrieved = service.get(&id).await.unwrap().unwrap();
                assert!(!retrieved.available);
                assert_eq!(retrieved.rental_price, price("110.00"));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                let ghost = create_test_vehicle("GHO5T00", "Ghost", "1.00", true);

                let result = service.update(&ghost.id, ghost.clone()).await;
                assert!(result.is_err(), "Updating a missing vehicle should fail");
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                let vehicle = create_test_vehicle("DEL1E23", "Onix", "100.00", true);
                let id = vehicle.id;
                service.create(vehicle).await.unwrap();

                service.delete(&id).await.unwrap();

                assert!(service.get(&id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;

                assert!(service.delete(&Uuid::new_v4()).await.is_ok());
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[tokio::test]
            async fn test_search_string_field() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                service
                    .create(create_test_vehicle("AAA1A11", "Onix", "100.00", true))
                    .await
                    .unwrap();
                service
                    .create(create_test_vehicle("BBB2B22", "HB20", "90.00", true))
                    .await
                    .unwrap();

                let results = service.search("plate", "BBB2B22").await.unwrap();
                assert_count(&results, 1);
                assert_eq!(results[0].label(), "BBB2B22");
                assert_field_value_string(&results[0].field_value("model").unwrap(), "HB20");
            }

            #[tokio::test]
            async fn test_search_decimal_field() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                service
                    .create(create_test_vehicle("AAA1A11", "Onix", "100.00", true))
                    .await
                    .unwrap();
                service
                    .create(create_test_vehicle("BBB2B22", "HB20", "89.90", true))
                    .await
                    .unwrap();

                // Decimal comparison ignores scale
                let results = service.search("rental_price", "100").await.unwrap();
                assert_count(&results, 1);
                assert_field_value_decimal(&results[0].field_value("rental_price").unwrap(), "100.00");
            }

            #[tokio::test]
            async fn test_search_boolean_field() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                service
                    .create(create_test_vehicle("AAA1A11", "Onix", "100.00", true))
                    .await
                    .unwrap();
                service
                    .create(create_test_vehicle("BBB2B22", "HB20", "90.00", true))
                    .await
                    .unwrap();
                service
                    .create(create_test_vehicle("CCC3C33", "Kwid", "70.00", false))
                    .await
                    .unwrap();

                let available = service.search("available", "true").await.unwrap();
                assert_count(&available, 2);
                assert!(available.iter().all(|v| v.available));

                let taken = service.search("available", "false").await.unwrap();
                assert_count(&taken, 1);
                assert_eq!(taken[0].plate, "CCC3C33");
            }

            #[tokio::test]
            async fn test_search_uuid_field() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                let vehicle = create_test_vehicle("AAA1A11", "Onix", "100.00", true);
                service.create(vehicle.clone()).await.unwrap();

                let results = service.search("id", &vehicle.id.to_string()).await.unwrap();
                assert_eq!(results, vec![vehicle]);
            }

            #[tokio::test]
            async fn test_search_no_results() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                service
                    .create(create_test_vehicle("AAA1A11", "Onix", "100.00", true))
                    .await
                    .unwrap();

                assert!(service.search("plate", "ZZZ9Z99").await.unwrap().is_empty());
                assert!(service.search("rental_price", "not-a-number").await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_search_unknown_field() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                service
                    .create(create_test_vehicle("AAA1A11", "Onix", "100.00", true))
                    .await
                    .unwrap();

                let results = service.search("colour", "red").await.unwrap();
                assert!(results.is_empty(), "Search on unknown field should return empty vec");
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let store = $factory;
                let service: &dyn DataService<Vehicle> = &store;
                let vehicle = create_test_vehicle("AAA1A11", "Onix", "100.00", true);
                service.create(vehicle.clone()).await.unwrap();

                let mut copy = vehicle.clone();
                copy.plate = "DUP0D00".to_string();
                assert!(service.create(copy).await.is_err());

                let stored = service.get(&vehicle.id).await.unwrap().unwrap();
                assert_eq!(stored.plate, "AAA1A11", "Original must not be overwritten");
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let store = $factory;
                let mut handles = Vec::new();

                for vehicle in sample_fleet(20) {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        let service: &dyn DataService<Vehicle> = &store;
                        service.create(vehicle).await.unwrap();
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                let service: &dyn DataService<Vehicle> = &store;
                assert_count(&service.list().await.unwrap(), 20);
                assert_eq!(Vehicle::resource_name(), "vehicles");
            }
        }
    };
}
