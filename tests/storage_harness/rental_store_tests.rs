//! Macro-generated test suite for `RentalStore` unit-of-work semantics.
//!
//! Every backend must apply a committed `UnitOfWork` completely or not at all,
//! and must reject writes that point at records it does not hold.
//!
//! # Usage
//!
//! ```rust,ignore
//! rental_store_tests!(InMemoryStore::new());
//! ```

/// Generate a `RentalStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store implementing `RentalStore`.
#[macro_export]
macro_rules! rental_store_tests {
    ($factory:expr) => {
        mod rental_store_contract_tests {
            use super::*;
            use rental::core::error::StorageError;
            use rental::core::store::{RentalStore, UnitOfWork};
            use rental::entities::{
                Customer, Employee, FuelLevel, ReservationStatus, Vehicle,
            };
            use uuid::Uuid;

            struct Seeded<S> {
                store: S,
                vehicle: Vehicle,
                customer: Customer,
                employee: Employee,
            }

            async fn seeded() -> Seeded<impl RentalStore> {
                let store = $factory;
                let vehicle = create_test_vehicle("RSV1A23", "Onix", "150.00", true);
                let customer = create_test_customer("Ana Souza");
                let employee = create_test_employee("Carla Lima");
                store.vehicles().create(vehicle.clone()).await.unwrap();
                store.customers().create(customer.clone()).await.unwrap();
                store.employees().create(employee.clone()).await.unwrap();
                Seeded {
                    store,
                    vehicle,
                    customer,
                    employee,
                }
            }

            fn is_integrity_error(err: &anyhow::Error) -> bool {
                matches!(
                    err.downcast_ref::<StorageError>(),
                    Some(StorageError::IntegrityError { .. })
                )
            }

            #[tokio::test]
            async fn test_empty_unit_is_noop() {
                let s = seeded().await;
                s.store.commit(UnitOfWork::new()).await.unwrap();
                assert!(s.store.reservations().list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_booking_reserves_vehicle() {
                let s = seeded().await;
                let reservation = create_test_reservation(
                    &s.customer,
                    &s.vehicle,
                    &s.employee,
                    "2024-03-01",
                    "2024-03-04",
                );
                let mut vehicle = s.vehicle.clone();
                vehicle.mark_reserved();

                s.store
                    .commit(
                        UnitOfWork::new()
                            .insert_reservation(reservation.clone())
                            .update_vehicle(vehicle),
                    )
                    .await
                    .unwrap();

                let stored = s.store.reservations().get(&reservation.id).await.unwrap().unwrap();
                assert_eq!(stored.total_cost, price("450.00"));
                assert_eq!(stored.status, ReservationStatus::Created);
                let vehicle = s.store.vehicles().get(&s.vehicle.id).await.unwrap().unwrap();
                assert!(!vehicle.available);
            }

            #[tokio::test]
            async fn test_return_releases_vehicle() {
                let s = seeded().await;
                let mut reservation = create_test_reservation(
                    &s.customer,
                    &s.vehicle,
                    &s.employee,
                    "2024-03-01",
                    "2024-03-02",
                );
                let mut vehicle = s.vehicle.clone();
                vehicle.mark_reserved();
                s.store
                    .commit(
                        UnitOfWork::new()
                            .insert_reservation(reservation.clone())
                            .update_vehicle(vehicle.clone()),
                    )
                    .await
                    .unwrap();

                reservation.register_pickup(FuelLevel::Half);
                reservation.finalize(FuelLevel::Full).unwrap();
                vehicle.mark_released();
                s.store
                    .commit(
                        UnitOfWork::new()
                            .update_reservation(reservation.clone())
                            .update_vehicle(vehicle),
                    )
                    .await
                    .unwrap();

                let stored = s.store.reservations().get(&reservation.id).await.unwrap().unwrap();
                assert_eq!(stored.status, ReservationStatus::Finalized);
                assert_eq!(stored.final_fuel_level, Some(FuelLevel::Full));
                let vehicle = s.store.vehicles().get(&s.vehicle.id).await.unwrap().unwrap();
                assert!(vehicle.available);
            }

            #[tokio::test]
            async fn test_failed_unit_leaves_store_untouched() {
                let s = seeded().await;
                let reservation = create_test_reservation(
                    &s.customer,
                    &s.vehicle,
                    &s.employee,
                    "2024-03-01",
                    "2024-03-02",
                );
                let mut vehicle = s.vehicle.clone();
                vehicle.mark_reserved();

                let err = s
                    .store
                    .commit(
                        UnitOfWork::new()
                            .update_vehicle(vehicle)
                            .insert_reservation(reservation.clone())
                            .delete_reservation(Uuid::new_v4()),
                    )
                    .await
                    .unwrap_err();

                assert!(is_integrity_error(&err));
                assert!(s.store.reservations().get(&reservation.id).await.unwrap().is_none());
                let vehicle = s.store.vehicles().get(&s.vehicle.id).await.unwrap().unwrap();
                assert!(vehicle.available, "Vehicle update must be rolled back");
            }

            #[tokio::test]
            async fn test_missing_references_rejected() {
                let s = seeded().await;
                let stranger = create_test_customer("Nobody");
                let ghost_employee = create_test_employee("Ghost");
                let ghost_vehicle = create_test_vehicle("GHO5T00", "Ghost", "1.00", true);

                let cases = [
                    create_test_reservation(&stranger, &s.vehicle, &s.employee, "2024-01-01", "2024-01-02"),
                    create_test_reservation(&s.customer, &ghost_vehicle, &s.employee, "2024-01-01", "2024-01-02"),
                    create_test_reservation(&s.customer, &s.vehicle, &ghost_employee, "2024-01-01", "2024-01-02"),
                ];

                for reservation in cases {
                    let err = s
                        .store
                        .commit(UnitOfWork::new().insert_reservation(reservation))
                        .await
                        .unwrap_err();
                    assert!(is_integrity_error(&err));
                }
                assert!(s.store.reservations().list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_duplicate_insert_rejected() {
                let s = seeded().await;
                let reservation = create_test_reservation(
                    &s.customer,
                    &s.vehicle,
                    &s.employee,
                    "2024-03-01",
                    "2024-03-02",
                );
                s.store
                    .commit(UnitOfWork::new().insert_reservation(reservation.clone()))
                    .await
                    .unwrap();

                let err = s
                    .store
                    .commit(UnitOfWork::new().insert_reservation(reservation))
                    .await
                    .unwrap_err();
                assert!(is_integrity_error(&err));
                assert_count(&s.store.reservations().list().await.unwrap(), 1);
            }

            #[tokio::test]
            async fn test_update_missing_reservation_rejected() {
                let s = seeded().await;
                let reservation = create_test_reservation(
                    &s.customer,
                    &s.vehicle,
                    &s.employee,
                    "2024-03-01",
                    "2024-03-02",
                );

                let err = s
                    .store
                    .commit(UnitOfWork::new().update_reservation(reservation))
                    .await
                    .unwrap_err();
                assert!(is_integrity_error(&err));
            }

            #[tokio::test]
            async fn test_delete_removes_reservation() {
                let s = seeded().await;
                let reservation = create_test_reservation(
                    &s.customer,
                    &s.vehicle,
                    &s.employee,
                    "2024-03-01",
                    "2024-03-02",
                );
                s.store
                    .commit(UnitOfWork::new().insert_reservation(reservation.clone()))
                    .await
                    .unwrap();

                s.store
                    .commit(UnitOfWork::new().delete_reservation(reservation.id))
                    .await
                    .unwrap();

                assert!(s.store.reservations().get(&reservation.id).await.unwrap().is_none());
                assert!(s.store.customers().get(&s.customer.id).await.unwrap().is_some());
            }
        }
    };
}
