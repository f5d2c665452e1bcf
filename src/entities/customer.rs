//! Customers renting vehicles. Read-only to the reservation workflow.

crate::impl_data_entity!(Customer, "customer", "customers", {});
