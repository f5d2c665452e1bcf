//! Staff members handling reservations

crate::impl_data_entity!(Employee, "employee", "employees", {});
