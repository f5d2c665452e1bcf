//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive trait implementations needed
//! for each stored record type.

/// Implement [`Entity`](crate::core::entity::Entity) for a struct carrying
/// `id`, `created_at` and `updated_at` fields.
///
/// # Example
/// ```rust,ignore
/// impl_entity!(Vehicle, "vehicle", "vehicles");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $singular:expr, $plural:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}

/// Complete macro to create a named Data entity with automatic trait implementations
///
/// Generates the struct (id, name, timestamps and the listed specific fields),
/// the `Entity` and `Data` implementations and a `new` constructor. The name
/// is the record's label. Identifier and timestamps default when absent from
/// deserialized input, so seed files can omit them.
///
/// Specific fields must convert into [`FieldValue`](crate::core::field::FieldValue)
/// to be searchable.
///
/// # Example
///
/// ```rust,ignore
/// impl_data_entity!(Customer, "customer", "customers", {});
///
/// let customer = Customer::new("Ana Souza".to_string());
/// ```
#[macro_export]
macro_rules! impl_data_entity {
    (
        $type:ident,
        $singular:expr,
        $plural:expr,
        {
            $( $specific_field:ident : $specific_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier
            #[serde(default = "::uuid::Uuid::new_v4")]
            pub id: ::uuid::Uuid,

            /// Display name
            pub name: String,

            $( pub $specific_field : $specific_type, )*

            /// When this record was created
            #[serde(default = "::chrono::Utc::now")]
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was last updated
            #[serde(default = "::chrono::Utc::now")]
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,
        }

        $crate::impl_entity!($type, $singular, $plural);

        impl $crate::core::entity::Data for $type {
            fn label(&self) -> &str {
                &self.name
            }

            fn indexed_fields() -> &'static [&'static str] {
                &["id", "name" $(, stringify!($specific_field) )*]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => Some($crate::core::field::FieldValue::Uuid(self.id)),
                    "name" => Some($crate::core::field::FieldValue::String(self.name.clone())),
                    $( stringify!($specific_field) => Some(self.$specific_field.clone().into()), )*
                    _ => None,
                }
            }
        }

        impl $type {
            /// Create a new record stamped with the current time
            pub fn new(name: String $(, $specific_field: $specific_type )*) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    name,
                    $( $specific_field, )*
                    created_at: now,
                    updated_at: now,
                }
            }
        }
    };
}
