use super::{FieldKind, FieldSpec, ResourceModel};

const CUSTOMER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("firstName", FieldKind::String, "First name"),
    FieldSpec::required("lastName", FieldKind::String, "Last name"),
    FieldSpec::required("email", FieldKind::String, "Email"),
    FieldSpec::optional("phone", FieldKind::String, "Phone"),
    FieldSpec::optional("address", FieldKind::String, "Address"),
];

/// Implementation of ResourceModel for the Customers resource.
pub struct CustomerModel;

impl ResourceModel for CustomerModel {
    fn resource_name(&self) -> &str {
        "customers"
    }

    fn model_name(&self) -> &str {
        "Customer"
    }

    fn singular(&self) -> &str {
        "customer"
    }

    fn default_database(&self) -> &str {
        "customers_db"
    }

    fn default_port(&self) -> u16 {
        8001
    }

    fn fields(&self) -> &[FieldSpec] {
        CUSTOMER_FIELDS
    }
}
