//! Create-product form: field values, per-field messages and the submit operation.

use shared::{domain::ProductType, protocol::NewProduct};

use crate::{
    classifier::{ErrorClassifier, StatusCodes},
    controller::{OperationController, OperationState, Settlement},
    error::RunRejected,
    transport::RemoteCall,
    validation::{FieldSource, FieldValue, ValidationGate, ValidationResult},
};

pub const NAME_FIELD: &str = "name";
pub const SIZE_FIELD: &str = "size";

impl FieldSource for NewProduct {
    fn field_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::new(NAME_FIELD, self.name.as_str()),
            FieldValue::new(SIZE_FIELD, self.size.as_str()),
        ]
    }
}

/// Read-only snapshot for a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub name: String,
    pub size: String,
    pub product_type: ProductType,
    pub field_errors: ValidationResult,
    pub state: OperationState,
}

impl FormView {
    pub fn field_error(&self, field: &str) -> &str {
        self.field_errors.message(field).unwrap_or_default()
    }

    pub fn submit_enabled(&self) -> bool {
        !self.state.is_busy()
    }
}

pub struct ProductForm<C> {
    name: String,
    size: String,
    product_type: ProductType,
    field_errors: ValidationResult,
    gate: ValidationGate,
    controller: OperationController<C>,
}

impl<C> ProductForm<C>
where
    C: RemoteCall<Payload = NewProduct, Output = ()>,
{
    pub fn new(api: C, codes: &StatusCodes) -> Self {
        let gate = ValidationGate::required([NAME_FIELD, SIZE_FIELD]);
        let controller = OperationController::new(
            "create_product",
            api,
            ErrorClassifier::new(codes),
            codes.created,
        )
        .with_validation(gate.clone());

        Self {
            name: String::new(),
            size: String::new(),
            product_type: ProductType::default(),
            field_errors: ValidationResult::default(),
            gate,
            controller,
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_size(&mut self, value: impl Into<String>) {
        self.size = value.into();
    }

    pub fn set_type(&mut self, product_type: ProductType) {
        self.product_type = product_type;
    }

    /// Re-checks a single field when it loses focus. Unknown fields are ignored.
    pub fn blur(&mut self, field: &str) {
        let value = match field {
            NAME_FIELD => &self.name,
            SIZE_FIELD => &self.size,
            _ => return,
        };
        let message = self.gate.validate_field(field, value);
        self.field_errors.merge(field, message);
    }

    pub async fn submit(&mut self) -> Result<Settlement<()>, RunRejected> {
        let payload = NewProduct {
            name: self.name.clone(),
            size: self.size.clone(),
            product_type: self.product_type,
        };
        let fields = payload.field_values();

        let outcome = self.controller.run(payload).await;
        match &outcome {
            Err(RunRejected::Invalid(errors)) => self.field_errors = errors.clone(),
            Err(RunRejected::Busy) => {}
            Ok(settlement) => {
                self.field_errors = self.gate.validate_all(&fields);
                if settlement.is_success() {
                    self.clear_inputs();
                }
            }
        }
        outcome
    }

    fn clear_inputs(&mut self) {
        self.name.clear();
        self.size.clear();
        self.product_type = ProductType::default();
    }

    pub fn view(&self) -> FormView {
        FormView {
            name: self.name.clone(),
            size: self.size.clone(),
            product_type: self.product_type,
            field_errors: self.field_errors.clone(),
            state: self.controller.state(),
        }
    }

    pub fn controller(&self) -> &OperationController<C> {
        &self.controller
    }
}

#[cfg(test)]
#[path = "tests/product_form_tests.rs"]
mod tests;
