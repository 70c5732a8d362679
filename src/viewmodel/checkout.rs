//! Checkout form view-model.

use std::rc::Rc;
use thiserror::Error;
use tracing::{info, warn};
use crate::domain::Receipt;
use crate::store::BasketStore;

/// Checkout field problems, in the order they are checked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required.")]
    NameRequired,
    #[error("Email is required.")]
    EmailRequired,
    #[error("Phone is required.")]
    PhoneRequired,
    #[error("Email format is invalid.")]
    InvalidEmail,
    #[error("Phone must have at least 10 digits.")]
    PhoneTooShort,
}

pub const MIN_PHONE_DIGITS: usize = 10;

/// Trimmed contact details that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// First failing rule wins.
pub fn validate(name: &str, email: &str, phone: &str) -> Result<ContactDetails, ValidationError> {
    let (name, email, phone) = (name.trim(), email.trim(), phone.trim());
    if name.is_empty() { return Err(ValidationError::NameRequired); }
    if email.is_empty() { return Err(ValidationError::EmailRequired); }
    if phone.is_empty() { return Err(ValidationError::PhoneRequired); }
    if !(email.contains('@') && email.contains('.')) { return Err(ValidationError::InvalidEmail); }
    if phone.chars().filter(char::is_ascii_digit).count() < MIN_PHONE_DIGITS {
        return Err(ValidationError::PhoneTooShort);
    }
    Ok(ContactDetails { name: name.to_string(), email: email.to_string(), phone: phone.to_string() })
}

pub struct CheckoutViewModel {
    basket: Rc<BasketStore>,
    name: String,
    email: String,
    phone: String,
    validation_message: Option<String>,
    payment_succeeded: bool,
    last_receipt: Option<Receipt>,
}

impl CheckoutViewModel {
    pub fn new(basket: Rc<BasketStore>) -> Self {
        Self {
            basket,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            validation_message: None,
            payment_succeeded: false,
            last_receipt: None,
        }
    }

    pub fn set_name(&mut self, v: impl Into<String>) { self.name = v.into(); }
    pub fn set_email(&mut self, v: impl Into<String>) { self.email = v.into(); }
    pub fn set_phone(&mut self, v: impl Into<String>) { self.phone = v.into(); }

    pub fn name(&self) -> &str { &self.name }
    pub fn email(&self) -> &str { &self.email }
    pub fn phone(&self) -> &str { &self.phone }

    pub fn validation_message(&self) -> Option<&str> { self.validation_message.as_deref() }
    pub fn payment_succeeded(&self) -> bool { self.payment_succeeded }
    pub fn last_receipt(&self) -> Option<&Receipt> { self.last_receipt.as_ref() }

    /// Validate the form and, if it passes, take a receipt and empty the basket.
    pub fn pay_tapped(&mut self) -> Result<(), ValidationError> {
        self.payment_succeeded = false;

        let contact = match validate(&self.name, &self.email, &self.phone) {
            Ok(contact) => contact,
            Err(e) => {
                info!(reason = %e, "Checkout rejected");
                self.validation_message = Some(e.to_string());
                return Err(e);
            }
        };
        self.validation_message = None;

        let receipt = Receipt::issue(contact.name, contact.email, &self.basket.current_basket());
        if let Err(e) = self.basket.clear() {
            warn!(error = %e, "Basket clear failed after payment");
        }
        info!(receipt = %receipt.id(), total = %receipt.total(), "Payment completed");
        self.last_receipt = Some(receipt);
        self.payment_succeeded = true;
        Ok(())
    }
}
