//! Validation rules for the add-client and edit-client forms.
//!
//! ## Constraints
//!
//! - `name`: at least 2 characters
//! - `phone`: at least 8 characters
//! - `address`: optional
//!
//! Lengths are counted in characters after trimming surrounding whitespace.

use serde::{Deserialize, Serialize};

use crate::{Client, ClientUpdate, NewClient};

/// Minimum length of a client name.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum length of a phone number.
pub const MIN_PHONE_LENGTH: usize = 8;

/// Raw form submission, as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl FormErrors {
    /// Whether no field failed validation.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

/// A form that passed validation, with trimmed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidClientForm {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl ClientForm {
    /// Pre-fill the form from an existing client.
    #[must_use]
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            phone: client.phone.clone(),
            address: Some(client.address.clone()),
        }
    }

    /// Check every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] with a message for each invalid field.
    pub fn validate(&self) -> Result<ValidClientForm, FormErrors> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let address = self.address.as_deref().map(str::trim).unwrap_or_default();

        let mut errors = FormErrors::default();
        if name.chars().count() < MIN_NAME_LENGTH {
            errors.name = Some(format!(
                "Name must be at least {MIN_NAME_LENGTH} characters"
            ));
        }
        if phone.chars().count() < MIN_PHONE_LENGTH {
            errors.phone = Some(format!(
                "Phone number must be at least {MIN_PHONE_LENGTH} digits"
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidClientForm {
            name: name.to_owned(),
            phone: phone.to_owned(),
            address: address.to_owned(),
        })
    }
}

impl ValidClientForm {
    /// Fields for a new client; the store defaults the point balance.
    #[must_use]
    pub fn into_new_client(self) -> NewClient {
        NewClient::new(self.name, self.phone).with_address(self.address)
    }

    /// Contact-details update for an existing client.
    ///
    /// The point balance is left out so the store keeps whatever it holds,
    /// including points added while the form was open.
    #[must_use]
    pub fn into_update(self) -> ClientUpdate {
        ClientUpdate {
            name: self.name,
            phone: self.phone,
            address: self.address,
            loyalty_points: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{ClientId, LoyaltyPoints};

    fn form(name: &str, phone: &str, address: Option<&str>) -> ClientForm {
        ClientForm {
            name: name.to_string(),
            phone: phone.to_string(),
            address: address.map(String::from),
        }
    }

    #[test]
    fn test_valid_form() {
        let valid = form("Alice", "0600000000", Some("Paris"))
            .validate()
            .unwrap();
        assert_eq!(valid.name, "Alice");
        assert_eq!(valid.phone, "0600000000");
        assert_eq!(valid.address, "Paris");
    }

    #[test]
    fn test_missing_address_becomes_empty() {
        let valid = form("Alice", "0600000000", None).validate().unwrap();
        assert_eq!(valid.address, "");
    }

    #[test]
    fn test_short_name_rejected() {
        let errors = form("A", "0600000000", None).validate().unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.phone.is_none());
    }

    #[test]
    fn test_short_phone_rejected() {
        let errors = form("Alice", "0600", None).validate().unwrap_err();
        assert!(errors.name.is_none());
        assert_eq!(
            errors.phone.as_deref(),
            Some("Phone number must be at least 8 digits")
        );
    }

    #[test]
    fn test_all_errors_reported_together() {
        let errors = form("", "", None).validate().unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.phone.is_some());
    }

    #[test]
    fn test_whitespace_does_not_count() {
        assert!(form("  A  ", "0600000000", None).validate().is_err());
        let valid = form("  Al ", " 06000000 ", None).validate().unwrap();
        assert_eq!(valid.name, "Al");
        assert_eq!(valid.phone, "06000000");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // "Zé" is two characters but three bytes
        assert!(form("Zé", "0600000000", None).validate().is_ok());
        assert!(form("é", "0600000000", None).validate().is_err());
    }

    #[test]
    fn test_new_client_starts_at_zero() {
        let new = form("Alice", "0600000000", None)
            .validate()
            .unwrap()
            .into_new_client();
        assert_eq!(new.loyalty_points, LoyaltyPoints::ZERO);
    }

    #[test]
    fn test_edit_preserves_points() {
        let client = NewClient::new("Alice", "0600000000")
            .with_points(LoyaltyPoints::new(12))
            .into_client(ClientId::generate());

        let update = form("Alicia", "0611111111", Some(""))
            .validate()
            .unwrap()
            .into_update();
        assert_eq!(update.loyalty_points, None);

        let updated = client.apply(&update);
        assert_eq!(updated.id, client.id);
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.loyalty_points, LoyaltyPoints::new(12));
    }

    #[test]
    fn test_prefill_from_client() {
        let client = NewClient::new("Alice", "0600000000")
            .with_address("Paris")
            .into_client(ClientId::generate());
        let prefilled = ClientForm::from_client(&client);
        assert_eq!(prefilled, form("Alice", "0600000000", Some("Paris")));
    }
}
