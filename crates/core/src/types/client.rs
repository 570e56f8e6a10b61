//! Client record and its write models.

use serde::{Deserialize, Serialize};

use super::{ClientId, LoyaltyPoints};

/// A shop customer tracked for loyalty purposes.
///
/// Serialized with camelCase keys, matching the JSON API:
/// `{"id", "name", "phone", "address", "loyaltyPoints"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub loyalty_points: LoyaltyPoints,
}

impl Client {
    /// Apply an update to this record, returning the new record.
    ///
    /// A `None` point balance keeps the current balance.
    #[must_use]
    pub fn apply(&self, update: &ClientUpdate) -> Self {
        Self {
            id: self.id,
            name: update.name.clone(),
            phone: update.phone.clone(),
            address: update.address.clone(),
            loyalty_points: update.loyalty_points.unwrap_or(self.loyalty_points),
        }
    }
}

/// Fields for creating a client. The store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub loyalty_points: LoyaltyPoints,
}

impl NewClient {
    /// New client with an empty address and no points.
    #[must_use]
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: String::new(),
            loyalty_points: LoyaltyPoints::ZERO,
        }
    }

    /// Set the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the starting point balance.
    #[must_use]
    pub const fn with_points(mut self, points: LoyaltyPoints) -> Self {
        self.loyalty_points = points;
        self
    }

    /// Attach a store-assigned identifier.
    #[must_use]
    pub fn into_client(self, id: ClientId) -> Client {
        Client {
            id,
            name: self.name,
            phone: self.phone,
            address: self.address,
            loyalty_points: self.loyalty_points,
        }
    }
}

/// Full replacement of a client's mutable fields.
///
/// `loyalty_points` is `None` when the caller did not submit a balance; the
/// stored balance is then left as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUpdate {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub loyalty_points: Option<LoyaltyPoints>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn alice() -> Client {
        NewClient::new("Alice", "0600000000")
            .with_address("1 rue de la Paix")
            .with_points(LoyaltyPoints::new(7))
            .into_client(ClientId::generate())
    }

    #[test]
    fn test_json_shape() {
        let client = alice();
        let value = serde_json::to_value(&client).unwrap();

        assert_eq!(value["id"], client.id.to_string());
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["phone"], "0600000000");
        assert_eq!(value["address"], "1 rue de la Paix");
        assert_eq!(value["loyaltyPoints"], 7);
    }

    #[test]
    fn test_new_client_defaults() {
        let new = NewClient::new("Bob", "0700000000");
        assert_eq!(new.address, "");
        assert_eq!(new.loyalty_points, LoyaltyPoints::ZERO);
    }

    #[test]
    fn test_apply_replaces_contact_fields() {
        let client = alice();
        let update = ClientUpdate {
            name: "Alicia".to_string(),
            phone: "0611111111".to_string(),
            address: String::new(),
            loyalty_points: Some(LoyaltyPoints::new(9)),
        };

        let updated = client.apply(&update);
        assert_eq!(updated.id, client.id);
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.address, "");
        assert_eq!(updated.loyalty_points, LoyaltyPoints::new(9));
    }

    #[test]
    fn test_apply_without_points_keeps_balance() {
        let client = alice();
        let update = ClientUpdate {
            name: "Alice".to_string(),
            phone: "0600000000".to_string(),
            address: String::new(),
            loyalty_points: None,
        };
        assert_eq!(client.apply(&update).loyalty_points, LoyaltyPoints::new(7));
    }
}
