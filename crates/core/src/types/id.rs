//! Client identifier.
//!
//! Identifiers are assigned by the store when a client is created and are
//! exchanged with API callers as hyphenated UUID strings.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when parsing a [`ClientId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientIdError {
    /// The input string is empty.
    #[error("client id cannot be empty")]
    Empty,
    /// The input is not a valid identifier.
    #[error("invalid client id: {0}")]
    Malformed(String),
}

/// Store-assigned identifier of a client record.
///
/// ## Examples
///
/// ```
/// use loyalty_core::ClientId;
///
/// let id = ClientId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
/// assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
///
/// assert!(ClientId::parse("").is_err());
/// assert!(ClientId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    ///
    /// Used by stores that assign identifiers themselves instead of
    /// delegating to the database.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier received from a caller.
    ///
    /// # Errors
    ///
    /// Returns [`ClientIdError::Empty`] for blank input and
    /// [`ClientIdError::Malformed`] when the input is not a UUID.
    pub fn parse(s: &str) -> Result<Self, ClientIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ClientIdError::Empty);
        }

        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ClientIdError::Malformed(s.to_owned()))
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ClientId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Uuid as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Uuid as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ClientId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <Uuid as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ClientId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Uuid as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        let id = ClientId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(ClientId::parse("  67e55044-10b1-426f-9247-bb680e5fe0c8 ").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ClientId::parse(""), Err(ClientIdError::Empty));
        assert_eq!(ClientId::parse("   "), Err(ClientIdError::Empty));
    }

    #[test]
    fn test_parse_malformed() {
        // 24-char hex object ids from document stores are not accepted
        assert!(matches!(
            ClientId::parse("65a1f0c2e4b0a1b2c3d4e5f6"),
            Err(ClientIdError::Malformed(_))
        ));
        assert!(matches!(
            ClientId::parse("not-an-id"),
            Err(ClientIdError::Malformed(_))
        ));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(ClientId::generate(), ClientId::generate());
    }

    #[test]
    fn test_serializes_as_string() {
        let id = ClientId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"67e55044-10b1-426f-9247-bb680e5fe0c8\"");
    }
}
