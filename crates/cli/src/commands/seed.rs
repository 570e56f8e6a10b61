//! Seed the database with clients from a YAML file.
//!
//! # File Format
//!
//! ```yaml
//! - name: Alice Martin
//!   phone: "0600000000"
//!   address: 1 rue de la Paix
//!   loyaltyPoints: 3
//! - name: Bob Leroy
//!   phone: "0700000000"
//! ```
//!
//! Every entry is checked with the same rules as the add-client form before
//! anything is written.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use loyalty_core::{ClientForm, LoyaltyPoints, NewClient};
use loyalty_web::db::{ClientStore, PgClientStore};

use super::connect;

/// One client entry in a seed file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedClient {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub loyalty_points: Option<i64>,
}

/// Parse and validate a seed file, collecting every invalid entry.
///
/// # Errors
///
/// Returns a message per invalid entry, or the YAML error if the file does
/// not parse.
pub fn parse_seed(content: &str) -> Result<Vec<NewClient>, Vec<String>> {
    let entries: Vec<SeedClient> =
        serde_yaml::from_str(content).map_err(|e| vec![format!("Invalid YAML: {e}")])?;

    let mut clients = Vec::with_capacity(entries.len());
    let mut errors = Vec::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let form = ClientForm {
            name: entry.name,
            phone: entry.phone,
            address: entry.address,
        };

        let points = match entry.loyalty_points.map(LoyaltyPoints::try_from).transpose() {
            Ok(points) => points.unwrap_or_default(),
            Err(e) => {
                errors.push(format!("entry {}: {e}", index + 1));
                continue;
            }
        };

        match form.validate() {
            Ok(valid) => clients.push(valid.into_new_client().with_points(points)),
            Err(field_errors) => {
                for message in [field_errors.name, field_errors.phone].into_iter().flatten() {
                    errors.push(format!("entry {}: {message}", index + 1));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(clients)
    } else {
        Err(errors)
    }
}

/// Insert clients from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML seed file
///
/// # Errors
///
/// Returns an error if the file cannot be read, any entry is invalid, or
/// database operations fail.
pub async fn clients(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading clients from file");
    let content = tokio::fs::read_to_string(path).await?;

    // Validate before connecting to the database
    let new_clients = match parse_seed(&content) {
        Ok(clients) => clients,
        Err(errors) => {
            error!("Seed file validation failed:");
            for err in &errors {
                error!("  - {err}");
            }
            return Err(format!("{} validation errors found", errors.len()).into());
        }
    };
    info!(clients = new_clients.len(), "Seed file validated");

    let store = PgClientStore::new(connect().await?);
    for new_client in &new_clients {
        let client = store.create(new_client).await?;
        info!(client_id = %client.id, name = %client.name, "Inserted client");
    }

    info!("Seeding complete! {} client(s) inserted", new_clients.len());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_file() {
        let clients = parse_seed(
            r#"
- name: Alice Martin
  phone: "0600000000"
  address: 1 rue de la Paix
  loyaltyPoints: 3
- name: Bob Leroy
  phone: "0700000000"
"#,
        )
        .unwrap();

        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].address, "1 rue de la Paix");
        assert_eq!(clients[0].loyalty_points, LoyaltyPoints::new(3));
        assert_eq!(clients[1].address, "");
        assert_eq!(clients[1].loyalty_points, LoyaltyPoints::ZERO);
    }

    #[test]
    fn test_parse_reports_every_invalid_entry() {
        let errors = parse_seed(
            r#"
- name: A
  phone: "0600000000"
- name: Bob
  phone: "07"
- name: Carol
  phone: "0800000000"
  loyaltyPoints: -1
"#,
        )
        .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("entry 1:"));
        assert!(errors[1].starts_with("entry 2:"));
        assert!(errors[2].starts_with("entry 3:"));
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let errors = parse_seed("- name: Alice\n  phone: \"0600000000\"\n  email: a@b.c\n")
            .unwrap_err();
        assert!(errors[0].starts_with("Invalid YAML"));
    }
}
