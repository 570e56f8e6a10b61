//! Client inspection commands.

use loyalty_web::db::{ClientStore, PgClientStore};

use super::connect;

/// Print every client, oldest first.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let store = PgClientStore::new(connect().await?);
    let clients = store.list().await?;

    if clients.is_empty() {
        println!("No clients.");
        return Ok(());
    }

    println!("{:<36}  {:<24}  {:<16}  {:>6}", "ID", "NAME", "PHONE", "POINTS");
    for client in &clients {
        let reward = if client.loyalty_points.reward_available() {
            "  reward available"
        } else {
            ""
        };
        println!(
            "{:<36}  {:<24}  {:<16}  {:>6}{reward}",
            client.id,
            client.name,
            client.phone,
            client.loyalty_points.value(),
        );
    }
    println!("{} client(s)", clients.len());

    Ok(())
}
