//! Free-text search over a client list.
//!
//! A client matches when the query is a case-insensitive substring of its
//! name, phone or address. An empty query matches every client.

use crate::Client;

/// Whether `client` matches `query`.
///
/// ```
/// use loyalty_core::{ClientId, NewClient, matches_query};
///
/// let alice = NewClient::new("Alice", "060").into_client(ClientId::generate());
/// assert!(matches_query(&alice, "ALI"));
/// assert!(matches_query(&alice, "06"));
/// assert!(!matches_query(&alice, "bob"));
/// ```
#[must_use]
pub fn matches_query(client: &Client, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [&client.name, &client.phone, &client.address]
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Clients matching `query`, in their original order.
#[must_use]
pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    clients
        .iter()
        .filter(|client| matches_query(client, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientId, NewClient};

    fn client(name: &str, phone: &str, address: &str) -> Client {
        NewClient::new(name, phone)
            .with_address(address)
            .into_client(ClientId::generate())
    }

    fn names(clients: &[&Client]) -> Vec<String> {
        clients.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_filters_by_name_case_insensitively() {
        let clients = vec![client("Alice", "060", ""), client("Bob", "070", "")];

        let filtered = filter_clients(&clients, "ali");
        assert_eq!(names(&filtered), vec!["Alice"]);

        let filtered = filter_clients(&clients, "ALI");
        assert_eq!(names(&filtered), vec!["Alice"]);
    }

    #[test]
    fn test_filters_by_phone() {
        let clients = vec![client("Alice", "060", ""), client("Bob", "070", "")];
        assert_eq!(names(&filter_clients(&clients, "07")), vec!["Bob"]);
    }

    #[test]
    fn test_filters_by_address() {
        let clients = vec![
            client("Alice", "060", "12 Rue Victor Hugo"),
            client("Bob", "070", "3 avenue Foch"),
        ];
        assert_eq!(names(&filter_clients(&clients, "hugo")), vec!["Alice"]);
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let clients = vec![
            client("Charlie", "080", ""),
            client("Alice", "060", ""),
            client("Bob", "070", ""),
        ];
        assert_eq!(
            names(&filter_clients(&clients, "")),
            vec!["Charlie", "Alice", "Bob"]
        );
        assert_eq!(filter_clients(&clients, "   ").len(), 3);
    }

    #[test]
    fn test_no_match() {
        let clients = vec![client("Alice", "060", "")];
        assert!(filter_clients(&clients, "zoe").is_empty());
    }

    #[test]
    fn test_any_field_matching_includes_record() {
        // "0" appears in Bob's phone, not in any of Alice's fields
        let clients = vec![client("Alice", "123", "Lyon"), client("Bob", "070", "Paris")];
        assert_eq!(names(&filter_clients(&clients, "0")), vec!["Bob"]);
    }
}
