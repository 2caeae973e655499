//! Span field names used across the relay.
//!
//! Keeping them in one place lets log queries rely on stable keys.

/// Name of the per-connection span.
pub const CONNECTION_SPAN: &str = "relay.connection";

/// UUID v7 of the transport connection.
pub const CONNECTION_ID: &str = "connection_id";

/// Authenticated user identity.
pub const USER_ID: &str = "user_id";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_snake_case() {
        for field in [CONNECTION_ID, USER_ID] {
            assert!(field.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
