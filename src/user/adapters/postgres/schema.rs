//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Unique, lowercased email address.
        #[max_length = 255]
        email -> Varchar,
        /// Role name.
        #[max_length = 50]
        role -> Varchar,
        /// SHA-256 hex digest of the API token.
        #[max_length = 64]
        api_token_digest -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
