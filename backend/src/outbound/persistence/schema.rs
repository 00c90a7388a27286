//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly. Regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int8,
        /// Unique login name.
        #[max_length = 256]
        username -> Varchar,
        #[max_length = 256]
        email -> Varchar,
        /// bcrypt digest, never plaintext.
        hashed_password -> Varchar,
    }
}

diesel::table! {
    /// Notes, each owned by one user. Rows cascade when the owner is deleted.
    notes (id) {
        id -> Int8,
        #[max_length = 256]
        title -> Varchar,
        content -> Text,
        user_id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(notes -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(notes, users);
