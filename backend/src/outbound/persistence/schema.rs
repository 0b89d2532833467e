//! Diesel table definitions.
//!
//! Kept in step with `backend/migrations`.

diesel::table! {
    /// Registered users. `id` is generated by the database.
    users (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        created_at -> Timestamptz,
    }
}
