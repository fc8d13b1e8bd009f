//! Diesel table definitions for the PostgreSQL schema.
//!
//! Keep in step with `backend/migrations/`; `diesel print-schema` against a
//! migrated database regenerates this file.

diesel::table! {
    /// Products offered by the service.
    ///
    /// `id` is minted by the flake generator, never by a sequence.
    products (id) {
        id -> Int8,
        /// Non-empty display name.
        name -> Varchar,
        /// Strictly positive price in minor units.
        price -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        /// Reserved for soft deletion; deletes currently remove the row.
        deleted_at -> Nullable<Timestamptz>,
    }
}
