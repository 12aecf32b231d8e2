//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts. `email` is unique and stored lowercased.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        password_hash -> Text,
        display_name -> Varchar,
        role -> Varchar,
        profile_image_url -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    events (id) {
        id -> Uuid,
        name -> Text,
        date -> Date,
        description -> Text,
        location_address -> Nullable<Text>,
        image_url -> Nullable<Text>,
        organizer_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (user, event); `seq` preserves registration order.
    registrations (seq) {
        seq -> Int8,
        user_id -> Uuid,
        event_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed follow edges.
    follows (follower_id, followed_id) {
        follower_id -> Uuid,
        followed_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    user_skills (user_id, skill) {
        user_id -> Uuid,
        skill -> Varchar,
    }
}

diesel::table! {
    groups (id) {
        id -> Uuid,
        name -> Varchar,
        created_by -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    group_members (group_id, user_id) {
        group_id -> Uuid,
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Applied demo data seeds, one row per seed name.
    example_data_runs (seed_key) {
        seed_key -> Text,
        seed -> Int8,
        user_count -> Int4,
        seeded_at -> Timestamptz,
    }
}

diesel::joinable!(events -> users (organizer_id));
diesel::joinable!(group_members -> groups (group_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    events,
    registrations,
    follows,
    user_skills,
    groups,
    group_members,
    example_data_runs,
);
