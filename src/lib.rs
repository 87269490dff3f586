//! Username/password service for the energy-forecast dashboard.
//!
//! Two routes, `POST /register` and `POST /login`, each taking
//! `{ "username", "password" }` and answering `{ "success": bool }`.
//! Credentials live in a JSON document (`users.json` by default) or, when
//! `AUTH_STORE` is a `sqlite:` URL, in a SQLite table.
//!
//! `GET /forecast?latitude=..&longitude=..&days=..` serves synthetic hourly
//! weather and solar/wind output for the dashboard charts.
//!
//! # Configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `AUTH_HOST` | `0.0.0.0` |
//! | `AUTH_PORT` | `3003` |
//! | `AUTH_STORE` | `users.json` |
//! | `AUTH_PASSWORD_SCHEME` | `plaintext` (or `argon2`) |
//! | `AUTH_CREATE_STORE` | `true` |
//!
//! Log filtering follows `RUST_LOG`, defaulting to `info`.

pub mod accounts;
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod forecast;
