//! # football-analytics
//!
//! REST API and ingestion service for football match analytics built on
//! StatsBomb open data. Competitions, matches, lineups, and raw match
//! events are pulled from an S3 bucket into PostgreSQL by the `loader`
//! binary; the server binary exposes read-only analytics endpoints plus
//! the health probes the container runtime relies on.
//!
//! ## Architecture
//!
//! ```text
//! S3 open-data bucket                 HTTP clients
//!     │                                   │
//!     ├── OpenDataStore (ingest/s3)       ├── REST handlers (api/)
//!     ├── DataLoader (ingest/loader)      │
//!     │                                   │
//!     └───────► MatchStore (persistence/) ◄┘
//!                     │
//!                 PostgreSQL
//! ```
//!
//! Configuration comes from the environment (`config`), with AWS SSM
//! Parameter Store fallback for secrets (`secrets`).

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod persistence;
pub mod secrets;
