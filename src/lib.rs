//! Mailing list subscriber registry served over a JSON API and a gRPC API
//! backed by one SQLite database.

pub mod config;
pub mod domain;
pub mod error;
pub mod grpc;
pub mod routes;
pub mod startup;
pub mod storage;
pub mod telemetry;
