//! Google Civic Information API.

pub mod client;

pub use client::CivicInfoClient;
