//! Google Sheets backing store client.
//!
//! The spreadsheet is the primary store for clan items. This module provides
//! a thin client over the Sheets v4 `values` REST API authenticated with a
//! service-account key: `auth` handles RS256 JWT signing and token caching,
//! `client` handles worksheet reads, appends, and the header row, including
//! the row <-> domain item codec.

pub mod auth;
pub mod client;

pub use client::SheetsClient;
