#![doc = "issue-vault-core: core logic library for issue-vault."]

//! This crate contains the export pipeline that turns a repository's issue list into a
//! cross-linked Markdown vault. It knows nothing about HTTP or argument parsing: the remote
//! listing and the filesystem are reached through the traits in [`contract`].
//!
//! # Pipeline
//! [`fetch::fetch_all`] → [`index::build_index`] → [`namer::CategoryNamer`] →
//! [`render`] → [`contract::DocumentWriter`], orchestrated by [`export::export`].

pub mod config;
pub mod contract;
pub mod error;
pub mod export;
pub mod fetch;
pub mod index;
pub mod model;
pub mod namer;
pub mod render;
pub mod sanitize;
