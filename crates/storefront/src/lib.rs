//! Sunstone storefront client core.
//!
//! This crate implements the state layer behind the Sunstone shopping UI:
//! five small, independent stores plus a pure catalog query pipeline.
//! Visual components consume these stores through their operation
//! signatures; nothing here renders anything.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`storage`] - Durable key-value persistence with versioned snapshots
//! - [`directory`] - Remote user-directory client (json-server style API)
//! - [`models`] - Domain records shared across stores
//! - [`stores`] - Session, cart, wishlist, conversation, and review stores
//! - [`catalog`] - Immutable product fixtures and the query pipeline
//!
//! # Design
//!
//! Each store owns a disjoint key namespace in durable storage and never
//! reads another store's keys. Stores are constructed once per session and
//! passed by reference to consumers; there are no global singletons. Only
//! the session store performs network I/O (and is therefore async); every
//! other store is synchronous and in-memory with a storage mirror.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod directory;
pub mod models;
pub mod storage;
pub mod stores;
