//! taro-migrate - config migration for Taro projects
//!
//! Moves page, component and app config declared in source (class fields and
//! `Component.config = {...}` assignments) into the sibling `*.config.js` /
//! `*.config.ts` files that Taro 3 reads, flattening every page's
//! `usingComponents` across the components it renders.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands and report rendering)
//! - `config`: Configuration file loading and parsing
//! - `core`: Migration engine (parse, extract, resolve, write)
//! - `issues`: Issue type definitions and reporting
//! - `utils`: Shared path utilities

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
