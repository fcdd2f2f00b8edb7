//! Implementation of the `#[derive(Bindable)]` macro.
//!
//! This module provides derive macro support for the searchbind binder,
//! generating cached field descriptors from struct annotations.

mod attrs;
mod derive;

pub use derive::bindable_derive_impl;
