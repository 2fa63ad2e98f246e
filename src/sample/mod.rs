//! Built-in command modules.
//!
//! Each module is a loader registering its commands on an interface; the
//! `nbcli` binary loads all of [`MODULES`].

mod foo;
mod hello;

#[cfg(test)]
mod tests;

pub use foo::FooSpec;

use crate::cli::ModuleLoader;

/// Every built-in module, in load order.
pub const MODULES: &[ModuleLoader] = &[hello::load, foo::load];
