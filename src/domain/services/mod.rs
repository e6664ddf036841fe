//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally
//! belong to a single entity.
//!
//! ## Services
//!
//! - **ScriptNamer**: picks a readable name for unnamed creator scripts

mod script_namer;

pub use script_namer::*;
