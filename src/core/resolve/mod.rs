//! Module resolution.
//!
//! - `script_path`: Logical module path -> concrete source file
//! - `components`: Page-scoped component resolution graph (`usingComponents` flattening)

pub mod components;
pub mod script_path;

pub use components::{ComponentResolver, USING_COMPONENTS, UsingComponents};
pub use script_path::{SCRIPT_EXTENSIONS, resolve_script_path};
