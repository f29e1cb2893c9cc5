//! Field model and type lowering for cefbind.
//!
//! Turns C struct member declarations (as found in a library's public
//! headers) into field descriptors with host-language types, ready for the
//! emitters in `cefbind-emit`.
//!
//! ## Modules
//!
//! - [`ctype`]: C type text filter and canonicalization
//! - [`mapping`]: Primitive C → host type table
//! - [`lower`]: Type lowering engine
//! - [`naming`]: Struct-name translation and identifier rewriting
//! - [`registry`]: Known structs and enums
//! - [`field`]: Field descriptor builder
//! - [`declaration`]: Declaration file parsing
//! - [`config`]: Generator configuration

pub mod config;
pub mod ctype;
pub mod declaration;
pub mod error;
pub mod field;
pub mod lower;
pub mod mapping;
pub mod naming;
pub mod registry;

pub use config::GeneratorConfig;
pub use declaration::BindingDeclaration;
pub use error::{BindError, Result};
pub use field::{Field, Position};
pub use lower::{lower_c_type, Lowered};
pub use naming::{PrefixNaming, StructNameTranslator};
pub use registry::{Registry, StructDef};
