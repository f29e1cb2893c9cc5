//! Host-side source emitters for cefbind.
//!
//! Takes the field descriptors built by `cefbind-core` and renders the
//! fragments a binding file is assembled from: call adaptations for
//! function-pointer members, to-native/from-native statements for data
//! members, and the native trampolines that forward through function
//! pointers.
//!
//! ## Modules
//!
//! - [`ir`]: Small host-syntax tree rendered by `Display`
//! - [`context`]: Shared emission context
//! - [`call`]: Call-adaptation emitter
//! - [`serialize`]: Struct (de)serialization emitter
//! - [`trampoline`]: Trampoline emitter
//! - [`pass`]: Whole-declaration generation pass

pub mod call;
pub mod context;
pub mod ir;
pub mod pass;
pub mod serialize;
pub mod trampoline;

pub use call::{emit_call, parameter_list, CallAdaptation};
pub use context::EmitContext;
pub use pass::{emit_field, generate, generate_with, FieldFragments, StructFragments};
pub use serialize::{from_native, to_native};
pub use trampoline::{emit_trampoline, Trampoline};
