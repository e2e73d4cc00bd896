//! Host-side marshalling layer for a native build engine
//!
//! This crate prepares host values before they cross into the engine and
//! folds what comes back into one error shape:
//! 1. `normalize` coerces text, bytes and objects into boundary payloads
//! 2. `failure` unifies host exceptions and engine diagnostics
//! 3. `plugin` exposes native builtin plugins as host-constructible objects
//! 4. `deprecation` prints environment-gated deprecation advisories
//!
//! Everything is synchronous and reentrant. The only process-wide state is
//! the lazily read advisory switch and the logger.

pub mod deprecation;
pub mod errors;
pub mod failure;
mod initialization;
pub mod normalize;
pub mod one_or_many;
pub mod plugin;
pub mod utils;
pub mod value;

pub use deprecation::{deprecated_warn, deprecated_warn_with, indent};
pub use errors::BridgeError;
pub use failure::{
    concat_error_msg_and_stack, CanonicalError, EngineError, Failure, HostException,
};
pub use initialization::{initialize, initialize_from_env};
pub use normalize::{serialize_object, to_buffer, to_object};
pub use one_or_many::{as_array, OneOrMany};
pub use plugin::{create, create_no_arg, BuiltinPlugin, EnginePlugin, RawBuiltinPlugin};
pub use utils::unsupported;
pub use value::HostValue;
