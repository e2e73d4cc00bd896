//! Host-constructible adapters for native builtin plugins
//!
//! A native plugin is identified by name. [`create`] pairs that name with a
//! resolver mapping constructor arguments to the options handed to the
//! engine; [`create_no_arg`] is the same adapter with a resolver that
//! ignores its input and supplies no options.

mod builtin;

pub use builtin::{no_emit_on_errors_plugin, NO_EMIT_ON_ERRORS_PLUGIN};

use crate::errors::BridgeError;
use crate::normalize::serialize_object;
use crate::one_or_many::{as_array, OneOrMany};
use crate::value::HostValue;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

/// A plugin instance as seen by the host
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinPlugin {
    name: Arc<str>,
    options: Option<HostValue>,
}

/// A plugin in boundary form: options are already serialized bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBuiltinPlugin {
    pub name: Arc<str>,
    pub options: Option<Vec<u8>>,
}

/// Anything that can be registered with the native engine
pub trait EnginePlugin {
    fn name(&self) -> &str;

    fn to_raw(&self) -> Result<RawBuiltinPlugin, BridgeError>;
}

impl BuiltinPlugin {
    pub fn options(&self) -> Option<&HostValue> {
        self.options.as_ref()
    }
}

impl EnginePlugin for BuiltinPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn to_raw(&self) -> Result<RawBuiltinPlugin, BridgeError> {
        Ok(RawBuiltinPlugin {
            name: Arc::clone(&self.name),
            options: serialize_object(self.options.clone())?,
        })
    }
}

/// Builds [`BuiltinPlugin`]s for one native plugin name
pub struct PluginFactory<A, F> {
    name: Arc<str>,
    resolve: F,
    _args: PhantomData<fn(A)>,
}

impl<A, F> PluginFactory<A, F>
where
    F: Fn(A) -> Option<HostValue>,
{
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct a plugin instance from host arguments
    pub fn construct(&self, args: A) -> BuiltinPlugin {
        let options = (self.resolve)(args);
        trace!(
            plugin = %self.name,
            has_options = options.is_some(),
            "constructed builtin plugin"
        );
        BuiltinPlugin {
            name: Arc::clone(&self.name),
            options,
        }
    }
}

/// Factory type produced by [`create_no_arg`]
pub type NoArgPluginFactory = PluginFactory<(), fn(()) -> Option<HostValue>>;

impl NoArgPluginFactory {
    /// Construct a plugin instance; no configuration is accepted
    pub fn instantiate(&self) -> BuiltinPlugin {
        self.construct(())
    }
}

/// Adapter for a native plugin whose options are derived from constructor arguments
pub fn create<A, F>(name: impl Into<Arc<str>>, resolve: F) -> PluginFactory<A, F>
where
    F: Fn(A) -> Option<HostValue>,
{
    PluginFactory {
        name: name.into(),
        resolve,
        _args: PhantomData,
    }
}

fn no_options(_: ()) -> Option<HostValue> {
    None
}

/// Adapter for a native plugin that takes no configuration
pub fn create_no_arg(name: impl Into<Arc<str>>) -> NoArgPluginFactory {
    create(name, no_options as fn(()) -> Option<HostValue>)
}

/// Convert one plugin or an ordered list of plugins into boundary form.
///
/// Order is preserved; the first serialization failure aborts.
pub fn to_raw_plugins<P: EnginePlugin>(
    plugins: OneOrMany<P>,
) -> Result<Vec<RawBuiltinPlugin>, BridgeError> {
    as_array(plugins).iter().map(EnginePlugin::to_raw).collect()
}
