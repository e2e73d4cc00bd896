use super::{create_no_arg, NoArgPluginFactory};

/// Native name of the plugin that skips emitting assets when errors occurred
pub const NO_EMIT_ON_ERRORS_PLUGIN: &str = "NoEmitOnErrorsPlugin";

/// Skip the emit phase when compilation produced errors
pub fn no_emit_on_errors_plugin() -> NoArgPluginFactory {
    create_no_arg(NO_EMIT_ON_ERRORS_PLUGIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::EnginePlugin;

    #[test]
    fn test_no_emit_on_errors_is_unconfigured() {
        let plugin = no_emit_on_errors_plugin().instantiate();
        assert_eq!(plugin.name(), "NoEmitOnErrorsPlugin");
        assert!(plugin.options().is_none());
    }
}
