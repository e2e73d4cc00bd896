//! Deprecation advisories
//!
//! Whether advisories are printed is decided once per process from
//! `PACKHOST_DEP_WARNINGS`. Recomputing it is harmless, since the same
//! environment yields the same answer, so the lazy cell only saves the
//! repeated lookup.

use colored::Colorize;
use once_cell::sync::Lazy;
use packhost_config::{advisories_enabled_from_env, DEP_WARNINGS_ENV};
use packhost_logger as logger;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Prefix applied to the disable hint below every advisory
pub const HINT_INDENT: &str = "    ";

static ADVISORIES_ENABLED: Lazy<bool> = Lazy::new(advisories_enabled_from_env);

/// Whether advisories are enabled for this process
pub fn advisories_enabled() -> bool {
    *ADVISORIES_ENABLED
}

/// Prefix every line of `text` with `prefix`.
///
/// The prefix is re-inserted after each line break that is followed by more
/// text, so a trailing newline does not gain a dangling prefix and blank
/// lines stay blank.
pub fn indent(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len() + prefix.len());
    out.push_str(prefix);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '\n' && chars.peek().is_some_and(|next| *next != '\n') {
            out.push_str(prefix);
        }
    }
    out
}

fn disable_hint() -> String {
    format!(
        "Set env `{}` to 'false' to temporarily disable deprecation warnings.\n",
        DEP_WARNINGS_ENV
    )
}

/// Write an advisory to `out` when `enabled`; write nothing otherwise.
///
/// Emphasis goes through `colored`, so it is dropped when stderr is not a
/// terminal or `NO_COLOR` is set; the text itself is always written.
pub fn warn_to<W: Write>(out: &mut W, content: &str, enabled: bool) -> io::Result<()> {
    if !enabled {
        trace!("deprecation advisory suppressed");
        return Ok(());
    }
    writeln!(out, "{}", content.yellow().bold())?;
    writeln!(out, "{}", indent(&disable_hint(), HINT_INDENT))?;
    Ok(())
}

/// Emit an advisory to stderr using the process-wide setting
pub fn deprecated_warn(content: &str) {
    deprecated_warn_with(content, advisories_enabled());
}

/// Emit an advisory to stderr with an explicit on/off override
pub fn deprecated_warn_with(content: &str, enabled: bool) {
    if enabled {
        logger::record("DEPRECATION", content);
    }
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    if let Err(e) = warn_to(&mut handle, content, enabled) {
        debug!(error = %e, "failed to write deprecation advisory");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packhost_config::{advisories_enabled_from, HostConfig};
    use std::collections::HashMap;

    fn render(content: &str, enabled: bool) -> String {
        let mut buf = Vec::new();
        warn_to(&mut buf, content, enabled).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_indent_prefixes_every_line() {
        assert_eq!(indent("a\nb\nc", "  "), "  a\n  b\n  c");
    }

    #[test]
    fn test_indent_leaves_trailing_newline_alone() {
        assert_eq!(indent("a\n", "> "), "> a\n");
        assert_eq!(indent("", "> "), "> ");
    }

    #[test]
    fn test_indent_keeps_blank_lines_blank() {
        assert_eq!(indent("a\n\nb", "  "), "  a\n\n  b");
    }

    #[test]
    fn test_disabled_advisory_writes_nothing() {
        for value in ["false", "0"] {
            let enabled = advisories_enabled_from(Some(value));
            assert!(render("`output.legacy` is deprecated", enabled).is_empty());
        }
    }

    #[test]
    fn test_enabled_advisory_contains_content_and_hint() {
        for value in [None, Some("true"), Some("1")] {
            let out = render("`output.legacy` is deprecated", advisories_enabled_from(value));
            assert!(out.contains("`output.legacy` is deprecated"));
            assert!(out.contains("    Set env `PACKHOST_DEP_WARNINGS` to 'false'"));
        }
    }

    #[test]
    fn test_hint_is_indented_by_four_spaces() {
        let out = render("x", true);
        let hint_line = out
            .lines()
            .find(|line| line.contains("PACKHOST_DEP_WARNINGS"))
            .unwrap();
        assert!(hint_line.starts_with(HINT_INDENT));
        assert!(!hint_line.starts_with("     "));
    }

    #[test]
    fn test_process_setting_is_stable() {
        assert_eq!(advisories_enabled(), advisories_enabled());
    }

    #[test]
    fn test_dep_warnings_variable_gates_output() {
        for value in ["false", "0"] {
            let env = HashMap::from([(DEP_WARNINGS_ENV, value)]);
            let config = HostConfig::from_source(&env).unwrap();
            assert!(render("`output.legacy` is deprecated", config.dep_warnings).is_empty());
        }

        let env: HashMap<&str, &str> = HashMap::new();
        let config = HostConfig::from_source(&env).unwrap();
        let out = render("`output.legacy` is deprecated", config.dep_warnings);
        assert!(out.contains("`output.legacy` is deprecated"));
        assert!(out.contains(DEP_WARNINGS_ENV));
    }

    #[test]
    fn test_content_is_emphasized_when_color_is_on() {
        colored::control::set_override(true);
        let out = render("old option", true);
        colored::control::unset_override();

        let first_line = out.lines().next().unwrap();
        assert!(first_line.starts_with("\x1b["));
        assert!(first_line.contains("old option"));
        assert!(first_line.ends_with("\x1b[0m"));
    }
}
