/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Logging and terminal output macros.
//!
//! Everything goes to stderr. The application owns stdout, and we are a
//! library loaded into somebody else's process, so there is nowhere better.

use std::sync::OnceLock;

/// Prefix put on every line so our output can be told apart from the
/// application's and the driver's.
pub const PREFIX: &str = "[glxes]";

/// Prints a log message unconditionally. Use this for errors or warnings.
///
/// The message is prefixed with the module path, so it is clear where it comes
/// from.
macro_rules! log {
    ($($arg:tt)+) => {{
        echo!("{} {}: {}", $crate::log::PREFIX, module_path!(), format_args!($($arg)+))
    }}
}

/// Like [log], but prints the message only if debugging is enabled for the
/// module where it is used. This can be used for verbose things only needed
/// when debugging.
macro_rules! log_dbg {
    ($($arg:tt)+) => {
        if $crate::log::debug_enabled(module_path!()) {
            log!($($arg)*);
        }
    }
}

/// Like [log], but only prints the first time this particular call site is
/// reached. Used for entry points that are exported but do nothing.
macro_rules! log_once {
    ($($arg:tt)+) => {
        {
            static ONCE: std::sync::Once = std::sync::Once::new();
            ONCE.call_once(|| log!($($arg)+));
        }
    }
}

/// Print a message (with implicit newline). This should be used for all
/// output that isn't coming from the application itself.
///
/// Prefer use [log] or [log_dbg] for errors and warnings.
macro_rules! echo {
    ($($arg:tt)+) => {
        eprintln!($($arg)+)
    };
    () => {
        eprintln!("")
    }
}

/// Put modules to enable [log_dbg] for here, e.g. "GL::shader::translate" to
/// see every translated shader. `GLXES_DEBUG` adds to this list at runtime.
pub const ENABLED_MODULES: &[&str] = &[];

fn runtime_modules() -> &'static [String] {
    static MODULES: OnceLock<Vec<String>> = OnceLock::new();
    MODULES.get_or_init(|| {
        std::env::var("GLXES_DEBUG")
            .map(|value| parse_module_list(&value))
            .unwrap_or_default()
    })
}

/// Split a comma-separated `GLXES_DEBUG` value into module paths.
pub fn parse_module_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|module| !module.is_empty())
        .map(String::from)
        .collect()
}

/// Whether [log_dbg] output is wanted for `module`. A configured module also
/// enables its submodules, and `all` enables everything.
pub fn debug_enabled(module: &str) -> bool {
    fn matches(configured: &str, module: &str) -> bool {
        configured == "all"
            || module == configured
            || module
                .strip_prefix(configured)
                .is_some_and(|rest| rest.starts_with("::"))
    }
    ENABLED_MODULES.iter().any(|m| matches(m, module))
        || runtime_modules().iter().any(|m| matches(m, module))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_list() {
        assert_eq!(
            parse_module_list(" GL::glx , ,GL::shader::cache"),
            vec!["GL::glx".to_string(), "GL::shader::cache".to_string()]
        );
        assert!(parse_module_list("").is_empty());
    }

    #[test]
    fn macros_are_expressions() {
        let unknown: Option<u32> = None;
        match unknown {
            Some(_) => (),
            None => log!("nothing for {}", "match arm"),
        }
        let () = log!("as a value");
        let in_closure = |n: u32| log_dbg!("closure {}", n);
        in_closure(1);
        for _ in 0..2 {
            log_once!("only once");
        }
    }
}
