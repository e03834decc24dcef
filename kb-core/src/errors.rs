use std::sync::LazyLock;

pub use anyhow::{anyhow, bail, ensure, Context};
pub use paste::paste;
use regex::{Regex, RegexBuilder};
pub use thiserror::Error;
use tracing::*;

pub type EmptyResult = anyhow::Result<()>;

// Frames from these locations are toolchain/runtime noise
const PRUNED_FRAME_MARKERS: [&str; 4] = ["/.build/", "/rustc/", "/.cargo/registry/", "glibc"];

static BACKTRACE_FRAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^\s+\d+(?s:.*?)(\s+at\s+.*:\d+)$")
        .multi_line(true)
        .build()
        .expect("backtrace frame regex is valid")
});

// This macro creates an enum which derives from thiserror::Error, and also
// creates constructor functions in snake case for each of the enum variants;
// the constructors wrap the variant in an anyhow::Error so that they can be
// passed straight to bail!
#[macro_export]
macro_rules! err_impl {
    (@hidden $errtype:ident, $item:ident, String) => {
        paste! {
            pub fn [<$item:snake>](in_: &str) -> anyhow::Error {
                anyhow!{$errtype::$item(in_.into())}
            }
        }
    };

    (@hidden $errtype:ident, $item:ident, $($dtype:tt)::+) => {
        paste! {
            pub fn [<$item:snake>](in_: &$($dtype)::+) -> anyhow::Error {
                anyhow!{$errtype::$item(in_.clone())}
            }
        }
    };

    ($errtype:ident,
        $(#[$errinfo:meta] $item:ident($($dtype:tt)::+),)+
    ) => {
        #[derive(Debug, Error)]
        pub enum $errtype {
            $(#[$errinfo] $item($($dtype)::+)),+
        }

        impl $errtype {
            $(err_impl! {@hidden $errtype, $item, $($dtype)::+})+
        }
    };
}

pub use err_impl;

fn skipped(n: usize) -> String {
    match n {
        1 => "      -- <skipped 1 frame> --\n".into(),
        _ => format!("      -- <skipped {n} frames> --\n"),
    }
}

/// Cuts a (tokio-laden) backtrace down to the frames from our own code, collapsing each run of
/// pruned frames into a single "skipped" marker.
pub fn prune_backtrace(backtrace: &str) -> String {
    let mut pruned = String::new();
    let mut skipped_frames = 0;
    for frame in BACKTRACE_FRAME_REGEX.find_iter(backtrace).map(|m| m.as_str()) {
        if PRUNED_FRAME_MARKERS.iter().any(|marker| frame.contains(marker)) {
            skipped_frames += 1;
            continue;
        }

        if skipped_frames > 0 {
            pruned += &skipped(skipped_frames);
            skipped_frames = 0;
        }
        pruned += frame;
        pruned += "\n";
    }

    if skipped_frames > 0 {
        pruned += &skipped(skipped_frames);
    }
    pruned
}

/// Logs an error we didn't expect, with its full cause chain and a pruned backtrace.  Capturing
/// and filtering the backtrace isn't cheap, so this belongs on failure paths only.
pub fn log_unexpected(err: &anyhow::Error, msg: &str) {
    let bt = prune_backtrace(&err.backtrace().to_string());
    error!("{msg}\n\n{err:?}\n\nPartial Stack Trace:\n\n{bt}\n");
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    const BACKTRACE: &str = "   0: std::backtrace::Backtrace::capture
             at /rustc/abc123/library/std/src/backtrace.rs:296:13
   1: kb_logserver::get_build_log
             at ./kb-logserver/src/main.rs:38:5
   2: tokio::runtime::task::core::Core<T,S>::poll
             at /home/u/.cargo/registry/src/index/tokio-1.45.1/src/runtime/task/core.rs:331:17
   3: tokio::runtime::task::harness::poll_future
             at /home/u/.cargo/registry/src/index/tokio-1.45.1/src/runtime/task/harness.rs:485:19
   4: kb_core::buildlog::storage::BuildLogStorage::get
             at ./kb-core/src/buildlog/storage.rs:60:9
   5: start_thread
             at /usr/src/glibc/nptl/pthread_create.c:447:8";

    #[rstest]
    fn test_prune_backtrace() {
        let pruned = prune_backtrace(BACKTRACE);

        assert!(pruned.starts_with("      -- <skipped 1 frame> --\n"));
        assert!(pruned.contains("kb-logserver/src/main.rs:38:5\n      -- <skipped 2 frames> --\n"));
        assert!(pruned.contains("kb-core/src/buildlog/storage.rs:60:9\n"));
        assert!(pruned.ends_with("      -- <skipped 1 frame> --\n"));
        assert!(!pruned.contains("tokio"));
    }

    #[rstest]
    fn test_prune_backtrace_empty() {
        assert_eq!(prune_backtrace("disabled backtrace"), "");
    }

    err_impl! {TestError,
        #[error("widget {0} is broken")]
        Broken(String),
    }

    #[rstest]
    fn test_err_impl_constructors() {
        let err = TestError::broken("foo");
        assert_eq!(err.to_string(), "widget foo is broken");
        assert!(matches!(err.downcast_ref::<TestError>(), Some(TestError::Broken(_))));
    }
}
