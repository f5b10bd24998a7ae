//! Process-wide setup: one-time kernel initialization, the availability
//! probe, version strings and logging.
//!
//! Library state moves from uninitialized to initialized exactly once per
//! process, the first time a context is created or the library is probed.
//! There is no teardown.

use std::sync::{Once, OnceLock};

use sym_kernel::{eval_text, KernelState};
use sym_value::{BuiltinOp, Value};

/// Facts gathered when the kernel is first brought up.
#[derive(Debug)]
pub struct Library {
    kernel_version: &'static str,
    operator_count: usize,
}

impl Library {
    pub fn kernel_version(&self) -> &'static str {
        self.kernel_version
    }

    /// Operators the kernel implements natively.
    pub fn operator_count(&self) -> usize {
        self.operator_count
    }
}

static LIBRARY: OnceLock<Library> = OnceLock::new();

/// Initialize the kernel if this is the first call, then return its facts.
/// Safe to call from any thread, any number of times.
pub fn library() -> &'static Library {
    LIBRARY.get_or_init(|| {
        let library = Library {
            kernel_version: sym_kernel::version(),
            operator_count: BuiltinOp::ALL.len(),
        };
        tracing::debug!(
            kernel_version = library.kernel_version,
            operators = library.operator_count,
            "symbolic kernel initialized"
        );
        library
    })
}

pub fn is_initialized() -> bool {
    LIBRARY.get().is_some()
}

/// Probe that the kernel is usable by evaluating `1+1` in a scratch state.
pub fn is_available() -> bool {
    library();
    match eval_text(&mut KernelState::default(), "1+1") {
        Ok(value) => value == Value::int(2),
        Err(error) => {
            tracing::warn!(%error, "kernel availability probe failed");
            false
        }
    }
}

pub fn kernel_version() -> &'static str {
    library().kernel_version()
}

pub fn bridge_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=sym_bridge=debug`
/// (tier selection, context allocation) or `RUST_LOG=sym_bridge=trace`
/// (heap handles).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
