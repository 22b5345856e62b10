//! vkmock - Vulkan capability-query double
//!
//! A stand-in for the Vulkan entry points an engine uses to negotiate
//! capabilities at start-up: instance version, instance and device
//! extensions, device features and properties, format properties and queue
//! families. Every answer comes from a fixed, hand-authored device profile,
//! so initialization code can be tested without a GPU or a driver.
//!
//! Architecture:
//! ```text
//! Engine → vk* entry point (icd) → query handler → DeviceFixture
//!                                        ↓
//!                               pNext chain walker (chain)
//! ```
//!
//! Instance and device creation are deliberately unsupported and return
//! `VK_ERROR_UNKNOWN`.

pub mod chain;
pub mod device;
pub mod error;
pub mod fixture;
pub mod handle;
pub mod icd;
pub mod instance;
pub mod physical_device;

pub use error::{MockError, Result};
pub use fixture::{DeviceFixture, ExtensionDescriptor, FeatureSet, FormatFixture, QueueFamilyFixture};
pub use icd::EntryPoints;
pub use physical_device::{fixture_for, register_fixture, unregister_fixture};

use log::info;
use once_cell::sync::Lazy;

static LOGGER: Lazy<()> = Lazy::new(|| {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();

    info!("vkmock v{} initialized", env!("CARGO_PKG_VERSION"));
});

/// Initialize logging for the mock driver. Safe to call repeatedly;
/// `RUST_LOG` overrides the default `info` level.
pub fn init() {
    Lazy::force(&LOGGER);
}
