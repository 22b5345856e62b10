//! Instance-level capability queries
//!
//! Version and instance-extension enumeration. Instance creation is a stub:
//! the mock only answers capability discovery.

use ash::vk;
use log::{debug, warn};
use std::os::raw::c_char;

use crate::error::{MockError, Result};
use crate::fixture::{DeviceFixture, ExtensionDescriptor};

/// Write the fixture's API version
pub unsafe fn enumerate_instance_version(fixture: &DeviceFixture, p_api_version: *mut u32) -> Result<()> {
    *p_api_version = fixture.api_version;
    debug!(
        "Reporting instance version {}.{}.{}",
        vk::api_version_major(fixture.api_version),
        vk::api_version_minor(fixture.api_version),
        vk::api_version_patch(fixture.api_version)
    );
    Ok(())
}

/// Enumerate instance extensions. The layer name is ignored.
pub unsafe fn enumerate_instance_extension_properties(
    fixture: &DeviceFixture,
    _p_layer_name: *const c_char,
    p_property_count: *mut u32,
    p_properties: *mut vk::ExtensionProperties,
) -> Result<()> {
    write_extension_properties(&fixture.instance_extensions, p_property_count, p_properties);
    Ok(())
}

/// Two-phase enumeration shared by the instance and device extension queries.
///
/// A null `p_properties` only reports the count. Otherwise every entry is
/// written; the caller's capacity is not consulted.
pub(crate) unsafe fn write_extension_properties(
    extensions: &[ExtensionDescriptor],
    p_property_count: *mut u32,
    p_properties: *mut vk::ExtensionProperties,
) {
    *p_property_count = extensions.len() as u32;

    if p_properties.is_null() {
        return;
    }

    let props = std::slice::from_raw_parts_mut(p_properties, extensions.len());
    for (slot, extension) in props.iter_mut().zip(extensions) {
        *slot = extension.to_vk();
    }
    debug!("Wrote {} extension properties", extensions.len());
}

pub unsafe fn create_instance(
    _p_create_info: *const vk::InstanceCreateInfo,
    _p_allocator: *const vk::AllocationCallbacks,
    _p_instance: *mut vk::Instance,
) -> Result<()> {
    warn!("vkCreateInstance called on the mock driver; instance creation is not supported");
    Err(MockError::NotImplemented("vkCreateInstance"))
}
