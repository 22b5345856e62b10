//! Physical-device capability queries
//!
//! Each query writes the base answer from the fixture and then walks the
//! caller's `pNext` chain, filling in the blocks it recognizes.

use ash::vk::{self, Handle};
use log::debug;
use once_cell::sync::Lazy;
use std::os::raw::c_char;
use std::sync::Arc;

use crate::chain::{self, ChainBlock};
use crate::error::Result;
use crate::fixture::{self, DeviceFixture};
use crate::handle::HandleAllocator;

/// Fixtures registered for specific physical-device handles
static FIXTURE_REGISTRY: Lazy<HandleAllocator<DeviceFixture>> = Lazy::new(HandleAllocator::new);

/// Register a custom fixture and return the handle that selects it.
pub fn register_fixture(fixture: DeviceFixture) -> vk::PhysicalDevice {
    let handle = FIXTURE_REGISTRY.allocate(fixture);
    debug!("Registered fixture for physical device {:#x}", handle);
    vk::PhysicalDevice::from_raw(handle)
}

/// Drop a fixture registered with [`register_fixture`]. Returns whether the
/// handle was registered.
pub fn unregister_fixture(physical_device: vk::PhysicalDevice) -> bool {
    FIXTURE_REGISTRY.remove(physical_device.as_raw()).is_some()
}

/// Fixture answering for `physical_device`. Unregistered handles, including
/// `VK_NULL_HANDLE`, get the default fixture.
pub fn fixture_for(physical_device: vk::PhysicalDevice) -> Arc<DeviceFixture> {
    FIXTURE_REGISTRY
        .get(physical_device.as_raw())
        .unwrap_or_else(fixture::default_fixture)
}

/// Enumerate device extensions. The layer name is ignored.
pub unsafe fn enumerate_device_extension_properties(
    fixture: &DeviceFixture,
    _p_layer_name: *const c_char,
    p_property_count: *mut u32,
    p_properties: *mut vk::ExtensionProperties,
) -> Result<()> {
    crate::instance::write_extension_properties(
        &fixture.device_extensions,
        p_property_count,
        p_properties,
    );
    Ok(())
}

pub unsafe fn get_physical_device_features(
    fixture: &DeviceFixture,
    p_features: *mut vk::PhysicalDeviceFeatures,
) {
    let features = &mut *p_features;
    features.shader_float64 = fixture.features.shader_float64.into();
}

pub unsafe fn get_physical_device_features2(
    fixture: &DeviceFixture,
    p_features: *mut vk::PhysicalDeviceFeatures2,
) {
    let features = &mut *p_features;
    get_physical_device_features(fixture, &mut features.features);

    chain::walk(features.p_next, |block| match block {
        ChainBlock::ShaderFloat16Int8Features(float16) => {
            float16.shader_float16 = fixture.features.shader_float16.into();
        }
        ChainBlock::Synchronization2Features(sync2) => {
            sync2.synchronization2 = fixture.features.synchronization2.into();
        }
        _ => {}
    });
}

pub unsafe fn get_physical_device_properties(
    fixture: &DeviceFixture,
    p_properties: *mut vk::PhysicalDeviceProperties,
) {
    *p_properties = fixture.properties();
}

pub unsafe fn get_physical_device_properties2(
    fixture: &DeviceFixture,
    p_properties: *mut vk::PhysicalDeviceProperties2,
) {
    let properties = &mut *p_properties;
    properties.properties = fixture.properties();

    chain::walk(properties.p_next, |block| match block {
        ChainBlock::SubgroupProperties(subgroup) => {
            subgroup.subgroup_size = fixture.subgroup.size;
            subgroup.supported_stages = fixture.subgroup.supported_stages;
            subgroup.supported_operations = fixture.subgroup.supported_operations;
        }
        ChainBlock::PushDescriptorProperties(push) => {
            push.max_push_descriptors = fixture.max_push_descriptors;
        }
        _ => {}
    });
}

/// Unknown formats are reported as all-zero, which is how a driver says
/// "no features" for a format it does not support.
pub unsafe fn get_physical_device_format_properties(
    fixture: &DeviceFixture,
    format: vk::Format,
    p_format_properties: *mut vk::FormatProperties,
) {
    *p_format_properties = match fixture.format(format) {
        Some(entry) => entry.to_vk(),
        None => {
            debug!("Format {:?} not supported by fixture", format);
            vk::FormatProperties::default()
        }
    };
}

pub unsafe fn get_physical_device_format_properties2(
    fixture: &DeviceFixture,
    format: vk::Format,
    p_format_properties: *mut vk::FormatProperties2,
) {
    let format_properties = &mut *p_format_properties;
    get_physical_device_format_properties(fixture, format, &mut format_properties.format_properties);

    let Some(entry) = fixture.format(format) else {
        return;
    };

    chain::walk(format_properties.p_next, |block| {
        if let ChainBlock::FormatProperties3(props3) = block {
            props3.linear_tiling_features = entry.linear_tiling_features2;
        }
    });
}

pub unsafe fn get_physical_device_queue_family_properties(
    fixture: &DeviceFixture,
    p_queue_family_property_count: *mut u32,
    p_queue_family_properties: *mut vk::QueueFamilyProperties,
) {
    let families = &fixture.queue_families;
    *p_queue_family_property_count = families.len() as u32;

    if p_queue_family_properties.is_null() {
        return;
    }

    let out = std::slice::from_raw_parts_mut(p_queue_family_properties, families.len());
    for (slot, family) in out.iter_mut().zip(families) {
        *slot = family.to_vk();
    }
}

/// Same two-phase protocol as extension enumeration. Each family's own
/// chain is walked separately.
pub unsafe fn get_physical_device_queue_family_properties2(
    fixture: &DeviceFixture,
    p_queue_family_property_count: *mut u32,
    p_queue_family_properties: *mut vk::QueueFamilyProperties2,
) {
    let families = &fixture.queue_families;
    *p_queue_family_property_count = families.len() as u32;

    if p_queue_family_properties.is_null() {
        return;
    }

    let out = std::slice::from_raw_parts_mut(p_queue_family_properties, families.len());
    for (index, (slot, family)) in out.iter_mut().zip(families).enumerate() {
        slot.queue_family_properties = family.to_vk();

        chain::walk(slot.p_next, |block| {
            if let ChainBlock::QueueFamilyGlobalPriorityProperties(priority) = block {
                priority.priority_count = 1;
                priority.priorities[0] = family.global_priority;
            }
        });
        debug!(
            "Queue family {}: {:?} x{}",
            index, family.queue_flags, family.queue_count
        );
    }
}
