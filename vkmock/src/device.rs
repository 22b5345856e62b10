//! Logical device creation
//!
//! Not modelled: the mock covers capability discovery only, so every
//! request fails with a generic error and the output handle is left alone.

use ash::vk;
use log::warn;

use crate::error::{MockError, Result};

pub unsafe fn create_device(
    physical_device: vk::PhysicalDevice,
    _p_create_info: *const vk::DeviceCreateInfo,
    _p_allocator: *const vk::AllocationCallbacks,
    _p_device: *mut vk::Device,
) -> Result<()> {
    warn!(
        "vkCreateDevice called for {:?}; device creation is not supported by the mock driver",
        physical_device
    );
    Err(MockError::NotImplemented("vkCreateDevice"))
}
