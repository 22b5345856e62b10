//! Vulkan entry points
//!
//! Every function here has the exact signature of the Vulkan command it is
//! named after and is exported unmangled, so a test binary can link against
//! this crate in place of the loader, or resolve the functions at run time
//! through [`vkGetInstanceProcAddr`] / [`EntryPoints`].
//!
//! Instance-level queries answer from the default fixture. Physical-device
//! queries answer from the fixture registered for the handle, falling back to
//! the default fixture.

#![allow(non_snake_case)]

use ash::vk;
use log::debug;
use std::ffi::CStr;
use std::os::raw::c_char;

use crate::fixture;
use crate::physical_device::fixture_for;

/// Typed table of every mock entry point.
///
/// Assigning the functions to `PFN_*` fields is what pins their signatures to
/// the Vulkan headers.
#[derive(Clone, Copy)]
pub struct EntryPoints {
    pub get_instance_proc_addr: vk::PFN_vkGetInstanceProcAddr,
    pub get_device_proc_addr: vk::PFN_vkGetDeviceProcAddr,
    pub enumerate_instance_version: vk::PFN_vkEnumerateInstanceVersion,
    pub enumerate_instance_extension_properties: vk::PFN_vkEnumerateInstanceExtensionProperties,
    pub enumerate_device_extension_properties: vk::PFN_vkEnumerateDeviceExtensionProperties,
    pub get_physical_device_features: vk::PFN_vkGetPhysicalDeviceFeatures,
    pub get_physical_device_features2: vk::PFN_vkGetPhysicalDeviceFeatures2,
    pub get_physical_device_properties: vk::PFN_vkGetPhysicalDeviceProperties,
    pub get_physical_device_properties2: vk::PFN_vkGetPhysicalDeviceProperties2,
    pub get_physical_device_format_properties: vk::PFN_vkGetPhysicalDeviceFormatProperties,
    pub get_physical_device_format_properties2: vk::PFN_vkGetPhysicalDeviceFormatProperties2,
    pub get_physical_device_queue_family_properties:
        vk::PFN_vkGetPhysicalDeviceQueueFamilyProperties,
    pub get_physical_device_queue_family_properties2:
        vk::PFN_vkGetPhysicalDeviceQueueFamilyProperties2,
    pub create_instance: vk::PFN_vkCreateInstance,
    pub create_device: vk::PFN_vkCreateDevice,
}

impl EntryPoints {
    pub fn new() -> Self {
        Self {
            get_instance_proc_addr: vkGetInstanceProcAddr,
            get_device_proc_addr: vkGetDeviceProcAddr,
            enumerate_instance_version: vkEnumerateInstanceVersion,
            enumerate_instance_extension_properties: vkEnumerateInstanceExtensionProperties,
            enumerate_device_extension_properties: vkEnumerateDeviceExtensionProperties,
            get_physical_device_features: vkGetPhysicalDeviceFeatures,
            get_physical_device_features2: vkGetPhysicalDeviceFeatures2,
            get_physical_device_properties: vkGetPhysicalDeviceProperties,
            get_physical_device_properties2: vkGetPhysicalDeviceProperties2,
            get_physical_device_format_properties: vkGetPhysicalDeviceFormatProperties,
            get_physical_device_format_properties2: vkGetPhysicalDeviceFormatProperties2,
            get_physical_device_queue_family_properties: vkGetPhysicalDeviceQueueFamilyProperties,
            get_physical_device_queue_family_properties2: vkGetPhysicalDeviceQueueFamilyProperties2,
            create_instance: vkCreateInstance,
            create_device: vkCreateDevice,
        }
    }
}

impl Default for EntryPoints {
    fn default() -> Self {
        Self::new()
    }
}

#[no_mangle]
pub unsafe extern "system" fn vkGetInstanceProcAddr(
    _instance: vk::Instance,
    p_name: *const c_char,
) -> vk::PFN_vkVoidFunction {
    crate::init();

    if p_name.is_null() {
        return None;
    }

    let name = CStr::from_ptr(p_name);
    debug!("vkGetInstanceProcAddr: {:?}", name);

    match name.to_bytes() {
        b"vkGetInstanceProcAddr" => {
            std::mem::transmute(vkGetInstanceProcAddr as vk::PFN_vkGetInstanceProcAddr)
        }
        b"vkGetDeviceProcAddr" => {
            std::mem::transmute(vkGetDeviceProcAddr as vk::PFN_vkGetDeviceProcAddr)
        }
        b"vkEnumerateInstanceVersion" => {
            std::mem::transmute(vkEnumerateInstanceVersion as vk::PFN_vkEnumerateInstanceVersion)
        }
        b"vkEnumerateInstanceExtensionProperties" => std::mem::transmute(
            vkEnumerateInstanceExtensionProperties
                as vk::PFN_vkEnumerateInstanceExtensionProperties,
        ),
        b"vkEnumerateDeviceExtensionProperties" => std::mem::transmute(
            vkEnumerateDeviceExtensionProperties as vk::PFN_vkEnumerateDeviceExtensionProperties,
        ),
        b"vkGetPhysicalDeviceFeatures" => {
            std::mem::transmute(vkGetPhysicalDeviceFeatures as vk::PFN_vkGetPhysicalDeviceFeatures)
        }
        b"vkGetPhysicalDeviceFeatures2" | b"vkGetPhysicalDeviceFeatures2KHR" => std::mem::transmute(
            vkGetPhysicalDeviceFeatures2 as vk::PFN_vkGetPhysicalDeviceFeatures2,
        ),
        b"vkGetPhysicalDeviceProperties" => std::mem::transmute(
            vkGetPhysicalDeviceProperties as vk::PFN_vkGetPhysicalDeviceProperties,
        ),
        b"vkGetPhysicalDeviceProperties2" | b"vkGetPhysicalDeviceProperties2KHR" => {
            std::mem::transmute(
                vkGetPhysicalDeviceProperties2 as vk::PFN_vkGetPhysicalDeviceProperties2,
            )
        }
        b"vkGetPhysicalDeviceFormatProperties" => std::mem::transmute(
            vkGetPhysicalDeviceFormatProperties as vk::PFN_vkGetPhysicalDeviceFormatProperties,
        ),
        b"vkGetPhysicalDeviceFormatProperties2" | b"vkGetPhysicalDeviceFormatProperties2KHR" => {
            std::mem::transmute(
                vkGetPhysicalDeviceFormatProperties2
                    as vk::PFN_vkGetPhysicalDeviceFormatProperties2,
            )
        }
        b"vkGetPhysicalDeviceQueueFamilyProperties" => std::mem::transmute(
            vkGetPhysicalDeviceQueueFamilyProperties
                as vk::PFN_vkGetPhysicalDeviceQueueFamilyProperties,
        ),
        b"vkGetPhysicalDeviceQueueFamilyProperties2"
        | b"vkGetPhysicalDeviceQueueFamilyProperties2KHR" => std::mem::transmute(
            vkGetPhysicalDeviceQueueFamilyProperties2
                as vk::PFN_vkGetPhysicalDeviceQueueFamilyProperties2,
        ),
        b"vkCreateInstance" => std::mem::transmute(vkCreateInstance as vk::PFN_vkCreateInstance),
        b"vkCreateDevice" => std::mem::transmute(vkCreateDevice as vk::PFN_vkCreateDevice),
        _ => None,
    }
}

/// No device can be created, so there is nothing to resolve.
#[no_mangle]
pub unsafe extern "system" fn vkGetDeviceProcAddr(
    _device: vk::Device,
    p_name: *const c_char,
) -> vk::PFN_vkVoidFunction {
    if !p_name.is_null() {
        debug!("vkGetDeviceProcAddr: {:?} (unresolved)", CStr::from_ptr(p_name));
    }
    None
}

// Instance functions

#[no_mangle]
pub unsafe extern "system" fn vkEnumerateInstanceVersion(p_api_version: *mut u32) -> vk::Result {
    match crate::instance::enumerate_instance_version(&fixture::default_fixture(), p_api_version) {
        Ok(_) => vk::Result::SUCCESS,
        Err(e) => e.to_vk_result(),
    }
}

#[no_mangle]
pub unsafe extern "system" fn vkEnumerateInstanceExtensionProperties(
    p_layer_name: *const c_char,
    p_property_count: *mut u32,
    p_properties: *mut vk::ExtensionProperties,
) -> vk::Result {
    debug!("vkEnumerateInstanceExtensionProperties called");

    match crate::instance::enumerate_instance_extension_properties(
        &fixture::default_fixture(),
        p_layer_name,
        p_property_count,
        p_properties,
    ) {
        Ok(_) => vk::Result::SUCCESS,
        Err(e) => e.to_vk_result(),
    }
}

#[no_mangle]
pub unsafe extern "system" fn vkCreateInstance(
    p_create_info: *const vk::InstanceCreateInfo,
    p_allocator: *const vk::AllocationCallbacks,
    p_instance: *mut vk::Instance,
) -> vk::Result {
    match crate::instance::create_instance(p_create_info, p_allocator, p_instance) {
        Ok(_) => vk::Result::SUCCESS,
        Err(e) => e.to_vk_result(),
    }
}

// Physical device functions

#[no_mangle]
pub unsafe extern "system" fn vkEnumerateDeviceExtensionProperties(
    physical_device: vk::PhysicalDevice,
    p_layer_name: *const c_char,
    p_property_count: *mut u32,
    p_properties: *mut vk::ExtensionProperties,
) -> vk::Result {
    debug!("vkEnumerateDeviceExtensionProperties called");

    match crate::physical_device::enumerate_device_extension_properties(
        &fixture_for(physical_device),
        p_layer_name,
        p_property_count,
        p_properties,
    ) {
        Ok(_) => vk::Result::SUCCESS,
        Err(e) => e.to_vk_result(),
    }
}

#[no_mangle]
pub unsafe extern "system" fn vkGetPhysicalDeviceFeatures(
    physical_device: vk::PhysicalDevice,
    p_features: *mut vk::PhysicalDeviceFeatures,
) {
    crate::physical_device::get_physical_device_features(&fixture_for(physical_device), p_features);
}

#[no_mangle]
pub unsafe extern "system" fn vkGetPhysicalDeviceFeatures2(
    physical_device: vk::PhysicalDevice,
    p_features: *mut vk::PhysicalDeviceFeatures2,
) {
    debug!("vkGetPhysicalDeviceFeatures2 called");
    crate::physical_device::get_physical_device_features2(&fixture_for(physical_device), p_features);
}

#[no_mangle]
pub unsafe extern "system" fn vkGetPhysicalDeviceProperties(
    physical_device: vk::PhysicalDevice,
    p_properties: *mut vk::PhysicalDeviceProperties,
) {
    crate::physical_device::get_physical_device_properties(
        &fixture_for(physical_device),
        p_properties,
    );
}

#[no_mangle]
pub unsafe extern "system" fn vkGetPhysicalDeviceProperties2(
    physical_device: vk::PhysicalDevice,
    p_properties: *mut vk::PhysicalDeviceProperties2,
) {
    debug!("vkGetPhysicalDeviceProperties2 called");
    crate::physical_device::get_physical_device_properties2(
        &fixture_for(physical_device),
        p_properties,
    );
}

#[no_mangle]
pub unsafe extern "system" fn vkGetPhysicalDeviceFormatProperties(
    physical_device: vk::PhysicalDevice,
    format: vk::Format,
    p_format_properties: *mut vk::FormatProperties,
) {
    crate::physical_device::get_physical_device_format_properties(
        &fixture_for(physical_device),
        format,
        p_format_properties,
    );
}

#[no_mangle]
pub unsafe extern "system" fn vkGetPhysicalDeviceFormatProperties2(
    physical_device: vk::PhysicalDevice,
    format: vk::Format,
    p_format_properties: *mut vk::FormatProperties2,
) {
    debug!("vkGetPhysicalDeviceFormatProperties2 called for {:?}", format);
    crate::physical_device::get_physical_device_format_properties2(
        &fixture_for(physical_device),
        format,
        p_format_properties,
    );
}

#[no_mangle]
pub unsafe extern "system" fn vkGetPhysicalDeviceQueueFamilyProperties(
    physical_device: vk::PhysicalDevice,
    p_queue_family_property_count: *mut u32,
    p_queue_family_properties: *mut vk::QueueFamilyProperties,
) {
    crate::physical_device::get_physical_device_queue_family_properties(
        &fixture_for(physical_device),
        p_queue_family_property_count,
        p_queue_family_properties,
    );
}

#[no_mangle]
pub unsafe extern "system" fn vkGetPhysicalDeviceQueueFamilyProperties2(
    physical_device: vk::PhysicalDevice,
    p_queue_family_property_count: *mut u32,
    p_queue_family_properties: *mut vk::QueueFamilyProperties2,
) {
    debug!("vkGetPhysicalDeviceQueueFamilyProperties2 called");
    crate::physical_device::get_physical_device_queue_family_properties2(
        &fixture_for(physical_device),
        p_queue_family_property_count,
        p_queue_family_properties,
    );
}

#[no_mangle]
pub unsafe extern "system" fn vkCreateDevice(
    physical_device: vk::PhysicalDevice,
    p_create_info: *const vk::DeviceCreateInfo,
    p_allocator: *const vk::AllocationCallbacks,
    p_device: *mut vk::Device,
) -> vk::Result {
    match crate::device::create_device(physical_device, p_create_info, p_allocator, p_device) {
        Ok(_) => vk::Result::SUCCESS,
        Err(e) => e.to_vk_result(),
    }
}
