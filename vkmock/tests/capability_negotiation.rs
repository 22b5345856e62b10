//! Drives the exported entry points the way an engine's start-up code does:
//! two-phase enumeration, then extensible queries with `push_next` chains.

use ash::vk;
use std::ffi::CStr;
use vkmock::icd::*;
use vkmock::EntryPoints;

fn enumerate_instance_extensions(entry: &EntryPoints) -> Vec<vk::ExtensionProperties> {
    let mut count = 0u32;
    let result = unsafe {
        (entry.enumerate_instance_extension_properties)(
            std::ptr::null(),
            &mut count,
            std::ptr::null_mut(),
        )
    };
    assert_eq!(result, vk::Result::SUCCESS);

    let mut props = vec![vk::ExtensionProperties::default(); count as usize];
    let result = unsafe {
        (entry.enumerate_instance_extension_properties)(
            std::ptr::null(),
            &mut count,
            props.as_mut_ptr(),
        )
    };
    assert_eq!(result, vk::Result::SUCCESS);
    assert_eq!(count as usize, props.len());
    props
}

fn extension_names(props: &[vk::ExtensionProperties]) -> Vec<&CStr> {
    props
        .iter()
        .map(|p| unsafe { CStr::from_ptr(p.extension_name.as_ptr()) })
        .collect()
}

#[test]
fn instance_version_is_1_2_198() {
    let mut version = 0u32;
    let result = unsafe { vkEnumerateInstanceVersion(&mut version) };

    assert_eq!(result, vk::Result::SUCCESS);
    assert_eq!(vk::api_version_major(version), 1);
    assert_eq!(vk::api_version_minor(version), 2);
    assert_eq!(vk::api_version_patch(version), 198);
}

#[test]
fn instance_extensions_two_phase() {
    let entry = EntryPoints::new();
    let props = enumerate_instance_extensions(&entry);

    assert_eq!(
        extension_names(&props),
        vec![ash::ext::debug_utils::NAME, ash::khr::surface::NAME]
    );
}

#[test]
fn device_extensions_two_phase() {
    let mut count = 0u32;
    unsafe {
        vkEnumerateDeviceExtensionProperties(
            vk::PhysicalDevice::null(),
            std::ptr::null(),
            &mut count,
            std::ptr::null_mut(),
        )
    };
    let mut props = vec![vk::ExtensionProperties::default(); count as usize];
    let result = unsafe {
        vkEnumerateDeviceExtensionProperties(
            vk::PhysicalDevice::null(),
            std::ptr::null(),
            &mut count,
            props.as_mut_ptr(),
        )
    };

    assert_eq!(result, vk::Result::SUCCESS);
    assert_eq!(
        extension_names(&props),
        vec![ash::khr::synchronization2::NAME, ash::ext::shader_atomic_float::NAME]
    );
}

#[test]
fn features2_with_half_precision_block() {
    let mut float16 = vk::PhysicalDeviceShaderFloat16Int8Features::default();
    let mut sync2 = vk::PhysicalDeviceSynchronization2Features::default();
    let mut multiview = vk::PhysicalDeviceMultiviewFeatures::default();
    let mut features2 = vk::PhysicalDeviceFeatures2::default()
        .push_next(&mut float16)
        .push_next(&mut multiview)
        .push_next(&mut sync2);

    unsafe { vkGetPhysicalDeviceFeatures2(vk::PhysicalDevice::null(), &mut features2) };
    let shader_float64 = features2.features.shader_float64;

    assert_eq!(shader_float64, vk::TRUE);
    assert_eq!(float16.shader_float16, vk::TRUE);
    assert_eq!(sync2.synchronization2, vk::TRUE);
    assert_eq!(multiview.multiview, vk::FALSE);
    assert_eq!(multiview.s_type, vk::StructureType::PHYSICAL_DEVICE_MULTIVIEW_FEATURES);
}

#[test]
fn properties2_through_proc_addr() {
    let raw = unsafe {
        vkGetInstanceProcAddr(
            vk::Instance::null(),
            c"vkGetPhysicalDeviceProperties2KHR".as_ptr(),
        )
    }
    .expect("vkGetPhysicalDeviceProperties2KHR should resolve");
    let get_properties2: vk::PFN_vkGetPhysicalDeviceProperties2 =
        unsafe { std::mem::transmute(raw) };

    let mut subgroup = vk::PhysicalDeviceSubgroupProperties::default();
    let mut push_descriptor = vk::PhysicalDevicePushDescriptorPropertiesKHR::default();
    let mut properties2 = vk::PhysicalDeviceProperties2::default()
        .push_next(&mut subgroup)
        .push_next(&mut push_descriptor);

    unsafe { get_properties2(vk::PhysicalDevice::null(), &mut properties2) };
    let props = properties2.properties;

    assert_eq!(props.device_name_as_c_str().unwrap(), c"Mock Vulkan Device");
    assert_eq!(props.limits.max_image_dimension2_d, 32768);
    assert_eq!(subgroup.subgroup_size, 8);
    assert!(subgroup
        .supported_operations
        .contains(vk::SubgroupFeatureFlags::ARITHMETIC));
    assert_eq!(push_descriptor.max_push_descriptors, 32);
}

#[test]
fn format_properties2_rgba8_and_unsupported() {
    let mut props3 = vk::FormatProperties3::default();
    let mut format_properties = vk::FormatProperties2::default().push_next(&mut props3);
    unsafe {
        vkGetPhysicalDeviceFormatProperties2(
            vk::PhysicalDevice::null(),
            vk::Format::R8G8B8A8_UNORM,
            &mut format_properties,
        )
    };
    let base = format_properties.format_properties;

    assert_eq!(
        base.linear_tiling_features,
        vk::FormatFeatureFlags::SAMPLED_IMAGE
            | vk::FormatFeatureFlags::TRANSFER_SRC
            | vk::FormatFeatureFlags::TRANSFER_DST
            | vk::FormatFeatureFlags::STORAGE_IMAGE
    );
    assert!(base
        .optimal_tiling_features
        .contains(vk::FormatFeatureFlags::COLOR_ATTACHMENT));
    assert_eq!(
        base.buffer_features,
        vk::FormatFeatureFlags::VERTEX_BUFFER
            | vk::FormatFeatureFlags::STORAGE_TEXEL_BUFFER
            | vk::FormatFeatureFlags::UNIFORM_TEXEL_BUFFER
    );
    assert_eq!(props3.linear_tiling_features, vk::FormatFeatureFlags2::STORAGE_IMAGE);

    let mut unsupported = vk::FormatProperties2::default();
    unsafe {
        vkGetPhysicalDeviceFormatProperties2(
            vk::PhysicalDevice::null(),
            vk::Format::D24_UNORM_S8_UINT,
            &mut unsupported,
        )
    };
    let base = unsupported.format_properties;
    assert!(base.linear_tiling_features.is_empty());
    assert!(base.optimal_tiling_features.is_empty());
    assert!(base.buffer_features.is_empty());
}

#[test]
fn queue_families_with_global_priority() {
    let mut count = 0u32;
    unsafe {
        vkGetPhysicalDeviceQueueFamilyProperties2(
            vk::PhysicalDevice::null(),
            &mut count,
            std::ptr::null_mut(),
        )
    };
    assert_eq!(count, 2);

    let mut priority0 = vk::QueueFamilyGlobalPriorityPropertiesKHR::default();
    let mut priority1 = vk::QueueFamilyGlobalPriorityPropertiesKHR::default();
    let mut families = [
        vk::QueueFamilyProperties2::default().push_next(&mut priority0),
        vk::QueueFamilyProperties2::default().push_next(&mut priority1),
    ];
    unsafe {
        vkGetPhysicalDeviceQueueFamilyProperties2(
            vk::PhysicalDevice::null(),
            &mut count,
            families.as_mut_ptr(),
        )
    };
    let queue_counts: Vec<u32> = families
        .iter()
        .map(|f| f.queue_family_properties.queue_count)
        .collect();

    assert_eq!(queue_counts, vec![1, 4]);
    assert_eq!(priority0.priorities[0], vk::QueueGlobalPriorityKHR::MEDIUM);
    assert_eq!(priority1.priorities[0], vk::QueueGlobalPriorityKHR::HIGH);
}

#[test]
fn repeated_queries_are_identical() {
    let entry = EntryPoints::new();
    let first = enumerate_instance_extensions(&entry);
    let second = enumerate_instance_extensions(&entry);
    assert_eq!(format!("{:?}", first), format!("{:?}", second));

    let mut a = vk::PhysicalDeviceProperties::default();
    let mut b = vk::PhysicalDeviceProperties::default();
    unsafe {
        (entry.get_physical_device_properties)(vk::PhysicalDevice::null(), &mut a);
        (entry.get_physical_device_properties)(vk::PhysicalDevice::null(), &mut b);
    }
    assert_eq!(format!("{:?}", a), format!("{:?}", b));
}

#[test]
fn registered_fixture_answers_for_its_handle() {
    let physical_device = vkmock::register_fixture(
        vkmock::DeviceFixture::mock().with_device_name(c"Integrated Test GPU"),
    );

    let mut registered = vk::PhysicalDeviceProperties::default();
    let mut default = vk::PhysicalDeviceProperties::default();
    unsafe {
        vkGetPhysicalDeviceProperties(physical_device, &mut registered);
        vkGetPhysicalDeviceProperties(vk::PhysicalDevice::null(), &mut default);
    }

    assert_eq!(registered.device_name_as_c_str().unwrap(), c"Integrated Test GPU");
    assert_eq!(default.device_name_as_c_str().unwrap(), c"Mock Vulkan Device");
    assert!(vkmock::unregister_fixture(physical_device));
}

#[test]
fn resource_creation_is_unsupported() {
    let create_info = vk::InstanceCreateInfo::default();
    let mut instance = vk::Instance::null();
    let result = unsafe { vkCreateInstance(&create_info, std::ptr::null(), &mut instance) };

    assert_eq!(result, vk::Result::ERROR_UNKNOWN);
    assert_eq!(instance, vk::Instance::null());
}
