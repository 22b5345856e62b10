use ash::vk;
use std::ffi::CStr;
use vkmock::EntryPoints;

fn enumerate_extensions(
    mut call: impl FnMut(*mut u32, *mut vk::ExtensionProperties) -> vk::Result,
) -> Vec<vk::ExtensionProperties> {
    let mut count = 0u32;
    let result = call(&mut count, std::ptr::null_mut());
    assert_eq!(result, vk::Result::SUCCESS, "count query failed");

    let mut props = vec![vk::ExtensionProperties::default(); count as usize];
    let result = call(&mut count, props.as_mut_ptr());
    assert_eq!(result, vk::Result::SUCCESS, "extension query failed");
    props.truncate(count as usize);
    props
}

fn print_extensions(extensions: &[vk::ExtensionProperties]) {
    println!("   Found {} extensions:", extensions.len());
    for ext in extensions {
        let name = unsafe { CStr::from_ptr(ext.extension_name.as_ptr()) };
        println!("     - {} (v{})", name.to_string_lossy(), ext.spec_version);
    }
}

fn main() {
    vkmock::init();

    println!("vkmock Capability Probe");
    println!("=======================\n");

    let entry = EntryPoints::new();
    let physical_device = vk::PhysicalDevice::null();

    // Instance version
    println!("1. Querying instance version...");
    let mut api_version = 0u32;
    let result = unsafe { (entry.enumerate_instance_version)(&mut api_version) };
    assert_eq!(result, vk::Result::SUCCESS);
    println!(
        "   API Version: {}.{}.{}",
        vk::api_version_major(api_version),
        vk::api_version_minor(api_version),
        vk::api_version_patch(api_version)
    );

    // Instance extensions
    println!("\n2. Querying instance extensions...");
    let instance_extensions = enumerate_extensions(|count, props| unsafe {
        (entry.enumerate_instance_extension_properties)(std::ptr::null(), count, props)
    });
    print_extensions(&instance_extensions);

    // Device identity
    println!("\n3. Querying device properties...");
    let mut subgroup = vk::PhysicalDeviceSubgroupProperties::default();
    let mut push_descriptor = vk::PhysicalDevicePushDescriptorPropertiesKHR::default();
    let mut properties2 = vk::PhysicalDeviceProperties2::default()
        .push_next(&mut subgroup)
        .push_next(&mut push_descriptor);
    unsafe { (entry.get_physical_device_properties2)(physical_device, &mut properties2) };
    let properties = properties2.properties;

    let device_name = unsafe { CStr::from_ptr(properties.device_name.as_ptr()).to_string_lossy() };
    println!("   Device: {}", device_name);
    println!("   Type: {:?}", properties.device_type);
    println!(
        "   Max 2D image dimension: {}",
        properties.limits.max_image_dimension2_d
    );
    println!(
        "   Subgroup size: {} ({:?})",
        subgroup.subgroup_size, subgroup.supported_operations
    );
    println!(
        "   Max push descriptors: {}",
        push_descriptor.max_push_descriptors
    );

    // Device extensions
    println!("\n4. Querying device extensions...");
    let device_extensions = enumerate_extensions(|count, props| unsafe {
        (entry.enumerate_device_extension_properties)(
            physical_device,
            std::ptr::null(),
            count,
            props,
        )
    });
    print_extensions(&device_extensions);

    // Features
    println!("\n5. Querying device features...");
    let mut float16 = vk::PhysicalDeviceShaderFloat16Int8Features::default();
    let mut sync2 = vk::PhysicalDeviceSynchronization2Features::default();
    let mut features2 = vk::PhysicalDeviceFeatures2::default()
        .push_next(&mut float16)
        .push_next(&mut sync2);
    unsafe { (entry.get_physical_device_features2)(physical_device, &mut features2) };
    let shader_float64 = features2.features.shader_float64;
    println!("   shaderFloat64:    {}", shader_float64 == vk::TRUE);
    println!("   shaderFloat16:    {}", float16.shader_float16 == vk::TRUE);
    println!("   synchronization2: {}", sync2.synchronization2 == vk::TRUE);

    // Formats
    println!("\n6. Querying format support...");
    for format in [
        vk::Format::R8G8B8A8_UNORM,
        vk::Format::R16G16B16A16_SFLOAT,
        vk::Format::D32_SFLOAT,
    ] {
        let mut props3 = vk::FormatProperties3::default();
        let mut format_properties = vk::FormatProperties2::default().push_next(&mut props3);
        unsafe {
            (entry.get_physical_device_format_properties2)(
                physical_device,
                format,
                &mut format_properties,
            )
        };
        let optimal = format_properties.format_properties.optimal_tiling_features;
        if optimal.is_empty() {
            println!("   ✗ {:?}: not supported", format);
        } else {
            println!("   ✓ {:?}: optimal {:?}", format, optimal);
        }
    }

    // Queue families
    println!("\n7. Querying queue families...");
    let mut count = 0u32;
    unsafe {
        (entry.get_physical_device_queue_family_properties2)(
            physical_device,
            &mut count,
            std::ptr::null_mut(),
        )
    };
    let mut priorities = vec![vk::QueueFamilyGlobalPriorityPropertiesKHR::default(); count as usize];
    let mut families: Vec<vk::QueueFamilyProperties2> = priorities
        .iter_mut()
        .map(|priority| vk::QueueFamilyProperties2::default().push_next(priority))
        .collect();
    unsafe {
        (entry.get_physical_device_queue_family_properties2)(
            physical_device,
            &mut count,
            families.as_mut_ptr(),
        )
    };
    let family_properties: Vec<vk::QueueFamilyProperties> = families
        .iter()
        .map(|family| family.queue_family_properties)
        .collect();
    drop(families);
    for (index, (props, priority)) in family_properties.iter().zip(&priorities).enumerate() {
        println!(
            "   Family {}: {:?} x{} (priority {:?})",
            index, props.queue_flags, props.queue_count, priority.priorities[0]
        );
    }

    // Resource creation
    println!("\n8. Attempting instance creation...");
    let create_info = vk::InstanceCreateInfo::default();
    let mut instance = vk::Instance::null();
    let result = unsafe { (entry.create_instance)(&create_info, std::ptr::null(), &mut instance) };
    println!("   vkCreateInstance -> {:?} (expected: not supported)", result);

    println!("\n✅ Capability discovery completed");
}
