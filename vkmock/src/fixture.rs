//! Simulated device fixture
//!
//! Everything the mock reports comes from a [`DeviceFixture`]. The default
//! profile ([`DeviceFixture::mock`]) is built once and shared; tests that
//! need a different device build their own value and register it (see
//! [`crate::physical_device::register_fixture`]).

use ash::vk;
use once_cell::sync::Lazy;
use std::ffi::CStr;
use std::os::raw::c_char;
use std::sync::Arc;

/// Process-wide default fixture
pub static DEFAULT_FIXTURE: Lazy<Arc<DeviceFixture>> = Lazy::new(|| Arc::new(DeviceFixture::mock()));

/// An extension name with its spec version
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    pub name: &'static CStr,
    pub spec_version: u32,
}

impl ExtensionDescriptor {
    pub const fn new(name: &'static CStr, spec_version: u32) -> Self {
        Self { name, spec_version }
    }

    pub fn to_vk(&self) -> vk::ExtensionProperties {
        let mut props = vk::ExtensionProperties {
            spec_version: self.spec_version,
            ..Default::default()
        };
        copy_c_name(&mut props.extension_name, self.name);
        props
    }
}

/// Optional features the device exposes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureSet {
    pub shader_float64: bool,
    pub shader_float16: bool,
    pub synchronization2: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubgroupFixture {
    pub size: u32,
    pub supported_stages: vk::ShaderStageFlags,
    pub supported_operations: vk::SubgroupFeatureFlags,
}

/// Capabilities of one supported format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatFixture {
    pub format: vk::Format,
    pub linear_tiling_features: vk::FormatFeatureFlags,
    pub optimal_tiling_features: vk::FormatFeatureFlags,
    pub buffer_features: vk::FormatFeatureFlags,
    /// Reported through a chained `VkFormatProperties3`
    pub linear_tiling_features2: vk::FormatFeatureFlags2,
}

impl FormatFixture {
    pub fn to_vk(&self) -> vk::FormatProperties {
        vk::FormatProperties {
            linear_tiling_features: self.linear_tiling_features,
            optimal_tiling_features: self.optimal_tiling_features,
            buffer_features: self.buffer_features,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueFamilyFixture {
    pub queue_flags: vk::QueueFlags,
    pub queue_count: u32,
    pub timestamp_valid_bits: u32,
    pub min_image_transfer_granularity: vk::Extent3D,
    pub global_priority: vk::QueueGlobalPriorityKHR,
}

impl QueueFamilyFixture {
    pub fn to_vk(&self) -> vk::QueueFamilyProperties {
        vk::QueueFamilyProperties {
            queue_flags: self.queue_flags,
            queue_count: self.queue_count,
            timestamp_valid_bits: self.timestamp_valid_bits,
            min_image_transfer_granularity: self.min_image_transfer_granularity,
        }
    }
}

/// The fictitious device every query reports on
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceFixture {
    pub api_version: u32,
    pub driver_version: u32,
    pub vendor_id: u32,
    pub device_id: u32,
    pub device_type: vk::PhysicalDeviceType,
    pub device_name: &'static CStr,
    pub pipeline_cache_uuid: [u8; vk::UUID_SIZE],
    pub max_image_dimension2_d: u32,
    pub features: FeatureSet,
    pub subgroup: SubgroupFixture,
    pub max_push_descriptors: u32,
    pub instance_extensions: Vec<ExtensionDescriptor>,
    pub device_extensions: Vec<ExtensionDescriptor>,
    pub formats: Vec<FormatFixture>,
    pub queue_families: Vec<QueueFamilyFixture>,
}

impl DeviceFixture {
    /// The default "Mock Vulkan Device" profile
    pub fn mock() -> Self {
        let linear = vk::FormatFeatureFlags::SAMPLED_IMAGE
            | vk::FormatFeatureFlags::TRANSFER_SRC
            | vk::FormatFeatureFlags::TRANSFER_DST
            | vk::FormatFeatureFlags::STORAGE_IMAGE;
        let optimal = linear | vk::FormatFeatureFlags::COLOR_ATTACHMENT;
        let buffer = vk::FormatFeatureFlags::VERTEX_BUFFER
            | vk::FormatFeatureFlags::STORAGE_TEXEL_BUFFER
            | vk::FormatFeatureFlags::UNIFORM_TEXEL_BUFFER;

        let rgba_format = |format| FormatFixture {
            format,
            linear_tiling_features: linear,
            optimal_tiling_features: optimal,
            buffer_features: buffer,
            linear_tiling_features2: vk::FormatFeatureFlags2::STORAGE_IMAGE,
        };

        let queue_family = |queue_count, global_priority| QueueFamilyFixture {
            queue_flags: vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE | vk::QueueFlags::TRANSFER,
            queue_count,
            timestamp_valid_bits: 64,
            min_image_transfer_granularity: vk::Extent3D {
                width: 1,
                height: 1,
                depth: 1,
            },
            global_priority,
        };

        Self {
            api_version: vk::make_api_version(0, 1, 2, 198),
            driver_version: vk::make_api_version(0, 0, 0, 0),
            vendor_id: 0,
            device_id: 0,
            device_type: vk::PhysicalDeviceType::DISCRETE_GPU,
            device_name: c"Mock Vulkan Device",
            pipeline_cache_uuid: [
                0xcf, 0xab, 0x9b, 0xdc, 0x74, 0x14, 0x48, 0x61, 0xb7, 0xd6, 0xc4, 0x73, 0x43, 0x98,
                0x39, 0x8f,
            ],
            max_image_dimension2_d: 32768,
            features: FeatureSet {
                shader_float64: true,
                shader_float16: true,
                synchronization2: true,
            },
            subgroup: SubgroupFixture {
                size: 8,
                supported_stages: vk::ShaderStageFlags::COMPUTE | vk::ShaderStageFlags::ALL_GRAPHICS,
                supported_operations: vk::SubgroupFeatureFlags::BASIC
                    | vk::SubgroupFeatureFlags::ARITHMETIC,
            },
            max_push_descriptors: 32,
            instance_extensions: vec![
                ExtensionDescriptor::new(ash::ext::debug_utils::NAME, ash::ext::debug_utils::SPEC_VERSION),
                ExtensionDescriptor::new(ash::khr::surface::NAME, ash::khr::surface::SPEC_VERSION),
            ],
            device_extensions: vec![
                ExtensionDescriptor::new(
                    ash::khr::synchronization2::NAME,
                    ash::khr::synchronization2::SPEC_VERSION,
                ),
                ExtensionDescriptor::new(
                    ash::ext::shader_atomic_float::NAME,
                    ash::ext::shader_atomic_float::SPEC_VERSION,
                ),
            ],
            formats: vec![
                rgba_format(vk::Format::R8G8B8A8_UNORM),
                rgba_format(vk::Format::R16G16B16A16_SFLOAT),
            ],
            queue_families: vec![
                queue_family(1, vk::QueueGlobalPriorityKHR::MEDIUM),
                queue_family(4, vk::QueueGlobalPriorityKHR::HIGH),
            ],
        }
    }

    pub fn with_device_name(mut self, name: &'static CStr) -> Self {
        self.device_name = name;
        self
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn with_queue_families(mut self, queue_families: Vec<QueueFamilyFixture>) -> Self {
        self.queue_families = queue_families;
        self
    }

    /// Capabilities for `format`, or `None` if the device does not list it
    pub fn format(&self, format: vk::Format) -> Option<&FormatFixture> {
        self.formats.iter().find(|f| f.format == format)
    }

    /// Core properties as `vkGetPhysicalDeviceProperties` reports them
    pub fn properties(&self) -> vk::PhysicalDeviceProperties {
        let mut properties = vk::PhysicalDeviceProperties {
            api_version: self.api_version,
            driver_version: self.driver_version,
            vendor_id: self.vendor_id,
            device_id: self.device_id,
            device_type: self.device_type,
            pipeline_cache_uuid: self.pipeline_cache_uuid,
            ..Default::default()
        };
        copy_c_name(&mut properties.device_name, self.device_name);
        properties.limits.max_image_dimension2_d = self.max_image_dimension2_d;
        properties
    }
}

impl Default for DeviceFixture {
    fn default() -> Self {
        Self::mock()
    }
}

/// The shared default fixture
pub fn default_fixture() -> Arc<DeviceFixture> {
    Arc::clone(&DEFAULT_FIXTURE)
}

/// Copy a C string into a fixed-size Vulkan name array, truncating if needed
/// and always leaving it NUL-terminated.
pub(crate) fn copy_c_name(dst: &mut [c_char], name: &CStr) {
    let bytes = name.to_bytes();
    let copy_len = bytes.len().min(dst.len().saturating_sub(1));
    for (slot, &byte) in dst.iter_mut().zip(&bytes[..copy_len]) {
        *slot = byte as c_char;
    }
    for slot in &mut dst[copy_len..] {
        *slot = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_identity() {
        let fixture = DeviceFixture::mock();
        let props = fixture.properties();

        assert_eq!(vk::api_version_major(props.api_version), 1);
        assert_eq!(vk::api_version_minor(props.api_version), 2);
        assert_eq!(vk::api_version_patch(props.api_version), 198);
        assert_eq!(props.driver_version, 0);
        assert_eq!(props.device_type, vk::PhysicalDeviceType::DISCRETE_GPU);
        assert_eq!(props.device_name_as_c_str().unwrap(), c"Mock Vulkan Device");
        assert_eq!(props.limits.max_image_dimension2_d, 32768);
        assert_eq!(props.limits.max_image_dimension1_d, 0);
    }

    #[test]
    fn test_format_lookup() {
        let fixture = DeviceFixture::mock();

        assert!(fixture.format(vk::Format::R8G8B8A8_UNORM).is_some());
        assert!(fixture.format(vk::Format::R16G16B16A16_SFLOAT).is_some());
        assert!(fixture.format(vk::Format::D32_SFLOAT).is_none());
    }

    #[test]
    fn test_copy_c_name_truncates() {
        let mut dst = [0x7f as c_char; 4];
        copy_c_name(&mut dst, c"abcdef");
        assert_eq!(dst, [b'a' as c_char, b'b' as c_char, b'c' as c_char, 0]);

        copy_c_name(&mut dst, c"x");
        assert_eq!(dst, [b'x' as c_char, 0, 0, 0]);
    }

    #[test]
    fn test_extension_descriptor_to_vk() {
        let props = ExtensionDescriptor::new(ash::khr::surface::NAME, 25).to_vk();
        assert_eq!(props.extension_name_as_c_str().unwrap(), c"VK_KHR_surface");
        assert_eq!(props.spec_version, 25);
    }
}
