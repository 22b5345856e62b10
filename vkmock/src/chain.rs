//! `pNext` chain traversal
//!
//! Extensible queries hand the driver a caller-owned singly linked list of
//! structures, each starting with `sType` / `pNext`. The walker reads the tag
//! of every block once, decodes it into [`ChainBlock`], and hands it to the
//! query handler. Blocks the mock does not know come out as
//! [`ChainBlock::Unrecognized`] and are never written.
//!
//! Links are never modified. The chain is assumed to be acyclic and
//! terminated by a null `pNext`, as the Vulkan valid-usage rules require.

use ash::vk;
use std::ffi::c_void;
use std::marker::PhantomData;

/// A chained structure decoded from its `sType`.
pub enum ChainBlock<'a> {
    ShaderFloat16Int8Features(&'a mut vk::PhysicalDeviceShaderFloat16Int8Features<'a>),
    Synchronization2Features(&'a mut vk::PhysicalDeviceSynchronization2Features<'a>),
    SubgroupProperties(&'a mut vk::PhysicalDeviceSubgroupProperties<'a>),
    PushDescriptorProperties(&'a mut vk::PhysicalDevicePushDescriptorPropertiesKHR<'a>),
    FormatProperties3(&'a mut vk::FormatProperties3<'a>),
    QueueFamilyGlobalPriorityProperties(&'a mut vk::QueueFamilyGlobalPriorityPropertiesKHR<'a>),
    Unrecognized(vk::StructureType),
}

impl<'a> ChainBlock<'a> {
    /// # Safety
    /// `ptr` must point to a live Vulkan output structure whose layout
    /// matches its `sType`.
    unsafe fn decode(ptr: *mut c_void) -> Self {
        let s_type = (*ptr.cast::<vk::BaseOutStructure>()).s_type;

        match s_type {
            vk::StructureType::PHYSICAL_DEVICE_SHADER_FLOAT16_INT8_FEATURES => {
                ChainBlock::ShaderFloat16Int8Features(&mut *ptr.cast())
            }
            vk::StructureType::PHYSICAL_DEVICE_SYNCHRONIZATION_2_FEATURES => {
                ChainBlock::Synchronization2Features(&mut *ptr.cast())
            }
            vk::StructureType::PHYSICAL_DEVICE_SUBGROUP_PROPERTIES => {
                ChainBlock::SubgroupProperties(&mut *ptr.cast())
            }
            vk::StructureType::PHYSICAL_DEVICE_PUSH_DESCRIPTOR_PROPERTIES_KHR => {
                ChainBlock::PushDescriptorProperties(&mut *ptr.cast())
            }
            vk::StructureType::FORMAT_PROPERTIES_3 => {
                ChainBlock::FormatProperties3(&mut *ptr.cast())
            }
            vk::StructureType::QUEUE_FAMILY_GLOBAL_PRIORITY_PROPERTIES_KHR => {
                ChainBlock::QueueFamilyGlobalPriorityProperties(&mut *ptr.cast())
            }
            other => ChainBlock::Unrecognized(other),
        }
    }

    /// The `sType` this block was decoded from
    pub fn structure_type(&self) -> vk::StructureType {
        match self {
            ChainBlock::ShaderFloat16Int8Features(s) => s.s_type,
            ChainBlock::Synchronization2Features(s) => s.s_type,
            ChainBlock::SubgroupProperties(s) => s.s_type,
            ChainBlock::PushDescriptorProperties(s) => s.s_type,
            ChainBlock::FormatProperties3(s) => s.s_type,
            ChainBlock::QueueFamilyGlobalPriorityProperties(s) => s.s_type,
            ChainBlock::Unrecognized(s_type) => *s_type,
        }
    }
}

/// Iterator over the blocks of a `pNext` chain, in link order.
pub struct Blocks<'a> {
    next: *mut c_void,
    _marker: PhantomData<&'a mut c_void>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = ChainBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_null() {
            return None;
        }

        let current = self.next;
        // Link is read before the block is handed out; a patch cannot redirect the walk.
        unsafe {
            self.next = (*current.cast::<vk::BaseOutStructure>()).p_next.cast();
            Some(ChainBlock::decode(current))
        }
    }
}

/// Iterate the chain starting at `head` (usually the `p_next` of the base
/// query structure). A null head yields nothing.
///
/// # Safety
/// Every block reachable from `head` must be a valid, writable Vulkan output
/// structure, and the chain must be acyclic. No other reference to those
/// blocks may be live for `'a`.
pub unsafe fn blocks<'a>(head: *mut c_void) -> Blocks<'a> {
    Blocks {
        next: head,
        _marker: PhantomData,
    }
}

/// Visit every block of the chain once and let `patch` fill in the ones it
/// recognizes.
///
/// # Safety
/// Same contract as [`blocks`].
pub unsafe fn walk<'a>(head: *mut c_void, mut patch: impl FnMut(ChainBlock<'a>)) {
    for block in blocks(head) {
        patch(block);
    }
}
