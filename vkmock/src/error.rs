//! Error types for vkmock

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockError {
    /// Entry point exists only so the symbol resolves; the double does not
    /// model resource lifecycle.
    #[error("{0} is not implemented by the mock driver")]
    NotImplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, MockError>;

impl MockError {
    /// Convert MockError to Vulkan result code
    pub fn to_vk_result(&self) -> ash::vk::Result {
        match self {
            MockError::NotImplemented(_) => ash::vk::Result::ERROR_UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_implemented_maps_to_unknown() {
        let err = MockError::NotImplemented("vkCreateDevice");
        assert_eq!(err.to_vk_result(), ash::vk::Result::ERROR_UNKNOWN);
        assert_eq!(
            err.to_string(),
            "vkCreateDevice is not implemented by the mock driver"
        );
    }
}
