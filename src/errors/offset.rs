use thiserror::Error;

use super::OffsetComponent;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OffsetParseError {
    #[error("Malformed UTC offset {input:?}: invalid {component}")]
    Malformed {
        input: String,
        component: OffsetComponent,
    },

    #[error("UTC offset {input:?} out of range")]
    OutOfRange { input: String },
}

impl OffsetParseError {
    pub fn malformed(input: impl Into<String>, component: OffsetComponent) -> Self {
        Self::Malformed {
            input: input.into(),
            component,
        }
    }

    pub fn out_of_range(input: impl Into<String>) -> Self {
        Self::OutOfRange {
            input: input.into(),
        }
    }
}
