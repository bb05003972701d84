//! Layouts and value adapters shared by several models.

use std::fmt;

use schema::{FieldDescriptor, LayoutDef};

pub const TRANSITION_TIME: &str = "TransitionTime";
pub const OPTIONAL_SET_PARAMETERS: &str = "OptionalSetParameters";

/// Shared layouts, in declaration order.
pub fn layouts() -> Vec<LayoutDef> {
    vec![
        LayoutDef::new(TRANSITION_TIME)
            .field(FieldDescriptor::bits("step_resolution", 2))
            .field(FieldDescriptor::bits("steps", 6)),
        LayoutDef::new(OPTIONAL_SET_PARAMETERS)
            .nested("transition_time", TRANSITION_TIME)
            .field(FieldDescriptor::u8("delay")),
    ]
}

/// Resolution of a transition time step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepResolution {
    Millis100,
    Seconds1,
    Seconds10,
    Minutes10,
}

impl StepResolution {
    /// Decodes the two-bit resolution field.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Millis100,
            1 => Self::Seconds1,
            2 => Self::Seconds10,
            _ => Self::Minutes10,
        }
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Millis100 => 0,
            Self::Seconds1 => 1,
            Self::Seconds10 => 2,
            Self::Minutes10 => 3,
        }
    }

    /// Length of one step in milliseconds.
    #[must_use]
    pub const fn step_millis(self) -> u64 {
        match self {
            Self::Millis100 => 100,
            Self::Seconds1 => 1_000,
            Self::Seconds10 => 10_000,
            Self::Minutes10 => 600_000,
        }
    }
}

/// Generic Default Transition Time encoding: a two-bit step resolution and
/// a six-bit step count packed into one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionTime {
    pub resolution: StepResolution,
    pub steps: u8,
}

impl TransitionTime {
    /// Step count meaning the remaining time is unknown.
    pub const UNKNOWN_STEPS: u8 = 0x3F;

    /// Largest step count describing a known duration.
    pub const MAX_STEPS: u8 = 0x3E;

    /// Decodes the packed byte.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            resolution: StepResolution::from_bits(raw >> 6),
            steps: raw & 0x3F,
        }
    }

    /// Builds a value from the two decoded bit fields.
    #[must_use]
    pub const fn from_fields(step_resolution: u8, steps: u8) -> Self {
        Self {
            resolution: StepResolution::from_bits(step_resolution),
            steps: steps & 0x3F,
        }
    }

    /// Encodes the packed byte.
    #[must_use]
    pub const fn to_raw(self) -> u8 {
        (self.resolution.bits() << 6) | (self.steps & 0x3F)
    }

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.steps == Self::UNKNOWN_STEPS
    }

    /// Duration in milliseconds, `None` when unknown.
    #[must_use]
    pub const fn to_millis(self) -> Option<u64> {
        if self.is_unknown() {
            return None;
        }
        Some(self.steps as u64 * self.resolution.step_millis())
    }
}

impl fmt::Display for TransitionTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_millis() {
            None => write!(f, "unknown"),
            Some(ms) if ms % 1_000 == 0 => write!(f, "{}s", ms / 1_000),
            Some(ms) => write!(f, "{ms}ms"),
        }
    }
}

/// Foundation model status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StatusCode {
    Success = 0x00,
    InvalidAddress = 0x01,
    InvalidModel = 0x02,
    InvalidAppKeyIndex = 0x03,
    InvalidNetKeyIndex = 0x04,
    InsufficientResources = 0x05,
    KeyIndexAlreadyStored = 0x06,
    InvalidPublishParameters = 0x07,
    NotASubscribeModel = 0x08,
    StorageFailure = 0x09,
    FeatureNotSupported = 0x0A,
    CannotUpdate = 0x0B,
    CannotRemove = 0x0C,
    CannotBind = 0x0D,
    TemporarilyUnableToChangeState = 0x0E,
    CannotSet = 0x0F,
    UnspecifiedError = 0x10,
}

impl StatusCode {
    const ALL: [Self; 17] = [
        Self::Success,
        Self::InvalidAddress,
        Self::InvalidModel,
        Self::InvalidAppKeyIndex,
        Self::InvalidNetKeyIndex,
        Self::InsufficientResources,
        Self::KeyIndexAlreadyStored,
        Self::InvalidPublishParameters,
        Self::NotASubscribeModel,
        Self::StorageFailure,
        Self::FeatureNotSupported,
        Self::CannotUpdate,
        Self::CannotRemove,
        Self::CannotBind,
        Self::TemporarilyUnableToChangeState,
        Self::CannotSet,
        Self::UnspecifiedError,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::InvalidModel => "INVALID_MODEL",
            Self::InvalidAppKeyIndex => "INVALID_APPKEY_INDEX",
            Self::InvalidNetKeyIndex => "INVALID_NETKEY_INDEX",
            Self::InsufficientResources => "INSUFFICIENT_RESOURCES",
            Self::KeyIndexAlreadyStored => "KEY_INDEX_ALREADY_STORED",
            Self::InvalidPublishParameters => "INVALID_PUBLISH_PARAMETERS",
            Self::NotASubscribeModel => "NOT_A_SUBSCRIBE_MODEL",
            Self::StorageFailure => "STORAGE_FAILURE",
            Self::FeatureNotSupported => "FEATURE_NOT_SUPPORTED",
            Self::CannotUpdate => "CANNOT_UPDATE",
            Self::CannotRemove => "CANNOT_REMOVE",
            Self::CannotBind => "CANNOT_BIND",
            Self::TemporarilyUnableToChangeState => "TEMPORARILY_UNABLE_TO_CHANGE_STATE",
            Self::CannotSet => "CANNOT_SET",
            Self::UnspecifiedError => "UNSPECIFIED_ERROR",
        }
    }
}

impl TryFrom<u8> for StatusCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(usize::from(value)).copied().ok_or(value)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_time_raw_roundtrip() {
        for raw in 0..=u8::MAX {
            assert_eq!(TransitionTime::from_raw(raw).to_raw(), raw);
        }
    }

    #[test]
    fn transition_time_fields() {
        let tt = TransitionTime::from_raw(0x4A);
        assert_eq!(tt.resolution, StepResolution::Seconds1);
        assert_eq!(tt.steps, 10);
        assert_eq!(tt.to_millis(), Some(10_000));
        assert_eq!(tt.to_string(), "10s");
        assert_eq!(TransitionTime::from_fields(1, 10), tt);
    }

    #[test]
    fn transition_time_unknown() {
        let tt = TransitionTime::from_raw(0xFF);
        assert!(tt.is_unknown());
        assert_eq!(tt.to_millis(), None);
        assert_eq!(tt.to_string(), "unknown");
    }

    #[test]
    fn transition_time_resolutions() {
        assert_eq!(TransitionTime::from_raw(0x05).to_millis(), Some(500));
        assert_eq!(TransitionTime::from_raw(0x05).to_string(), "500ms");
        assert_eq!(TransitionTime::from_raw(0x85).to_millis(), Some(50_000));
        assert_eq!(TransitionTime::from_raw(0xC2).to_millis(), Some(1_200_000));
    }

    #[test]
    fn status_codes() {
        assert_eq!(StatusCode::try_from(0x00), Ok(StatusCode::Success));
        assert_eq!(StatusCode::try_from(0x0F), Ok(StatusCode::CannotSet));
        assert_eq!(StatusCode::try_from(0x10), Ok(StatusCode::UnspecifiedError));
        assert_eq!(StatusCode::try_from(0x11), Err(0x11));
        for code in StatusCode::ALL {
            assert_eq!(StatusCode::try_from(code as u8), Ok(code));
        }
        assert_eq!(StatusCode::CannotBind.to_string(), "CANNOT_BIND");
    }

    #[test]
    fn shared_layouts_compile() {
        let mut builder = schema::Catalog::builder();
        for layout in layouts() {
            builder = builder.layout(layout);
        }
        let catalog = builder.build().unwrap();
        assert_eq!(catalog.layout_by_name(TRANSITION_TIME).unwrap().byte_len, 1);
        assert_eq!(
            catalog
                .layout_by_name(OPTIONAL_SET_PARAMETERS)
                .unwrap()
                .byte_len,
            2
        );
    }
}
