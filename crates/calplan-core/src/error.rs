//! Core error types.

use thiserror::Error;

const START_BEFORE_END: &str = "시작 시간은 종료 시간보다 빨라야 합니다.";
const END_AFTER_START: &str = "종료 시간은 시작 시간보다 늦어야 합니다.";

/// Reasons an event draft cannot be saved.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are blank.
    #[error("필수 정보를 모두 입력해주세요.")]
    MissingRequired { fields: Vec<&'static str> },

    /// A date or time field does not parse.
    #[error("날짜 또는 시간 형식이 올바르지 않습니다: {field}")]
    Malformed { field: &'static str },

    /// The start time is not before the end time.
    #[error("시간 설정을 확인해주세요.")]
    InvalidTimeRange { start: String, end: String },
}

impl ValidationError {
    /// Message for the start-time field, if this error concerns it.
    pub fn start_time_message(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTimeRange { .. } => Some(START_BEFORE_END),
            _ => None,
        }
    }

    /// Message for the end-time field, if this error concerns it.
    pub fn end_time_message(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTimeRange { .. } => Some(END_AFTER_START),
            _ => None,
        }
    }
}
