use serde::{Deserialize, Serialize};

/// An execution outcome reported by the judging service.
///
/// The service defines a closed set of fourteen statuses, exposed here as
/// associated constants. The numeric ordering is meaningful: everything from
/// [`Status::WRONG_ANSWER`] upwards counts as an error, so ids the service
/// may add later classify as errors without a client update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: u32,
    pub description: String,
}

impl Status {
    pub const IN_QUEUE: u32 = 1;
    pub const PROCESSING: u32 = 2;
    pub const ACCEPTED: u32 = 3;
    pub const WRONG_ANSWER: u32 = 4;
    pub const TIME_LIMIT_EXCEEDED: u32 = 5;
    pub const COMPILATION_ERROR: u32 = 6;
    pub const RUNTIME_ERROR_SIGSEGV: u32 = 7;
    pub const RUNTIME_ERROR_SIGXFSZ: u32 = 8;
    pub const RUNTIME_ERROR_SIGFPE: u32 = 9;
    pub const RUNTIME_ERROR_SIGABRT: u32 = 10;
    pub const RUNTIME_ERROR_NZEC: u32 = 11;
    pub const RUNTIME_ERROR_OTHER: u32 = 12;
    pub const INTERNAL_ERROR: u32 = 13;
    pub const EXEC_FORMAT_ERROR: u32 = 14;

    pub fn new(id: u32, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }

    /// Queued or currently executing.
    pub fn is_pending(&self) -> bool {
        self.id == Self::IN_QUEUE || self.id == Self::PROCESSING
    }

    pub fn is_success(&self) -> bool {
        self.id == Self::ACCEPTED
    }

    /// Threshold, not a whitelist: any id at or above
    /// [`Status::WRONG_ANSWER`] is an error.
    pub fn is_error(&self) -> bool {
        self.id >= Self::WRONG_ANSWER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_and_processing_are_pending() {
        assert!(Status::new(Status::IN_QUEUE, "In Queue").is_pending());
        assert!(Status::new(Status::PROCESSING, "Processing").is_pending());
        assert!(!Status::new(Status::ACCEPTED, "Accepted").is_pending());
    }

    #[test]
    fn accepted_is_success_not_error() {
        let status = Status::new(Status::ACCEPTED, "Accepted");
        assert!(status.is_success());
        assert!(!status.is_error());
        assert!(!status.is_pending());
    }

    #[test]
    fn wrong_answer_and_above_are_errors() {
        assert!(Status::new(Status::WRONG_ANSWER, "Wrong Answer").is_error());
        assert!(Status::new(Status::TIME_LIMIT_EXCEEDED, "Time Limit Exceeded").is_error());
        assert!(!Status::new(Status::WRONG_ANSWER, "Wrong Answer").is_success());
        assert!(!Status::new(Status::TIME_LIMIT_EXCEEDED, "Time Limit Exceeded").is_success());
    }

    #[test]
    fn unknown_high_ids_classify_as_errors() {
        // Future service-side statuses must keep classifying as errors.
        assert!(Status::new(15, "Something New").is_error());
        assert!(Status::new(99, "Something New").is_error());
    }

    #[test]
    fn serde_round_trip() {
        let status = Status::new(Status::ACCEPTED, "Accepted");
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 3, "description": "Accepted"})
        );
        let back: Status = serde_json::from_value(value).unwrap();
        assert_eq!(back, status);
    }
}
