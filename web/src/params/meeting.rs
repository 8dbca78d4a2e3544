use serde::Deserialize;

/// JSON body accepted by POST /api/process-meeting.
#[derive(Debug, Deserialize)]
pub struct ProcessMeetingParams {
    pub text: Option<String>,
}
