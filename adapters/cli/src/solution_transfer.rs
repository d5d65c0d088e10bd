use ant_trail_core::MoveId;
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;

const TRANSFER_DOMAIN: &str = "ant";
const TRANSFER_VERSION: &str = "v1";

/// Leading `domain:version` pair of every solution string.
pub(crate) const TRANSFER_HEADER: &str = "ant:v1";
const FIELD_DELIMITER: char = ':';

/// Encoded answer handed to the submission sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SolutionTransfer {
    /// Assignment the answer was authored for.
    pub(crate) assignment: String,
    /// Flattened move ids with repeat blocks unrolled.
    pub(crate) answer: Vec<MoveId>,
}

impl SolutionTransfer {
    /// Renders the answer as a single line the learner can paste into a submission.
    pub(crate) fn encode(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(&self.answer)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!("{TRANSFER_HEADER}:{}:{encoded}", self.assignment))
    }

    /// Parses a solution string, trimming surrounding whitespace first.
    pub(crate) fn decode(value: &str) -> Result<Self, SolutionTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SolutionTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(SolutionTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(SolutionTransferError::MissingVersion)?;
        let assignment = parts
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or(SolutionTransferError::MissingAssignment)?;
        let payload = parts.next().ok_or(SolutionTransferError::MissingPayload)?;
        if parts.next().is_some() {
            return Err(SolutionTransferError::TrailingSegments);
        }

        if domain != TRANSFER_DOMAIN {
            return Err(SolutionTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != TRANSFER_VERSION {
            return Err(SolutionTransferError::UnsupportedVersion(version.to_owned()));
        }

        let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
        let answer: Vec<MoveId> = serde_json::from_slice(&bytes)?;

        Ok(Self {
            assignment: assignment.to_owned(),
            answer,
        })
    }
}

/// Reasons a solution string cannot be decoded.
#[derive(Debug, Error)]
pub(crate) enum SolutionTransferError {
    /// Nothing but whitespace was supplied.
    #[error("solution string was empty")]
    EmptyPayload,
    /// No `ant` domain segment.
    #[error("solution string is missing the prefix")]
    MissingPrefix,
    /// No version segment after the domain.
    #[error("solution string is missing the version")]
    MissingVersion,
    /// The assignment segment is absent or empty.
    #[error("solution string is missing the assignment id")]
    MissingAssignment,
    /// No payload after the assignment id.
    #[error("solution string is missing the payload")]
    MissingPayload,
    /// More than four `:`-separated segments.
    #[error("solution string has unexpected trailing segments")]
    TrailingSegments,
    /// The domain segment is not `ant`.
    #[error("solution prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The version segment is not `v1`.
    #[error("solution version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The payload is not base64 without padding.
    #[error("solution payload is not valid base64")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The payload does not hold a JSON list of move ids.
    #[error("solution payload is not a list of move ids")]
    InvalidPayload(#[from] serde_json::Error),
}
