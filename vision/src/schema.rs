//! Wire format of the Computer Vision Read API (v3.2).
//!
//! Only the fields we consume are modelled; serde ignores the rest
//! (bounding boxes, word confidences, appearance, ...).

use serde::{Deserialize, Serialize};

pub const ANALYZE_PATH: &str = "/vision/v3.2/read/analyze";
pub const RESULTS_PATH: &str = "/vision/v3.2/read/analyzeResults";

pub const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const OPERATION_LOCATION: &str = "Operation-Location";

/// Body of an analyze request for a remote image.
#[derive(Serialize)]
pub struct UrlBody<'a> {
	pub url: &'a str,
}

/// Lifecycle of a read operation as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
	NotStarted,
	Running,
	Succeeded,
	Failed,
	/// Anything newer than this client knows about. Treated as terminal.
	#[serde(other)]
	Unknown,
}

impl OperationStatus {
	/// Terminal means polling stops: anything but `notStarted`/`running`.
	pub fn is_terminal(self) -> bool {
		!matches!(self, Self::NotStarted | Self::Running)
	}
}

impl std::fmt::Display for OperationStatus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Self::NotStarted => "notStarted",
			Self::Running => "running",
			Self::Succeeded => "succeeded",
			Self::Failed => "failed",
			Self::Unknown => "unknown",
		})
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOperation {
	pub status: OperationStatus,
	pub analyze_result: Option<AnalyzeResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
	#[serde(default)]
	pub read_results: Vec<ReadResult>,
}

/// One page of the document.
#[derive(Debug, Deserialize)]
pub struct ReadResult {
	#[serde(default)]
	pub page: u32,
	#[serde(default)]
	pub lines: Vec<Line>,
}

#[derive(Debug, Deserialize)]
pub struct Line {
	pub text: String,
}

/// `{"error": {"code": "...", "message": "..."}}` returned alongside 4xx/5xx.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
	pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
	#[serde(default)]
	pub code: String,
	#[serde(default)]
	pub message: String,
}
