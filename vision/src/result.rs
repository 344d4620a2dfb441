use crate::schema::{AnalyzeResult, OperationStatus};

/// Recognized text, pages and lines in the order the service returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionResult {
	pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
	pub lines: Vec<String>,
}

impl RecognitionResult {
	/// Every line of every page, each followed by `\n`.
	pub fn text(&self) -> String {
		let mut out = String::new();
		for line in self.pages.iter().flat_map(|page| &page.lines) {
			out.push_str(line);
			out.push('\n');
		}
		out
	}

	pub fn line_count(&self) -> usize {
		self.pages.iter().map(|page| page.lines.len()).sum()
	}
}

impl From<AnalyzeResult> for RecognitionResult {
	fn from(result: AnalyzeResult) -> Self {
		Self {
			pages: result
				.read_results
				.into_iter()
				.map(|page| Page {
					lines: page.lines.into_iter().map(|line| line.text).collect(),
				})
				.collect(),
		}
	}
}

/// How a finished read operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Text(RecognitionResult),
	/// Terminal, but not `succeeded`. The specific status is kept for logging only.
	Failed(OperationStatus),
}
