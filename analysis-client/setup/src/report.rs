use std::io::Write;

use analysis_domain::AnalysisResponse;
use serde_json::Value;

use crate::AnalyzeError;

/// Prints the outcome of an analysis request.
///
/// A non-200 response has its raw body written first and then fails with an
/// API error carrying the status. A 200 response is parsed and written as
/// two-space indented JSON with non-ASCII text left as-is.
pub fn report_response<W: Write>(
    response: AnalysisResponse,
    out: &mut W,
) -> Result<Value, AnalyzeError> {
    if !response.is_success() {
        writeln!(out, "{}", response.body)?;
        tracing::error!(status = response.status, "analysis request rejected");
    }
    let response = response.into_result()?;

    let result: Value = response.json()?;
    writeln!(out, "results:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    Ok(result)
}
