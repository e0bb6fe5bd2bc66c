// Bitrate interactor - Target-size bitrate calculation use case

use serde::Serialize;

use crate::app::render::render_structured;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::BitrateModel;

/// Interactor for the bitrate calculation use case
#[derive(Debug, Default)]
pub struct BitrateInteractor;

impl BitrateInteractor {
    pub fn new() -> Self {
        Self
    }

    /// Compute the recommended bitrate and render it
    pub fn calculate(&self, request: BitrateRequest) -> Result<BitrateResponse, DomainError> {
        let bitrate_kbps = BitrateModel::compute_bitrate_kbps(&request.params);
        let report = BitrateReport {
            params: request.params,
            bitrate_kbps,
            preset: request.preset,
            hint: BitrateModel::encoder_hint(bitrate_kbps, request.preset),
        };

        let summary = match render_structured(&report, request.format)? {
            Some(rendered) => rendered,
            None => Self::format_as_text(&report),
        };

        Ok(BitrateResponse { report, summary })
    }

    /// Format report as human-readable text
    fn format_as_text(report: &BitrateReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("Recommended Bitrate: {} kbps\n", report.bitrate_kbps));
        output.push_str(&format!("  Target Size: {} MB\n", report.params.target_size_mb));
        output.push_str(&format!("  Duration: {}s\n", report.params.duration_sec));
        output.push_str(&format!(
            "  Safety Buffer: {}%\n",
            report.params.safety_margin_percent
        ));
        output.push_str(&format!("  ffmpeg: {}\n", report.hint.command));
        output.push_str(&format!("  {}\n", report.hint.rate_control));

        if report.bitrate_kbps == 0 && !(report.params.duration_sec > 0.0) {
            output.push_str("\nDuration must be greater than zero to compute a bitrate.\n");
        }

        output
    }
}

/// Request for a bitrate calculation
#[derive(Debug, Clone)]
pub struct BitrateRequest {
    pub params: BitrateParameters,
    pub preset: EncoderPreset,
    pub format: OutputFormat,
}

/// Calculation result in structured form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitrateReport {
    pub params: BitrateParameters,
    pub bitrate_kbps: i64,
    pub preset: EncoderPreset,
    pub hint: EncoderHint,
}

/// Response from a bitrate calculation
#[derive(Debug, Clone)]
pub struct BitrateResponse {
    pub report: BitrateReport,
    pub summary: String,
}
