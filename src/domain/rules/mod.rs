// Domain rules - Business logic and policies

use serde_json::Value;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Kilobits in one megabyte, using binary megabytes like the upload limits do
const KBITS_PER_MB: f64 = 8.0 * 1024.0;

/// Target-size bitrate arithmetic
pub struct BitrateModel;

impl BitrateModel {
    /// Recommended video bitrate in kbps.
    ///
    /// `floor(size_mb * 8 * 1024 / duration * (100 - margin) / 100)`.
    /// A non-positive (or NaN) duration yields 0 rather than a division by
    /// zero. Size and margin are not range-checked, so out-of-range values
    /// pass straight through the arithmetic.
    pub fn compute_bitrate_kbps(params: &BitrateParameters) -> i64 {
        if !(params.duration_sec > 0.0) {
            return 0;
        }

        let size_kbits = params.target_size_mb * KBITS_PER_MB;
        let raw_kbps = size_kbits / params.duration_sec;
        let margin_multiplier = (100.0 - f64::from(params.safety_margin_percent)) / 100.0;

        // `as` saturates on overflow and maps NaN to 0
        (raw_kbps * margin_multiplier).floor() as i64
    }

    /// Encoder invocation hint and rate-control annotation for a bitrate
    pub fn encoder_hint(bitrate_kbps: i64, preset: EncoderPreset) -> EncoderHint {
        EncoderHint {
            command: format!("-b:v {}k -preset {}", bitrate_kbps, preset),
            rate_control: format!(
                "min/maxrate matching active (-minrate {0}k -maxrate {0}k)",
                bitrate_kbps
            ),
        }
    }
}

/// Gate applied to a file selection before any provider is contacted
pub struct FileAdmission;

impl FileAdmission {
    /// Accept the request if its declared type or its extension matches the policy
    pub fn admit(policy: &ContainerPolicy, request: &UploadRequest) -> Result<(), DomainError> {
        if Self::media_type_matches(policy, request.media_type())
            || Self::extension_matches(policy, request)
        {
            return Ok(());
        }

        Err(DomainError::InvalidInput(format!(
            "Please upload a {} file: {} has type {}",
            policy.extension.to_uppercase(),
            request.filename(),
            if request.media_type().is_empty() {
                "unknown"
            } else {
                request.media_type()
            }
        )))
    }

    fn media_type_matches(policy: &ContainerPolicy, declared: &str) -> bool {
        // Ignore parameters such as `; codecs=vp9`
        let essence = declared.split(';').next().unwrap_or_default().trim();
        !essence.is_empty() && essence.eq_ignore_ascii_case(&policy.media_type)
    }

    fn extension_matches(policy: &ContainerPolicy, request: &UploadRequest) -> bool {
        let wanted = policy.extension.trim_start_matches('.');
        request
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(wanted))
            .unwrap_or(false)
    }
}

/// Normalizes a provider's JSON body into an attempt outcome
pub struct ResponseContract;

impl ResponseContract {
    /// Evaluate a 2xx response body against the provider's declared paths
    pub fn evaluate(spec: &ProviderSpec, body: &str) -> AttemptOutcome {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                return AttemptOutcome::Rejected {
                    reason: format!("malformed response: {}", e),
                }
            }
        };

        match value.pointer(&spec.success_path) {
            Some(Value::Bool(true)) => {}
            Some(Value::Bool(false)) => {
                return AttemptOutcome::Rejected {
                    reason: Self::failure_reason(&value),
                }
            }
            Some(other) => {
                return AttemptOutcome::Rejected {
                    reason: format!(
                        "unexpected success flag at {}: {}",
                        spec.success_path, other
                    ),
                }
            }
            None => {
                return AttemptOutcome::Rejected {
                    reason: format!("missing success flag at {}", spec.success_path),
                }
            }
        }

        match value.pointer(&spec.url_path).and_then(Value::as_str) {
            Some(url) if !url.trim().is_empty() => AttemptOutcome::Success {
                url: url.trim().to_string(),
            },
            _ => AttemptOutcome::Rejected {
                reason: format!("malformed response: no url at {}", spec.url_path),
            },
        }
    }

    /// Best-effort description of a provider-side failure
    fn failure_reason(value: &Value) -> String {
        ["/description", "/message", "/error"]
            .iter()
            .find_map(|pointer| value.pointer(pointer).and_then(Value::as_str))
            .map(|detail| format!("provider reported failure: {}", detail))
            .unwrap_or_else(|| "provider reported failure".to_string())
    }
}
