use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::status::Status;

/// A request to execute source code on the judging service.
///
/// Plain value object with public fields; build one with struct-update
/// syntax over [`Default`]. `source_code` and `additional_files` are
/// mutually exclusive: `additional_files` carries a base64-encoded zip
/// archive (see the client's archive builder) for multi-file submissions,
/// and the service accepts one or the other.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Submission {
    pub language_id: u32,
    pub source_code: Option<String>,
    pub stdin: Option<String>,
    pub expected_output: Option<String>,
    /// CPU time limit in seconds.
    pub cpu_time_limit: Option<f64>,
    /// Extra wall time granted after the CPU limit before a hard kill.
    pub cpu_extra_time: Option<f64>,
    pub wall_time_limit: Option<f64>,
    /// Memory limit in kilobytes.
    pub memory_limit: Option<i64>,
    pub stack_limit: Option<i64>,
    pub compiler_options: Option<String>,
    pub command_line_arguments: Option<String>,
    pub callback_url: Option<String>,
    pub redirect_stderr_to_stdout: Option<bool>,
    /// Base64-encoded zip archive produced by the archive builder.
    pub additional_files: Option<String>,
    pub enable_network: Option<bool>,
}

impl Submission {
    /// Serializes the submission for transmission.
    ///
    /// Unset optional fields are omitted entirely, never sent as null.
    /// When `base64_encode` is on, the free-form text fields
    /// (`source_code`, `stdin`, `expected_output`) are base64-encoded;
    /// `additional_files` is transmitted verbatim since it is already a
    /// base64 archive.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if both `source_code` and
    /// `additional_files` are set, checked before anything is serialized.
    pub fn to_payload(&self, base64_encode: bool) -> Result<Map<String, Value>> {
        if self.source_code.is_some() && self.additional_files.is_some() {
            return Err(Error::InvalidArgument(
                "source_code and additional_files cannot be set simultaneously".into(),
            ));
        }

        let encode = |text: &str| -> Value {
            if base64_encode {
                BASE64.encode(text).into()
            } else {
                text.into()
            }
        };

        let mut data = Map::new();
        data.insert("language_id".into(), self.language_id.into());

        if let Some(source_code) = &self.source_code {
            data.insert("source_code".into(), encode(source_code));
        }
        if let Some(stdin) = &self.stdin {
            data.insert("stdin".into(), encode(stdin));
        }
        if let Some(expected_output) = &self.expected_output {
            data.insert("expected_output".into(), encode(expected_output));
        }
        if let Some(cpu_time_limit) = self.cpu_time_limit {
            data.insert("cpu_time_limit".into(), cpu_time_limit.into());
        }
        if let Some(cpu_extra_time) = self.cpu_extra_time {
            data.insert("cpu_extra_time".into(), cpu_extra_time.into());
        }
        if let Some(wall_time_limit) = self.wall_time_limit {
            data.insert("wall_time_limit".into(), wall_time_limit.into());
        }
        if let Some(memory_limit) = self.memory_limit {
            data.insert("memory_limit".into(), memory_limit.into());
        }
        if let Some(stack_limit) = self.stack_limit {
            data.insert("stack_limit".into(), stack_limit.into());
        }
        if let Some(compiler_options) = &self.compiler_options {
            data.insert("compiler_options".into(), compiler_options.as_str().into());
        }
        if let Some(command_line_arguments) = &self.command_line_arguments {
            data.insert(
                "command_line_arguments".into(),
                command_line_arguments.as_str().into(),
            );
        }
        if let Some(callback_url) = &self.callback_url {
            data.insert("callback_url".into(), callback_url.as_str().into());
        }
        if let Some(redirect) = self.redirect_stderr_to_stdout {
            data.insert("redirect_stderr_to_stdout".into(), redirect.into());
        }
        if let Some(additional_files) = &self.additional_files {
            data.insert("additional_files".into(), additional_files.as_str().into());
        }
        if let Some(enable_network) = self.enable_network {
            data.insert("enable_network".into(), enable_network.into());
        }

        Ok(data)
    }
}

/// An immutable snapshot of a submission's state, one per poll.
///
/// The service serializes fractional numbers like `time` as decimal
/// strings; both strings and JSON numbers are accepted on ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub token: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub memory: Option<i64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub wall_time: Option<f64>,
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub exit_signal: Option<i32>,
    /// Opaque timestamp strings, passed through untouched.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub finished_at: Option<String>,
}

impl SubmissionResult {
    /// Builds a result from a raw response mapping.
    ///
    /// When `base64_encoded` is on, `stdout`, `stderr` and
    /// `compile_output` are base64-decoded; a field that fails to decode
    /// (or decodes to non-UTF-8 bytes) keeps its raw value.
    pub fn from_value(value: Value, base64_encoded: bool) -> serde_json::Result<Self> {
        let mut result: Self = serde_json::from_value(value)?;

        if base64_encoded {
            for field in [
                &mut result.stdout,
                &mut result.stderr,
                &mut result.compile_output,
            ] {
                if let Some(raw) = field.take() {
                    *field = Some(decode_lenient(raw));
                }
            }
        }

        Ok(result)
    }

    /// A result without a status has not finished executing.
    pub fn is_pending(&self) -> bool {
        self.status.as_ref().is_none_or(Status::is_pending)
    }

    pub fn is_success(&self) -> bool {
        self.status.as_ref().is_some_and(Status::is_success)
    }

    pub fn is_error(&self) -> bool {
        self.status.as_ref().is_some_and(Status::is_error)
    }
}

/// Base64-decodes `raw`, falling back to the raw string when it is not
/// valid base64 or not valid UTF-8. The service wraps long payloads with
/// newlines, so whitespace is stripped first.
fn decode_lenient(raw: String) -> String {
    let stripped: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    match BASE64.decode(&stripped) {
        Ok(bytes) => String::from_utf8(bytes).unwrap_or(raw),
        Err(_) => raw,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid numeric string: {s:?}"))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected number or string, got {other}"
        ))),
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?.map(|n| n as i64))
}
