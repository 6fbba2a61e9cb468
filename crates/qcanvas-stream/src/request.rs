//! Request body for starting a run.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StreamError, StreamResult};

/// Body posted to the streaming endpoint.
///
/// Both fields are opaque to the client and forwarded as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub problem_input: Value,
    pub want_output: Value,
}

impl RunRequest {
    pub fn new(problem_input: Value, want_output: Value) -> Self {
        Self {
            problem_input,
            want_output,
        }
    }

    /// Parse both fields from raw JSON text.
    pub fn from_json_strs(problem_input: &str, want_output: &str) -> StreamResult<Self> {
        let problem_input =
            serde_json::from_str(problem_input).map_err(|source| StreamError::InvalidRequest {
                field: "problemInput",
                source,
            })?;
        let want_output =
            serde_json::from_str(want_output).map_err(|source| StreamError::InvalidRequest {
                field: "wantOutput",
                source,
            })?;
        Ok(Self::new(problem_input, want_output))
    }
}

impl Default for RunRequest {
    fn default() -> Self {
        Self::new(Value::Object(Default::default()), Value::Object(Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_camel_case() {
        let req = RunRequest::new(json!({"n": 3}), json!(["counts"]));
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body, json!({"problemInput": {"n": 3}, "wantOutput": ["counts"]}));
    }

    #[test]
    fn test_from_json_strs() {
        let req = RunRequest::from_json_strs(r#"{"n": 3}"#, "true").unwrap();
        assert_eq!(req.problem_input, json!({"n": 3}));
        assert_eq!(req.want_output, json!(true));
    }

    #[test]
    fn test_from_json_strs_names_bad_field() {
        let err = RunRequest::from_json_strs("{}", "{oops").unwrap_err();
        assert!(matches!(
            err,
            StreamError::InvalidRequest {
                field: "wantOutput",
                ..
            }
        ));
    }

    #[test]
    fn test_default_is_empty_objects() {
        let body = serde_json::to_string(&RunRequest::default()).unwrap();
        assert_eq!(body, r#"{"problemInput":{},"wantOutput":{}}"#);
    }
}
