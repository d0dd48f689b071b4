//! Verdict parsing and serialization.
//!
//! The model is asked for a tagged union: `{ pass: true }` or
//! `{ pass: false, message: string }`. What actually comes back is
//! untrusted text, so parsing validates the tag and field combination
//! explicitly instead of trusting the completion to match the shape.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Errors from interpreting model output as a verdict.
#[derive(Error, Debug)]
pub enum VerdictError {
    #[error("model output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model output does not match the verdict shape: {0}")]
    Shape(String),
}

/// Outcome of checking a document against a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The document satisfies the rule.
    Pass,
    /// The document violates the rule, with the model's explanation.
    Fail {
        /// Why the document failed
        message: String,
    },
}

// Loose deserialization target; the strict rules live in
// `from_model_output`, which is the only way in.
#[derive(Deserialize)]
struct RawVerdict {
    pass: bool,
    #[serde(default)]
    message: Option<String>,
}

impl Verdict {
    /// Parse a model completion into a verdict.
    ///
    /// Requirements on the input: valid JSON, a boolean `pass` tag, and a
    /// string `message` whenever `pass` is `false`. A stray `message` on a
    /// passing verdict is discarded; unknown fields are ignored. Anything
    /// else is an error, including a failing verdict with no message.
    ///
    /// # Example
    ///
    /// ```
    /// use rulecheck_core::verdict::Verdict;
    ///
    /// let verdict = Verdict::from_model_output(r#"{"pass": true}"#).unwrap();
    /// assert!(verdict.is_pass());
    /// ```
    pub fn from_model_output(output: &str) -> Result<Self, VerdictError> {
        let raw: RawVerdict = serde_json::from_str(output)?;
        match (raw.pass, raw.message) {
            (true, _) => Ok(Verdict::Pass),
            (false, Some(message)) => Ok(Verdict::Fail { message }),
            (false, None) => Err(VerdictError::Shape(
                "failing verdict has no message".to_string(),
            )),
        }
    }

    /// Whether this verdict is a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

// Hand-rolled so the wire form stays exactly `{"pass":true}` /
// `{"pass":false,"message":...}` with `pass` first.
impl Serialize for Verdict {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Verdict::Pass => {
                let mut state = serializer.serialize_struct("Verdict", 1)?;
                state.serialize_field("pass", &true)?;
                state.end()
            }
            Verdict::Fail { message } => {
                let mut state = serializer.serialize_struct("Verdict", 2)?;
                state.serialize_field("pass", &false)?;
                state.serialize_field("message", message)?;
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parses_passing_verdict() {
        let verdict = Verdict::from_model_output(r#"{"pass": true}"#).unwrap();
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_parses_failing_verdict() {
        let verdict =
            Verdict::from_model_output(r#"{"pass": false, "message": "No greeting found"}"#)
                .unwrap();
        assert_eq!(
            verdict,
            Verdict::Fail {
                message: "No greeting found".to_string()
            }
        );
    }

    #[test]
    fn test_stray_message_on_pass_is_discarded() {
        let verdict =
            Verdict::from_model_output(r#"{"pass": true, "message": "looks great"}"#).unwrap();
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let verdict =
            Verdict::from_model_output(r#"{"pass": true, "confidence": 0.9}"#).unwrap();
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_failing_verdict_without_message_is_rejected() {
        let err = Verdict::from_model_output(r#"{"pass": false}"#).unwrap_err();
        assert!(matches!(err, VerdictError::Shape(_)));
    }

    #[test]
    fn test_null_message_counts_as_missing() {
        let err = Verdict::from_model_output(r#"{"pass": false, "message": null}"#).unwrap_err();
        assert!(matches!(err, VerdictError::Shape(_)));
    }

    #[test]
    fn test_prose_is_not_a_verdict() {
        let err = Verdict::from_model_output("The document passes the rule.").unwrap_err();
        assert!(matches!(err, VerdictError::Json(_)));
    }

    #[test]
    fn test_fenced_json_is_not_a_verdict() {
        let err = Verdict::from_model_output("```json\n{\"pass\": true}\n```").unwrap_err();
        assert!(matches!(err, VerdictError::Json(_)));
    }

    #[test]
    fn test_surrounding_whitespace_is_tolerated() {
        let verdict = Verdict::from_model_output("  {\"pass\": true}\n").unwrap();
        assert_eq!(verdict, Verdict::Pass);
    }

    #[test]
    fn test_pass_serializes_to_exact_body() {
        let body = serde_json::to_string(&Verdict::Pass).unwrap();
        assert_eq!(body, r#"{"pass":true}"#);
    }

    #[test]
    fn test_fail_serializes_to_exact_body() {
        let body = serde_json::to_string(&Verdict::Fail {
            message: "No greeting found".to_string(),
        })
        .unwrap();
        assert_eq!(body, r#"{"pass":false,"message":"No greeting found"}"#);
    }

    proptest! {
        #[test]
        fn parser_never_panics(output in ".*") {
            let _ = Verdict::from_model_output(&output);
        }

        #[test]
        fn failure_messages_round_trip(message in ".*") {
            let fail = Verdict::Fail { message: message.clone() };
            let body = serde_json::to_string(&fail).unwrap();
            prop_assert_eq!(Verdict::from_model_output(&body).unwrap(), fail);
        }
    }
}
