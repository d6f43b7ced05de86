//! Uniform outcome of executing a named action

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Result every strategy returns when asked to execute an action
///
/// `Unknown` means the strategy does not recognize the action name at all.
/// The other four are terminal answers from a strategy that did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionResult {
    #[display(fmt = "ok")]
    Ok,
    #[display(fmt = "impossible")]
    Impossible,
    #[display(fmt = "useless")]
    Useless,
    #[display(fmt = "failed")]
    Failed,
    #[display(fmt = "unknown")]
    Unknown,
}

impl ActionResult {
    /// True when some strategy recognized the action
    pub fn is_recognized(self) -> bool {
        self != ActionResult::Unknown
    }

    pub fn is_success(self) -> bool {
        self == ActionResult::Ok
    }

    /// Rejections surfaced to the issuer as error feedback
    pub fn is_rejection(self) -> bool {
        matches!(
            self,
            ActionResult::Impossible | ActionResult::Useless | ActionResult::Failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_is_distinct_from_failed() {
        assert!(!ActionResult::Unknown.is_recognized());
        assert!(ActionResult::Failed.is_recognized());
        assert!(ActionResult::Failed.is_rejection());
        assert!(!ActionResult::Unknown.is_rejection());
    }

    #[test]
    fn test_display_matches_feedback_vocabulary() {
        assert_eq!(ActionResult::Impossible.to_string(), "impossible");
        assert_eq!(ActionResult::Useless.to_string(), "useless");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let parsed: ActionResult = serde_json::from_str("\"useless\"").unwrap();
        assert_eq!(parsed, ActionResult::Useless);
    }
}
