//! Action requests and the events that trigger them

use crate::core::types::ActorId;
use serde::{Deserialize, Serialize};

/// Something that caused an action to be requested
///
/// `source` names the origin (a trigger name, `"do"` for direct commands,
/// or the command text itself) and `param` carries whatever followed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub source: String,
    pub param: String,
    pub owner: Option<ActorId>,
    pub payload: Option<serde_json::Value>,
}

impl Event {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }

    pub fn with_owner(mut self, owner: ActorId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// A single attempt to run a named action; never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub name: String,
    pub qualifier: Option<String>,
    pub event: Option<Event>,
}

impl ActionRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualifier: None,
            event: None,
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        let qualifier = qualifier.into();
        self.qualifier = (!qualifier.is_empty()).then_some(qualifier);
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.event = Some(event);
        self
    }
}
