//! `debug <what>` introspection answers

use crate::agent::Agent;

impl Agent {
    pub fn debug_response(&self, what: &str) -> String {
        match what {
            "state" => self.engines.current_state().to_string(),
            "position" => self.facts.position.to_string(),
            "target" => self
                .memory
                .current_target
                .map(|t| t.to_string())
                .unwrap_or_default(),
            "hp" => format!("{}%", self.facts.health.clamp(0.0, 100.0) as u32),
            "strategy" => self.engines.current().list_strategies(),
            "action" => self
                .engines
                .current()
                .last_action()
                .unwrap_or_default()
                .to_string(),
            "values" => self.memory.format_values(),
            "throttle" => self.throttle.summary(),
            "travel" => match self.memory.travel_target {
                Some(target) => format!("Destination = {}", target),
                None => "No destination".to_string(),
            },
            other => format!("invalid command: {}", other),
        }
    }
}
