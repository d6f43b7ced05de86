//! Running named actions on behalf of an issuer

use crate::action::{ActionRequest, ActionResult, Event};
use crate::agent::feedback::Cue;
use crate::agent::{Agent, LifeCycleState};
use crate::strategy::ActionContext;

impl Agent {
    /// Run `name` against every engine, current or not, and report the outcome
    ///
    /// Returns true only when a strategy accepted the action. `silent`
    /// suppresses cues and error reports but never changes the result.
    pub fn do_specific_action(
        &mut self,
        name: &str,
        qualifier: Option<&str>,
        event: Option<Event>,
        silent: bool,
    ) -> bool {
        let mut request = ActionRequest::new(name);
        if let Some(qualifier) = qualifier {
            request = request.with_qualifier(qualifier);
        }
        if let Some(event) = event {
            request = request.with_event(event);
        }

        let result = self.execute_anywhere(&request);
        self.report_action(name, result, silent)
    }

    /// First recognized result across engines in dispatch order
    pub(super) fn execute_anywhere(&mut self, request: &ActionRequest) -> ActionResult {
        let current = self.engines.current_state();
        for state in LifeCycleState::DISPATCH_ORDER {
            let mut ctx = ActionContext {
                agent: self.id,
                state: current,
                now: self.clock,
                memory: &mut self.memory,
                facts: &self.facts,
            };
            let result = self.engines.get_mut(state).execute_action(request, &mut ctx);
            if result.is_recognized() {
                return result;
            }
        }
        ActionResult::Unknown
    }

    pub(super) fn report_action(&mut self, name: &str, result: ActionResult, silent: bool) -> bool {
        match result {
            ActionResult::Ok => {
                if !silent {
                    self.outbox.cue(Cue::Affirm);
                }
                true
            }
            ActionResult::Impossible | ActionResult::Useless => {
                if !silent {
                    self.tell_error(&format!("{}: {}", name, result));
                    self.outbox.cue(Cue::Deny);
                }
                false
            }
            ActionResult::Failed => {
                if !silent {
                    self.tell_error(&format!("{}: failed", name));
                }
                false
            }
            ActionResult::Unknown => {
                if !silent {
                    self.tell_error(&format!("{}: unknown action", name));
                }
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::agent::testing::{agent, human_controller};
    use crate::agent::{Cue, Feedback, LifeCycleState};

    #[test]
    fn test_ok_nods() {
        let mut agent = agent();
        agent.set_controller(Some(human_controller()));

        assert!(agent.do_specific_action("follow", None, None, false));
        assert_eq!(agent.drain_feedback(), vec![Feedback::Cue { cue: Cue::Affirm }]);
    }

    #[test]
    fn test_out_of_state_action() {
        let mut agent = agent();
        assert_eq!(agent.state(), LifeCycleState::Normal);

        // "attack" only lives in the conflict engine
        assert!(!agent.do_specific_action("attack", None, None, true));
        assert_eq!(agent.engines().get(LifeCycleState::Conflict).last_action(), Some("attack"));
        assert_eq!(agent.engines().get(LifeCycleState::Normal).last_action(), None);
    }

    #[test]
    fn test_rejections_report_error_and_shake_head() {
        let mut agent = agent();
        agent.set_controller(Some(human_controller()));

        assert!(!agent.do_specific_action("attack", None, None, false));
        let feedback = agent.drain_feedback();
        assert!(matches!(&feedback[0], Feedback::Error { text, .. } if text == "attack: impossible"));
        assert_eq!(feedback[1], Feedback::Cue { cue: Cue::Deny });

        assert!(!agent.do_specific_action("flee", None, None, false));
        let feedback = agent.drain_feedback();
        assert_eq!(feedback.len(), 1);
        assert!(matches!(&feedback[0], Feedback::Error { text, .. } if text == "flee: failed"));
    }

    #[test]
    fn test_unknown_is_reported_unless_silent() {
        let mut agent = agent();
        agent.set_controller(Some(human_controller()));

        assert!(!agent.do_specific_action("dance", None, None, true));
        assert!(agent.drain_feedback().is_empty());

        assert!(!agent.do_specific_action("dance", None, None, false));
        let feedback = agent.drain_feedback();
        assert!(matches!(&feedback[0], Feedback::Error { text, .. } if text == "dance: unknown action"));
    }

    #[test]
    fn test_silent_keeps_result() {
        let mut agent = agent();
        agent.set_controller(Some(human_controller()));
        assert!(agent.do_specific_action("follow", None, None, true));
        assert!(agent.drain_feedback().is_empty());
    }
}
