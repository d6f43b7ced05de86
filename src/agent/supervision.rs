//! Picking a controller from the agent's group

use crate::agent::controller::Controller;
use crate::agent::{Agent, LifeCycleState};
use crate::world::{GroupMember, MemberKind};
use rand::Rng;

impl Agent {
    /// Candidate controller: the leader, or the first human in the group
    ///
    /// Members played by humans through an agent are only a fallback,
    /// used when the group has no usable leader. Battlegrounds never hand
    /// control to non-leaders.
    fn group_controller_candidate(&self) -> Option<GroupMember> {
        let group = self.facts.group.as_ref()?;
        let in_battleground = self.facts.in_battleground;

        let mut candidate = group.leader_member().filter(|m| m.in_world).cloned();
        let mut fallback = None;

        if candidate.as_ref().map_or(true, |m| m.kind != MemberKind::Human) {
            let skip = candidate.as_ref().map(|m| m.id);
            for member in &group.members {
                if member.id == self.id || Some(member.id) == skip || !member.in_world {
                    continue;
                }
                if member.kind != MemberKind::Human {
                    if member.kind.counts_as_human() && !in_battleground {
                        fallback = Some(member.clone());
                    }
                    continue;
                }
                if in_battleground {
                    continue;
                }
                candidate = Some(member.clone());
                break;
            }
        }

        candidate.or(fallback)
    }

    /// Adopt a group member as controller when nobody human directs the agent
    pub(super) fn adopt_group_controller(&mut self) {
        if self.has_human_controller() {
            return;
        }
        let Some(candidate) = self.group_controller_candidate() else {
            return;
        };
        if candidate.id == self.id || self.controller.as_ref().is_some_and(|c| c.id == candidate.id) {
            return;
        }

        let is_leader = self.facts.group.as_ref().is_some_and(|g| g.leader == candidate.id);
        tracing::info!(agent = %self.id, controller = %candidate.name, is_leader, "Adopted controller");
        self.set_controller(Some(Controller::from_member(&candidate)));
        self.reset_strategies();

        let normal = self.engines.get_mut(LifeCycleState::Normal);
        if self.facts.in_battleground {
            normal.change_strategy("-follow");
            return;
        }
        normal.change_strategy("+follow");

        let greeting = if is_leader {
            "Hello, I follow you!"
        } else if self.rng.gen_range(0..3) == 0 {
            "Hello!"
        } else {
            "Hi!"
        };
        self.tell_master(greeting);
    }
}
