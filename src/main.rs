//! Standin - interactive console
//!
//! Spawns one agent led by a human stand-in ("you"), then lets you type
//! commands at it and advance the host clock by hand.

use standin::agent::{AgentProfile, AgentServices, Controller, Feedback, Role};
use standin::command::{ChatChannel, Issuer, SecurityLevel};
use standin::core::config::AgentConfig;
use standin::core::error::Result;
use standin::core::types::{ActorId, Vec2, WorldPosition};
use standin::roster::Roster;
use standin::strategy::TableCatalog;
use standin::world::{MemberKind, WorldFacts};

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

const TICK_MS: u64 = 100;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("standin=debug")
        .init();

    let config_path = Path::new("data/agent.toml");
    let config = if config_path.exists() {
        AgentConfig::load(config_path)?
    } else {
        tracing::warn!("data/agent.toml not found - using defaults");
        AgentConfig::default()
    };
    let catalog = TableCatalog::load(Path::new("data/strategies.toml"))?;
    let mut roster = Roster::new(AgentServices::new(config, Arc::new(catalog)));

    let you = ActorId::new();
    let home = WorldPosition::new(0, 12, Vec2::new(0.0, 0.0));
    roster.world_mut().add_human(you, "You", home);

    let agent = roster.spawn("Brakk", AgentProfile::new("warrior", Role::Tank, 20));
    let mut facts = WorldFacts {
        position: WorldPosition::new(0, 12, Vec2::new(3.0, 4.0)),
        ..WorldFacts::default()
    };
    roster.observe(agent, facts.clone());
    if let Some(a) = roster.get_mut(agent) {
        a.set_controller(Some(Controller::new(you, "You", MemberKind::Human, SecurityLevel::AllowAll)));
    }
    let issuer = Issuer::human(you, "You", SecurityLevel::AllowAll);

    println!("\n=== STANDIN ===");
    println!("Commands:");
    println!("  tick / t          - Advance the host clock by {} ms", TICK_MS);
    println!("  run <n>           - Run n ticks");
    println!("  combat on|off     - Toggle the conflict flag");
    println!("  hp <n>            - Set health percentage");
    println!("  map <id>          - Move the agent to another map");
    println!("  status / s        - Show agent status");
    println!("  quit / q          - Exit");
    println!("  <anything else>   - Whispered to the agent as a command");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            let report = roster.tick(TICK_MS);
            println!("Tick {} complete ({} ms).", report.tick, report.now);
        } else if let Some(n) = input.strip_prefix("run ") {
            match n.trim().parse::<u32>() {
                Ok(n) => {
                    for _ in 0..n {
                        roster.tick(TICK_MS);
                    }
                    println!("Now at tick {}.", roster.current_tick());
                }
                Err(_) => println!("Usage: run <number>"),
            }
        } else if let Some(flag) = input.strip_prefix("combat ") {
            facts.in_conflict = flag.trim() == "on";
            roster.observe(agent, facts.clone());
        } else if let Some(hp) = input.strip_prefix("hp ") {
            match hp.trim().parse::<f32>() {
                Ok(hp) => {
                    facts.health = hp;
                    roster.observe(agent, facts.clone());
                }
                Err(_) => println!("Usage: hp <number>"),
            }
        } else if let Some(map) = input.strip_prefix("map ") {
            match map.trim().parse::<u32>() {
                Ok(map) => {
                    facts.position.map = map;
                    facts.open_world = false;
                    roster.observe(agent, facts.clone());
                }
                Err(_) => println!("Usage: map <id>"),
            }
        } else if input == "status" || input == "s" {
            display_status(&roster, agent);
            continue;
        } else {
            roster.submit(agent, input, &issuer, ChatChannel::Whisper);
        }

        for (_, feedback) in roster.drain_feedback() {
            display_feedback(&feedback);
        }
    }

    println!("\nGoodbye! {} ticks elapsed.", roster.current_tick());
    Ok(())
}

fn display_status(roster: &Roster, id: ActorId) {
    let Some(agent) = roster.get(id) else {
        return;
    };
    println!("\n--- {} ---", agent.name());
    for what in ["state", "hp", "position", "strategy", "action", "throttle", "values"] {
        println!("  {:<9} {}", what, agent.debug_response(what));
    }
    println!("  pending   {} command(s)", agent.pending_commands().len());
    println!("  next tick in {} ms", agent.next_check_in());
    println!();
}

fn display_feedback(feedback: &Feedback) {
    match feedback {
        Feedback::Cue { cue } => println!("  *{}*", cue),
        other => match other.text() {
            Some(text) => println!("  [{}] {}", kind(other), text),
            None => println!("  {:?}", other),
        },
    }
}

fn kind(feedback: &Feedback) -> &'static str {
    match feedback {
        Feedback::Cue { .. } => "cue",
        Feedback::Tell { .. } => "tell",
        Feedback::Error { .. } => "error",
        Feedback::Say { .. } => "say",
        Feedback::Introspection { .. } => "debug",
        Feedback::ChatReply { .. } => "reply",
    }
}
