//! Headless Crowd Simulation
//!
//! Spawns a population of agents across a few maps, runs the roster for a
//! number of ticks with a synthetic host load that grows with the number of
//! active agents, and prints a JSON summary of how the throttle responded.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use standin::agent::{AgentProfile, AgentServices, Role};
use standin::core::config::AgentConfig;
use standin::core::error::Result;
use standin::core::types::{ActorId, Vec2, WorldPosition};
use standin::roster::{Roster, TickReport};
use standin::strategy::TableCatalog;
use standin::world::{GroupInfo, GroupMember, MemberKind, WorldFacts};
use std::path::PathBuf;
use std::sync::Arc;

/// Crowd Simulation - throttle behavior under synthetic load
#[derive(Parser, Debug)]
#[command(name = "crowd_sim")]
#[command(about = "Run many agents against a synthetic host load and report activity")]
struct Args {
    /// Number of agents to spawn
    #[arg(long, default_value_t = 500)]
    agents: usize,

    /// Number of connected humans
    #[arg(long, default_value_t = 5)]
    humans: usize,

    /// Number of maps agents are spread over
    #[arg(long, default_value_t = 4)]
    maps: u32,

    /// Agents per party; 0 disables grouping
    #[arg(long, default_value_t = 5)]
    party_size: usize,

    /// Ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Host clock advance per tick (ms)
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Fixed host update cost (ms)
    #[arg(long, default_value_t = 20)]
    base_load_ms: u32,

    /// Extra host update cost per active agent (microseconds)
    #[arg(long, default_value_t = 150)]
    agent_cost_us: u32,

    /// Agent configuration file
    #[arg(long, default_value = "data/agent.toml")]
    config: PathBuf,

    /// Strategy table
    #[arg(long, default_value = "data/strategies.toml")]
    strategies: PathBuf,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Print a sample every n ticks (0 keeps only the summary)
    #[arg(long, default_value_t = 100)]
    sample_every: u64,
}

/// JSON output structure
#[derive(Serialize)]
struct Summary {
    seed: u64,
    agents: usize,
    humans: usize,
    ticks: u64,
    mean_active_ratio: f64,
    final_active_ratio: f64,
    peak_update_ms: u32,
    final_update_ms: u32,
    samples: Vec<Sample>,
}

#[derive(Serialize)]
struct Sample {
    update_ms: u32,
    #[serde(flatten)]
    report: TickReport,
}

const ROLES: [(&str, Role); 4] = [
    ("warrior", Role::Tank),
    ("priest", Role::Healer),
    ("rogue", Role::MeleeDamage),
    ("mage", Role::RangedDamage),
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = AgentConfig::load(&args.config)?;
    let catalog = TableCatalog::load(&args.strategies)?;
    let mut roster = Roster::new(AgentServices::new(config, Arc::new(catalog)));

    let maps = args.maps.max(1);
    let random_position = |rng: &mut StdRng| {
        let map = rng.gen_range(0..maps);
        WorldPosition::new(
            map,
            rng.gen_range(0..8),
            Vec2::new(rng.gen_range(-2_000.0..2_000.0), rng.gen_range(-2_000.0..2_000.0)),
        )
    };

    let mut spawned = Vec::with_capacity(args.agents);
    for i in 0..args.agents {
        let (class, role) = ROLES[i % ROLES.len()];
        let level = rng.gen_range(1..=80);
        let id = roster.spawn_as(
            ActorId::from_u128(i as u128 + 1),
            format!("Agent_{}", i),
            AgentProfile::new(class, role, level),
        );
        spawned.push((id, random_position(&mut rng)));
    }

    // Parties share their leader's position
    let mut facts: Vec<(ActorId, WorldFacts)> = Vec::with_capacity(spawned.len());
    if args.party_size > 1 {
        for party in spawned.chunks(args.party_size) {
            let anchor = party[0].1;
            let members: Vec<GroupMember> = party
                .iter()
                .map(|(id, _)| {
                    let name = roster.get(*id).map(|a| a.name().to_string()).unwrap_or_default();
                    GroupMember::new(*id, name, MemberKind::Agent, anchor.map)
                })
                .collect();
            let group = GroupInfo::new(party[0].0, members);
            for (id, _) in party {
                facts.push((
                    *id,
                    WorldFacts {
                        position: anchor,
                        open_world: true,
                        group: Some(group.clone()),
                        ..WorldFacts::default()
                    },
                ));
            }
        }
    } else {
        for (id, position) in &spawned {
            facts.push((
                *id,
                WorldFacts {
                    position: *position,
                    ..WorldFacts::default()
                },
            ));
        }
    }
    for (id, facts) in facts {
        roster.observe(id, facts);
    }

    for i in 0..args.humans {
        let position = random_position(&mut rng);
        roster
            .world_mut()
            .add_human(ActorId::from_u128(u128::MAX - i as u128), format!("Human_{}", i), position);
    }

    tracing::info!(agents = args.agents, humans = args.humans, seed, "Simulation starting");

    let mut samples = Vec::new();
    let mut active_sum = 0.0;
    let mut update_ms = args.base_load_ms;
    let mut peak_update_ms = 0;
    let mut last = TickReport::default();

    for _ in 0..args.ticks {
        let report = roster.tick_with_update_time(args.tick_ms, update_ms);
        active_sum += report.active_ratio();
        peak_update_ms = peak_update_ms.max(update_ms);

        if args.sample_every > 0 && report.tick % args.sample_every == 0 {
            samples.push(Sample {
                update_ms,
                report: report.clone(),
            });
        }

        let agent_load_us = report.active as u64 * args.agent_cost_us as u64;
        update_ms = args.base_load_ms + (agent_load_us / 1_000) as u32;
        roster.drain_feedback();
        last = report;
    }

    let summary = Summary {
        seed,
        agents: args.agents,
        humans: args.humans,
        ticks: args.ticks,
        mean_active_ratio: if args.ticks == 0 {
            0.0
        } else {
            active_sum / args.ticks as f64
        },
        final_active_ratio: last.active_ratio(),
        peak_update_ms,
        final_update_ms: update_ms,
        samples,
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
