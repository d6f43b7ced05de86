//! Standin - decision engine for autonomous stand-in agents

pub mod action;
pub mod agent;
pub mod command;
pub mod core;
pub mod events;
pub mod roster;
pub mod strategy;
pub mod throttle;
pub mod world;
