//! Addressing tags: `@tank follow`, `@mage stay`, `@10-20 reset`
//!
//! A filter either strips a tag it understands and that matches the agent,
//! rejects the line when the tag names someone else, or passes it through
//! untouched.

use crate::agent::{AgentProfile, Role};
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{all_consuming, map_res, opt};
use nom::sequence::{preceded, terminated};
use nom::{IResult, Parser};

pub trait ContentFilter {
    /// `None` when the text is addressed to someone else
    fn filter<'a>(&self, text: &'a str, profile: &AgentProfile) -> Option<&'a str>;
}

/// Leading `@word ` tag and the remaining text
fn address_tag(input: &str) -> IResult<&str, &str> {
    terminated(
        preceded(tag("@"), take_while1(|c: char| !c.is_whitespace())),
        multispace0,
    )
    .parse(input)
}

fn split_tag(text: &str) -> Option<(&str, &str)> {
    address_tag(text).ok().map(|(remaining, word)| (word, remaining))
}

pub struct RoleFilter;

impl ContentFilter for RoleFilter {
    fn filter<'a>(&self, text: &'a str, profile: &AgentProfile) -> Option<&'a str> {
        let Some((word, remaining)) = split_tag(text) else {
            return Some(text);
        };
        let matches = match word.to_ascii_lowercase().as_str() {
            "tank" => profile.role == Role::Tank,
            "heal" | "healer" => profile.role == Role::Healer,
            "dps" => profile.role.is_damage(),
            "melee" => profile.role == Role::MeleeDamage,
            "ranged" => profile.role == Role::RangedDamage,
            _ => return Some(text),
        };
        matches.then_some(remaining)
    }
}

pub struct ClassFilter;

impl ClassFilter {
    const CLASSES: [&'static str; 10] = [
        "warrior",
        "paladin",
        "hunter",
        "rogue",
        "priest",
        "shaman",
        "mage",
        "warlock",
        "druid",
        "deathknight",
    ];
}

impl ContentFilter for ClassFilter {
    fn filter<'a>(&self, text: &'a str, profile: &AgentProfile) -> Option<&'a str> {
        let Some((word, remaining)) = split_tag(text) else {
            return Some(text);
        };
        let word = word.to_ascii_lowercase();
        if !Self::CLASSES.contains(&word.as_str()) {
            return Some(text);
        }
        profile.class.eq_ignore_ascii_case(&word).then_some(remaining)
    }
}

/// `@60` or `@10-20`
pub struct LevelFilter;

fn level_range(input: &str) -> IResult<&str, (u32, Option<u32>)> {
    all_consuming((
        map_res(digit1, str::parse::<u32>),
        opt(preceded(char('-'), map_res(digit1, str::parse::<u32>))),
    ))
    .parse(input)
}

impl ContentFilter for LevelFilter {
    fn filter<'a>(&self, text: &'a str, profile: &AgentProfile) -> Option<&'a str> {
        let Some((word, remaining)) = split_tag(text) else {
            return Some(text);
        };
        let Ok((_, (low, high))) = level_range(word) else {
            return Some(text);
        };
        let high = high.unwrap_or(low);
        (low..=high).contains(&profile.level).then_some(remaining)
    }
}

/// Runs each filter in turn until one rejects the line
pub struct CompositeFilter {
    filters: Vec<Box<dyn ContentFilter + Send + Sync>>,
}

impl CompositeFilter {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn standard() -> Self {
        let mut composite = Self::new();
        composite.push(RoleFilter);
        composite.push(ClassFilter);
        composite.push(LevelFilter);
        composite
    }

    pub fn push(&mut self, filter: impl ContentFilter + Send + Sync + 'static) {
        self.filters.push(Box::new(filter));
    }
}

impl Default for CompositeFilter {
    fn default() -> Self {
        Self::standard()
    }
}

impl ContentFilter for CompositeFilter {
    fn filter<'a>(&self, text: &'a str, profile: &AgentProfile) -> Option<&'a str> {
        let mut current = text;
        for filter in &self.filters {
            current = filter.filter(current, profile)?;
        }
        Some(current)
    }
}
