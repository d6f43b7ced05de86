//! Command text grammar
//!
//! Commands are short free-text lines. The grammar only recognizes the
//! handful of prefixes the agent acts on directly; everything else is a
//! plain command resolved against the strategies.

use crate::command::ChatChannel;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{all_consuming, map, rest, value};
use nom::sequence::preceded;
use nom::{IResult, Parser};

/// Marker prepended by chat addons that relay commands
pub fn transport_prefix(input: &str) -> IResult<&str, &str> {
    tag("BOT\t").parse(input)
}

/// Leading `#w `, `#p `, `#r `, `#a ` or `#g ` choosing where replies go
pub fn reply_channel_marker(input: &str) -> IResult<&str, ChatChannel> {
    alt((
        value(ChatChannel::Whisper, tag("#w ")),
        value(ChatChannel::Party, tag("#p ")),
        value(ChatChannel::Raid, tag("#r ")),
        value(ChatChannel::Addon, tag("#a ")),
        value(ChatChannel::Guild, tag("#g ")),
    ))
    .parse(input)
}

/// What a filtered command line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// Immediate introspection
    Debug(&'a str),
    /// Run one named action across every engine
    Do(&'a str),
    /// Queue with a per-member stagger
    Queue(&'a str),
    Reset,
    Logout,
    LogoutCancel,
    Plain(&'a str),
}

fn parse_directive(input: &str) -> IResult<&str, Directive<'_>> {
    alt((
        map(preceded(tag("debug "), rest), Directive::Debug),
        map(preceded(alt((tag("do "), tag("d "))), rest), Directive::Do),
        map(preceded(tag("queue "), rest), Directive::Queue),
        value(Directive::LogoutCancel, all_consuming(tag("logout cancel"))),
        value(Directive::Logout, all_consuming(tag("logout"))),
        value(Directive::Reset, all_consuming(tag("reset"))),
    ))
    .parse(input)
}

pub fn directive(input: &str) -> Directive<'_> {
    match parse_directive(input) {
        Ok((_, directive)) => directive,
        Err(_) => Directive::Plain(input),
    }
}

/// Split `text` on `separator`, dropping blank pieces
///
/// An empty separator leaves the text whole.
pub fn split_commands<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        let text = text.trim();
        return if text.is_empty() { Vec::new() } else { vec![text] };
    }
    text.split(separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Action name / qualifier pairs to try for a plain command
///
/// The whole text comes first with no qualifier, then ever shorter
/// leading words with the remainder as qualifier: `"cast fire ball"`
/// yields `cast fire ball`, `cast fire` + `ball`, `cast` + `fire ball`.
pub fn action_candidates(text: &str) -> Vec<(&str, Option<&str>)> {
    let text = text.trim();
    let mut candidates = vec![(text, None)];
    let mut end = text.len();
    while let Some(split) = text[..end].rfind(' ') {
        if split == 0 {
            break;
        }
        let name = text[..split].trim_end();
        let qualifier = text[split + 1..].trim_start();
        if !name.is_empty() {
            candidates.push((name, Some(qualifier)));
        }
        end = split;
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_prefix() {
        assert_eq!(transport_prefix("BOT\tfollow"), Ok(("follow", "BOT\t")));
        assert!(transport_prefix("follow").is_err());
    }

    #[test]
    fn test_reply_channel_marker() {
        assert_eq!(reply_channel_marker("#p stats"), Ok(("stats", ChatChannel::Party)));
        assert_eq!(reply_channel_marker("#g who"), Ok(("who", ChatChannel::Guild)));
        assert!(reply_channel_marker("#x stats").is_err());
        assert!(reply_channel_marker("#pstats").is_err());
    }

    #[test]
    fn test_directives() {
        assert_eq!(directive("debug state"), Directive::Debug("state"));
        assert_eq!(directive("do attack"), Directive::Do("attack"));
        assert_eq!(directive("d attack"), Directive::Do("attack"));
        assert_eq!(directive("queue follow"), Directive::Queue("follow"));
        assert_eq!(directive("reset"), Directive::Reset);
        assert_eq!(directive("logout"), Directive::Logout);
        assert_eq!(directive("logout cancel"), Directive::LogoutCancel);
        assert_eq!(directive("resetting"), Directive::Plain("resetting"));
        assert_eq!(directive("logout now"), Directive::Plain("logout now"));
        assert_eq!(directive("follow"), Directive::Plain("follow"));
    }

    #[test]
    fn test_split_commands() {
        assert_eq!(split_commands("a\\\\b", "\\\\"), vec!["a", "b"]);
        assert_eq!(split_commands("follow", "\\\\"), vec!["follow"]);
        assert_eq!(split_commands("a\\\\\\\\b", "\\\\"), vec!["a", "b"]);
        assert_eq!(split_commands(" follow ", ""), vec!["follow"]);
    }

    #[test]
    fn test_action_candidates_shrink_from_the_right() {
        assert_eq!(
            action_candidates("cast fire ball"),
            vec![
                ("cast fire ball", None),
                ("cast fire", Some("ball")),
                ("cast", Some("fire ball")),
            ]
        );
        assert_eq!(action_candidates("follow"), vec![("follow", None)]);
    }
}
