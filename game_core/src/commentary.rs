//! Announcer commentary: request prompt and the canned lines used when the
//! commentary service fails or has nothing to say.

use crate::{MatchResult, Outcome};

/// Shown on the result screen until the reply arrives
pub const PLACEHOLDER: &str = "Analyzing match data...";

/// Line used when the commentary request fails
pub fn fallback_line(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Victory => "A glorious victory!",
        Outcome::Defeat => "Defeat is just a lesson.",
    }
}

/// Line used when the service answers with nothing
pub fn empty_reply_line(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Victory => "Outstanding performance!",
        Outcome::Defeat => "Get up and fight again!",
    }
}

/// Turn a raw reply into the line to display
pub fn settle_reply(reply: &str, outcome: Outcome) -> String {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        empty_reply_line(outcome).to_string()
    } else {
        trimmed.to_string()
    }
}

/// Prompt for the announcer model
pub fn announcer_prompt(result: &MatchResult) -> String {
    let outcome = match result.outcome() {
        Outcome::Victory => "PLAYER VICTORY",
        Outcome::Defeat => "PLAYER DEFEAT",
    };
    format!(
        "You are a fired-up fighting game announcer calling the end of a match.\n\
         Outcome: {outcome}\n\
         Time: {time} seconds\n\
         Damage dealt: {damage}\n\
         Health remaining: {health}%\n\
         Max combo: {combo}x\n\
         Reply with one short, hype sentence about this performance. \
         Praise the technique after a victory; after a defeat, tell them to get back up.",
        time = result.time_elapsed(),
        damage = result.damage_dealt(),
        health = result.final_health(),
        combo = result.max_combo(),
    )
}
