//! Keyword reply table
//!
//! The mock supervisors answer from an ordered table of `(predicate, response)`
//! rows. Rows are evaluated top to bottom and the first one that holds wins,
//! so a message mentioning both "help" and "thanks" gets the help reply.

use serde::Serialize;

/// Messages shorter than this (in characters, after trimming) get the
/// too-short reply unless a keyword row matched first.
pub const MIN_DETAILED_LENGTH: usize = 10;

/// Reply category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Hello and friends
    Greeting,
    /// Asking what the assistant can do
    Help,
    /// Radio coverage questions
    Coverage,
    /// Capacity and traffic questions
    Capacity,
    /// Frequency and spectrum planning
    Frequency,
    /// 5G and later generations
    NextGen,
    /// KPI and parameter optimization
    Optimization,
    /// Site and antenna planning
    Site,
    /// Vendor/product mentions
    Brand,
    /// Thanks
    Thanks,
    /// Too short to say anything useful
    TooShort,
    /// Nothing matched: echo the input back
    Echo,
}

/// Condition for a row to fire
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// Lowercased message contains any of the keywords
    ContainsAny(&'static [&'static str]),
    /// Trimmed message has fewer characters than this
    ShorterThan(usize),
    /// Always holds
    Always,
}

impl Predicate {
    /// Evaluate against the raw message
    pub fn holds(&self, message: &str) -> bool {
        match self {
            Predicate::ContainsAny(keywords) => {
                let lower = message.to_lowercase();
                keywords.iter().any(|keyword| lower.contains(keyword))
            }
            Predicate::ShorterThan(limit) => message.trim().chars().count() < *limit,
            Predicate::Always => true,
        }
    }
}

/// One row of the table
#[derive(Debug, Clone, Copy)]
pub struct ReplyRule {
    /// Category the row answers for
    pub category: Category,
    /// When the row fires
    pub predicate: Predicate,
    /// Canned reply; `None` echoes the input
    pub response: Option<&'static str>,
}

const fn rule(category: Category, predicate: Predicate, response: &'static str) -> ReplyRule {
    ReplyRule {
        category,
        predicate,
        response: Some(response),
    }
}

/// The reply table, in evaluation order.
pub static REPLY_RULES: [ReplyRule; 12] = [
    rule(
        Category::Greeting,
        Predicate::ContainsAny(&["hello", "hey", "greetings", "good morning", "good afternoon", "good evening"]),
        "Hello! I'm your network planning assistant. I can help with coverage analysis, capacity planning, frequency planning, 5G rollout and site optimization. What would you like to work on?",
    ),
    rule(
        Category::Help,
        Predicate::ContainsAny(&["help", "assist", "support", "what can you do"]),
        "I can help you with coverage analysis and dead-zone detection, capacity planning and traffic forecasting, frequency and spectrum planning, 5G network design, KPI optimization and site selection. Tell me which area you need and share any details you have.",
    ),
    rule(
        Category::Coverage,
        Predicate::ContainsAny(&["coverage", "signal", "dead zone", "rsrp"]),
        "For coverage analysis I start from the current signal strength maps (RSRP/RSRQ), find weak or dead zones, then model improvements: antenna tilt and azimuth changes, power adjustments or new small cells. Which area should we analyse?",
    ),
    rule(
        Category::Capacity,
        Predicate::ContainsAny(&["capacity", "traffic", "congestion", "throughput", "load"]),
        "Capacity planning starts with the traffic profile: busy-hour load, PRB utilisation and subscriber growth. From there we choose between carrier additions, cell splitting or offloading to small cells. Do you have recent utilisation figures?",
    ),
    rule(
        Category::Frequency,
        Predicate::ContainsAny(&["frequency", "spectrum", "interference", "channel", "band"]),
        "Frequency planning covers band selection, channel allocation and interference management. I review the current reuse pattern, check co-channel and adjacent-channel interference, then propose a plan that balances coverage and capacity. Which bands are available to you?",
    ),
    rule(
        Category::NextGen,
        Predicate::ContainsAny(&["5g", "6g", "next generation", "next-gen", "mmwave"]),
        "For a 5G rollout the key decisions are spectrum (sub-6 GHz or mmWave), NSA or SA architecture, site densification and transport capacity. Share the target area and services and I will outline a phased deployment plan.",
    ),
    rule(
        Category::Optimization,
        Predicate::ContainsAny(&["optimiz", "optimis", "kpi", "tuning", "improve"]),
        "Optimization runs as a loop: collect KPIs (drop rate, throughput, latency), find the worst cells, tune handover thresholds, tilt and power, then verify. Which KPIs concern you most?",
    ),
    rule(
        Category::Site,
        Predicate::ContainsAny(&["site", "tower", "antenna", "base station"]),
        "Site planning weighs coverage objectives, capacity demand, acquisition constraints and transmission availability. I can compare candidate locations, antenna heights and sector configurations. Do you have candidate sites in mind?",
    ),
    rule(
        Category::Brand,
        Predicate::ContainsAny(&["huawei", "imaster"]),
        "Huawei equipment managed by iMaster NCE is reachable through the NBI Agent. It translates node names and TP locations to UUIDs and hands them to the Plan Agent, which creates services such as OCh paths.",
    ),
    rule(
        Category::Thanks,
        Predicate::ContainsAny(&["thank", "appreciate"]),
        "You're welcome! Let me know if there's anything else I can help with in your network planning.",
    ),
    rule(
        Category::TooShort,
        Predicate::ShorterThan(MIN_DETAILED_LENGTH),
        "Could you give me a bit more detail? A short description of the network area, the problem or the goal helps me give a useful answer.",
    ),
    ReplyRule {
        category: Category::Echo,
        predicate: Predicate::Always,
        response: None,
    },
];

fn first_rule(message: &str) -> &'static ReplyRule {
    REPLY_RULES
        .iter()
        .find(|rule| rule.predicate.holds(message))
        .unwrap_or(&REPLY_RULES[REPLY_RULES.len() - 1])
}

/// Category of the reply a message gets
pub fn classify(message: &str) -> Category {
    first_rule(message).category
}

/// Reply text for a message
pub fn reply_for(message: &str) -> String {
    match first_rule(message).response {
        Some(response) => response.to_string(),
        None => format!(
            "Thank you for your message: '{}'. This is a mock response from the AI agent. In the real implementation, this will come from your LLM supervisor.",
            message
        ),
    }
}
