//! Canned-response helper for the dashboard's floating assistant.
//!
//! A plain keyword lookup over a static table with a default fallback.
//! There is deliberately no dialogue state, learning, or external model
//! call; the first matching keyword wins.

use std::sync::LazyLock;

/// Opening message shown when the assistant panel is first opened.
pub const GREETING: &str = "Hello! I'm your pipeline monitoring assistant. \
    I can help explain KPIs, graphs, threshold breaches, and safety insights. \
    How can I help you today?";

/// Reply used when no keyword matches.
pub const FALLBACK: &str = "I can provide insights on pressure, temperature, \
    corrosion metrics, and threshold management. Ask me about any KPI or \
    safety concern!";

struct TopicEntry {
    keywords: &'static [&'static str],
    response: &'static str,
}

static TOPICS: LazyLock<Vec<TopicEntry>> = LazyLock::new(|| {
    vec![
        TopicEntry {
            keywords: &["pressure"],
            response: "Max Pressure (psi) indicates the maximum operating \
                pressure in the pipe. Values above 1400 psi trigger warnings. \
                Current reading shows elevated pressure requiring monitoring.",
        },
        TopicEntry {
            keywords: &["temperature", "temp"],
            response: "Temperature monitoring is critical for pipe integrity. \
                High temperatures can accelerate corrosion. The system alerts \
                when temperature exceeds 80°C.",
        },
        TopicEntry {
            keywords: &["corrosion"],
            response: "Corrosion Impact measures the percentage of material \
                degradation. It's calculated based on thickness loss and \
                material properties. Values above 14% require immediate \
                attention.",
        },
        TopicEntry {
            keywords: &["threshold", "alert"],
            response: "Thresholds are safety limits for each metric. When \
                exceeded, the system sends alerts to designated recipients \
                and logs the event for compliance.",
        },
    ]
});

/// Look up the canned response for a user message.
///
/// Matching is case-insensitive keyword containment, in table order;
/// unmatched input gets [`FALLBACK`].
pub fn respond(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    TOPICS
        .iter()
        .find(|entry| entry.keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|entry| entry.response)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_case_insensitive() {
        assert!(respond("Why is the PRESSURE so high?").contains("Max Pressure"));
        assert!(respond("current temp?").contains("Temperature monitoring"));
        assert!(respond("corrosion impact").contains("Corrosion Impact"));
    }

    #[test]
    fn threshold_and_alert_share_a_topic() {
        let a = respond("how do thresholds work");
        let b = respond("why did I get an alert");
        assert_eq!(a, b);
        assert!(a.contains("safety limits"));
    }

    #[test]
    fn unmatched_input_gets_fallback() {
        assert_eq!(respond("tell me a joke"), FALLBACK);
        assert_eq!(respond(""), FALLBACK);
    }

    #[test]
    fn first_matching_topic_wins() {
        // "pressure" is listed before "threshold"
        assert!(respond("pressure threshold").contains("Max Pressure"));
    }
}
