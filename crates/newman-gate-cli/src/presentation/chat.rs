//! Chat-ready failure summary (Slack mrkdwn).

use newman_gate_engine::FailureDigest;

/// Render the digest as short blocks, one per request:
///
/// ```text
/// *Get User* (AssertionError x3)
/// • Status code is 200
/// • Body has name
/// ```
///
/// `source_name` names the log in the empty-run message.
pub fn render_summary(digest: &FailureDigest, marker: &str, source_name: &str) -> String {
    if digest.is_empty() {
        return format!("No {} found in {}", marker, source_name);
    }

    let blocks: Vec<String> = digest
        .entries
        .iter()
        .map(|entry| {
            let mut block = format!(
                "*{}* ({} x{})",
                entry.request_name, marker, entry.total_count
            );
            for sample in &entry.samples {
                block.push_str("\n• ");
                block.push_str(sample);
            }
            block
        })
        .collect();

    let mut text = blocks.join("\n\n");
    if digest.truncated {
        text.push_str(&format!(
            "\n\n…and more (total {}: {})",
            marker, digest.total_failures
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use newman_gate_engine::{FailureExtractor, aggregate};
    use newman_gate_types::ThresholdConfig;

    const LOG: &str = concat!(
        " 1.  AssertionError  Status code is 200\n",
        "     inside \"Get User\"\n",
        " 2.  AssertionError  Body has name\n",
        "     inside \"Get User\"\n",
        " 3.  AssertionError  Body has email\n",
        "     inside \"Get User\"\n",
        " 4.  AssertionError  Status code is 201\n",
        "     inside \"Create Order\"\n",
        " 5.  AssertionError  Has items\n",
    );

    fn digest(top_n: usize) -> FailureDigest {
        let records = FailureExtractor::default().extract(LOG);
        let report = aggregate(&records, &ThresholdConfig::default()).unwrap();
        FailureDigest::build(&report, top_n, 2)
    }

    #[test]
    fn test_summary_blocks() {
        insta::assert_snapshot!(render_summary(&digest(8), "AssertionError", "newman.log"), @r"
        *Get User* (AssertionError x3)
        • Status code is 200
        • Body has name

        *Create Order* (AssertionError x1)
        • Status code is 201

        *(unknown request)* (AssertionError x1)
        • Has items
        ");
    }

    #[test]
    fn test_summary_truncation_notice() {
        let text = render_summary(&digest(1), "AssertionError", "newman.log");
        assert!(text.starts_with("*Get User* (AssertionError x3)"));
        assert!(text.ends_with("…and more (total AssertionError: 5)"));
    }

    #[test]
    fn test_empty_run() {
        let empty = FailureDigest {
            total_failures: 0,
            entries: Vec::new(),
            hidden_requests: 0,
            truncated: false,
        };
        assert_eq!(
            render_summary(&empty, "AssertionError", "newman.log"),
            "No AssertionError found in newman.log"
        );
    }
}
