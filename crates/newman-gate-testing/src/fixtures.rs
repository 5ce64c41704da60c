//! Fixtures for synthetic Newman output.
//!
//! Provides builders that render:
//! - CLI logs in the layout `newman run` prints (run section, summary table,
//!   numbered failure blocks)
//! - JSON reporter documents with a `run.failures` array

use serde_json::{Value, json};

#[derive(Debug, Clone)]
enum Outcome {
    Pass,
    Fail { detail: String, scoped: bool },
}

#[derive(Debug, Clone)]
struct Assertion {
    request: String,
    name: String,
    outcome: Outcome,
}

/// Builder for a Newman CLI log.
///
/// # Example
/// ```
/// use newman_gate_testing::NewmanLog;
///
/// let log = NewmanLog::new("Users API")
///     .passing("Get User", "Response time is below 500ms")
///     .failing("Get User", "Status code is 200")
///     .render();
///
/// assert_eq!(log.matches("AssertionError").count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NewmanLog {
    collection: String,
    marker: String,
    assertions: Vec<Assertion>,
    trailer: String,
}

impl NewmanLog {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            marker: "AssertionError".to_string(),
            assertions: Vec::new(),
            trailer: String::new(),
        }
    }

    /// Use a different error-kind token in the failure section.
    pub fn with_marker(mut self, marker: &str) -> Self {
        self.marker = marker.to_string();
        self
    }

    pub fn passing(mut self, request: &str, name: &str) -> Self {
        self.assertions.push(Assertion {
            request: request.to_string(),
            name: name.to_string(),
            outcome: Outcome::Pass,
        });
        self
    }

    pub fn failing(self, request: &str, name: &str) -> Self {
        let detail = if name.to_lowercase().contains("status code") {
            "expected response to have status code 200 but got 500".to_string()
        } else {
            "expected undefined to be a string".to_string()
        };
        self.failing_with_detail(request, name, &detail)
    }

    /// Add the same failure `times` times (e.g. across iterations).
    pub fn failing_times(mut self, request: &str, name: &str, times: usize) -> Self {
        for _ in 0..times {
            self = self.failing(request, name);
        }
        self
    }

    pub fn failing_with_detail(mut self, request: &str, name: &str, detail: &str) -> Self {
        self.assertions.push(Assertion {
            request: request.to_string(),
            name: name.to_string(),
            outcome: Outcome::Fail {
                detail: detail.to_string(),
                scoped: true,
            },
        });
        self
    }

    /// A failure whose block carries no `inside "..."` line.
    pub fn failing_unscoped(mut self, request: &str, name: &str) -> Self {
        self.assertions.push(Assertion {
            request: request.to_string(),
            name: name.to_string(),
            outcome: Outcome::Fail {
                detail: "expected false to be truthy".to_string(),
                scoped: false,
            },
        });
        self
    }

    /// Append raw text after the failure section.
    pub fn with_trailer(mut self, text: &str) -> Self {
        self.trailer.push_str(text);
        self
    }

    pub fn failure_count(&self) -> usize {
        self.assertions
            .iter()
            .filter(|a| matches!(a.outcome, Outcome::Fail { .. }))
            .count()
    }

    pub fn render(&self) -> String {
        let mut out = format!("newman\n\n{}\n", self.collection);

        let mut requests: Vec<&str> = Vec::new();
        for a in &self.assertions {
            if !requests.contains(&a.request.as_str()) {
                requests.push(&a.request);
            }
        }

        let mut failure_no = 0;
        for request in &requests {
            out.push_str(&format!("\n→ {}\n", request));
            out.push_str("  GET https://api.example.test/resource [200 OK, 1.2kB, 45ms]\n");
            for a in self.assertions.iter().filter(|a| a.request == *request) {
                match a.outcome {
                    Outcome::Pass => out.push_str(&format!("  ✓  {}\n", a.name)),
                    Outcome::Fail { .. } => {
                        failure_no += 1;
                        out.push_str(&format!("  {}. {}\n", failure_no, a.name));
                    }
                }
            }
        }

        out.push_str(&self.summary_table(requests.len()));

        let failures: Vec<&Assertion> = requests
            .iter()
            .flat_map(|r| self.assertions.iter().filter(move |a| a.request == *r))
            .filter(|a| matches!(a.outcome, Outcome::Fail { .. }))
            .collect();

        if !failures.is_empty() {
            out.push_str("\n  #  failure         detail\n\n");
            for (i, a) in failures.iter().enumerate() {
                if let Outcome::Fail { detail, scoped } = &a.outcome {
                    out.push_str(&format!(" {}.  {}  {}\n", i + 1, self.marker, a.name));
                    out.push_str(&format!("                     {}\n", detail));
                    out.push_str(&format!(
                        "                     at assertion:{} in test-script\n",
                        i
                    ));
                    if *scoped {
                        out.push_str(&format!("                     inside \"{}\"\n", a.request));
                    }
                    out.push('\n');
                }
            }
        }

        out.push_str(&self.trailer);
        out
    }

    fn summary_table(&self, request_count: usize) -> String {
        let executed = self.assertions.len();
        let failed = self.failure_count();
        format!(
            concat!(
                "\n┌─────────────────────────┬──────────┬──────────┐\n",
                "│                         │ executed │   failed │\n",
                "├─────────────────────────┼──────────┼──────────┤\n",
                "│              iterations │        1 │        0 │\n",
                "│                requests │ {:>8} │        0 │\n",
                "│              assertions │ {:>8} │ {:>8} │\n",
                "└─────────────────────────┴──────────┴──────────┘\n",
            ),
            request_count, executed, failed
        )
    }
}

/// Builder for a Newman JSON reporter document.
#[derive(Debug, Clone, Default)]
pub struct NewmanReportFixture {
    failures: Vec<Value>,
    executed: usize,
}

impl NewmanReportFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, request: &str, test: &str) -> Self {
        self.executed += 1;
        self.failures.push(json!({
            "error": {
                "name": "AssertionError",
                "index": self.failures.len(),
                "test": test,
                "message": "expected response to have status code 200 but got 500"
            },
            "at": "assertion:0 in test-script",
            "source": { "id": format!("req-{}", self.failures.len()), "name": request }
        }));
        self
    }

    pub fn passing(mut self) -> Self {
        self.executed += 1;
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "collection": { "info": { "name": "Fixture API" } },
            "run": {
                "stats": {
                    "assertions": {
                        "total": self.executed,
                        "pending": 0,
                        "failed": self.failures.len()
                    }
                },
                "failures": self.failures
            }
        })
    }

    pub fn render(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_default()
    }
}
