use tracing::debug;

/// Outcome of resolving one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    /// Set by `clear`; the transcript is reset instead of appended to.
    pub reset_session: bool,
}

impl Resolution {
    fn output(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reset_session: false,
        }
    }

    fn reset() -> Self {
        Self {
            text: String::new(),
            reset_session: true,
        }
    }
}

/// Canned responses, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Function,
    Component,
    Api,
    Class,
    Help,
    Clear,
    Server,
    Fallback,
}

enum Trigger {
    /// Any of the phrases appears somewhere in the lowercased command.
    Contains(&'static [&'static str]),
    /// The trimmed, lowercased command is exactly this word.
    Exactly(&'static str),
}

impl Trigger {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Trigger::Contains(phrases) => phrases.iter().any(|&phrase| lowered.contains(phrase)),
            Trigger::Exactly(word) => lowered.trim() == *word,
        }
    }
}

// First match wins. A command mentioning both "component" and "api" gets the
// component snippet because that rule sits higher up, regardless of which
// phrase is more specific.
const RULES: &[(Rule, Trigger)] = &[
    (Rule::Function, Trigger::Contains(&["function", "create a function"])),
    (Rule::Component, Trigger::Contains(&["react component", "component"])),
    (Rule::Api, Trigger::Contains(&["api", "endpoint"])),
    (Rule::Class, Trigger::Contains(&["class", "create a class"])),
    (Rule::Help, Trigger::Contains(&["help"])),
    (Rule::Clear, Trigger::Exactly("clear")),
    (Rule::Server, Trigger::Contains(&["express", "server"])),
];

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Function => "function",
            Rule::Component => "component",
            Rule::Api => "api",
            Rule::Class => "class",
            Rule::Help => "help",
            Rule::Clear => "clear",
            Rule::Server => "server",
            Rule::Fallback => "fallback",
        }
    }

    fn render(self, command: &str) -> Resolution {
        match self {
            Rule::Function => Resolution::output(FUNCTION_SNIPPET),
            Rule::Component => Resolution::output(COMPONENT_SNIPPET),
            Rule::Api => Resolution::output(HANDLER_SNIPPET),
            Rule::Class => Resolution::output(CLASS_SNIPPET),
            Rule::Help => Resolution::output(HELP_TEXT),
            Rule::Clear => Resolution::reset(),
            Rule::Server => Resolution::output(SERVER_SNIPPET),
            Rule::Fallback => Resolution::output(fallback_snippet(command)),
        }
    }
}

/// Find the rule a command falls under without rendering its response.
pub fn rule_for(command: &str) -> Rule {
    let lowered = command.to_lowercase();
    RULES
        .iter()
        .find(|(_, trigger)| trigger.matches(&lowered))
        .map(|(rule, _)| *rule)
        .unwrap_or(Rule::Fallback)
}

/// Map free text to its canned response. Never fails, whatever the input.
pub fn resolve(command: &str) -> Resolution {
    let rule = rule_for(command);
    debug!(rule = rule.name(), "resolved command");
    rule.render(command)
}

fn fallback_snippet(command: &str) -> String {
    format!(
        "// AI-generated code for: {command}

function solution() {{
  // Implementation based on your request
  const result = {{
    status: 'success',
    data: []
  }};

  return result;
}}

// Export for use
module.exports = solution;"
    )
}

const FUNCTION_SNIPPET: &str = r#"// Generated function
function processData(input) {
  const result = input.map(item => item * 2);
  return result.filter(val => val > 0);
}

module.exports = processData;"#;

const COMPONENT_SNIPPET: &str = r#"import React from 'react';

export default function CustomComponent({ title, data }) {
  return (
    <div className="container">
      <h1>{title}</h1>
      <ul>
        {data.map((item, idx) => (
          <li key={idx}>{item}</li>
        ))}
      </ul>
    </div>
  );
}"#;

const HANDLER_SNIPPET: &str = r#"export default async function handler(req, res) {
  if (req.method === 'POST') {
    const { data } = req.body;

    try {
      const result = await processData(data);
      res.status(200).json({ success: true, result });
    } catch (error) {
      res.status(500).json({ error: error.message });
    }
  } else {
    res.status(405).json({ error: 'Method not allowed' });
  }
}"#;

const CLASS_SNIPPET: &str = r#"class DataProcessor {
  constructor(config) {
    this.config = config;
    this.data = [];
  }

  addData(item) {
    this.data.push(item);
  }

  process() {
    return this.data.map(item =>
      this.config.transform(item)
    );
  }

  reset() {
    this.data = [];
  }
}

module.exports = DataProcessor;"#;

const HELP_TEXT: &str = r#"Available commands:
- "create a function" - Generate a JavaScript function
- "react component" - Generate a React component
- "api endpoint" - Generate an API handler
- "create a class" - Generate a JavaScript class
- "express server" - Generate an Express.js server
- "clear" - Clear terminal
- "help" - Show this help message"#;

const SERVER_SNIPPET: &str = r#"const express = require('express');
const app = express();
const port = process.env.PORT || 3000;

app.use(express.json());

app.get('/', (req, res) => {
  res.json({ message: 'Server running' });
});

app.post('/api/data', (req, res) => {
  const { data } = req.body;
  res.json({ received: data, timestamp: Date.now() });
});

app.listen(port, () => {
  console.log(`Server listening on port ${port}`);
});"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_requests_get_the_function_snippet() {
        let resolution = resolve("please write a function that doubles values");
        assert_eq!(rule_for("please write a function that doubles values"), Rule::Function);
        assert!(resolution.text.starts_with("// Generated function"));
        assert!(!resolution.reset_session);
    }

    #[test]
    fn component_requests_get_the_component_snippet() {
        assert_eq!(rule_for("build a react component for a list"), Rule::Component);
        assert!(resolve("Build a React Component for a list")
            .text
            .contains("CustomComponent"));
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(rule_for("API ENDPOINT please"), Rule::Api);
        assert_eq!(rule_for("Create A Class"), Rule::Class);
        assert_eq!(rule_for("EXPRESS app"), Rule::Server);
        assert_eq!(rule_for("HeLp"), Rule::Help);
    }

    #[test]
    fn earlier_rules_win_ties() {
        // "component" is tried before "api"
        assert_eq!(rule_for("an api component"), Rule::Component);
        // "function" before everything else
        assert_eq!(rule_for("a server function for my api class"), Rule::Function);
        // "capital" contains "api", so the handler rule fires before "server"
        assert_eq!(rule_for("capital server"), Rule::Api);
        // "help" before the server rule
        assert_eq!(rule_for("help me with a server"), Rule::Help);
    }

    #[test]
    fn clear_resets_regardless_of_case_and_padding() {
        for input in ["clear", "CLEAR", "  Clear \t", "\nclear\n"] {
            let resolution = resolve(input);
            assert!(resolution.reset_session, "{input:?} should reset");
            assert!(resolution.text.is_empty());
        }
    }

    #[test]
    fn clear_must_be_the_whole_command() {
        assert_eq!(rule_for("clear the screen"), Rule::Fallback);
        assert!(!resolve("clear the screen").reset_session);
    }

    #[test]
    fn help_lists_every_command() {
        let text = resolve("help").text;
        for command in ["create a function", "react component", "api endpoint", "clear"] {
            assert!(text.contains(command), "help is missing {command}");
        }
    }

    #[test]
    fn unmatched_input_echoes_the_command() {
        let resolution = resolve("totally unrelated gibberish");
        assert_eq!(rule_for("totally unrelated gibberish"), Rule::Fallback);
        assert!(resolution
            .text
            .starts_with("// AI-generated code for: totally unrelated gibberish"));
        assert!(resolution.text.contains("gibberish"));
        assert!(!resolution.reset_session);
    }

    #[test]
    fn fallback_keeps_the_original_casing() {
        let resolution = resolve("Sort My Numbers");
        assert!(resolution.text.contains("Sort My Numbers"));
    }

    #[test]
    fn any_input_resolves() {
        for input in ["", " ", "ß", "🚀 launch", "a\u{0}b", "x".repeat(10_000).as_str()] {
            let resolution = resolve(input);
            assert!(resolution.reset_session || !resolution.text.is_empty());
        }
    }
}
