//! Oracle instruction rendering.

use anyhow::Result;
use minijinja::{Environment, context};

const GENERATOR_TEMPLATE: &str = include_str!("prompts/generator.md");
const CRITIC_TEMPLATE: &str = include_str!("prompts/critic.md");
const SUMMARIZER_TEMPLATE: &str = include_str!("prompts/summarizer.md");

/// Template engine wrapper around minijinja.
///
/// The templates are the system instructions for the three oracle-backed
/// stages; per-request content travels separately in the oracle request.
pub struct PromptEngine {
    env: Environment<'static>,
    binary: String,
}

impl PromptEngine {
    pub fn new(binary: impl Into<String>) -> Self {
        let mut env = Environment::new();
        env.add_template("generator", GENERATOR_TEMPLATE)
            .expect("generator template should be valid");
        env.add_template("critic", CRITIC_TEMPLATE)
            .expect("critic template should be valid");
        env.add_template("summarizer", SUMMARIZER_TEMPLATE)
            .expect("summarizer template should be valid");
        Self {
            env,
            binary: binary.into(),
        }
    }

    pub fn generator_system(&self) -> Result<String> {
        let template = self.env.get_template("generator")?;
        Ok(template.render(context! { binary => self.binary })?)
    }

    pub fn critic_system(&self, rules: &str) -> Result<String> {
        let template = self.env.get_template("critic")?;
        Ok(template.render(context! { binary => self.binary, rules => rules.trim() })?)
    }

    pub fn summarizer_system(&self) -> Result<String> {
        let template = self.env.get_template("summarizer")?;
        Ok(template.render(context! { binary => self.binary })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_names_the_binary() {
        let engine = PromptEngine::new("kubectl");
        let system = engine.generator_system().expect("render");
        assert!(system.contains("`kubectl`"));
        assert!(system.contains("ONLY the command"));
    }

    #[test]
    fn critic_embeds_rules_verbatim() {
        let engine = PromptEngine::new("kubectl");
        let system = engine
            .critic_system("1. No deletes.\n2. Read-only verbs only.")
            .expect("render");
        assert!(system.contains("1. No deletes."));
        assert!(system.contains("\"decision\""));
        assert!(system.contains("\"reason\""));
    }

    #[test]
    fn summarizer_asks_for_a_digest() {
        let engine = PromptEngine::new("kubectl");
        let system = engine.summarizer_system().expect("render");
        assert!(system.contains("summarize"));
    }
}
