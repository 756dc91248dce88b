use crate::core::models::{BundlerConfig, TransformRule};
use crate::utils::{KilnError, Logger, Result};
use regex::Regex;
use std::path::Path;

struct CompiledRule<'a> {
    rule: &'a TransformRule,
    test: Regex,
    exclude: Option<Regex>,
}

/// Transform rules with their patterns compiled, evaluated in list order
pub struct RuleSet<'a> {
    rules: Vec<CompiledRule<'a>>,
}

impl<'a> RuleSet<'a> {
    pub fn compile(rules: &'a [TransformRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| -> Result<CompiledRule<'a>> {
                let test = Regex::new(&rule.test).map_err(|e| KilnError::pattern(&rule.test, e))?;
                let exclude = rule
                    .exclude
                    .as_deref()
                    .map(|pattern| Regex::new(pattern).map_err(|e| KilnError::pattern(pattern, e)))
                    .transpose()?;
                Ok(CompiledRule { rule, test, exclude })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn from_config(config: &'a BundlerConfig) -> Result<Self> {
        Self::compile(&config.module.rules)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule whose test matches and whose exclude does not
    pub fn match_path(&self, path: &Path) -> Option<&'a TransformRule> {
        self.match_index(path).map(|index| self.rules[index].rule)
    }

    pub fn match_index(&self, path: &Path) -> Option<usize> {
        let normalized = normalize(path);

        let index = self.rules.iter().position(|compiled| {
            compiled.test.is_match(&normalized)
                && !compiled
                    .exclude
                    .as_ref()
                    .is_some_and(|exclude| exclude.is_match(&normalized))
        });

        if index.is_none() {
            Logger::debug(&format!("No transform rule for {}", normalized));
        }
        index
    }
}

// Patterns are written against forward slashes
pub(crate) fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
