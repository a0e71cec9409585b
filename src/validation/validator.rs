use crate::output::schema::RegistryItem;
use crate::validation::rules::{
    BlockTargetsRule, NonEmptyFilesRule, PageTargetRule, RequiredFieldsRule, ValidFilePathsRule,
    ValidNameRule, ValidationRule,
};
use anyhow::Result;

pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn ValidationRule>>) -> Self {
        Self { rules }
    }

    /// Fails on the first broken rule, naming it in the error
    pub fn validate(&self, item: &RegistryItem) -> Result<()> {
        for rule in &self.rules {
            if let Err(e) = rule.validate(item) {
                anyhow::bail!("[{}] {}", rule.name(), e);
            }
        }
        Ok(())
    }

    /// Every broken rule, for reporting
    pub fn violations(&self, item: &RegistryItem) -> Vec<String> {
        self.rules
            .iter()
            .filter_map(|rule| {
                rule.validate(item)
                    .err()
                    .map(|e| format!("[{}] {}", rule.name(), e))
            })
            .collect()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(RequiredFieldsRule),
                Box::new(ValidNameRule),
                Box::new(NonEmptyFilesRule),
                Box::new(ValidFilePathsRule),
                Box::new(PageTargetRule),
                Box::new(BlockTargetsRule),
            ],
        }
    }
}
