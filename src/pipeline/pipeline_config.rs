use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::{CleanerError, Result};

/// Configuration for a complete cleaning pipeline execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub steps: Vec<StepConfig>,
}

/// Configuration for individual cleaning steps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepConfig {
    Dedup,
    Standardize {
        case_insensitive_prefixes: Option<bool>,
    },
    NullNormalize {
        null_tokens: Option<Vec<String>>,
    },
    Backfill {
        require_location: Option<bool>,
    },
    Prune,
}

impl PipelineConfig {
    /// Create the default full cleaning pipeline configuration
    pub fn default_full_pipeline() -> Self {
        Self {
            name: "full_clean".to_string(),
            description: "Complete layoffs cleaning pipeline from raw rows to snapshot"
                .to_string(),
            steps: vec![
                StepConfig::Dedup,
                StepConfig::Standardize {
                    case_insensitive_prefixes: None,
                },
                StepConfig::NullNormalize { null_tokens: None },
                StepConfig::Backfill {
                    require_location: None,
                },
                StepConfig::Prune,
            ],
        }
    }

    /// Load the pipeline configuration from `config.toml` in the working
    /// directory.
    pub fn load() -> Result<Self> {
        Self::from_path("config.toml")
    }

    /// Load a pipeline configuration from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CleanerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the pipeline configuration
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(CleanerError::Config(
                "Pipeline must have at least one step".to_string(),
            ));
        }

        // Check for dependency violations
        let mut seen_steps = HashSet::new();

        for step in &self.steps {
            let step_name = step.step_name();
            for dep in step.dependencies() {
                if !seen_steps.contains(dep) {
                    return Err(CleanerError::Config(format!(
                        "Step '{}' depends on '{}' which does not appear earlier in the pipeline",
                        step_name, dep
                    )));
                }
            }
            seen_steps.insert(step_name);
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::default_full_pipeline()
    }
}

impl StepConfig {
    /// Get the step name for dependency checking
    pub fn step_name(&self) -> &'static str {
        match self {
            StepConfig::Dedup => "dedup",
            StepConfig::Standardize { .. } => "standardize",
            StepConfig::NullNormalize { .. } => "null_normalize",
            StepConfig::Backfill { .. } => "backfill",
            StepConfig::Prune => "prune",
        }
    }

    /// Get the dependencies for this step
    pub fn dependencies(&self) -> Vec<&'static str> {
        match self {
            StepConfig::Dedup => vec![],
            StepConfig::Standardize { .. } => vec!["dedup"],
            StepConfig::NullNormalize { .. } => vec!["standardize"],
            StepConfig::Backfill { .. } => vec!["null_normalize"],
            StepConfig::Prune => vec!["null_normalize"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_pipeline_validates() {
        PipelineConfig::default_full_pipeline().validate().unwrap();
    }

    #[test]
    fn empty_pipeline_is_rejected() {
        let config = PipelineConfig {
            name: "empty".to_string(),
            description: String::new(),
            steps: vec![],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_order_steps_are_rejected() {
        let config = PipelineConfig {
            name: "bad_order".to_string(),
            description: String::new(),
            steps: vec![StepConfig::Prune, StepConfig::Dedup],
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("prune"));
    }

    #[test]
    fn config_loads_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
name = "full_clean"
description = "test pipeline"
steps = [
    "dedup",
    {{ standardize = {{ case_insensitive_prefixes = true }} }},
    {{ null_normalize = {{ null_tokens = ["NULL", "n/a"] }} }},
    {{ backfill = {{ require_location = false }} }},
    "prune",
]
"#
        )
        .unwrap();

        let config = PipelineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.steps.len(), 5);
        assert_eq!(config.steps[0].step_name(), "dedup");
        assert!(matches!(
            config.steps[3],
            StepConfig::Backfill {
                require_location: Some(false)
            }
        ));
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let err = PipelineConfig::from_path("does-not-exist.toml").unwrap_err();
        assert!(matches!(err, CleanerError::Config(_)));
    }
}
