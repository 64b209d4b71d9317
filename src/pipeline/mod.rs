// Cleaning pipeline: try-conversions, stage implementations, configuration,
// and the orchestrator that runs the stages in order.

pub mod convert;
pub mod orchestrator;
pub mod pipeline_config;
pub mod steps;
