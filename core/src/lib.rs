//! Staffing decision engine for urban hospitals.
//!
//! A decision call flows leaf-first through the components:
//!   snapshot  -> risk_scorer            -> risk score + level
//!   features  -> predictor              -> predicted patient count
//!   count     -> requirement_planner    -> requirement table
//!   roster    -> classifier             -> eligible pools
//!   table + pools -> plan_builder (selector per cell) -> staffing plan
//!   plan + count  -> automation_agent   -> alerts, shift updates, log lines
//!
//! The orchestrator glues the steps into one DecisionRecord.

pub mod alerts;
pub mod automation_agent;
pub mod classifier;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod plan_builder;
pub mod predictor;
pub mod requirement_planner;
pub mod risk_scorer;
pub mod roster;
pub mod selector;
pub mod snapshot;
pub mod store;
pub mod types;
