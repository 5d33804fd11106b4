pub mod api;
pub mod balancer;
pub mod config;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod problem;

pub use balancer::{balance, BalanceReport};
pub use environment::{Environment, EnvironmentParams};
pub use evaluator::Individual;
