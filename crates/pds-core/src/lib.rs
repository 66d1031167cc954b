//! Domain layer: the value graph, per-kind record services, the plan edit
//! cycle, and outcome rendering.

pub mod edit;
pub mod error;
pub mod graph;
pub mod records;
pub mod render;
pub mod resource;
pub mod views;

pub use error::{ServiceError, ServiceResult};
