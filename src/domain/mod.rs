//! Domain layer - Pure business abstractions
//!
//! Search inputs, projections, paging types and the repository contracts.
//! Implementations live in the infrastructure layer.

pub mod errors;
pub mod pagination;
pub mod repositories;
pub mod search;

pub use errors::DomainError;
pub use pagination::*;
pub use repositories::*;
pub use search::*;
