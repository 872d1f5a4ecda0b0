//! Data Transfer Objects for REST request/response serialization.

pub mod common_dto;
pub mod competition_dto;
pub mod event_dto;
pub mod match_dto;

pub use common_dto::*;
pub use competition_dto::*;
pub use event_dto::*;
pub use match_dto::*;
