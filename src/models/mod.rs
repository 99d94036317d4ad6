//! Data models for the Vaulterp asset service

pub mod asset;
pub mod downtime;
pub mod image;
pub mod service_record;
pub mod spare;
pub mod spare_ops;
pub mod user;

// Re-export commonly used types
pub use asset::Asset;
pub use spare::SpareMaster;
pub use spare_ops::{ApprovalDecision, SpareAction};
pub use user::{User, UserClaims, UserInfo};
