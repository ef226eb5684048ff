pub mod common;
pub mod permission;
pub mod permission_type;
