pub mod permission;
pub mod permission_type;
