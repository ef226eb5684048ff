pub mod db;
pub mod permission_type;
