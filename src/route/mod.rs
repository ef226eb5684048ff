pub mod permission;
#[cfg(test)]
mod permission_test;
pub mod permission_type;
#[cfg(test)]
mod permission_type_test;
