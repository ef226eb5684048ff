pub mod db;
pub mod event;
pub mod memory;
pub mod search;
pub mod sqlx_utils;
pub mod test_utils;
pub mod utils;
