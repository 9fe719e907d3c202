pub mod data_loader;
pub mod debug;
pub mod usage_log;

pub use data_loader::DataLoader;
pub use usage_log::{extract_equipment_id, parse_line_to_entry};
