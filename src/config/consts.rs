// src/config/consts.rs

// Input
pub const DEFAULT_INPUT_FILE: &str = "politician_stats.csv";
pub const DEFAULT_CONFIG_FILE: &str = "credstats.toml";

// Table view
pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_TOP_PAGE_SIZE: usize = 10;
pub const PAGE_WINDOW_WIDTH: usize = 5;

// Export
pub const DEFAULT_EXPORT_STEM: &str = "politician_stats";
