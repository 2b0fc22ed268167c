// src/config/consts.rs

// Site
pub const COLLECTION_URL: &str = "https://omairi.club/collections/bando33";
pub const SPOT_URL_TEMPLATE: &str = "https://omairi.club/spots/{spot_id}";
pub const POSTS_URL_TEMPLATE: &str = "https://omairi.club/api/spots/{spot_id}/goshuin?page={page}";

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0";
pub const REFERER: &str = "https://omairi.club/spots/82856/goshuin";
pub const TIMEOUT_SECS: u64 = 30;
pub const RETRIES: u32 = 2;
pub const RETRY_BACKOFF_MS: u64 = 1_000;
pub const REQUEST_PAUSE_MS: u64 = 0; // raise to be polite

// Pagination
pub const MAX_PAGES: u32 = 5;
pub const PER_PAGE_CAP: usize = 3;
pub const TOTAL_CAP: usize = 15;

// Export
pub const DEFAULT_OUT_DIR: &str = "goshuin";
pub const DEFAULT_TABLE_FILE: &str = "metadata.csv";
pub const DEFAULT_IMAGES_SUBDIR: &str = "train";
