// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = "court_harvest/0.3 (pickleball court directory)";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const OVERPASS_TIMEOUT_SECS: u64 = 30; // query itself asks for 25

// Nominatim usage policy: at most one request per second
pub const GEOCODE_MIN_GAP_MS: u64 = 1100;

// Sources
pub const DEFAULT_SCOPE: &str = "Austin, TX";
pub const MUNICIPAL_SOURCE_NAME: &str = "Austin Parks & Rec";
pub const MUNICIPAL_NAME_SUFFIX: &str = " Parks & Rec";
pub const MUNICIPAL_URL: &str = "https://www.austintexas.gov/department/pickleball";
pub const MUNICIPAL_CONFIDENCE: u8 = 90;
pub const OSM_SOURCE_NAME: &str = "OpenStreetMap";
pub const OSM_URL: &str = "https://www.openstreetmap.org";
pub const OSM_CONFIDENCE: u8 = 80;
pub const PICKLEBALL_FILTER: &str = r#"["sport"="pickleball"]"#;

// Normalization
pub const PLACEHOLDER_NAME: &str = "Unnamed Pickleball Court";
pub const NAME_SUFFIX: &str = " Pickleball Courts";
pub const UNKNOWN_REGION: &str = "Unknown";
pub const DEFAULT_SURFACE: &str = "Hard";
pub const DEFAULT_COUNTRY: &str = "USA";
pub const MIN_ADDRESS_LEN: usize = 5;

// Local store
pub const STORE_DIR: &str = ".store";
pub const SOURCES_FILE: &str = "sources.json";
pub const RECORDS_FILE: &str = "courts.jsonl";
pub const LOG_FILE: &str = "debug.log";
