// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Belaymatch";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "belaymatch";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".belaymatch";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "belaymatch.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "BELAYMATCH_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "BELAYMATCH_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "BELAYMATCH_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "BELAYMATCH_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "BELAYMATCH_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

/// Default request body limit (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "BELAYMATCH_DATA_DIR";

/// Environment variable to enable SQL statement logging
pub const ENV_LOG_QUERIES: &str = "BELAYMATCH_LOG_QUERIES";

// =============================================================================
// SQLite
// =============================================================================

/// SQLite database file name
pub const SQLITE_DB_FILENAME: &str = "belaymatch.db";

/// Maximum pooled SQLite connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// Busy timeout before a locked write gives up
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// Page cache size (negative = KiB)
pub const SQLITE_CACHE_SIZE: &str = "-16000";

/// Pages written before SQLite auto-checkpoints the WAL
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// Interval for the background WAL checkpoint task
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Validation Limits
// =============================================================================

/// Maximum length of a path identifier
pub const MAX_ID_LENGTH: u64 = 256;

/// Maximum length of a user name
pub const MAX_NAME_LENGTH: u64 = 100;

/// Minimum length of an email address
pub const MIN_EMAIL_LENGTH: u64 = 3;

/// Maximum length of an email address
pub const MAX_EMAIL_LENGTH: u64 = 254;

/// Maximum length of free-text profile fields (bio, preferences, availability)
pub const MAX_TEXT_LENGTH: u64 = 2000;

/// Maximum length of a location string
pub const MAX_LOCATION_LENGTH: u64 = 200;

// =============================================================================
// Shutdown
// =============================================================================

/// Maximum time to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
