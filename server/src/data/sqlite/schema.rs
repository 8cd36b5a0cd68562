//! SQLite schema definitions

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Users
-- =============================================================================
-- password is stored as given by the client (no hashing)
-- *_folded columns hold Unicode-lowercased copies for substring filters
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 100),
    name_folded TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE CHECK(length(email) >= 3),
    email_folded TEXT NOT NULL,
    password TEXT NOT NULL,
    role TEXT NOT NULL CHECK(role IN ('CLIMBER', 'BELAYER', 'ADMIN')),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_users_role ON users(role);

-- =============================================================================
-- 2. Climber profiles (at most one per user)
-- =============================================================================
CREATE TABLE IF NOT EXISTS climber_profiles (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    bio TEXT,
    bio_folded TEXT,
    preferences TEXT,
    preferences_folded TEXT,
    location TEXT,
    location_folded TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

-- =============================================================================
-- 3. Belayer profiles (at most one per user)
-- =============================================================================
CREATE TABLE IF NOT EXISTS belayer_profiles (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    bio TEXT,
    bio_folded TEXT,
    certified_lead INTEGER NOT NULL DEFAULT 0 CHECK(certified_lead IN (0, 1)),
    certified_top_rope INTEGER NOT NULL DEFAULT 0 CHECK(certified_top_rope IN (0, 1)),
    hourly_rate REAL CHECK(hourly_rate IS NULL OR hourly_rate >= 0),
    rating REAL CHECK(rating IS NULL OR rating >= 0),
    location TEXT,
    location_folded TEXT,
    availability TEXT,
    availability_folded TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_belayer_profiles_hourly_rate ON belayer_profiles(hourly_rate);
"#;
