//! SQL schema for the local stores.

/// Schema for all tables. Statements are idempotent so migrations run on
/// every open.
pub const SCHEMA: &str = r#"
-- Recipes in fetch order; position records insertion order and is used to
-- rebuild the sparse list on startup.
CREATE TABLE IF NOT EXISTS recipe (
    position INTEGER PRIMARY KEY AUTOINCREMENT,
    id INTEGER NOT NULL UNIQUE,
    title TEXT NOT NULL,
    image TEXT,
    summary TEXT NOT NULL
);

-- Favorite flags, keyed by recipe id independently of the recipe table.
CREATE TABLE IF NOT EXISTS favorite_recipe (
    id INTEGER PRIMARY KEY,
    favorite INTEGER NOT NULL
);

-- Full details, cached per id. List columns hold JSON.
CREATE TABLE IF NOT EXISTS recipe_details (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    ready_in_minutes INTEGER NOT NULL,
    servings INTEGER NOT NULL,
    summary TEXT NOT NULL,
    instructions TEXT NOT NULL,
    vegetarian INTEGER NOT NULL,
    vegan INTEGER NOT NULL,
    gluten_free INTEGER NOT NULL,
    dairy_free INTEGER NOT NULL,
    image TEXT,
    health_score INTEGER,
    diets TEXT NOT NULL,
    score REAL NOT NULL,
    source_url TEXT,
    ingredients TEXT NOT NULL,
    fetched_at TEXT NOT NULL
);

-- Scalar preferences (last known total result count).
CREATE TABLE IF NOT EXISTS preference (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
