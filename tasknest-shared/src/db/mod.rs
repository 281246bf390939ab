/// Database plumbing
///
/// - `pool`: PostgreSQL connection pool setup and health checks
/// - `migrations`: Migration runner over the SQL files in `migrations/`

pub mod migrations;
pub mod pool;
