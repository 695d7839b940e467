/// Database layer for the fitness center service
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: embedded schema migrations
/// - `store`: the storage access layer used by the HTTP handlers
///
/// # Example
///
/// ```no_run
/// use fitcenter_shared::db::pool::{create_pool, DatabaseConfig};
/// use fitcenter_shared::db::store::PgStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     };
///
///     let pool = create_pool(config).await?;
///     let store = PgStore::new(pool);
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
pub mod store;
