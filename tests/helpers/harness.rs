use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Simple test instance that connects to an external PostgreSQL database
/// configured through the DATABASE_URL environment variable
pub struct PgTestInstance {
    pub base_url: String,
}

/// Test database with an isolated database for testing
pub struct TestDatabase {
    pool: PgPool,
    db_name: String,
    base_url: String,
}

impl TestDatabase {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Acquire a connection from the pool for calls that need one connection
    pub async fn conn(&self) -> sqlx::pool::PoolConnection<sqlx::Postgres> {
        self.pool.acquire().await.unwrap()
    }

    /// Execute arbitrary SQL - perfect for test setup
    pub async fn execute(&self, sql: &str) {
        use sqlx::Executor;
        self.pool
            .execute(sql)
            .await
            .unwrap_or_else(|e| panic!("Failed to execute SQL: {}\nError: {}", sql, e));
    }

    /// Cleanup the test database - best effort async cleanup
    pub async fn cleanup(self) {
        self.pool.close().await;

        let db_name = self.db_name.clone();
        let base_url = self.base_url.clone();

        let cleanup_future = async move {
            if let Ok(pool) = PgPool::connect(&base_url).await {
                let drop_sql = format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", db_name);
                let _ = sqlx::query(&drop_sql).execute(&pool).await;
                pool.close().await;
            }
        };

        // Timeout after 5 seconds to prevent hanging
        let _ = tokio::time::timeout(std::time::Duration::from_secs(5), cleanup_future).await;
    }
}

impl PgTestInstance {
    /// `None` when no DATABASE_URL is configured
    pub async fn from_env() -> Option<Self> {
        // Load .env file for test environment configuration
        dotenv::dotenv().ok();

        let base_url = std::env::var("DATABASE_URL").ok()?;

        // Verify we can connect to the database
        let test_pool = PgPool::connect(&base_url).await
            .expect("Failed to connect to test database. Make sure PostgreSQL is running and DATABASE_URL is correct.");
        test_pool.close().await;

        Some(Self { base_url })
    }

    pub async fn create_test_database(&self) -> TestDatabase {
        let db_name = format!("test_{}", Uuid::new_v4().simple());

        let base_pool = PgPool::connect(&self.base_url)
            .await
            .expect("Failed to connect to PostgreSQL for database creation");

        sqlx::query(&format!("CREATE DATABASE \"{}\"", db_name))
            .execute(&base_pool)
            .await
            .expect("Failed to create test database");

        base_pool.close().await;

        let db_url = if let Some(last_slash) = self.base_url.rfind('/') {
            format!("{}/{}", &self.base_url[..last_slash], db_name)
        } else {
            format!("{}/{}", self.base_url, db_name)
        };

        let pool = PgPool::connect(&db_url)
            .await
            .expect("Failed to connect to newly created test database");

        TestDatabase {
            pool,
            db_name,
            base_url: self.base_url.clone(),
        }
    }
}

/// Run a test against a fresh database, dropping it afterwards
///
/// Without DATABASE_URL the test body is skipped.
///
/// # Example
/// ```ignore
/// #[tokio::test]
/// async fn test_something() -> Result<()> {
///     with_test_db(async |db| {
///         db.execute("CREATE TABLE users (id INT)").await;
///         Ok(())
///     })
///     .await
/// }
/// ```
pub async fn with_test_db<F>(test_fn: F) -> Result<()>
where
    F: AsyncFnOnce(&TestDatabase) -> Result<()>,
{
    let Some(pg) = PgTestInstance::from_env().await else {
        eprintln!("DATABASE_URL not set, skipping database test");
        return Ok(());
    };
    let db = pg.create_test_database().await;

    let result = test_fn(&db).await;

    // Cleanup happens here - best effort (ignore errors)
    db.cleanup().await;

    result
}
