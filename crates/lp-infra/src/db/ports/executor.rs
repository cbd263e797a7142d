use diesel::SqliteConnection;

pub trait DbExecutor: Clone + Send + Sync + 'static {
    fn run<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> anyhow::Result<T>,
    ) -> anyhow::Result<T>;
}

/// Run `f` on a pooled connection from tokio's blocking thread pool.
pub async fn run_blocking<E, T, F>(executor: &E, f: F) -> anyhow::Result<T>
where
    E: DbExecutor,
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> anyhow::Result<T> + Send + 'static,
{
    let executor = executor.clone();
    tokio::task::spawn_blocking(move || executor.run(f))
        .await
        .map_err(|e| anyhow::anyhow!("database task failed: {}", e))?
}
