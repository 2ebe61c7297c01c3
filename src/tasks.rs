//! Async task management for non-blocking API operations.
//!
//! The employee fetch runs in a background task while the UI keeps
//! rendering. Results come back through a tokio channel:
//! 1. The app flags a pending fetch and hands out a new generation number
//! 2. The main loop spawns the fetch via `TaskSpawner`
//! 3. The task sends an `ApiMessage` tagged with that generation
//! 4. The main loop polls the channel with `try_recv()` and hands the
//!    message to the app, which drops results for stale generations
//!
//! The returned `FetchHandle` aborts the task when dropped, so a view that
//! goes away never receives a late result.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{ApiError, DirectoryClient, Employee};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// Employee list fetch finished.
    EmployeesFetched {
        /// The fetch generation this result belongs to.
        generation: u64,
        result: Result<Vec<Employee>, ApiError>,
    },
}

/// Owner of an in-flight background task.
///
/// Dropping the handle aborts the task.
#[derive(Debug)]
pub struct FetchHandle {
    generation: u64,
    handle: JoinHandle<()>,
}

impl FetchHandle {
    /// The generation of the fetch this handle controls.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!(generation = self.generation, "Aborting in-flight fetch");
            self.handle.abort();
        }
    }
}

/// Spawns background tasks for async operations.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task to fetch the employee list.
    pub fn spawn_fetch_employees(&self, client: &DirectoryClient, generation: u64) -> FetchHandle {
        let tx = self.tx.clone();
        let client = client.clone();
        let handle = tokio::spawn(async move {
            let result = client.fetch_employees().await;
            // The receiver is gone once the app has shut down.
            let _ = tx.send(ApiMessage::EmployeesFetched { generation, result });
        });

        FetchHandle { generation, handle }
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    async fn serve(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_spawn_fetch_sends_tagged_result() {
        let base = serve(r#"[{"id":"1","name":"Al","position":"Dev","department":"IT"}]"#).await;
        let client = DirectoryClient::new(&base, "/api/employees", Duration::from_secs(5)).unwrap();
        let (mut rx, spawner) = create_task_channel();

        let handle = spawner.spawn_fetch_employees(&client, 7);
        assert_eq!(handle.generation(), 7);

        let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        match message {
            ApiMessage::EmployeesFetched { generation, result } => {
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap().len(), 1);
            }
        }
    }

    #[tokio::test]
    async fn test_dropping_handle_aborts_fetch() {
        // Accept the connection but never answer.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client =
            DirectoryClient::new(&format!("http://{}", addr), "/api/employees", Duration::from_secs(30))
                .unwrap();
        let (mut rx, spawner) = create_task_channel();

        let handle = spawner.spawn_fetch_employees(&client, 1);
        drop(handle);
        drop(spawner);

        // The aborted task drops its sender, so the channel closes without a message.
        let next = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert!(next.is_none());
    }
}
