use std::thread;

/// Spawns a detached thread named `webshell-{name}`.
///
/// Returns `false` if the thread could not be created.
pub fn spawn_named_thread<F>(name: &str, task: F) -> bool
where F: FnOnce() + Send + 'static {
    let thread_name = format!("webshell-{name}");

    match thread::Builder::new().name(thread_name.clone()).spawn(task) {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(thread = %thread_name, error = %err, "failed to spawn thread");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_spawn_named_thread_executes_task() {
        let (tx, rx) = channel();

        assert!(spawn_named_thread("test-task", move || {
            tx.send(()).unwrap();
        }));

        assert!(rx.recv_timeout(Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn test_spawn_named_thread_uses_correct_prefix() {
        let (tx, rx) = channel();

        spawn_named_thread("event-tap", move || {
            let name = thread::current().name().unwrap_or("").to_string();
            tx.send(name).unwrap();
        });

        let thread_name = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(thread_name, "webshell-event-tap");
    }
}
