//! # Startup and Shutdown
//!
//! A node waits for its transport before starting any thread. An unreachable
//! broker is retried, never fatal; shutdown during the wait abandons startup.

#[cfg(test)]
mod tests {
    use super::super::support::{idle_node, mining_node, wait_until, DEADLINE};
    use node_runtime::NodeError;
    use shared_bus::InMemoryBroker;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_start_waits_for_broker() {
        let broker = InMemoryBroker::new("memory://late-broker");
        broker.set_online(false);
        let node = Arc::new(idle_node(&broker, "patient"));

        let starter = {
            let node = Arc::clone(&node);
            thread::spawn(move || node.start_mining())
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!node.is_running());
        assert!(!node.status().connected);

        broker.set_online(true);
        starter.join().unwrap().unwrap();

        assert!(node.is_running());
        assert!(node.status().connected);
        node.shutdown();
    }

    #[test]
    fn test_shutdown_during_wait_abandons_startup() {
        let broker = InMemoryBroker::new("memory://never");
        broker.set_online(false);
        let node = Arc::new(idle_node(&broker, "abandoned"));

        let starter = {
            let node = Arc::clone(&node);
            thread::spawn(move || node.start_mining())
        };
        thread::sleep(Duration::from_millis(50));
        node.shutdown();

        assert!(matches!(starter.join().unwrap(), Err(NodeError::Cancelled)));
        assert!(!node.is_running());
    }

    #[test]
    fn test_shutdown_joins_every_thread() {
        let broker = InMemoryBroker::new("memory://shutdown");
        let node = mining_node(&broker, "busy", 3);
        node.start_mining().unwrap();
        assert!(wait_until(DEADLINE, || node.status().hashes_attempted > 0));

        node.shutdown();
        assert!(!node.is_running());

        // Nothing moves once every thread has been joined.
        let frozen = node.status();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(node.status(), frozen);
    }

    #[test]
    fn test_drop_shuts_down() {
        let broker = InMemoryBroker::new("memory://drop");
        let node = mining_node(&broker, "dropped", 2);
        node.start_mining().unwrap();
        drop(node);
    }
}
