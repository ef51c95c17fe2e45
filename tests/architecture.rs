//! Architecture Verification Suite
//!
//! Registries, generators and validators are shared across test threads,
//! so they must stay thread-safe.

#[cfg(test)]
mod architecture_tests {
    use typeclass_laws::classes::{ClassRegistry, ValidationCache};
    use typeclass_laws::config::ValidationConfig;
    use typeclass_laws::generators::{Continuous, Discrete, RandomSource};
    use typeclass_laws::instances::InstanceTable;
    use typeclass_laws::{ErrorFold, Validator};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_generators_are_thread_safe() {
        assert_send_sync::<RandomSource>();
        assert_send_sync::<Continuous<f64>>();
        assert_send_sync::<Discrete<String>>();
    }

    #[test]
    fn test_class_machinery_is_thread_safe() {
        assert_send_sync::<Validator<f64>>();
        assert_send_sync::<ClassRegistry<f64>>();
        assert_send_sync::<ValidationCache>();
        assert_send_sync::<InstanceTable>();
        assert_send_sync::<ValidationConfig>();
        assert_send_sync::<ErrorFold>();
    }

    // A registry can be shared behind a lock and validated from another thread.
    #[test]
    fn test_registry_validates_across_threads() {
        use std::sync::{Arc, Mutex};
        use typeclass_laws::classes::ClassBuilder;
        use typeclass_laws::generators::continuous;
        use typeclass_laws::laws::partial_eq_laws;

        let mut registry = ClassRegistry::new();
        let eq = registry
            .register(ClassBuilder::new().name("Eq").laws(partial_eq_laws::<i64>()))
            .unwrap();
        let shared = Arc::new(Mutex::new(registry));

        let worker = Arc::clone(&shared);
        let handle = std::thread::spawn(move || {
            let ints = continuous("Ints", 1, |xs| (xs[0] * 50.0) as i64);
            worker
                .lock()
                .unwrap()
                .validate(eq, &ints, &ValidationConfig::new())
        });

        assert!(handle.join().unwrap().is_success());
        assert_eq!(shared.lock().unwrap().cache().len(), 1);
    }
}
