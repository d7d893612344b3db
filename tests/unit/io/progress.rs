//! Tests for batch progress display lifecycle

use multipoint::io::progress::ProgressManager;

#[test]
fn test_lifecycle_without_initialization_is_harmless() {
    let manager = ProgressManager::new();
    manager.start_image("a.png");
    manager.complete_image();
    manager.finish();
}

#[test]
fn test_initialized_lifecycle() {
    let mut manager = ProgressManager::new();
    manager.initialize(3);

    for name in ["a.png", "b.png", "c.png"] {
        manager.start_image(name);
        manager.complete_image();
    }

    manager.finish();
}
