use std::sync::{Arc, Barrier};
use std::thread;

use native_bridge::bridge::Bridge;
use native_bridge::options::BridgeOptions;

#[test]
fn racing_installs_load_once() {
    assert!(Bridge::global().is_none());
    let barrier = Arc::new(Barrier::new(8));
    let installed = (0..8).map(|_| {
        let barrier = barrier.clone();
        thread::spawn(move || {
            barrier.wait();
            Bridge::install_global(BridgeOptions::default()).unwrap() as *const Bridge as usize
        })
    }).collect::<Vec<_>>().into_iter().map(|handle| handle.join().unwrap()).collect::<Vec<_>>();
    assert_eq!(Bridge::global_starts(), 1);
    let global = Bridge::global().unwrap() as *const Bridge as usize;
    assert!(installed.iter().all(|bridge| *bridge == global));

    let again = Bridge::install_global(BridgeOptions::test_only()).unwrap();
    assert_eq!(again as *const Bridge as usize, global);
    assert_eq!(Bridge::global_starts(), 1);
    assert!(again.signatures().contains("java/lang/Math.max(JJ)J"));
}
