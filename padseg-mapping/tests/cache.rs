//! Cache discipline: one build per detection element, shared results.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use padseg_mapping::{
    BuildError, CardId, Channel, DeId, Plane, PlaneDescription, SegCache, TableProvider,
};

use common::{bending_plane, non_bending_plane};

/// Serves the fixture for detection element 1 and counts table requests.
struct FixtureProvider {
    requests: Arc<AtomicUsize>,
}

impl FixtureProvider {
    fn new() -> Self {
        Self::with_counter(Arc::new(AtomicUsize::new(0)))
    }

    fn with_counter(requests: Arc<AtomicUsize>) -> Self {
        Self { requests }
    }
}

impl TableProvider for FixtureProvider {
    fn plane(&self, deid: DeId, plane: Plane) -> Option<PlaneDescription> {
        if deid != DeId(1) {
            return None;
        }
        self.requests.fetch_add(1, Ordering::SeqCst);
        Some(match plane {
            Plane::Bending => bending_plane(),
            Plane::NonBending => non_bending_plane(),
        })
    }

    fn detection_elements(&self) -> Vec<DeId> {
        vec![DeId(1)]
    }
}

#[test]
fn test_cache_builds_once_and_shares() {
    let cache = SegCache::new(FixtureProvider::new());
    let first = cache.segmentation(DeId(1)).unwrap();
    let second = cache.segmentation(DeId(1)).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.nof_pads(), 140);
    assert_eq!(cache.detection_elements(), vec![DeId(1)]);
}

#[test]
fn test_cache_builds_once_under_concurrent_access() {
    let requests = Arc::new(AtomicUsize::new(0));
    let cache = SegCache::new(FixtureProvider::with_counter(Arc::clone(&requests)));
    let segs: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cache.segmentation(DeId(1)).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    for seg in &segs[1..] {
        assert!(Arc::ptr_eq(&segs[0], seg));
    }
    // one build = two table requests, one per plane
    assert_eq!(requests.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unknown_detection_element() {
    let cache = SegCache::new(FixtureProvider::new());
    assert_eq!(
        cache.segmentation(DeId(42)).unwrap_err(),
        BuildError::UnknownDetectionElement(DeId(42))
    );
}

#[test]
fn test_cathode_handle_derefs_to_one_plane() {
    let cache = SegCache::new(FixtureProvider::new());
    let bending = cache.cathode_segmentation(DeId(1), Plane::Bending).unwrap();
    assert!(bending.is_bending());
    assert_eq!(bending.nof_pads(), 76);
    let non_bending = cache
        .cathode_segmentation(DeId(1), Plane::NonBending)
        .unwrap();
    assert_eq!(non_bending.nof_pads(), 64);
    assert_eq!(
        non_bending.find_pad_by_fee(CardId(20), Channel(0)),
        non_bending.find_pad_by_position(0.25, 0.375)
    );
}
