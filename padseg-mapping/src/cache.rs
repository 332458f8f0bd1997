//! Build-once cache of detection-element segmentations.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::debug;
use padseg_core::{DeId, Plane, TableProvider};

use crate::error::BuildError;
use crate::plane::Segmentation;
use crate::registry::SegmentationRegistry;
use crate::segmentation::CathodeSegmentation;

/// Memoizes one [`Segmentation`] per detection element.
///
/// At most one build happens per detection element: a cache miss takes the
/// write lock, re-checks, builds both planes and publishes the `Arc` in one
/// step. Readers take the read lock only long enough to clone the `Arc`;
/// queries on the returned segmentation never touch the lock.
pub struct SegCache<P> {
    provider: P,
    registry: SegmentationRegistry,
    segs: RwLock<HashMap<DeId, Arc<Segmentation>>>,
}

impl<P: TableProvider> SegCache<P> {
    /// A cache building through the default registry.
    pub fn new(provider: P) -> Self {
        Self::with_registry(provider, SegmentationRegistry::default())
    }

    /// A cache building through the given registry.
    pub fn with_registry(provider: P, registry: SegmentationRegistry) -> Self {
        Self {
            provider,
            registry,
            segs: RwLock::new(HashMap::new()),
        }
    }

    /// The segmentation of both planes of a detection element, building
    /// and caching it on first use.
    ///
    /// # Errors
    /// Fails if the provider does not know the detection element or its
    /// tables are malformed.
    ///
    /// # Panics
    /// Panics if the lock was poisoned by a previous build panic.
    pub fn segmentation(&self, deid: DeId) -> Result<Arc<Segmentation>, BuildError> {
        if let Some(seg) = self.segs.read().expect("cache lock poisoned").get(&deid) {
            return Ok(Arc::clone(seg));
        }
        let mut segs = self.segs.write().expect("cache lock poisoned");
        // another thread may have built while we waited for the write lock
        if let Some(seg) = segs.get(&deid) {
            return Ok(Arc::clone(seg));
        }
        debug!("segmentation cache miss for {deid}, building");
        let bending = self
            .provider
            .plane(deid, Plane::Bending)
            .ok_or(BuildError::UnknownDetectionElement(deid))?;
        let non_bending = self
            .provider
            .plane(deid, Plane::NonBending)
            .ok_or(BuildError::UnknownDetectionElement(deid))?;
        let seg = Arc::new(Segmentation::build_with(
            &self.registry,
            deid,
            bending,
            non_bending,
        )?);
        segs.insert(deid, Arc::clone(&seg));
        Ok(seg)
    }

    /// One cathode plane of a detection element, building and caching the
    /// whole element on first use. The returned handle keeps the element
    /// alive and dereferences to the plane's [`CathodeSegmentation`].
    ///
    /// # Errors
    /// Same failure modes as [`Self::segmentation`].
    pub fn cathode_segmentation(
        &self,
        deid: DeId,
        plane: Plane,
    ) -> Result<CathodeRef, BuildError> {
        let seg = self.segmentation(deid)?;
        Ok(CathodeRef { seg, plane })
    }

    /// The detection elements the underlying provider describes.
    pub fn detection_elements(&self) -> Vec<DeId> {
        self.provider.detection_elements()
    }
}

/// A shared handle to one cathode plane of a cached [`Segmentation`].
#[derive(Clone)]
pub struct CathodeRef {
    seg: Arc<Segmentation>,
    plane: Plane,
}

impl std::ops::Deref for CathodeRef {
    type Target = CathodeSegmentation;

    fn deref(&self) -> &CathodeSegmentation {
        self.seg.cathode(self.plane)
    }
}
