//! Explicit registry of segmentation builders.
//!
//! Back-ends register under a name and the active strategy is chosen by
//! configuration, never by import side effects: hosts call
//! [`SegmentationRegistry::register`] at program start and
//! [`SegmentationRegistry::select`] from their configuration.

use std::collections::BTreeMap;

use log::debug;
use padseg_core::{DeId, Plane, PlaneDescription};

use crate::error::BuildError;
use crate::segmentation::CathodeSegmentation;

/// A segmentation builder: raw tables in, ready-to-query segmentation out.
pub type BuilderFn = fn(DeId, Plane, PlaneDescription) -> padseg_core::Result<CathodeSegmentation>;

/// Name of the built-in grid-accelerated strategy.
pub const GRID_STRATEGY: &str = "grid";

/// Maps strategy names to builder functions and tracks the active one.
#[derive(Debug, Clone)]
pub struct SegmentationRegistry {
    builders: BTreeMap<String, BuilderFn>,
    active: Option<String>,
}

impl SegmentationRegistry {
    /// An empty registry: nothing registered, nothing selected.
    pub fn new() -> Self {
        Self {
            builders: BTreeMap::new(),
            active: None,
        }
    }

    /// Registers a builder under a name. Re-registering a name replaces
    /// the previous builder. The first registered strategy becomes the
    /// active one until [`Self::select`] says otherwise.
    pub fn register(&mut self, name: impl Into<String>, builder: BuilderFn) {
        let name = name.into();
        debug!("registering segmentation strategy {name:?}");
        if self.active.is_none() {
            self.active = Some(name.clone());
        }
        self.builders.insert(name, builder);
    }

    /// Selects the active strategy.
    ///
    /// # Errors
    /// Fails if no builder is registered under `name`.
    pub fn select(&mut self, name: &str) -> Result<(), BuildError> {
        if !self.builders.contains_key(name) {
            return Err(BuildError::UnknownStrategy(name.to_owned()));
        }
        self.active = Some(name.to_owned());
        Ok(())
    }

    /// The active strategy name, if any.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The registered strategy names, in sorted order.
    pub fn strategies(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(String::as_str)
    }

    /// Builds one cathode plane with the active strategy.
    ///
    /// # Errors
    /// Fails if nothing is selected or the tables are malformed.
    pub fn build(
        &self,
        deid: DeId,
        plane: Plane,
        desc: PlaneDescription,
    ) -> Result<CathodeSegmentation, BuildError> {
        let name = self.active.as_deref().ok_or(BuildError::NoStrategySelected)?;
        let builder = self
            .builders
            .get(name)
            .ok_or_else(|| BuildError::UnknownStrategy(name.to_owned()))?;
        Ok(builder(deid, plane, desc)?)
    }
}

impl Default for SegmentationRegistry {
    /// A registry with the built-in [`GRID_STRATEGY`] registered and
    /// selected.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(GRID_STRATEGY, CathodeSegmentation::build as BuilderFn);
        registry
    }
}
