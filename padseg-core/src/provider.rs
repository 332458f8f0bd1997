//! The seam to the external raw-table source.

use crate::desc::PlaneDescription;
use crate::pad::{DeId, Plane};

/// Supplies the raw segmentation tables per detection element.
///
/// The literal per-detector geometry tables live outside the engine; the
/// engine only ever sees the [`PlaneDescription`] this trait hands out.
/// Implementations are expected to be cheap to query repeatedly (generated
/// code, embedded data, a deserialized file, ...).
pub trait TableProvider {
    /// Returns the raw tables for one cathode plane of one detection
    /// element, or `None` if the detection element is unknown.
    fn plane(&self, deid: DeId, plane: Plane) -> Option<PlaneDescription>;

    /// Lists the detection elements this provider describes.
    fn detection_elements(&self) -> Vec<DeId>;
}
