use std::fmt;

use crate::geometry::Path;

/// Receives notifications from a morph, e.g. to draw alignment aids.
///
/// Every method has an empty default.
pub trait MorphObserver {
    /// Called once alignment is done, with the paths that will be interpolated.
    fn on_prepared(&mut self, _origin: &Path, _destination: &Path) {}

    /// Called after every evaluation.
    fn on_evaluated(&mut self, _t: f64, _path: &Path) {}

    /// Called with the final path.
    fn on_finished(&mut self, _path: &Path) {}
}

#[derive(Default)]
pub(crate) struct ObserverSlot(Option<Box<dyn MorphObserver + Send>>);

impl ObserverSlot {
    pub(crate) fn set(&mut self, observer: Box<dyn MorphObserver + Send>) {
        self.0 = Some(observer);
    }

    pub(crate) fn get_mut(&mut self) -> Option<&mut (dyn MorphObserver + Send + 'static)> {
        self.0.as_deref_mut()
    }
}

impl fmt::Debug for ObserverSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0.is_some() {
            "Some(MorphObserver)"
        } else {
            "None"
        })
    }
}
