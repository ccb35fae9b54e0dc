use crate::types::AxisLetter;

// ---------------------------------------------------------------------------
// DriveCoordinates
// ---------------------------------------------------------------------------

/// Step-position sink of the motion executor.
pub trait DriveCoordinates {
    /// Overwrite the step position of machine axis `axis`.
    fn set_drive_coordinate(&mut self, steps: i32, axis: usize);
}

// ---------------------------------------------------------------------------
// MachineAxes
// ---------------------------------------------------------------------------

/// Platform view of the configured machine axes (letters and travel).
pub trait MachineAxes {
    /// Number of visible machine axes.
    fn axis_count(&self) -> usize;

    /// Letter of machine axis `axis`, if it maps to one.
    fn axis_letter(&self, axis: usize) -> Option<AxisLetter>;

    /// Lower travel limit of machine axis `axis`.
    fn axis_minimum(&self, axis: usize) -> f32;

    /// Upper travel limit of machine axis `axis`.
    fn axis_maximum(&self, axis: usize) -> f32;
}
