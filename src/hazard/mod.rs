/// Water-quality hazard assessment.
///
/// Submodules:
/// - `classifier` — evaluates a sensor reading against the quality bands.
/// - `notify` — the notification collaborator seam and dispatch policy.

pub mod classifier;
pub mod notify;
