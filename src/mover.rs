use crate::{collaborators::CollaboratorResult, DetectorMover};

/// Moves the beam centre by `(dx, dy)`
///
/// The detector travels the opposite way: `component` is translated by
/// `(-dx, -dy)` on the sample and, if present, on the background.
pub fn move_detector<D: DetectorMover>(
    sample: &mut D,
    background: Option<&mut D>,
    component: &str,
    dx: f64,
    dy: f64,
) -> CollaboratorResult<()> {
    let (x, y) = (-dx, -dy);
    log::debug!("moving {component} by ({x:.6},{y:.6})");
    sample.move_component(component, x, y)?;
    if let Some(background) = background {
        if let Err(e) = background.move_component(component, x, y) {
            // sample and background must stay aligned
            if let Err(e) = sample.move_component(component, dx, dy) {
                log::error!("failed to move back {component} on the sample: {e}");
            }
            return Err(e);
        }
    }
    Ok(())
}
