use geo::Point;
use log::debug;

use crate::Error;

/// Downsamples a route polyline to at most `node_budget` points.
///
/// Points are taken at evenly spaced indices; the first and last point are
/// always kept. The result only depends on the input, so every algorithm in a
/// comparison sees the same nodes.
///
/// # Errors
///
/// Returns an error if the polyline has fewer than 2 points, if the budget is
/// smaller than 2, or if a coordinate is not finite
pub fn sample_route(points: &[Point<f64>], node_budget: usize) -> Result<Vec<Point<f64>>, Error> {
    if points.len() < 2 {
        return Err(Error::InsufficientGeometry(points.len()));
    }
    if node_budget < 2 {
        return Err(Error::InvalidNodeBudget(node_budget));
    }
    if let Some(point) = points
        .iter()
        .find(|point| !(point.x().is_finite() && point.y().is_finite()))
    {
        return Err(Error::InvalidData(format!(
            "non-finite coordinate ({}, {})",
            point.y(),
            point.x()
        )));
    }

    if points.len() <= node_budget {
        return Ok(points.to_vec());
    }

    // The final point is appended separately, so the stride spreads the
    // remaining budget over the first `len - 1` points.
    let last = points.len() - 1;
    let stride = last.div_ceil(node_budget - 1);

    let mut sampled: Vec<Point<f64>> = points[..last].iter().step_by(stride).copied().collect();
    sampled.push(points[last]);

    debug!(
        "Sampled {} of {} route points (stride {stride})",
        sampled.len(),
        points.len()
    );

    Ok(sampled)
}
