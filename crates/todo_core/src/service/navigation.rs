//! Detail screen routing.

use crate::model::task::TaskId;

const DETAIL_ROUTE_PREFIX: &str = "/todos/";

/// Route of the detail screen for task `id`, e.g. `/todos/3`.
pub fn detail_route(id: TaskId) -> String {
    format!("{DETAIL_ROUTE_PREFIX}{id}")
}

/// Extracts the task id from a detail route.
///
/// Returns `None` for other paths or a non-numeric id segment.
pub fn parse_detail_route(path: &str) -> Option<TaskId> {
    let segment = path.strip_prefix(DETAIL_ROUTE_PREFIX)?;
    let segment = segment.strip_suffix('/').unwrap_or(segment);
    segment.parse().ok()
}
