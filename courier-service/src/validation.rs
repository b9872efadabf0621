//! Checks shared by route queries and the graph editor.

use courier_core::{GraphRepository, Point, RouteBase};

use crate::{ServiceError, ValidationError};

/// Reject two non-blank descriptions naming the same point.
pub(crate) fn ensure_distinct(origin: &str, destination: &str) -> Result<(), ValidationError> {
    if !origin.trim().is_empty() && origin == destination {
        return Err(ValidationError::EqualPoints);
    }
    Ok(())
}

/// Look up the point carrying `description`.
pub(crate) fn resolve_point<R>(repository: &R, description: &str) -> Result<Point, ServiceError>
where
    R: GraphRepository + ?Sized,
{
    repository
        .point_by_description(description)?
        .ok_or_else(|| {
            ValidationError::PointNotFound {
                description: description.to_owned(),
            }
            .into()
        })
}

/// Resolve a queryable origin/destination pair.
///
/// The pair must be distinct, declared as a route base, and have a step
/// leaving the origin and a step reaching the destination.
pub(crate) fn resolve_route_base<R>(
    repository: &R,
    origin: &str,
    destination: &str,
) -> Result<RouteBase, ServiceError>
where
    R: GraphRepository + ?Sized,
{
    ensure_distinct(origin, destination)?;
    let start = resolve_point(repository, origin)?;
    let end = resolve_point(repository, destination)?;
    let route_base = repository
        .route_base_between(start.id, end.id)?
        .ok_or(ValidationError::RouteBaseNotDeclared)?;
    if repository.list_outgoing_steps(start.id)?.is_empty() {
        return Err(ValidationError::NoDepartingStep.into());
    }
    if repository.list_incoming_steps(end.id)?.is_empty() {
        return Err(ValidationError::NoArrivingStep.into());
    }
    Ok(route_base)
}
