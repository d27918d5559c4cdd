//! Visibility queries, the filter pipeline and per-object checks.

mod access;
mod checks;
mod filter;
mod visible;

pub use access::ReadAccess;
pub use checks::ObjectReader;
pub use filter::{
    admit, Allegiance, CategoryFilter, FilterParams, Filterable, QueryContext, RadiusSpec,
    StampTable,
};
pub use visible::{
    FeatureQuery, ProjectileQuery, UnitQuery, UnitSelector, VisibilityEngine, VisibleIds,
};
