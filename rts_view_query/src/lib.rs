/*!
# RTS View Query

Spatial visibility queries for the unsynced read layer of an RTS client.

Scripts running on the client ask what the local camera can see: which
units, features and projectiles are in view, whether a given unit is
visible, and what lies under the mouse cursor. This crate answers those
questions over a read-only snapshot of the world, honouring the caller's
line-of-sight privileges.

## Architecture

- **World**: object arenas (units, features, projectiles), team roster
- **QuadField**: uniform grid over the map, one object list per cell
- **Quad walker**: broad-phase enumeration of cells
- **Filter pipeline**: dedup stamp, fog, icon, category, allegiance, frustum
- **VisibilityEngine**: the three `GetVisible*` queries
- **ScreenRayCaster**: minimap, object, ground and plane traces
- **UnsyncedRead**: script callouts with positional argument validation
*/

// Internal modules
mod args;
mod camera;
mod config;
mod decal;
mod engine;
mod error;
mod grid;
pub mod log;
mod query;
mod ray;
mod reader;
mod view;
mod world;

// Main viewquery namespace module
pub mod viewquery {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton and its configuration
    pub use crate::engine::Engine;
    pub use crate::config::ViewConfig;

    // Script surface
    pub use crate::reader::UnsyncedRead;
    pub use crate::args::Arg;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Argument validation helpers
    pub mod args {
        pub use crate::args::*;
    }

    // Camera, viewport and view volumes
    pub mod camera {
        pub use crate::camera::*;
    }

    // World model
    pub mod world {
        pub use crate::world::*;
    }

    // Spatial grid and walker
    pub mod grid {
        pub use crate::grid::*;
    }

    // Visibility queries and per-object checks
    pub mod query {
        pub use crate::query::*;
    }

    // Screen rays and ground traces
    pub mod ray {
        pub use crate::ray::*;
    }

    // View and minimap geometry
    pub mod view {
        pub use crate::view::*;
    }

    // Ground decals
    pub mod decal {
        pub use crate::decal::*;
    }
}

// Re-export math library at crate root
pub use glam;
