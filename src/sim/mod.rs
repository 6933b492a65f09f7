//! Destruction simulation module
//!
//! Everything that moves lives here. The module is frame-stepped and owns
//! no rendering state:
//! - Fixed per-frame units (`dt` is measured in frames)
//! - Caller-supplied RNG everywhere below the sequencer
//! - Dead entries compacted in a single pass, never mid-iteration removal

pub mod arc;
pub mod attractor;
pub mod collision;
pub mod debris;
pub mod delaunay;
pub mod effects;
pub mod field;
pub mod fragment;
pub mod sdf;
pub mod silhouette;
pub mod state;
pub mod tick;

pub use arc::{ArcBolt, ElectricalArc};
pub use attractor::{displace, orbit_floor};
pub use collision::{Aabb, point_in_triangle};
pub use debris::{Debris, DebrisPhase, DebrisProfile};
pub use delaunay::triangulate;
pub use effects::{Fireball, MiniExplosion, SmokePuff, Spark, VortexParticle, VortexSystem};
pub use field::DebrisField;
pub use fragment::{Fragment, PixelRect, fragments_from_points, max_radius, sample_points, shatter};
pub use silhouette::{PolygonSilhouette, SdfSilhouette, Silhouette};
pub use state::{ExplosionEvent, ExplosionSequencer, Stage};
