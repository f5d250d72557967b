//! 3D viewport bridge for the floor-plan viewer.
//!
//! Holds what the 3D view shows and how: a massing box derived from project
//! parameters, the loaded model asset or a placeholder box standing in for
//! it, an orbit camera with preset modes, floor clipping, and a throttled
//! frame loop. Drawing the frame belongs to the host's 3D runtime.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`massing`] | Massing box from project parameters |
//! | [`mesh`] | Placeholder box mesh |
//! | [`asset`] | glTF sniffing for loaded model bytes |
//! | [`camera`] | Orbit camera and preset modes |
//! | [`throttle`] | Frame-interval throttle |
//! | [`viewport`] | Viewport state tying the above together |
//! | [`config`] | Floor height and frame interval |

pub mod asset;
pub mod camera;
pub mod config;
pub mod error;
pub mod massing;
pub mod mesh;
pub mod throttle;
pub mod viewport;

pub use asset::{AssetFormat, ModelAsset};
pub use camera::{CameraMode, OrbitCamera};
pub use config::ViewportConfig;
pub use error::AssetError;
pub use massing::{CoreRect, MassingBox, ProjectSpec, TypeProfile, loose_number};
pub use mesh::PlaceholderMesh;
pub use throttle::RenderThrottle;
pub use viewport::{ContentKind, FloorVisibility, FrameInfo, ViewContent, Viewport3d};
