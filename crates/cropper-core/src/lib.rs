//! Cropper Core - crop-geometry engine
//!
//! This crate provides the model behind an interactive circular image
//! cropper: a transform state driven by pan, zoom and handle-drag gestures,
//! and a renderer that turns the selected region into a new bitmap.
//!
//! UI wiring (gesture recognition, drawing the preview, frame scheduling) is
//! left to the host. The host feeds gesture deltas into a [`Cropper`], calls
//! [`Cropper::tick`] from its frame loop while animations run, and reads the
//! observables or subscribes to change notifications to redraw.
//!
//! # Example
//!
//! ```ignore
//! use cropper_core::{Bitmap, Cropper, Vec2};
//!
//! let mut cropper = Cropper::new(Bitmap::from_rgb(w, h, &rgb)?);
//! cropper.init(400.0, 800.0)?;
//! cropper.on_pan_zoom(Vec2::new(0.0, -20.0), 1.2)?;
//! let output = cropper.crop()?;
//! ```

pub mod animation;
pub mod bitmap;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod overlay;
pub mod render;
pub mod session;
pub mod state;

pub use animation::{AnimatedValue, Animation, Easing};
pub use bitmap::Bitmap;
pub use config::CropperConfig;
pub use error::CropperError;
pub use geometry::{Rect, Vec2};
pub use gesture::DragOutcome;
pub use overlay::{GuideGeometry, PreviewPlacement};
pub use render::{render_crop, InterpolationFilter};
pub use session::{CropSnapshot, Cropper, SubscriptionId};
pub use state::{CropState, Handle};
