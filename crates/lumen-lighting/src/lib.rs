//! Sky and block light flood fill over a chunked world.
//!
//! Edits are queued as [`LightOperation`]s and settled one per
//! [`Lighter::try_light_next`] call: a darkening pass retracts light that
//! may have lost its support, then a brightening pass re-floods from every
//! genuine source and from the darkening frontier.
#![forbid(unsafe_code)]

mod access;
mod bool3d;
mod brighten;
mod darken;
mod error;
mod lighter;
mod model;
mod operation;
mod pass;

pub use access::LightAccess;
pub use bool3d::{Bool3D, Bool3DError};
pub use error::LightingError;
pub use lighter::{LightStats, Lighter};
pub use model::{LightChannel, LightModel, MAX_LIGHT, effective_light};
pub use operation::{LightOperation, OperationKind};
