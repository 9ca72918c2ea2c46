//! Lambda handlers that start or stop a single EC2 instance.
//!
//! Both binaries share this crate: they parse `instance_id` out of the
//! incoming event, issue one `StartInstances`/`StopInstances` call and
//! answer with a fixed `{statusCode, body}` object.

pub mod ec2;
pub mod error;
pub mod event;
pub mod handler;

pub use ec2::{InstancePower, StateChange};
pub use error::AppError;
pub use event::PowerResponse;
pub use handler::{start_instance, stop_instance, PowerAction};
