pub mod channel;

pub use channel::{AuthorizationStatus, ChannelLocationSource, LocationUpdate};
