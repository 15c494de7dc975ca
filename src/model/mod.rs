//! Plain data types shared by the channel, the subscribers and the service.

pub mod notification;
pub mod position;
pub mod ticket;

pub use notification::*;
pub use position::*;
pub use ticket::*;
