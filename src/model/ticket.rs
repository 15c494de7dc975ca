use crate::model::Position;
use serde::{Deserialize, Serialize};

/// Receipt handed to a customer once their order has been admitted.
///
/// # Fields
/// * `position` - The ordinal position the customer waits on
/// * `item` - The canonical vocabulary entry the request resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub position: Position,
    pub item: String,
}

impl Ticket {
    pub fn new(position: Position, item: impl Into<String>) -> Self {
        Self {
            position,
            item: item.into(),
        }
    }
}
