mod message;
mod parser;

pub use message::{CardField, PlaceCard, RenderedMessage};
pub use parser::{render_message, MessageParser, PlaceCardParser};
