pub mod coords;
pub mod document;
pub mod history;
pub mod search;

pub use coords::{Coords, TermScreenCoords};
pub use document::Document;
pub use history::{Edit, History};
pub use search::Matcher;
