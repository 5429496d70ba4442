pub mod band;
pub mod common;
pub mod inputs;
pub mod user;

pub use band::Band;
pub use common::{Genre, Image, Instrument, ListItem, Role, Video};
pub use inputs::{BandInput, GenreInput, ImageInput, InstrumentInput, RoleInput, UserInput, VideoInput};
pub use user::User;
