use crate::hal::status_line::Level;

pub trait Relay {
    fn set_level(&self, level: Level);
}
