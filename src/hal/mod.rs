use crate::hal::relay::Relay;
use crate::hal::status_line::StatusLine;
use crate::svc::Reporter;

pub mod relay;
pub mod status_line;

pub trait Platform {
    fn status_line(&self) -> &(dyn StatusLine + '_);
    fn relay(&self) -> &(dyn Relay + '_);
    fn reporter(&self) -> &(dyn Reporter + '_);
}
