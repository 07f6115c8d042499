use std::cell::RefCell;

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use gatesense::hal::relay::Relay;
use gatesense::hal::status_line::Level;

pub struct EspRelay {
    output: RefCell<PinDriver<'static, AnyOutputPin, Output>>,
}

impl EspRelay {
    pub fn new(pin: AnyOutputPin) -> anyhow::Result<EspRelay> {
        let mut output = PinDriver::output(pin)?;
        output.set_low()?;
        Ok(Self {
            output: RefCell::new(output),
        })
    }
}

impl Relay for EspRelay {
    fn set_level(&self, level: Level) {
        let mut output = self.output.borrow_mut();
        let res = match level {
            Level::High => output.set_high(),
            Level::Low => output.set_low(),
        };
        if let Err(e) = res {
            log::error!("cannot drive relay: {e}");
        }
    }
}
