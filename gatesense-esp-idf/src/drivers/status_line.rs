use esp_idf_hal::gpio::{AnyInputPin, Input, PinDriver, Pull};
use gatesense::hal::status_line::{Level, StatusLine};

pub struct EspStatusLine {
    input: PinDriver<'static, AnyInputPin, Input>,
}

impl EspStatusLine {
    pub fn new(pin: AnyInputPin) -> anyhow::Result<EspStatusLine> {
        let mut input = PinDriver::input(pin)?;
        input.set_pull(Pull::Up)?;
        Ok(Self { input })
    }
}

impl StatusLine for EspStatusLine {
    fn level(&self) -> Level {
        if self.input.is_high() {
            Level::High
        } else {
            Level::Low
        }
    }
}
