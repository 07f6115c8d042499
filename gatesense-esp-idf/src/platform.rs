use esp_idf_hal::gpio::{InputPin, OutputPin};
use esp_idf_hal::peripherals::Peripherals;

use crate::drivers::http::HttpServer;
use crate::drivers::relay::EspRelay;
use crate::drivers::status_line::EspStatusLine;
use crate::drivers::wifi::{EspWifi, WifiConfig};
use gatesense::hal::relay::Relay;
use gatesense::hal::status_line::StatusLine;
use gatesense::hal::Platform;
use gatesense::svc::Reporter;

pub enum BoardType {
    M5StampC3,
    RustDevKit,
}

pub struct Config {
    pub wifi: WifiConfig<'static>,
    pub board_type: BoardType,
}

pub struct PlatformImpl {
    #[allow(dead_code)]
    wifi: EspWifi,
    status_line: EspStatusLine,
    relay: EspRelay,
    http_server: HttpServer,
}

impl PlatformImpl {
    pub fn new(config: &Config) -> Self {
        let peripherals = Peripherals::take().unwrap();

        let wifi = EspWifi::new(peripherals.modem).expect("Cannot create Wi-Fi");
        wifi.setup(&config.wifi).expect("Cannot setup Wi-Fi");

        let (status_pin, relay_pin) = match config.board_type {
            BoardType::M5StampC3 => (
                peripherals.pins.gpio3.downgrade_input(),
                peripherals.pins.gpio4.downgrade_output(),
            ),
            BoardType::RustDevKit => (
                peripherals.pins.gpio9.downgrade_input(),
                peripherals.pins.gpio10.downgrade_output(),
            ),
        };

        let status_line = EspStatusLine::new(status_pin).expect("Cannot setup status line");
        let relay = EspRelay::new(relay_pin).expect("Cannot setup relay");
        let http_server = HttpServer::new().expect("Cannot setup http server");

        Self {
            wifi,
            status_line,
            relay,
            http_server,
        }
    }

    pub fn http_server(&self) -> &HttpServer {
        &self.http_server
    }
}

impl Platform for PlatformImpl {
    fn status_line(&self) -> &(dyn StatusLine + '_) {
        &self.status_line
    }

    fn relay(&self) -> &(dyn Relay + '_) {
        &self.relay
    }

    fn reporter(&self) -> &(dyn Reporter + '_) {
        &self.http_server
    }
}
