use std::time::{Duration, Instant};

use esp_idf_sys as _;
use gatesense::app::Engine;
use gatesense::svc::Clock;

use gatesense_esp_idf::drivers::wifi::WifiConfig;
use gatesense_esp_idf::platform::{BoardType, Config, PlatformImpl};

const TASK_WAKEUP_PERIOD: Duration = Duration::from_millis(20);

fn main() -> anyhow::Result<()> {
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = Config {
        wifi: WifiConfig::from_env_var().unwrap_or_default(),
        #[cfg(feature = "m5stampc3")]
        board_type: BoardType::M5StampC3,
        #[cfg(feature = "rustdevkit")]
        board_type: BoardType::RustDevKit,
    };

    log::info!("Create platform");
    let p = PlatformImpl::new(&config);

    let clock = Clock::default();
    let now = clock.now().expect("Cannot get time");

    log::info!("Create engine");
    let mut engine = Engine::new(&p, &gatesense::config::Config::default(), now)?;

    log::info!("Start loop");

    loop {
        let next_wakeup = Instant::now() + TASK_WAKEUP_PERIOD;

        {
            let now = clock.now().expect("Cannot get time");

            if let Some(target) = p.http_server().take_target_request() {
                engine.request(target, now);
            }

            engine.update(now);
        }

        if let Some(delay) = next_wakeup.checked_duration_since(Instant::now()) {
            std::thread::sleep(delay);
        } else {
            log::error!("no delay");
        }
    }
}
