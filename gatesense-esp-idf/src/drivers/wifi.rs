use std::cell::RefCell;
use std::time::Duration;

use anyhow::bail;
use embedded_svc::wifi::{
    AccessPointConfiguration, AuthMethod, ClientConfiguration, Configuration,
};
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::WifiWait;

#[derive(Eq, PartialEq)]
pub struct WifiConfig<'a> {
    pub ap: bool,
    pub ssid: &'a str,
    pub password: &'a str,
}

impl WifiConfig<'_> {
    fn try_from_str(s: &'static str) -> Result<Self, ()> {
        let mut iter = s.split_terminator(":");
        let ap: bool = iter.next().ok_or(())?.parse().or(Err(()))?;
        let ssid: &str = iter.next().ok_or(())?;
        let password: &str = iter.next().ok_or(())?;
        Ok(WifiConfig { ap, ssid, password })
    }

    pub fn from_env_var() -> Result<Self, ()> {
        if let Some(s) = option_env!("GATESENSE_WIFI_CONFIG") {
            WifiConfig::try_from_str(s)
        } else {
            Err(())
        }
    }
}

impl Default for WifiConfig<'_> {
    fn default() -> Self {
        WifiConfig {
            ap: true,
            ssid: "gatesense",
            password: "gatesense",
        }
    }
}

pub struct EspWifi {
    esp_wifi: RefCell<esp_idf_svc::wifi::EspWifi<'static>>,
    sys_loop: EspSystemEventLoop,
}

fn to_esp_wifi_config(src: &WifiConfig) -> anyhow::Result<Configuration> {
    let &WifiConfig { ap, ssid, password } = src;

    if ssid.is_empty() {
        bail!("Wi-Fi SSID must be non-empty")
    }

    let auth_method = if password.is_empty() {
        log::info!("Wi-Fi password is empty. Authentication is disabled.");
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };

    if ap {
        let config = AccessPointConfiguration {
            ssid: ssid.into(),
            password: password.into(),
            auth_method,
            ..Default::default()
        };

        Ok(Configuration::AccessPoint(config))
    } else {
        let config = ClientConfiguration {
            ssid: ssid.into(),
            password: password.into(),
            channel: Default::default(),
            auth_method,
            ..Default::default()
        };

        Ok(Configuration::Client(config))
    }
}

impl EspWifi {
    pub fn new(modem: Modem) -> anyhow::Result<EspWifi> {
        let sys_loop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take()?;
        let esp_wifi = esp_idf_svc::wifi::EspWifi::new(modem, sys_loop.clone(), Some(nvs))?;
        Ok(Self {
            esp_wifi: RefCell::new(esp_wifi),
            sys_loop,
        })
    }

    pub fn setup(&self, config: &WifiConfig) -> anyhow::Result<()> {
        let is_access_point = config.ap;
        let config = to_esp_wifi_config(config)?;

        let mut esp_wifi = self.esp_wifi.try_borrow_mut()?;

        esp_wifi.set_configuration(&config)?;
        esp_wifi.start()?;

        let started = {
            let timeout = Duration::from_secs(20);
            let matcher = || esp_wifi.is_started().unwrap_or(false);
            WifiWait::new(&self.sys_loop)?.wait_with_timeout(timeout, matcher)
        };

        if !started {
            log::error!("Wi-Fi did not start");
        } else if !is_access_point {
            esp_wifi.connect()?;
        }

        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        if let Ok(esp_wifi) = self.esp_wifi.try_borrow() {
            esp_wifi.is_up().unwrap_or(false)
        } else {
            false
        }
    }
}
