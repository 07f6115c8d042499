use std::sync::{Arc, Mutex};

use embedded_svc::http::Method;
use embedded_svc::io::{Read, Write};
use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use gatesense::app::{SystemState, TargetState};
use gatesense::svc::Reporter;

/// HTTP face of the accessory binding: exposes the inferred state and
/// accepts target-state requests, which the main loop drains into the
/// engine once per tick.
pub struct HttpServer {
    #[allow(dead_code)]
    esp_http_server: EspHttpServer,
    system_state: Arc<Mutex<SystemState>>,
    target_request: Arc<Mutex<Option<TargetState>>>,
}

fn add_handlers(
    server: &mut EspHttpServer,
    system_state: Arc<Mutex<SystemState>>,
    target_request: Arc<Mutex<Option<TargetState>>>,
) -> anyhow::Result<()> {
    server.fn_handler("/state", Method::Get, move |request| {
        let json = system_state
            .lock()
            .ok()
            .and_then(|state| serde_json::to_vec(&*state).ok())
            .unwrap_or_default();
        let mut response = request.into_ok_response()?;
        response.write_all(&json)?;
        Ok(())
    })?;

    server.fn_handler("/target", Method::Post, move |mut request| {
        let mut buf = [0u8; 32];
        let len = request.read(&mut buf)?;

        match serde_json::from_slice::<TargetState>(&buf[..len]) {
            Ok(target) => {
                if let Ok(mut pending) = target_request.lock() {
                    // Newest request wins.
                    *pending = Some(target);
                }
                request.into_ok_response()?;
            }
            Err(_) => {
                request.into_status_response(400)?;
            }
        }

        Ok(())
    })?;

    Ok(())
}

impl HttpServer {
    pub fn new() -> anyhow::Result<Self> {
        let conf = Configuration::default();
        let mut esp_http_server = EspHttpServer::new(&conf)?;
        let system_state = Arc::new(Mutex::new(SystemState::default()));
        let target_request = Arc::new(Mutex::new(None));
        add_handlers(
            &mut esp_http_server,
            system_state.clone(),
            target_request.clone(),
        )?;
        Ok(HttpServer {
            esp_http_server,
            system_state,
            target_request,
        })
    }

    pub fn take_target_request(&self) -> Option<TargetState> {
        self.target_request
            .try_lock()
            .ok()
            .and_then(|mut pending| pending.take())
    }
}

impl Reporter for HttpServer {
    fn set_system_state(&self, state: &SystemState) {
        self.system_state
            .try_lock()
            .as_mut()
            .map(|x| {
                if x.ne(state) {
                    log::info!("system state: {state:?}");
                }

                **x = *state;
            })
            .ok();
    }
}
