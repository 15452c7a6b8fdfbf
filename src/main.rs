mod dispatcher;
mod general;
mod remote;
mod settings_store;

use std::io;
use std::process::ExitCode;

use log::{debug, info, warn};
use thiserror::Error;

use dispatcher::Dispatcher;
use general::args::parse_args;
use general::check::{print_connection_active, print_connection_closed};
use general::config::{load_config, Config};
use general::logging::setup_logger;
use remote::host_socket::{Closed, HostError, HostSocket};
use remote::osc_sender::OscSender;

#[derive(Debug, Error)]
enum BridgeError {
    #[error("logger setup failed: {0}")]
    Logger(#[from] fern::InitError),
    #[error("cannot bind OSC socket on {0}: {1}")]
    Bind(String, io::Error),
    #[error(transparent)]
    Host(#[from] HostError),
}

fn main() -> ExitCode {
    match run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            // The logger may not be up yet, so report on stderr as well.
            eprintln!("Error: {}", err);
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), BridgeError> {
    let args = parse_args();

    let (config, config_err) = match load_config(&args.config) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    setup_logger(&config.logging)?;
    if let Some(e) = config_err {
        warn!("{} ({}), using defaults", e, args.config.display());
    }
    if let Some(info) = &args.info {
        debug!("Host info: {}", info);
    }

    let mut host = HostSocket::connect(&config.host.host, args.port)?;
    host.register(&args.register_event, &args.plugin_uuid)?;
    print_connection_active(args.port);

    // One socket for the whole process; every send reuses it.
    let sender = OscSender::bind(&config.osc.bind_address)
        .map_err(|e| BridgeError::Bind(config.osc.bind_address.clone(), e))?;
    let dispatcher = Dispatcher::new(sender, &config.osc.address, config.defaults.settings());
    if let Ok(local) = dispatcher.sender().transport().local_addr() {
        info!("OSC sender bound on {}, sending on {}", local, config.osc.address);
    }

    let closed = host.run(|raw| {
        dispatcher.handle_message(raw);
    });

    let reason = match &closed {
        Closed::ByHost => "closed by host".to_string(),
        Closed::ReadError(e) => e.clone(),
    };
    print_connection_closed(&reason);
    if dispatcher.store().is_empty() {
        info!("Event loop finished ({}), no instance appeared", reason);
    } else {
        info!(
            "Event loop finished ({}), {} instance(s) configured",
            reason,
            dispatcher.store().len()
        );
    }
    Ok(())
}
