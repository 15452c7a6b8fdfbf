use std::net::UdpSocket;

use log::{debug, info, warn};

use crate::remote::events::{InboundEvent, InstanceSettings, DID_RECEIVE_SETTINGS, KEY_DOWN, WILL_APPEAR};
use crate::remote::osc_sender::{OscSender, Transport};
use crate::settings_store::SettingsStore;

/// What handling one inbound message did.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Settings from the event were stored for the context.
    Stored,
    /// The context appeared without settings and got the default tuple.
    Defaulted,
    /// One OSC packet of this many bytes was written.
    Sent(usize),
    /// `keyDown` for a context that has no settings yet.
    NoSettings,
    /// The send failed; already logged.
    SendFailed,
    /// Event kind the bridge does not handle.
    Ignored,
    /// The message was not valid event JSON.
    Malformed,
}

/// Routes host events to the settings store and the OSC sender.
pub struct Dispatcher<T: Transport = UdpSocket> {
    store: SettingsStore,
    sender: OscSender<T>,
    osc_address: String,
    defaults: InstanceSettings,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(sender: OscSender<T>, osc_address: &str, defaults: InstanceSettings) -> Self {
        Dispatcher {
            store: SettingsStore::new(),
            sender,
            osc_address: osc_address.to_string(),
            defaults,
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn sender(&self) -> &OscSender<T> {
        &self.sender
    }

    /// Parse one raw JSON message and handle it. Malformed input is logged and skipped.
    pub fn handle_message(&self, raw: &str) -> Outcome {
        match InboundEvent::parse(raw) {
            Ok(event) => self.handle_event(event),
            Err(e) => {
                warn!("Failed to unmarshal JSON: {} ({})", e, raw);
                Outcome::Malformed
            }
        }
    }

    pub fn handle_event(&self, event: InboundEvent) -> Outcome {
        match event.event.as_str() {
            KEY_DOWN => self.on_key_down(&event),
            WILL_APPEAR => self.on_will_appear(event),
            DID_RECEIVE_SETTINGS => self.on_did_receive_settings(event),
            other => {
                debug!("Unhandled event {:?} for context {:?}", other, event.context);
                Outcome::Ignored
            }
        }
    }

    fn on_key_down(&self, event: &InboundEvent) -> Outcome {
        let context = &event.context;
        let Some(settings) = self.store.get(context) else {
            info!("No settings found for context: {}", context);
            return Outcome::NoSettings;
        };

        info!(
            "Received keyDown event for context {} ({}): Triggering OSC action with {}",
            context, event.action, settings
        );
        match self.sender.send_command(&self.osc_address, &settings) {
            Ok(bytes_sent) => Outcome::Sent(bytes_sent),
            Err(e) => {
                warn!("OSC send for context {} failed: {}", context, e);
                Outcome::SendFailed
            }
        }
    }

    fn on_will_appear(&self, event: InboundEvent) -> Outcome {
        let context = event.context;
        match event.payload.settings.into_settings() {
            Some(settings) => {
                info!("Initialized settings for context {}: {}", context, settings);
                self.store.insert(&context, settings);
                Outcome::Stored
            }
            None => {
                info!("No settings found for context: {} Initializing default settings", context);
                self.store.insert(&context, self.defaults.clone());
                Outcome::Defaulted
            }
        }
    }

    fn on_did_receive_settings(&self, event: InboundEvent) -> Outcome {
        let context = event.context;
        debug!("Raw settings for context {}: {:?}", context, event.payload.settings);
        let settings = event.payload.settings.into_settings_or_zero();
        info!("Settings updated for context {}: {}", context, settings);
        self.store.insert(&context, settings);
        Outcome::Stored
    }
}
