pub mod events;
pub mod host_socket;
pub mod osc_codec;
pub mod osc_sender;
