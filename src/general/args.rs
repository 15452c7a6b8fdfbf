use std::path::PathBuf;

use clap::Parser;

use crate::general::config::DEFAULT_CONFIG_PATH;

/// Arguments the control-surface host passes when it launches the plugin.
#[derive(Debug, Parser)]
#[command(name = "osc-action-bridge", version, about = "Sends OSC actions on button presses")]
pub struct PluginArgs {
    /// WebSocket port of the host
    #[arg(long)]
    pub port: u16,

    /// Unique plugin UUID used for registration
    #[arg(long = "pluginUUID")]
    pub plugin_uuid: String,

    /// Event name to register the plugin with
    #[arg(long = "registerEvent")]
    pub register_event: String,

    /// Host and device information (JSON)
    #[arg(long)]
    pub info: Option<String>,

    /// Path to the JSON config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

/// The host passes long flags with a single dash (`-port 28196`).
/// Turn those into `--port` so clap sees regular long options.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    let mut expect_value = false;
    for (i, arg) in args.into_iter().enumerate() {
        let is_flag = i > 0
            && !expect_value
            && arg.len() > 2
            && arg.starts_with('-')
            && !arg.starts_with("--")
            && arg[1..].starts_with(|c: char| c.is_ascii_alphabetic());
        if is_flag {
            expect_value = !arg.contains('=');
            out.push(format!("-{}", arg));
        } else {
            expect_value = false;
            out.push(arg);
        }
    }
    out
}

pub fn parse_args() -> PluginArgs {
    PluginArgs::parse_from(normalize_args(std::env::args()))
}
