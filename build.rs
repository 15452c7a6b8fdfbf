fn main() {
    // Only run winres on Windows targets
    #[cfg(target_os = "windows")]
    {
        // Embed version strings so the host shows a readable name for the plugin process
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "osc-action-bridge");
        res.set("FileDescription", "OSC Action Bridge - button presses to OSC");
        match res.compile() {
            Ok(_) => println!("cargo:warning=winres: version info embedded"),
            Err(e) => println!("cargo:warning=winres failed: {}", e),
        }
    }
}
