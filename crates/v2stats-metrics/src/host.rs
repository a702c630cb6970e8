//! Value of the `host` label.

/// Name of the machine the exporter runs on.
pub fn hostname() -> String {
    gethostname::gethostname().to_string_lossy().into_owned()
}

/// `<hostname>:<port>`, where `port` is the stats backend's port.
pub fn host_label(port: u16) -> String {
    format!("{}:{port}", hostname())
}
