use std::time::Instant;

/// Facts about the running process, computed once at startup.
///
/// Shared by the landing page, health check and load generator. Only
/// `uptime()` changes over the process lifetime.
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    /// Deployed application version (`APP_VERSION`).
    pub version: String,

    /// Crate version baked in at compile time.
    pub build_version: &'static str,

    pub hostname: String,

    /// Operating system name, e.g. `linux`.
    pub platform: &'static str,

    started_at: Instant,
}

impl RuntimeInfo {
    // ---
    pub fn new(version: impl Into<String>) -> Self {
        // ---
        RuntimeInfo {
            version: version.into(),
            build_version: env!("CARGO_PKG_VERSION"),
            hostname: lookup_hostname(),
            platform: std::env::consts::OS,
            started_at: Instant::now(),
        }
    }

    /// Seconds since the process started serving.
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

/// Resolve the host name: `HOSTNAME` first (set by container runtimes),
/// then the kernel's idea of it.
fn lookup_hostname() -> String {
    // ---
    if let Ok(name) = std::env::var("HOSTNAME") {
        if !name.trim().is_empty() {
            return name.trim().to_string();
        }
    }

    os_hostname().unwrap_or_else(|| "unknown".to_string())
}

#[cfg(unix)]
fn os_hostname() -> Option<String> {
    nix::unistd::gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
}

#[cfg(not(unix))]
fn os_hostname() -> Option<String> {
    std::env::var("COMPUTERNAME").ok()
}
