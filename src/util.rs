use std::process::Stdio;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

/// Desktop-browser User-Agent. The store only serves the fully hydrated web
/// app markup, server data included, to something that looks like a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

#[must_use]
pub fn init_http_client(timeout: Duration) -> reqwest::Client {
    let mut headers = HeaderMap::new();
    headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));

    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(Duration::from_secs(10))
        .timeout(timeout)
        .build()
        .expect("Unable to build HTTP client")
}

/// Opens a file or URL in the platform's default viewer.
///
/// Spawned detached with nulled stdio; a launch failure logs a warning and
/// never fails the run.
pub fn open_in_viewer(target: &str) {
    #[cfg(target_os = "macos")]
    let (cmd, args): (&str, &[&str]) = ("open", &[]);
    #[cfg(target_os = "windows")]
    let (cmd, args): (&str, &[&str]) = ("cmd", &["/C", "start", ""]);
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let (cmd, args): (&str, &[&str]) = ("xdg-open", &[]);

    match std::process::Command::new(cmd)
        .args(args)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(mut child) => {
            debug!("Opened {target} via {cmd}");
            // Reap the child off-thread to avoid leaving a zombie behind.
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        }
        Err(e) => warn!("Failed to open {target} in a viewer: {e}"),
    }
}
