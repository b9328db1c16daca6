/// Build the shared reqwest client. No timeout or retry policy beyond reqwest's defaults.
///
/// Panics only if the TLS backend cannot be initialised, which `reqwest::Client::new` would too.
pub fn make_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("reqwest client")
}
