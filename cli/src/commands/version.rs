//! Version command

use crate::app::AppContext;

/// Run the version command.
pub fn run(app: &AppContext) {
    let version = env!("CARGO_PKG_VERSION");

    if app.is_json() {
        let obj = serde_json::json!({
            "version": version,
            "api_version": lxd_api::API_VERSION,
        });
        println!("{obj}");
    } else {
        println!("lxc {version} (API {})", lxd_api::API_VERSION);
    }
}
