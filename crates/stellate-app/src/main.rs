//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Stellate");

    if let Err(e) = stellate_app::App::run(stellate_app::AppConfig::default()) {
        log::error!("Stellate exited with error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
