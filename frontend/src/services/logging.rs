use gloo::console;

/// Component-tagged console logging.
pub struct Logger;

impl Logger {
    pub fn warn_with_component(component: &str, message: &str) {
        console::warn!(format!("[{component}] {message}"));
    }

    pub fn error_with_component(component: &str, message: &str) {
        console::error!(format!("[{component}] {message}"));
    }
}
