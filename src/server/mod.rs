// Server module entry point
// Listener setup, connection handling, accept loop and shutdown

pub mod connection;
pub mod listener;
mod process;
mod shutdown;
pub mod signal;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;


// Re-export commonly used types
pub use listener::create_listener;
pub use process::Server;
pub use server_loop::run_server;
pub use shutdown::Shutdown;
pub use signal::start_signal_handler;
