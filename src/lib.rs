//! Smartcar Demo Server Library
//!
//! This library implements a small web application that walks a browser through
//! the Smartcar OAuth flow: a landing page with a connect link, the OAuth
//! callback exchange, a vehicle list, and a form that dispatches one read or
//! action request (info, location, odometer, lock, unlock) to a selected vehicle.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers for the demo flow
//! - `config` - Configuration management and environment variables
//! - `management` - Per-browser session state
//! - `server` - Router assembly and the HTTP listener
//! - `smartcar` - Smartcar OAuth and vehicle API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `views` - HTML rendering of the view models
//!
//! # Example
//!
//! ```
//! use smartcar_demo::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> smartcar_demo::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config, false).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod management;
pub mod server;
pub mod smartcar;
pub mod types;
pub mod utils;
pub mod views;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for the server plumbing
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates such as incoming requests and server startup.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Connected {} vehicles", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only used during startup, where
/// a missing credential or an unbindable port leaves nothing to recover.
/// Request handlers never call it.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, most notably failed Smartcar calls that are
/// turned into a redirect to the error page.
///
/// # Example
///
/// ```
/// warning!("Smartcar request failed while {}: {}", action, message);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
