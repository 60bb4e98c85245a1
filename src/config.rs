use clap::Parser;

pub const DEFAULT_PORT: u16 = 8080;

/// Process configuration, taken from the command line.
#[derive(Debug, Parser)]
#[command(name = "pollq", about = "In-memory FIFO queue broker with HTTP long-poll reads")]
pub struct Config {
    /// Port the HTTP server listens on.
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn is_default_port(&self) -> bool {
        self.port == DEFAULT_PORT
    }
}
