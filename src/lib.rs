pub mod broker;
pub mod config;
pub mod http;
pub mod logging;
pub mod notifier;
pub mod queue;

pub use broker::{Broker, BrokerError};
pub use config::Config;
pub use notifier::Notifier;
pub use queue::FifoQueue;
