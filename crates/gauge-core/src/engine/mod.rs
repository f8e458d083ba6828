pub mod aggregate;
pub mod dispatcher;

pub use dispatcher::Dispatcher;
