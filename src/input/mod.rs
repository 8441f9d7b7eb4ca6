pub mod capability;
pub mod frame;
pub mod poller;
pub mod source;
pub mod target;
pub mod translator;
#[cfg(test)]
pub mod translator_test;
