//! MILO library exports for testing

pub mod core;
pub mod oracle;
pub mod tui;

#[cfg(test)]
pub mod test_support;
