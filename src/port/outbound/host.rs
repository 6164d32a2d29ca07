//! Host environment precondition port.

/// Facts about the hosting storefront checked once at startup.
pub trait HostEnvironment {
    /// True when the commerce catalog this crate augments is installed and
    /// active. Hooks are only registered when this holds.
    fn commerce_active(&self) -> bool;
}
