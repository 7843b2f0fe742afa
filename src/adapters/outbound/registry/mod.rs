/// Registry adapters for machine inventory
mod system_registry;

pub use system_registry::SystemRegistry;
