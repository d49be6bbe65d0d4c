pub mod events;
pub mod services;

// Re-export key types for convenience
pub use events::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use services::{
    AlertService, PositionSimulator, SimulatorConfig, SimulatorStats, TruckService,
};
