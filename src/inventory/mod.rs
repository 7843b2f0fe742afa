/// Domain layer: software records, version ordering, action state machine,
/// and the pure reconciliation and search services.
pub mod domain;
pub mod services;
