/// Use cases module containing application business logic orchestration
mod inventory_scanner;
mod inventory_service;
mod process_orchestrator;

pub use inventory_scanner::InventoryScanner;
pub use inventory_service::InventoryService;
pub use process_orchestrator::ProcessOrchestrator;
