// Passgen state managers
// Managers own stateful data: the persisted password history.

pub mod history_store;
