//! Model collaborators shipped with the crate.

pub mod energy_balance;

pub use energy_balance::EnergyBalanceModel;
