//! WARDEN Block Ledger
//!
//! Append-only record of blocked requests for one browsing session, in
//! detection order. The single shared mutable resource in the engine:
//! mutation serializes on one lock, `count` reads an atomic index.

mod event;
mod ledger;

pub use event::BlockEvent;
pub use ledger::BlockLedger;
