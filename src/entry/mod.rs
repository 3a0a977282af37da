//! Income and expense ledgers.

mod db;
mod domain;
mod handlers;

pub use db::{create_entry, create_entry_tables, get_entries};
pub use domain::{Entry, EntryChanges, EntryId, EntryKind, NewEntry, NewEntryPayload};
pub use handlers::entry_router;
