pub mod memory;
pub mod records;
pub mod store;
pub mod supabase;

pub use memory::InMemoryRecordStore;
pub use records::RecordService;
pub use store::{RecordStore, SharedStore};
pub use supabase::SupabaseRecordStore;
