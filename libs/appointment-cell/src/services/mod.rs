pub mod ledger;
pub mod memory;
pub mod scheduling;
pub mod supabase;

pub use ledger::{AppointmentLedger, SharedLedger};
pub use memory::InMemoryAppointmentLedger;
pub use scheduling::SchedulingService;
pub use supabase::SupabaseAppointmentLedger;
